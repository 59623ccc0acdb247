//! Card create and update reconciliation
//!
//! Turns sparse user input into the payloads and ordered operations the shell
//! sends to Planka. Every literal is validated here, before any request is made.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::datetime::{parse_iso_datetime, DateTimeError};
use super::hierarchy::{Card, List};
use super::position::{parse_position, resolve_position, Position, PositionError};
use super::types::CardType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("Use either --description or --clear-description.")]
    ConflictingDescription,

    #[error("Use either --due-date or --clear-due-date.")]
    ConflictingDueDate,

    #[error(transparent)]
    InvalidDateTime(#[from] DateTimeError),

    #[error(transparent)]
    InvalidPosition(#[from] PositionError),
}

/// Raw options of `cards update`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub due_date: Option<String>,
    pub clear_due_date: bool,
    pub due_completed: Option<bool>,
    pub list_id: Option<String>,
    pub position: Option<String>,
    pub card_type: Option<CardType>,
}

/// Field changes for `PATCH /api/cards/{id}`
///
/// Only touched fields are serialized. `Some(None)` is an explicit clear and
/// serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_due_completed: Option<bool>,
}

impl FieldPatch {
    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Names of the fields this patch changes, in payload order
    pub fn touched_fields(&self) -> Vec<&'static str> {
        [
            self.name.as_ref().map(|_| "name"),
            self.description.as_ref().map(|_| "description"),
            self.card_type.as_ref().map(|_| "type"),
            self.due_date.as_ref().map(|_| "dueDate"),
            self.is_due_completed.as_ref().map(|_| "isDueCompleted"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A requested move, before the target list is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
    /// `None` moves within the card's current list
    pub list_id: Option<String>,
    /// `None` means top
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePlan {
    /// Nothing recognised was requested; no request must be made
    NoOp,
    Apply {
        movement: Option<MoveIntent>,
        fields: Option<FieldPatch>,
    },
}

/// Validate and normalize a card update request
pub fn reconcile_update(request: &CardUpdateRequest) -> Result<UpdatePlan, ReconcileError> {
    if request.description.is_some() && request.clear_description {
        return Err(ReconcileError::ConflictingDescription);
    }
    if request.due_date.is_some() && request.clear_due_date {
        return Err(ReconcileError::ConflictingDueDate);
    }

    let due_date = match request.due_date.as_deref() {
        Some(value) => Some(Some(parse_iso_datetime(value)?)),
        None if request.clear_due_date => Some(None),
        None => None,
    };
    let position = parse_position(request.position.as_deref())?;

    let description = match &request.description {
        Some(text) => Some(Some(text.clone())),
        None if request.clear_description => Some(None),
        None => None,
    };

    let fields = FieldPatch {
        name: request.name.clone(),
        description,
        card_type: request.card_type,
        due_date,
        is_due_completed: request.due_completed,
    };

    let movement = if request.list_id.is_some() || position.is_some() {
        Some(MoveIntent {
            list_id: request.list_id.clone(),
            position,
        })
    } else {
        None
    };

    let fields = (!fields.is_empty()).then_some(fields);

    if movement.is_none() && fields.is_none() {
        return Ok(UpdatePlan::NoOp);
    }

    Ok(UpdatePlan::Apply { movement, fields })
}

/// Move payload for `PATCH /api/cards/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMove {
    pub list_id: String,
    /// Only sent when the target list lives on another board
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
    pub position: f64,
}

/// Resolve a move intent against the live target list
pub fn resolve_move(card: &Card, intent: &MoveIntent, target_list: &List) -> CardMove {
    let position = intent.position.unwrap_or(Position::Top);
    let siblings = target_list.sibling_positions(Some(&card.id));
    let board_id = target_list
        .board_id
        .clone()
        .filter(|board_id| card.board_id.as_ref() != Some(board_id));

    CardMove {
        list_id: target_list.id.clone(),
        board_id,
        position: resolve_position(position, &siblings),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardOperation {
    Move(CardMove),
    Update(FieldPatch),
}

/// Order the remote operations of an update: the move, then the field update
pub fn sequence_operations(
    movement: Option<CardMove>,
    fields: Option<FieldPatch>,
) -> Vec<CardOperation> {
    movement
        .map(CardOperation::Move)
        .into_iter()
        .chain(fields.map(CardOperation::Update))
        .collect()
}

/// Raw options of `cards create`
#[derive(Debug, Clone, PartialEq)]
pub struct CardCreateRequest {
    pub name: String,
    pub description: Option<String>,
    pub position: Option<String>,
    pub card_type: CardType,
    pub due_date: Option<String>,
    pub due_completed: bool,
}

/// A validated create request, waiting for its target list
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePlan {
    pub name: String,
    pub description: Option<String>,
    pub position: Position,
    pub card_type: CardType,
    pub due_date: Option<DateTime<Utc>>,
    pub due_completed: bool,
}

/// Body of `POST /api/lists/{id}/cards`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardPayload {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub position: f64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub is_due_completed: bool,
}

/// Validate a create request; the position defaults to the bottom of the list
pub fn prepare_create(request: &CardCreateRequest) -> Result<CreatePlan, ReconcileError> {
    let due_date = request
        .due_date
        .as_deref()
        .map(parse_iso_datetime)
        .transpose()?;
    let position = parse_position(request.position.as_deref())?.unwrap_or(Position::Bottom);

    Ok(CreatePlan {
        name: request.name.clone(),
        description: request.description.clone(),
        position,
        card_type: request.card_type,
        due_date,
        due_completed: request.due_completed,
    })
}

impl CreatePlan {
    pub fn into_payload(self, target_list: &List) -> CreateCardPayload {
        let siblings = target_list.sibling_positions(None);

        CreateCardPayload {
            card_type: self.card_type,
            position: resolve_position(self.position, &siblings),
            name: self.name,
            description: self.description,
            due_date: self.due_date,
            is_due_completed: self.due_completed,
        }
    }
}
