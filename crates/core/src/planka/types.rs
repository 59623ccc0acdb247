//! Wire types for the Planka REST API
//!
//! Planka wraps single resources in `{ "item": ... }` and collections in
//! `{ "items": [...] }`, with related resources side-loaded under `included`.
//! Most fields are nullable depending on the server version, so they are
//! modelled as `Option` with `#[serde(default)]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Card kind accepted by Planka
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Project,
    Story,
}

/// Error returned when a card type literal is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Card type must be 'project' or 'story', got '{0}'.")]
pub struct CardTypeError(pub String);

impl FromStr for CardType {
    type Err = CardTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "project" => Ok(CardType::Project),
            "story" => Ok(CardType::Story),
            _ => Err(CardTypeError(value.to_string())),
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardType::Project => write!(f, "project"),
            CardType::Story => write!(f, "story"),
        }
    }
}

/// Project as returned by `GET /api/projects`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Board, side-loaded with projects or returned by `GET /api/boards/{id}`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaBoard {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// List, side-loaded with a board
///
/// Archive and trash lists carry neither a name nor a position.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaList {
    pub id: String,
    #[serde(default)]
    pub board_id: Option<String>,
    #[serde(default, rename = "type")]
    pub list_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<f64>,
}

/// Card, side-loaded with a board or returned by `GET /api/cards/{id}`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaCard {
    pub id: String,
    #[serde(default)]
    pub board_id: Option<String>,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    #[serde(default)]
    pub position: Option<f64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, alias = "isDueDateCompleted")]
    pub is_due_completed: Option<bool>,
    #[serde(default)]
    pub comments_total: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Attachment, side-loaded with a card
///
/// The shape of `data` depends on the attachment type and server version.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaAttachment {
    pub id: String,
    #[serde(default, rename = "type")]
    pub attachment_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Comment as returned by `GET /api/cards/{id}/comments`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaComment {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// User, side-loaded with comments or returned by `GET /api/users/me`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Notification as returned by `GET /api/notifications`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlankaNotification {
    pub id: String,
    #[serde(default, rename = "type")]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `POST /api/access-tokens` response
#[derive(Debug, Deserialize, Clone)]
pub struct PlankaAccessTokenResponse {
    pub item: String,
}

/// `GET /api/users/me` response
#[derive(Debug, Deserialize, Clone)]
pub struct PlankaUserResponse {
    pub item: PlankaUser,
}

/// `GET /api/projects` response
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlankaProjectsResponse {
    #[serde(default)]
    pub items: Vec<PlankaProject>,
    #[serde(default)]
    pub included: PlankaProjectsIncluded,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PlankaProjectsIncluded {
    pub boards: Vec<PlankaBoard>,
}

/// `GET /api/boards/{id}` response
#[derive(Debug, Deserialize, Clone)]
pub struct PlankaBoardResponse {
    pub item: PlankaBoard,
    #[serde(default)]
    pub included: PlankaBoardIncluded,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PlankaBoardIncluded {
    pub lists: Vec<PlankaList>,
    pub cards: Vec<PlankaCard>,
}

/// `GET /api/cards/{id}` response
#[derive(Debug, Deserialize, Clone)]
pub struct PlankaCardResponse {
    pub item: PlankaCard,
    #[serde(default)]
    pub included: PlankaCardIncluded,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PlankaCardIncluded {
    pub attachments: Vec<PlankaAttachment>,
}

/// `GET /api/cards/{id}/comments` response
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlankaCommentsResponse {
    #[serde(default)]
    pub items: Vec<PlankaComment>,
    #[serde(default)]
    pub included: PlankaUsersIncluded,
}

/// `GET /api/notifications` response
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlankaNotificationsResponse {
    #[serde(default)]
    pub items: Vec<PlankaNotification>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PlankaUsersIncluded {
    pub users: Vec<PlankaUser>,
}
