//! Output models for the card detail and notification views

use serde::Serialize;

use super::attachment::extract_attachment_url;
use super::hierarchy::{Board, List};
use super::types::{
    PlankaAttachment, PlankaCardResponse, PlankaComment, PlankaCommentsResponse,
    PlankaNotificationsResponse, PlankaUser,
};

/// Web URL of a board
pub fn board_url(base_url: &str, board_id: &str) -> String {
    format!("{}/boards/{board_id}", base_url.trim_end_matches('/'))
}

/// Web URL of a card
pub fn card_url(base_url: &str, board_id: &str, card_id: &str) -> String {
    format!(
        "{}/boards/{board_id}/cards/{card_id}",
        base_url.trim_end_matches('/')
    )
}

/// Row of `boards list`
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BoardOutput {
    pub id: String,
    pub name: String,
    pub project_id: Option<String>,
    pub url: String,
}

pub fn transform_boards<'a>(
    boards: impl IntoIterator<Item = &'a Board>,
    base_url: &str,
) -> Vec<BoardOutput> {
    boards
        .into_iter()
        .map(|board| BoardOutput {
            id: board.id.clone(),
            name: board.name.clone(),
            project_id: board.project_id.clone(),
            url: board_url(base_url, &board.id),
        })
        .collect()
}

/// Row of `cards list`
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CardSummaryOutput {
    pub id: String,
    pub name: String,
    pub list_id: String,
    pub position: Option<f64>,
    pub card_type: Option<String>,
    pub due_date: Option<String>,
    pub url: String,
}

/// Cards of `list` in server order, linked through the board that owns it
pub fn transform_list_cards(list: &List, board: &Board, base_url: &str) -> Vec<CardSummaryOutput> {
    list.cards
        .iter()
        .map(|card| CardSummaryOutput {
            id: card.id.clone(),
            name: card.name.clone(),
            list_id: list.id.clone(),
            position: card.position,
            card_type: card.card_type.clone(),
            due_date: card.due_date.clone(),
            url: card_url(base_url, &board.id, &card.id),
        })
        .collect()
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AttachmentOutput {
    pub id: String,
    pub name: Option<String>,
    pub attachment_type: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentOutput {
    pub id: String,
    pub user: Option<String>,
    pub text: Option<String>,
    pub created_at: Option<String>,
}

/// Everything `cards show` displays about a card
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CardDetailOutput {
    pub id: String,
    pub url: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub board_id: Option<String>,
    pub list_id: Option<String>,
    pub list_name: Option<String>,
    pub position: Option<f64>,
    pub card_type: Option<String>,
    pub due_date: Option<String>,
    pub due_completed: bool,
    pub attachments: Vec<AttachmentOutput>,
    pub comments: Vec<CommentOutput>,
    pub comments_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_error: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl CardDetailOutput {
    /// `name (id)`, or whichever of the two is known
    pub fn list_display(&self) -> Option<String> {
        match (&self.list_name, &self.list_id) {
            (Some(name), Some(id)) => Some(format!("{name} ({id})")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(id)) => Some(id.clone()),
            (None, None) => None,
        }
    }
}

fn transform_attachment(attachment: PlankaAttachment, base_url: &str) -> AttachmentOutput {
    let url = extract_attachment_url(
        attachment.data.as_ref(),
        attachment.url.as_deref(),
        Some(base_url),
    )
    .url()
    .map(str::to_string);

    AttachmentOutput {
        id: attachment.id,
        name: attachment.name,
        attachment_type: attachment.attachment_type,
        url,
        created_at: attachment.created_at,
    }
}

fn user_label(user: &PlankaUser) -> String {
    user.name
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| user.username.clone())
        .unwrap_or_else(|| user.id.clone())
}

/// Collapse runs of whitespace, newlines included, into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn transform_comment(comment: PlankaComment, users: &[PlankaUser]) -> CommentOutput {
    let user = comment.user_id.as_ref().map(|user_id| {
        users
            .iter()
            .find(|user| &user.id == user_id)
            .map(user_label)
            .unwrap_or_else(|| user_id.clone())
    });

    CommentOutput {
        id: comment.id,
        user,
        text: comment
            .text
            .as_deref()
            .map(collapse_whitespace)
            .filter(|text| !text.is_empty()),
        created_at: comment.created_at,
    }
}

/// Convert a card response, its list name and its comments to the detail view
///
/// A failed comments fetch is carried as `comments_error` rather than failing
/// the whole view.
pub fn transform_card_detail(
    response: PlankaCardResponse,
    list_name: Option<String>,
    comments: Result<PlankaCommentsResponse, String>,
    base_url: &str,
) -> CardDetailOutput {
    let card = response.item;

    let url = card
        .board_id
        .as_deref()
        .map(|board_id| card_url(base_url, board_id, &card.id));

    let attachments = response
        .included
        .attachments
        .into_iter()
        .map(|attachment| transform_attachment(attachment, base_url))
        .collect();

    let (comments, comments_error) = match comments {
        Ok(response) => {
            let users = response.included.users;
            let comments: Vec<CommentOutput> = response
                .items
                .into_iter()
                .map(|comment| transform_comment(comment, &users))
                .collect();
            (comments, None)
        }
        Err(error) => (Vec::new(), Some(error)),
    };

    let comments_count = card.comments_total.or_else(|| {
        comments_error
            .is_none()
            .then_some(comments.len() as u64)
    });

    CardDetailOutput {
        id: card.id,
        url,
        name: card.name,
        description: card.description.filter(|text| !text.is_empty()),
        board_id: card.board_id,
        list_id: card.list_id,
        list_name,
        position: card.position,
        card_type: card.card_type,
        due_date: card.due_date,
        due_completed: card.is_due_completed.unwrap_or(false),
        attachments,
        comments,
        comments_count,
        comments_error,
        created_at: card.created_at,
        updated_at: card.updated_at,
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NotificationOutput {
    pub id: String,
    pub notification_type: Option<String>,
    pub is_read: bool,
    pub created_at: Option<String>,
    pub card_id: Option<String>,
}

/// Convert notifications, optionally keeping only unread ones
pub fn transform_notifications(
    response: PlankaNotificationsResponse,
    unread_only: bool,
) -> Vec<NotificationOutput> {
    response
        .items
        .into_iter()
        .filter(|notification| !unread_only || !notification.is_read)
        .map(|notification| NotificationOutput {
            id: notification.id,
            notification_type: notification.notification_type,
            is_read: notification.is_read,
            created_at: notification.created_at,
            card_id: notification.card_id,
        })
        .collect()
}
