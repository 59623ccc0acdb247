/// Planka-related transformations
///
/// This module contains pure functions for working with the Planka REST API.
/// All functions are free of network I/O and testable with fixture data.
pub mod attachment;
pub mod datetime;
pub mod hierarchy;
pub mod output;
pub mod position;
pub mod reconcile;
pub mod types;

pub use attachment::{extract_attachment_url, normalize_url, AttachmentUrl, UrlSource};
pub use datetime::{parse_iso_datetime, DateTimeError};
pub use hierarchy::{
    assemble_board, assemble_hierarchy, find_board, find_list, find_list_with_parent,
    find_project, Board, Card, List, Project,
};
pub use output::{
    board_url, card_url, collapse_whitespace, transform_boards, transform_card_detail,
    transform_list_cards, transform_notifications, AttachmentOutput, BoardOutput,
    CardDetailOutput, CardSummaryOutput, CommentOutput, NotificationOutput,
};
pub use position::{parse_position, resolve_position, Position, PositionError, POSITION_GAP};
pub use reconcile::{
    prepare_create, reconcile_update, resolve_move, sequence_operations, CardCreateRequest,
    CardMove, CardOperation, CardUpdateRequest, CreateCardPayload, CreatePlan, FieldPatch,
    MoveIntent, ReconcileError, UpdatePlan,
};
pub use types::*;
