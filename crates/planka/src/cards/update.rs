//! Update card fields and move cards between lists

use colored::Colorize;
use planka_core::planka::{
    assemble_board, find_list, reconcile_update, resolve_move, sequence_operations, Card,
    CardOperation, CardType, CardUpdateRequest, List, MoveIntent, PlankaCard, UpdatePlan,
};

use super::print_not_found;
use crate::client::{CardWriter, PlankaClient};
use crate::prelude::{println, *};

/// Update an existing card
#[derive(Debug, Clone, clap::Args)]
pub struct UpdateOptions {
    /// Card ID to update
    pub card_id: String,

    /// New card name
    #[arg(long)]
    pub name: Option<String>,

    /// New card description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Clear the description
    #[arg(long)]
    pub clear_description: bool,

    /// Position: top, bottom, or integer
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    pub position: Option<String>,

    /// Move to a new list
    #[arg(long)]
    pub list_id: Option<String>,

    /// Card type (project, story)
    #[arg(long = "type", short = 't')]
    pub card_type: Option<CardType>,

    /// Due date (ISO-8601)
    #[arg(long)]
    pub due_date: Option<String>,

    /// Clear the due date
    #[arg(long)]
    pub clear_due_date: bool,

    /// Mark due date as completed
    #[arg(long, overrides_with = "no_due_completed")]
    pub due_completed: bool,

    /// Mark due date as not completed
    #[arg(long, overrides_with = "due_completed")]
    pub no_due_completed: bool,
}

impl UpdateOptions {
    fn to_request(&self) -> CardUpdateRequest {
        let due_completed = match (self.due_completed, self.no_due_completed) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        CardUpdateRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            clear_description: self.clear_description,
            due_date: self.due_date.clone(),
            clear_due_date: self.clear_due_date,
            due_completed,
            list_id: self.list_id.clone(),
            position: self.position.clone(),
            card_type: self.card_type,
        }
    }
}

#[derive(Debug)]
pub enum UpdateOutcome {
    /// No option was given; nothing was sent
    NoChanges,
    CardNotFound,
    ListNotFound(String),
    /// A reposition was asked for a card that sits in no list
    NoCurrentList,
    Updated(Card),
}

/// Apply operations in order, stopping at the first failure
///
/// Returns the card as echoed by the last successful write.
pub async fn apply_operations<W: CardWriter>(
    writer: &W,
    card_id: &str,
    operations: Vec<CardOperation>,
) -> Result<Option<PlankaCard>> {
    let mut last = None;

    for operation in operations {
        let card = match &operation {
            CardOperation::Move(movement) => writer.move_card(card_id, movement).await?,
            CardOperation::Update(fields) => writer.update_card(card_id, fields).await?,
        };
        last = Some(card);
    }

    Ok(last)
}

/// The list a move lands in, with its current cards
async fn resolve_target_list(
    client: &PlankaClient,
    card: &Card,
    intent: &MoveIntent,
) -> Result<Option<List>> {
    if let Some(list_id) = &intent.list_id {
        let projects = client.fetch_hierarchy().await?;
        return Ok(find_list(&projects, list_id).cloned());
    }

    let (Some(board_id), Some(list_id)) = (&card.board_id, &card.list_id) else {
        return Ok(None);
    };
    let board = assemble_board(client.fetch_board(board_id).await?);
    Ok(board.lists.into_iter().find(|list| &list.id == list_id))
}

/// Update card data - validates locally, then moves and updates
///
/// A move and a field update are two requests. The move goes first; when it
/// fails the field update is not attempted, and a failed field update does
/// not undo the move.
pub async fn update_card_data(
    options: &UpdateOptions,
    global: &crate::Global,
) -> Result<UpdateOutcome> {
    let plan = reconcile_update(&options.to_request())
        .map_err(|e| Error::InvalidInput(e.to_string()))?;

    let UpdatePlan::Apply { movement, fields } = plan else {
        return Ok(UpdateOutcome::NoChanges);
    };

    let client = global.connect().await?;
    let Some(response) = client.fetch_card(&options.card_id).await else {
        return Ok(UpdateOutcome::CardNotFound);
    };
    let card = Card::from(response.item);

    let card_move = match movement {
        Some(intent) => match resolve_target_list(&client, &card, &intent).await? {
            Some(target) => Some(resolve_move(&card, &intent, &target)),
            None => {
                return Ok(match intent.list_id.or_else(|| card.list_id.clone()) {
                    Some(list_id) => UpdateOutcome::ListNotFound(list_id),
                    None => UpdateOutcome::NoCurrentList,
                });
            }
        },
        None => None,
    };

    if let Some(fields) = &fields {
        log::debug!("Updating fields {:?}", fields.touched_fields());
    }

    let operations = sequence_operations(card_move, fields);
    let updated = apply_operations(&client, &card.id, operations).await?;

    Ok(UpdateOutcome::Updated(
        updated.map(Card::from).unwrap_or(card),
    ))
}

pub async fn handler(options: UpdateOptions, global: crate::Global) -> Result<()> {
    match update_card_data(&options, &global).await? {
        UpdateOutcome::NoChanges => println!("{}", "No updates provided.".yellow()),
        UpdateOutcome::CardNotFound => print_not_found("Card", &options.card_id),
        UpdateOutcome::ListNotFound(list_id) => print_not_found("List", &list_id),
        UpdateOutcome::NoCurrentList => println!(
            "{}",
            f!("Card {} is not in a list; use --list-id to move it.", options.card_id).red()
        ),
        UpdateOutcome::Updated(card) => {
            if global.json {
                return print_json(&card);
            }
            println!(
                "{} {} (ID: {})",
                "Updated card".green(),
                card.name.bold(),
                card.id
            );
        }
    }

    Ok(())
}
