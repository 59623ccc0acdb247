use colored::Colorize;
use planka_core::planka::{
    find_list, prepare_create, CardCreateRequest, CardType, PlankaCard,
};
use serde::Serialize;

use super::print_not_found;
use crate::client::PlankaClient;
use crate::prelude::{println, *};

/// Create a new card in a list
#[derive(Debug, Clone, clap::Args)]
pub struct CreateOptions {
    /// List ID to create the card in
    pub list_id: String,

    /// Card name/title
    pub name: String,

    /// Card description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Position: top, bottom, or integer
    #[arg(long, short = 'p', default_value = "bottom", allow_hyphen_values = true)]
    pub position: String,

    /// Card type (project, story)
    #[arg(long = "type", short = 't', default_value = "project")]
    pub card_type: CardType,

    /// Due date (ISO-8601)
    #[arg(long)]
    pub due_date: Option<String>,

    /// Mark due date as completed
    #[arg(long)]
    pub due_completed: bool,
}

impl CreateOptions {
    fn to_request(&self) -> CardCreateRequest {
        CardCreateRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            position: Some(self.position.clone()),
            card_type: self.card_type,
            due_date: self.due_date.clone(),
            due_completed: self.due_completed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateOutput {
    pub list_name: String,
    pub card: PlankaCard,
}

/// Create the card; `None` when the list is unknown
///
/// The options are validated before any request is made.
pub async fn create_card_data(
    options: &CreateOptions,
    global: &crate::Global,
) -> Result<Option<CreateOutput>> {
    let plan = prepare_create(&options.to_request())
        .map_err(|e| Error::InvalidInput(e.to_string()))?;

    let client: PlankaClient = global.connect().await?;
    let projects = client.fetch_hierarchy().await?;

    let Some(list) = find_list(&projects, &options.list_id) else {
        return Ok(None);
    };

    let payload = plan.into_payload(list);
    log::debug!(
        "Creating card in list {} at position {}",
        list.id,
        payload.position
    );
    let card = client.create_card(&list.id, &payload).await?;

    Ok(Some(CreateOutput {
        list_name: list.display_name().to_string(),
        card,
    }))
}

pub async fn handler(options: CreateOptions, global: crate::Global) -> Result<()> {
    let Some(output) = create_card_data(&options, &global).await? else {
        print_not_found("List", &options.list_id);
        return Ok(());
    };

    if global.json {
        return print_json(&output);
    }

    println!(
        "{} {} (ID: {}) in list {}",
        "Created card".green(),
        output.card.name.bold(),
        output.card.id,
        output.list_name.bold()
    );
    Ok(())
}
