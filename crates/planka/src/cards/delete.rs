use colored::Colorize;
use dialoguer::Confirm;

use super::print_not_found;
use crate::prelude::{println, *};

/// Delete a card
#[derive(Debug, Clone, clap::Args)]
pub struct DeleteOptions {
    /// Card ID to delete
    pub card_id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

fn confirm(prompt: String) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

pub async fn handler(options: DeleteOptions, global: crate::Global) -> Result<()> {
    let client = global.connect().await?;

    let Some(response) = client.fetch_card(&options.card_id).await else {
        print_not_found("Card", &options.card_id);
        return Ok(());
    };
    let card = response.item;

    if !options.yes && !confirm(f!("Delete card '{}' ({})?", card.name, card.id))? {
        println!("Cancelled.");
        return Ok(());
    }

    client.delete_card(&card.id).await?;
    println!("{} {}", "Deleted card".green(), options.card_id);
    Ok(())
}
