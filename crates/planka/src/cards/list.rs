use colored::Colorize;
use planka_core::planka::{find_list_with_parent, transform_list_cards, CardSummaryOutput};
use serde::Serialize;

use super::print_not_found;
use crate::client::PlankaClient;
use crate::prelude::{println, *};

#[derive(Debug, Serialize)]
pub struct ListCardsOutput {
    pub list_id: String,
    pub list_name: String,
    pub board_id: String,
    pub cards: Vec<CardSummaryOutput>,
}

/// Cards of a list found anywhere in the hierarchy; `None` when the list is unknown
pub async fn list_cards_data(
    client: &PlankaClient,
    list_id: &str,
) -> Result<Option<ListCardsOutput>> {
    let projects = client.fetch_hierarchy().await?;

    Ok(
        find_list_with_parent(&projects, list_id).map(|(list, board)| ListCardsOutput {
            list_id: list.id.clone(),
            list_name: list.display_name().to_string(),
            board_id: board.id.clone(),
            cards: transform_list_cards(list, board, client.base_url()),
        }),
    )
}

pub async fn handler(list_id: String, global: crate::Global) -> Result<()> {
    let client = global.connect().await?;

    let Some(data) = list_cards_data(&client, &list_id).await? else {
        print_not_found("List", &list_id);
        return Ok(());
    };

    if global.json {
        return print_json(&data);
    }

    if data.cards.is_empty() {
        println!("No cards found.");
        return Ok(());
    }

    println!("\n{}\n", f!("Cards in List: {}", data.list_name).bold());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "List ID".bold().cyan(),
        "Position".bold().cyan(),
        "URL".bold().cyan()
    ]);

    for card in &data.cards {
        table.add_row(prettytable::row![
            card.id.cyan().to_string(),
            card.name.magenta().to_string(),
            card.list_id,
            cell(card.position),
            card.url.magenta().to_string()
        ]);
    }

    table.printstd();
    Ok(())
}
