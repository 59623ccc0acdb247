use colored::Colorize;
use planka_core::planka::{assemble_board, transform_card_detail, CardDetailOutput};

use super::print_not_found;
use crate::client::PlankaClient;
use crate::prelude::{println, *};

/// Card detail with attachments and comments; `None` when the card is unknown
///
/// Failing to load the comments or the list name does not fail the view.
pub async fn show_card_data(
    client: &PlankaClient,
    card_id: &str,
) -> Result<Option<CardDetailOutput>> {
    let Some(response) = client.fetch_card(card_id).await else {
        return Ok(None);
    };

    let comments = client
        .fetch_card_comments(card_id)
        .await
        .map_err(|e| e.to_string());

    let list_name = match (&response.item.board_id, &response.item.list_id) {
        (Some(board_id), Some(list_id)) => match client.fetch_board(board_id).await {
            Ok(detail) => assemble_board(detail)
                .lists
                .into_iter()
                .find(|list| &list.id == list_id)
                .and_then(|list| list.name),
            Err(e) => {
                log::debug!("Could not resolve the list name of card {card_id}: {e}");
                None
            }
        },
        _ => None,
    };

    Ok(Some(transform_card_detail(
        response,
        list_name,
        comments,
        client.base_url(),
    )))
}

fn field_row(table: &mut prettytable::Table, label: &str, value: String) {
    table.add_row(prettytable::row![label.bold().cyan(), value]);
}

pub fn display_card(card: &CardDetailOutput) {
    println!(
        "\n{} {}\n",
        "Card:".bold(),
        card.name.bright_white().bold()
    );

    let mut table = new_table();
    field_row(&mut table, "ID", card.id.clone());
    field_row(&mut table, "URL", cell(card.url.as_deref()));
    field_row(&mut table, "Name", card.name.clone());
    field_row(&mut table, "Description", cell(card.description.as_deref()));
    field_row(&mut table, "Board ID", cell(card.board_id.as_deref()));
    field_row(&mut table, "List", cell(card.list_display()));
    field_row(&mut table, "Position", cell(card.position));
    field_row(&mut table, "Type", cell(card.card_type.as_deref()));
    field_row(&mut table, "Due Date", cell(card.due_date.as_deref()));
    let due_completed = if card.due_completed { "yes" } else { "no" };
    field_row(&mut table, "Due Completed", due_completed.to_string());
    field_row(&mut table, "Attachments", card.attachments.len().to_string());
    let comments = match &card.comments_error {
        Some(error) => f!("Error: {error}"),
        None => cell(card.comments_count),
    };
    field_row(&mut table, "Comments", comments);
    field_row(&mut table, "Created At", cell(card.created_at.as_deref()));
    field_row(&mut table, "Updated At", cell(card.updated_at.as_deref()));
    table.printstd();

    if !card.attachments.is_empty() {
        println!("\n{}\n", "Attachments".bold());

        let mut attachments = new_table();
        attachments.add_row(prettytable::row![
            "ID".bold().cyan(),
            "Name".bold().cyan(),
            "Type".bold().cyan(),
            "URL".bold().cyan(),
            "Created At".bold().cyan()
        ]);
        for attachment in &card.attachments {
            attachments.add_row(prettytable::row![
                attachment.id,
                cell(attachment.name.as_deref()),
                cell(attachment.attachment_type.as_deref()),
                cell(attachment.url.as_deref()),
                cell(attachment.created_at.as_deref())
            ]);
        }
        attachments.printstd();
    }

    if !card.comments.is_empty() {
        println!("\n{}\n", "Comments".bold());

        let mut comments = new_table();
        comments.add_row(prettytable::row![
            "ID".bold().cyan(),
            "User".bold().cyan(),
            "Text".bold().cyan(),
            "Created At".bold().cyan()
        ]);
        for comment in &card.comments {
            comments.add_row(prettytable::row![
                comment.id,
                cell(comment.user.as_deref()),
                cell(comment.text.as_deref()),
                cell(comment.created_at.as_deref())
            ]);
        }
        comments.printstd();
    }
}

pub async fn handler(card_id: String, global: crate::Global) -> Result<()> {
    let client = global.connect().await?;

    let Some(card) = show_card_data(&client, &card_id).await? else {
        print_not_found("Card", &card_id);
        return Ok(());
    };

    if global.json {
        return print_json(&card);
    }

    display_card(&card);
    Ok(())
}
