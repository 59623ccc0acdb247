use colored::Colorize;
use planka_core::planka::{assemble_board, Board};

use crate::client::PlankaClient;
use crate::prelude::{println, *};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all lists in a board
    #[clap(name = "list")]
    List {
        /// Board ID
        board_id: String,
    },
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    match cmd {
        Commands::List { board_id } => list_handler(board_id, global).await,
    }
}

/// The board with its lists, if it is one of the accessible boards
pub async fn board_lists_data(client: &PlankaClient, board_id: &str) -> Result<Option<Board>> {
    let projects = client.fetch_projects().await?;
    if !projects
        .included
        .boards
        .iter()
        .any(|board| board.id == board_id)
    {
        return Ok(None);
    }

    let detail = client.fetch_board(board_id).await?;
    Ok(Some(assemble_board(detail)))
}

async fn list_handler(board_id: String, global: crate::Global) -> Result<()> {
    let client = global.connect().await?;

    let Some(board) = board_lists_data(&client, &board_id).await? else {
        println!("{}", f!("Board {board_id} not found.").red());
        return Ok(());
    };

    if global.json {
        return print_json(&board.lists);
    }

    if board.lists.is_empty() {
        println!("No lists found.");
        return Ok(());
    }

    println!("\n{}\n", f!("Lists in Board: {}", board.name).bold());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Board ID".bold().cyan(),
        "Position".bold().cyan(),
        "Cards".bold().cyan()
    ]);

    for list in &board.lists {
        table.add_row(prettytable::row![
            list.id.cyan().to_string(),
            list.display_name().magenta().to_string(),
            board.id,
            cell(list.position),
            list.cards.len().to_string()
        ]);
    }

    table.printstd();
    Ok(())
}
