use colored::Colorize;
use planka_core::planka::{
    assemble_hierarchy, find_project, transform_boards, BoardOutput,
};
use serde::Serialize;

use crate::client::PlankaClient;
use crate::prelude::{println, *};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List boards, optionally only those of one project
    #[clap(name = "list")]
    List {
        /// Project ID to filter by
        project_id: Option<String>,
    },
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    match cmd {
        Commands::List { project_id } => list_handler(project_id, global).await,
    }
}

#[derive(Debug, Serialize)]
pub struct BoardsOutput {
    pub title: String,
    pub boards: Vec<BoardOutput>,
}

/// Boards of one project, or of every project; `None` when the project is unknown
pub async fn list_boards_data(
    client: &PlankaClient,
    project_id: Option<&str>,
) -> Result<Option<BoardsOutput>> {
    let projects = assemble_hierarchy(client.fetch_projects().await?, Vec::new());

    let output = match project_id {
        Some(project_id) => find_project(&projects, project_id).map(|project| BoardsOutput {
            title: f!("Boards in Project {}", project.name),
            boards: transform_boards(&project.boards, client.base_url()),
        }),
        None => Some(BoardsOutput {
            title: "All Boards".to_string(),
            boards: transform_boards(
                projects.iter().flat_map(|project| project.boards.iter()),
                client.base_url(),
            ),
        }),
    };

    Ok(output)
}

async fn list_handler(project_id: Option<String>, global: crate::Global) -> Result<()> {
    let client = global.connect().await?;

    let Some(data) = list_boards_data(&client, project_id.as_deref()).await? else {
        let project_id = project_id.unwrap_or_default();
        println!("{}", f!("Project {project_id} not found.").red());
        return Ok(());
    };

    if global.json {
        return print_json(&data.boards);
    }

    if data.boards.is_empty() {
        println!("No boards found.");
        return Ok(());
    }

    println!("\n{}\n", data.title.bold());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Project ID".bold().cyan(),
        "URL".bold().cyan()
    ]);

    for board in &data.boards {
        table.add_row(prettytable::row![
            board.id.cyan().to_string(),
            board.name.magenta().to_string(),
            cell(board.project_id.as_deref()),
            board.url.magenta().to_string()
        ]);
    }

    table.printstd();
    Ok(())
}
