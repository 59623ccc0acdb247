use colored::Colorize;
use planka_core::planka::{assemble_hierarchy, Project};

use crate::client::PlankaClient;
use crate::prelude::{println, *};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all projects
    #[clap(name = "list")]
    List,
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    match cmd {
        Commands::List => list_handler(global).await,
    }
}

/// Projects with their boards; lists are not fetched
pub async fn list_projects_data(client: &PlankaClient) -> Result<Vec<Project>> {
    let projects = client.fetch_projects().await?;
    Ok(assemble_hierarchy(projects, Vec::new()))
}

async fn list_handler(global: crate::Global) -> Result<()> {
    let client = global.connect().await?;
    let projects = list_projects_data(&client).await?;

    if global.json {
        return print_json(&projects);
    }

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!("\n{}\n", "Projects".bold());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Boards".bold().cyan(),
        "Created At".bold().cyan()
    ]);

    for project in &projects {
        table.add_row(prettytable::row![
            project.id.cyan().to_string(),
            project.name.magenta().to_string(),
            project.boards.len().to_string(),
            cell(project.created_at.as_deref())
        ]);
    }

    table.printstd();
    Ok(())
}
