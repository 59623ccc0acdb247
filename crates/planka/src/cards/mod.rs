pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

use colored::Colorize;

use crate::prelude::{println, *};

/// Card commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all cards in a list
    #[clap(name = "list")]
    List {
        /// List ID
        list_id: String,
    },

    /// Show details for a card
    #[clap(name = "show")]
    Show {
        /// Card ID
        card_id: String,
    },

    /// Create a new card in a list
    #[clap(name = "create")]
    Create(create::CreateOptions),

    /// Update an existing card
    #[clap(name = "update")]
    Update(update::UpdateOptions),

    /// Delete a card
    #[clap(name = "delete")]
    Delete(delete::DeleteOptions),
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    match cmd {
        Commands::List { list_id } => list::handler(list_id, global).await,
        Commands::Show { card_id } => show::handler(card_id, global).await,
        Commands::Create(options) => create::handler(options, global).await,
        Commands::Update(options) => update::handler(options, global).await,
        Commands::Delete(options) => delete::handler(options, global).await,
    }
}

/// Report an id that did not resolve; not an error
fn print_not_found(kind: &str, id: &str) {
    println!("{}", f!("{kind} {id} not found.").red());
}
