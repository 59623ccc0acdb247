use std::path::PathBuf;
use std::process::ExitCode;

use crate::prelude::{eprintln, println, *};
use clap::{CommandFactory, Parser};
use colored::Colorize;

mod auth;
mod boards;
mod cards;
mod client;
mod config;
mod error;
mod lists;
mod notifications;
mod prelude;
mod projects;

#[derive(Debug, clap::Parser)]
#[command(
    name = "planka",
    author,
    version,
    about = "Planka CLI",
    long_about = "Manage Planka projects, boards, lists, cards and notifications from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Option<SubCommands>,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Credential file (default: <config dir>/planka/credentials.env)
    #[clap(
        long,
        env = "PLANKA_CREDENTIALS_FILE",
        global = true,
        value_name = "PATH"
    )]
    credentials_file: Option<PathBuf>,

    /// Output as JSON
    #[clap(long, global = true)]
    json: bool,

    /// Whether to display additional information.
    #[clap(long, env = "PLANKA_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn store(&self) -> Result<config::CredentialStore> {
        config::CredentialStore::resolve(self.credentials_file.clone())
    }

    /// Load credentials and log in
    pub async fn connect(&self) -> Result<client::PlankaClient> {
        let store = self.store()?;
        let credentials = store.load()?;
        if self.verbose {
            println!("Connecting to {} as {}...", credentials.url, credentials.username);
        }
        client::PlankaClient::connect(&credentials).await
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Manage projects
    #[command(subcommand)]
    Projects(projects::Commands),

    /// Manage boards
    #[command(subcommand)]
    Boards(boards::Commands),

    /// Manage lists
    #[command(subcommand)]
    Lists(lists::Commands),

    /// Manage cards
    #[command(subcommand)]
    Cards(cards::Commands),

    /// Manage notifications
    #[command(subcommand)]
    Notifications(notifications::Commands),

    /// Store credentials in the credential file
    Login(auth::LoginOptions),

    /// Delete the stored credential file
    Logout,

    /// Check the connection and print the current user
    Status,
}

/// Deepest command group named on the command line
///
/// Walks the non-flag arguments down the subcommand tree and stops at the
/// first name that is not a known subcommand.
fn enclosing_command(args: &[String]) -> clap::Command {
    let mut command = App::command();
    for arg in args.iter().skip(1).filter(|arg| !arg.starts_with('-')) {
        match command.find_subcommand(arg) {
            Some(subcommand) => command = subcommand.clone(),
            None => break,
        }
    }
    command
}

async fn run(command: SubCommands, global: Global) -> Result<()> {
    match command {
        SubCommands::Projects(cmd) => projects::run(cmd, global).await,
        SubCommands::Boards(cmd) => boards::run(cmd, global).await,
        SubCommands::Lists(cmd) => lists::run(cmd, global).await,
        SubCommands::Cards(cmd) => cards::run(cmd, global).await,
        SubCommands::Notifications(cmd) => notifications::run(cmd, global).await,
        SubCommands::Login(options) => auth::login(options, global),
        SubCommands::Logout => auth::logout(global),
        SubCommands::Status => auth::status(global).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    env_logger::init();
    color_eyre::install()?;

    let app = match App::try_parse() {
        Ok(app) => app,
        Err(err) if err.kind() == clap::error::ErrorKind::InvalidSubcommand => {
            let rendered = err.to_string();
            if let Some(summary) = rendered.lines().next() {
                eprintln!("{}", summary);
            }
            let args: Vec<String> = std::env::args().collect();
            enclosing_command(&args)
                .print_help()
                .map_err(|e| eyre!("Failed to print help: {}", e))?;
            return Ok(ExitCode::from(2));
        }
        Err(err) => err.exit(),
    };

    let Some(command) = app.command else {
        App::command()
            .print_help()
            .map_err(|e| eyre!("Failed to print help: {}", e))?;
        return Ok(ExitCode::SUCCESS);
    };

    match run(command, app.global).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            log::debug!("{err:?}");
            println!("{} {}", "Error:".red().bold(), err);
            Ok(ExitCode::FAILURE)
        }
    }
}
