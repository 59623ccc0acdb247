//! login, logout and status

use colored::Colorize;
use serde::Serialize;

use crate::prelude::{println, *};

/// Store credentials in the credential file
#[derive(Debug, Clone, clap::Args)]
pub struct LoginOptions {
    /// Planka base URL
    #[arg(long, short = 'u')]
    pub url: String,

    /// Planka username
    #[arg(long, short = 'n')]
    pub username: String,

    /// Planka password
    #[arg(long, short = 'p')]
    pub password: String,
}

/// Connection status as printed by `status --json`
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub url: String,
    pub id: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub fn login(options: LoginOptions, global: crate::Global) -> Result<()> {
    let store = global.store()?;
    let url = options.url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(Error::InvalidInput("The Planka URL must not be empty.".to_string()).into());
    }

    store.save(url, &options.username, &options.password)?;

    println!(
        "{} {}",
        "Saved credentials to".green(),
        store.path().display()
    );
    Ok(())
}

pub fn logout(global: crate::Global) -> Result<()> {
    let store = global.store()?;

    if !store.remove()? {
        println!("No stored credentials found at {}", store.path().display());
        return Ok(());
    }

    println!("{} Removed stored credentials.", "Logged out.".green());
    Ok(())
}

pub async fn status_data(global: &crate::Global) -> Result<StatusOutput> {
    let client = global.connect().await?;
    let user = client.fetch_me().await?;

    Ok(StatusOutput {
        url: client.base_url().to_string(),
        id: user.id,
        username: user.username,
        name: user.name,
        email: user.email,
    })
}

pub async fn status(global: crate::Global) -> Result<()> {
    let status = status_data(&global).await?;

    if global.json {
        return print_json(&status);
    }

    println!(
        "{} Logged in as: {} (ID: {})",
        "Connected!".green(),
        cell(status.username.as_deref()).bold(),
        status.id
    );
    if let Some(name) = status.name.as_deref().filter(|name| !name.is_empty()) {
        println!("Name: {}", name);
    }
    println!("Email: {}", cell(status.email.as_deref()));
    Ok(())
}
