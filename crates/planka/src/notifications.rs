use colored::Colorize;
use planka_core::planka::{transform_notifications, NotificationOutput};

use crate::client::PlankaClient;
use crate::prelude::{println, *};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List all notifications
    #[clap(name = "all")]
    All,

    /// List unread notifications
    #[clap(name = "unread")]
    Unread,
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    match cmd {
        Commands::All => handler("Notifications", false, global).await,
        Commands::Unread => handler("Unread Notifications", true, global).await,
    }
}

pub async fn notifications_data(
    client: &PlankaClient,
    unread_only: bool,
) -> Result<Vec<NotificationOutput>> {
    let response = client.fetch_notifications().await?;
    Ok(transform_notifications(response, unread_only))
}

async fn handler(title: &str, unread_only: bool, global: crate::Global) -> Result<()> {
    let client = global.connect().await?;
    let notifications = notifications_data(&client, unread_only).await?;

    if global.json {
        return print_json(&notifications);
    }

    if notifications.is_empty() {
        println!("No notifications found.");
        return Ok(());
    }

    println!("\n{}\n", title.bold());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Type".bold().cyan(),
        "Read".bold().cyan(),
        "Created At".bold().cyan(),
        "Card ID".bold().cyan()
    ]);

    for notification in &notifications {
        let read = if notification.is_read { "yes" } else { "no" };
        table.add_row(prettytable::row![
            notification.id.cyan().to_string(),
            cell(notification.notification_type.as_deref()),
            read,
            cell(notification.created_at.as_deref()),
            cell(notification.card_id.as_deref())
        ]);
    }

    table.printstd();
    Ok(())
}
