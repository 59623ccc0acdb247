pub use crate::error::Error;

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Context, OptionExt, Result};
pub use std::format as f;

pub fn new_table() -> prettytable::Table {
    let mut table = prettytable::Table::new();

    let format = prettytable::format::FormatBuilder::new()
        .padding(1, 1)
        .build();

    table.set_format(format);

    table
}

/// Table cell for an optional value, `-` when absent or empty
pub fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

/// Print `data` as pretty JSON
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json_output =
        serde_json::to_string_pretty(data).map_err(|e| eyre!("Failed to serialize output: {}", e))?;
    println!("{}", json_output);
    Ok(())
}
