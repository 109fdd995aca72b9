//! CLI Commands Listing

use anyhow::Result;
use lobbybot_commands::CommandRegistry;

use crate::terminal_output::{render_table, Column};

pub fn run() -> Result<()> {
    print!("{}", commands_table(&CommandRegistry::new()));
    Ok(())
}

fn commands_table(registry: &CommandRegistry) -> String {
    let rows: Vec<Vec<String>> = registry
        .all()
        .iter()
        .map(|def| vec![def.usage(), def.description.clone()])
        .collect();
    render_table(&[Column::left("Usage"), Column::left("Description")], &rows)
}
