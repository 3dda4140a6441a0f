//! Mapping of stdin lines onto search events.

use anyhow::{bail, Context, Result};

use mapsearch::search::SearchEvent;

#[derive(Debug, PartialEq)]
pub enum Command {
    Event(SearchEvent),
    Quit,
}

/// Plain lines are the full search box contents; `:` starts a command.
pub fn parse_line(line: &str) -> Result<Command> {
    let line = line.trim_end_matches('\r');

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Event(SearchEvent::TextChanged(line.to_string())));
    };

    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("submit") | Some("s") => Ok(Command::Event(SearchEvent::Submit)),
        Some("cancel") | Some("c") => Ok(Command::Event(SearchEvent::Cancel)),
        Some("edit") | Some("e") => Ok(Command::Event(SearchEvent::BeginEditing)),
        Some("select") => {
            let row = parts.next().context("Usage: :select N")?;
            let index = row
                .parse::<usize>()
                .with_context(|| format!("Row must be a number, got {:?}", row))?;
            Ok(Command::Event(SearchEvent::Select(index)))
        }
        Some("quit") | Some("q") => Ok(Command::Quit),
        other => bail!("Unknown command :{}", other.unwrap_or("")),
    }
}
