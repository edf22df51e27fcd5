//! Parse command: turns one free-text entry into a time record.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;

use hours_core::{CalendarDate, Client, TimeEntry, TimeEntryAssembler, TimeEntryInput, UserId};

use crate::cli::ParseArgs;
use crate::{Catalog, Config};

pub fn run<W: Write>(writer: &mut W, args: &ParseArgs, config: &Config) -> Result<()> {
    let catalog = Catalog::load(&config.catalog_path)?;
    let date = args
        .date
        .unwrap_or_else(|| CalendarDate::new(Local::now().date_naive()));
    let text = args.text.join(" ");

    let entry = parse_entry(&catalog, &config.user_id, date, &text)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entry)?)?;
    } else {
        write!(writer, "{}", format_entry(&entry))?;
    }
    Ok(())
}

/// Parses `text` for `user_id` on `date` against the catalog.
pub fn parse_entry(
    catalog: &Catalog,
    user_id: &str,
    date: CalendarDate,
    text: &str,
) -> Result<TimeEntry> {
    let user_id = UserId::new(user_id).context("invalid user_id in configuration")?;
    let assembler = TimeEntryAssembler::new(&catalog.projects, &catalog.clients);

    assembler
        .from_input(TimeEntryInput::new(user_id, date, text))
        .map_err(|err| {
            let kind = err.kind();
            anyhow::Error::new(err).context(format!("cannot parse entry [{kind}]"))
        })
}

/// Formats minutes as `1h 15m` or `45m`.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a time entry for human-readable output.
pub fn format_entry(entry: &TimeEntry) -> String {
    let mut output = String::new();

    let client = entry
        .client
        .as_ref()
        .map_or_else(|| "-".to_string(), Client::tag);
    let description = if entry.description.is_empty() {
        "-"
    } else {
        entry.description.as_str()
    };

    writeln!(output, "Date:        {}", entry.date).unwrap();
    writeln!(
        output,
        "Duration:    {} ({} min)",
        format_minutes(entry.duration),
        entry.duration
    )
    .unwrap();
    writeln!(output, "Project:     {}", entry.project.tag()).unwrap();
    writeln!(output, "Client:      {client}").unwrap();
    writeln!(output, "Description: {description}").unwrap();

    output
}
