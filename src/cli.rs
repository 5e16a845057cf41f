use std::{
    env,
    io::Write,
    process::{Command, Stdio},
};

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};

use monthcal::{
    calendar::{DateKey, Event},
    storage::{EventStore, config::Config},
};

pub const USAGE: &str = "Usage: monthcal [--agenda [YYYY/MM/DD]]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Default,
    Help,
    AgendaDate(NaiveDate),
}

pub fn parse_cli_mode(args: impl IntoIterator<Item = String>) -> Result<CliMode> {
    let mut agenda_date = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                        .map_err(|_| anyhow!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?,
                    None => Local::now().date_naive(),
                };
                agenda_date = Some(target_date);
            }
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(anyhow!("Unknown argument: {}", arg)),
        }
    }

    Ok(agenda_date.map_or(CliMode::Default, CliMode::AgendaDate))
}

pub fn run_agenda_mode(config: &Config, date: NaiveDate) -> Result<()> {
    let store = EventStore::hydrate(Box::new(config.file_store()));
    display_with_pager(&agenda_for(&store, date))
}

/// Lists the day's events in the order they were added, matching the TUI.
fn agenda_for(store: &EventStore, date: NaiveDate) -> String {
    format_agenda_text(date, store.lookup(&DateKey::from_date(date)))
}

fn format_agenda_text(date: NaiveDate, events: &[Event]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Agenda – {}", date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    if events.is_empty() {
        lines.push("No events scheduled.".to_string());
    } else {
        for event in events {
            lines.push(format!("- {:<6} {}", event.time, event.title));
            if !event.description.is_empty() {
                lines.push(format!("         {}", event.description));
            }
        }
    }

    lines.join("\n")
}

fn display_with_pager(text: &str) -> Result<()> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        println!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(e) => {
            tracing::debug!("Pager '{}' unavailable: {}", cmd, e);
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthcal::calendar::EventDraft;
    use monthcal::storage::MemoryStore;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn no_arguments_runs_tui() {
        assert_eq!(parse_cli_mode(args(&[])).unwrap(), CliMode::Default);
    }

    #[test]
    fn agenda_accepts_explicit_date() {
        let mode = parse_cli_mode(args(&["--agenda", "2024/03/15"])).unwrap();
        assert_eq!(mode, CliMode::AgendaDate(date(2024, 3, 15)));
    }

    #[test]
    fn agenda_without_date_uses_today() {
        let mode = parse_cli_mode(args(&["--agenda"])).unwrap();
        assert_eq!(mode, CliMode::AgendaDate(Local::now().date_naive()));
    }

    #[test]
    fn agenda_rejects_bad_date() {
        assert!(parse_cli_mode(args(&["--agenda", "15-03-2024"])).is_err());
    }

    #[test]
    fn unknown_flag_is_error() {
        assert!(parse_cli_mode(args(&["--sync"])).is_err());
    }

    #[test]
    fn agenda_text_lists_time_and_title() {
        let event = EventDraft::new("Standup", "09:00", "Daily sync").into_event(1, date(2024, 3, 15));

        let text = format_agenda_text(date(2024, 3, 15), &[event]);

        assert!(text.starts_with("Agenda – Friday, March 15, 2024"));
        assert!(text.contains("- 09:00  Standup"));
        assert!(text.contains("Daily sync"));
    }

    #[test]
    fn agenda_keeps_insertion_order_over_time_order() {
        let day = date(2024, 3, 15);
        let mut store = EventStore::hydrate(Box::new(MemoryStore::new()));
        store.append_event(DateKey::from_date(day), EventDraft::new("Dinner", "19:00", "").into_event(1, day));
        store.append_event(DateKey::from_date(day), EventDraft::new("Breakfast", "08:00", "").into_event(2, day));

        let text = agenda_for(&store, day);

        let dinner = text.find("Dinner").unwrap();
        let breakfast = text.find("Breakfast").unwrap();
        assert!(dinner < breakfast);
    }

    #[test]
    fn empty_agenda_says_so() {
        let text = format_agenda_text(date(2024, 3, 15), &[]);
        assert!(text.ends_with("No events scheduled."));
    }
}
