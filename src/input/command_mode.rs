use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{AppCommand, AppState, Mode};
use crate::ui::theme::Theme;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Goto(NaiveDate),
    Today,
    NewEvent(Option<String>),
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };
    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Empty command".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "help" => Command::Help,
        "today" => Command::Today,
        "goto" => {
            if parts.len() < 2 {
                Command::Error("goto requires a date argument".to_string())
            } else if let Ok(date) = NaiveDate::parse_from_str(parts[1], "%Y-%m-%d") {
                Command::Goto(date)
            } else {
                Command::Error(format!("Invalid date format: {}", parts[1]))
            }
        }
        "new" => {
            if parts.len() < 2 {
                Command::NewEvent(None)
            } else {
                Command::NewEvent(Some(parts[1..].join(" ")))
            }
        }
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme requires a theme name".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Unknown command: {}", parts[0])),
    }
}

/// Applies a parsed command. Returns `true` when the session should end.
pub fn execute(command: Command, state: &mut AppState) -> bool {
    state.command_buffer.clear();
    state.mode = Mode::Normal;

    match command {
        Command::Quit => return true,
        Command::Goto(date) => state.select_date(date),
        Command::Today => state.select_date(state.today),
        Command::NewEvent(title) => {
            state.dispatch(AppCommand::OpenCapture(state.selected_date));
            if let (Some(form), Some(title)) = (state.capture.as_mut(), title) {
                form.title = title;
            }
        }
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => state.theme = theme,
            None => {
                state.message = Some(format!(
                    "Unknown theme '{}'. Available: {}",
                    name,
                    Theme::available_themes().join(", ")
                ));
            }
        },
        Command::Help => {
            state.show_help = true;
            state.help_scroll = 0;
        }
        Command::Error(message) => {
            tracing::debug!("Command error: {}", message);
            state.message = Some(message);
        }
    }
    false
}

/// Edits the command line; returns `true` when the session should end.
pub fn handle_key(key: KeyCode, state: &mut AppState) -> bool {
    match key {
        KeyCode::Enter => {
            let command = parse_command(&state.command_buffer);
            execute(command, state)
        }
        KeyCode::Esc => {
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            false
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
            false
        }
        KeyCode::Char(c) => {
            state.command_buffer.push(c);
            false
        }
        _ => false,
    }
}
