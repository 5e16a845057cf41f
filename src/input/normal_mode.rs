use chrono::Days;
use crossterm::event::KeyCode;

use crate::app::{AppCommand, AppState, Mode};
use crate::calendar::days_in_month;

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => move_days(state, -1),
        KeyCode::Char('l') | KeyCode::Right => move_days(state, 1),
        KeyCode::Char('j') | KeyCode::Down => move_days(state, 7),
        KeyCode::Char('k') | KeyCode::Up => move_days(state, -7),
        KeyCode::Char('{') => state.dispatch(AppCommand::NavigateMonth(-1)),
        KeyCode::Char('}') => state.dispatch(AppCommand::NavigateMonth(1)),
        KeyCode::Char('t') => jump_to_today(state),
        KeyCode::Char('g') => move_to_start_of_month(state),
        KeyCode::Char('G') => move_to_end_of_month(state),
        KeyCode::Char('a') | KeyCode::Enter => {
            state.dispatch(AppCommand::OpenCapture(state.selected_date));
        }
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => {
            state.show_help = true;
            state.help_scroll = 0;
        }
        _ => {}
    }
}

fn move_days(state: &mut AppState, offset: i64) {
    let days = Days::new(offset.unsigned_abs());
    let target = if offset < 0 {
        state.selected_date.checked_sub_days(days)
    } else {
        state.selected_date.checked_add_days(days)
    };

    if let Some(date) = target {
        state.select_date(date);
    }
}

fn jump_to_today(state: &mut AppState) {
    state.select_date(state.today);
}

fn move_to_start_of_month(state: &mut AppState) {
    if let Some(first) = state.display_month.first_day() {
        state.select_date(first);
    }
}

fn move_to_end_of_month(state: &mut AppState) {
    let month = state.display_month;
    if let Some(last) = month.day(days_in_month(month.year(), month.month0())) {
        state.select_date(last);
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
    state.message = None;
}
