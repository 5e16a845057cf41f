use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use monthcal::app::{AppState, Mode};
use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[1]);

    let title = Paragraph::new(format!("monthcal - {:?} Mode", app.mode))
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    calendar_views::month::render(f, app, content_chunks[0]);
    calendar_views::event_list::render(f, app, content_chunks[1]);

    let status_text = if matches!(app.mode, Mode::Command) {
        app.command_buffer.clone()
    } else if let Some(message) = &app.message {
        message.clone()
    } else {
        format!("Events: {} | Press 'q' to quit, '?' for help", app.store.event_count())
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.capture.is_some() {
        dialogs::event_form::render(f, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use monthcal::{
        app::AppCommand,
        calendar::EventDraft,
        storage::{EventStore, MemoryStore},
    };
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn new_app() -> AppState {
        let mut app = AppState::new(EventStore::hydrate(Box::new(MemoryStore::new())));
        app.select_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        app
    }

    #[test]
    fn renders_month_title_and_weekdays() {
        let app = new_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("March 2024"));
        assert!(text.contains("Sun"));
        assert!(text.contains("Sat"));
    }

    #[test]
    fn renders_events_for_selected_day() {
        let mut app = new_app();
        app.dispatch(AppCommand::OpenCapture(app.selected_date));
        app.dispatch(AppCommand::SubmitEvent(EventDraft::new("Standup", "09:00", "")));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| ui(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Standup"));
        assert!(text.contains("09:00"));
    }

    #[test]
    fn renders_capture_form_when_open() {
        let mut app = new_app();
        app.dispatch(AppCommand::OpenCapture(app.selected_date));
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| ui(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("New Event"));
    }
}
