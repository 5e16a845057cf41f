use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use monthcal::{
    app::{AppState, Mode},
    input::{command_mode, insert_mode, normal_mode},
    storage::{config::Config, EventStore},
    ui::theme::Theme,
};

use crate::tui::presentation::ui;

pub fn run_tui(config: &Config) -> Result<()> {
    // Hydrate before the first frame so every lookup sees stored events.
    let store = EventStore::hydrate(Box::new(config.file_store()));
    let mut app = AppState::new(store)
        .with_theme(Theme::by_name_or_default(&config.ui.theme))
        .with_default_event_time(config.ui.default_event_time.clone());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("Session ended with error: {}", err);
    }
    tracing::info!("Session closed with {} stored events", app.store.event_count());

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(key.code, app)
        {
            return Ok(());
        }
    }
}

/// Routes a key press by mode. Returns `true` when the user quits.
fn handle_key(code: KeyCode, app: &mut AppState) -> bool {
    match app.mode {
        Mode::Normal => {
            if app.show_help {
                handle_help_keys(code, app);
                false
            } else if code == KeyCode::Char('q') {
                true
            } else {
                normal_mode::handle_key(code, app);
                false
            }
        }
        Mode::Insert => {
            insert_mode::handle_key(code, app);
            false
        }
        Mode::Command => command_mode::handle_key(code, app),
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}
