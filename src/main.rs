use tracing_subscriber::EnvFilter;

use monthcal::storage::config::Config;

mod cli;
use cli::{CliMode, parse_cli_mode, run_agenda_mode};
mod tui;
use tui::run_tui;

fn main() -> anyhow::Result<()> {
    let cli_mode = match parse_cli_mode(std::env::args().skip(1)) {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", cli::USAGE);
            return Ok(());
        }
    };

    if let CliMode::Help = cli_mode {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let config = Config::load_or_create()?;
    setup_logging(&config);

    match cli_mode {
        CliMode::AgendaDate(date) => run_agenda_mode(&config, date),
        _ => run_tui(&config),
    }
}

fn setup_logging(config: &Config) {
    let log_dir = Config::config_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "monthcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("monthcal started");
}
