use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use connect_four::config::AppConfig;
use connect_four::session::{PlayerTwoMode, Session};
use connect_four::ui::{headless, App};

/// Play Connect Four in the terminal, against a friend or the computer.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Who plays Player 2 (overrides the config file)
    #[arg(long, value_enum)]
    player_two: Option<PlayerTwoMode>,

    /// Seed for the computer's random fallback (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Read moves from stdin and print the board as text instead of the TUI
    #[arg(long)]
    headless: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "off")]
    log_level: LevelFilter,

    /// Write logs to this file instead of stderr (recommended with the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    initialize_logging(cli.log_level, cli.log_file.as_deref())?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(mode) = cli.player_two {
        config.players.player_two = mode;
    }
    if let Some(seed) = cli.seed {
        config.ai.seed = Some(seed);
    }

    info!(
        player_two = config.players.player_two.label(),
        headless = cli.headless,
        "starting"
    );

    if cli.headless {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        headless::run_headless(Session::from_config(&config), stdin.lock(), &mut stdout)
            .context("headless session failed")?;
        return Ok(());
    }

    run_tui(&config).context("terminal UI failed")
}

fn run_tui(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app errored
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

fn initialize_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(log_file.is_none())
                .with_writer(writer),
        )
        .with(filter)
        .init();

    Ok(())
}
