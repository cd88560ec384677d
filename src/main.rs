use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use cpu_tictactoe::ai::Difficulty;
use cpu_tictactoe::config::AppConfig;
use cpu_tictactoe::game::Mark;
use cpu_tictactoe::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Tic-Tac-Toe against the CPU.
#[derive(Parser)]
#[command(name = "cpu_tictactoe", about = "Play Tic-Tac-Toe against a minimax CPU")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "tictactoe.toml")]
    config: PathBuf,

    /// Override difficulty: easy or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Override your side: X or O (O lets the CPU open)
    #[arg(long, value_parser = parse_mark)]
    human: Option<Mark>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    match s {
        "x" | "X" => Ok(Mark::X),
        "o" | "O" => Ok(Mark::O),
        other => Err(format!("unknown side '{other}' (expected 'X' or 'O')")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(difficulty) = cli.difficulty {
        config.game.difficulty = difficulty;
    }
    if let Some(human) = cli.human {
        config.game.human_mark = human;
    }

    init_tracing(&config)?;
    info!(
        difficulty = config.game.difficulty.name(),
        human = %config.game.human_mark,
        "starting"
    );

    run(&config).context("terminal UI failed")
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.logging.file)
        .with_context(|| format!("creating log file {}", config.logging.file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(config: &AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
