//! zhixiao - Chinese/English flashcard drill
//!
//! Page through a static collection of sentences and vocabulary in the
//! terminal, or serve the same collection to a browser study page.

mod config;
mod logging;
mod models;
mod server;
mod session;
mod source;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::prelude::*;

use config::Config;
use models::{CardType, CollectionStats};
use source::CardSource;
use ui::App;

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "zhixiao")]
#[command(author, version, about = "Chinese/English flashcard drill", long_about = None)]
struct Args {
    /// Flashcard JSON file (a bare array or {"flashcards": [...]})
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Card type to start with: sentence or vocabulary
    #[arg(short, long)]
    filter: Option<CardType>,

    /// Seed the shuffle for a reproducible card order
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the study page and the /flashcards endpoint
    Serve {
        /// Address to listen on (defaults to the config value)
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// Install the bundled sample collection at the data path
    Init,
    /// Validate the data file and print per-type counts
    Check,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<()> {
    let args = Args::parse();

    if args.command.is_some() {
        logging::init_stderr()?;
    } else {
        logging::init_file(&logging::default_log_path())?;
    }

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default config");
        Config::default()
    });
    let source = CardSource::new(config.resolve_data_file(args.data));

    match args.command {
        Some(Command::Serve { addr }) => {
            let addr = addr.unwrap_or_else(|| config.server.addr.clone());
            let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
            runtime.block_on(server::run(&addr, source))
        }
        Some(Command::Init) => {
            if source.install_sample()? {
                println!("✓ Installed sample flashcards at {}", source.path().display());
            } else {
                println!("{} already exists, leaving it alone", source.path().display());
            }
            Ok(())
        }
        Some(Command::Check) => check(&source),
        None => {
            let filter = args.filter.unwrap_or(config.default_filter);
            let rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            run_tui(config, &source, filter, rng)
        }
    }
}

fn check(source: &CardSource) -> Result<()> {
    let cards = source.load()?;

    let stats = CollectionStats::from_cards(&cards);
    println!("{}", source.path().display());
    println!("  {} cards", stats.total);
    for kind in CardType::all() {
        println!("  {:>4} {}", stats.count(*kind), kind.as_str());
    }
    if stats.unrecognized > 0 {
        println!("  {:>4} with an unrecognized type (never shown)", stats.unrecognized);
    }
    Ok(())
}

fn run_tui(config: Config, source: &CardSource, filter: CardType, rng: StdRng) -> Result<()> {
    // Load before touching the terminal; a failure still opens the UI so
    // the learner sees why there is nothing to study.
    let loaded = source.load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, loaded, filter, rng);

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        app.handle_events()?;
    }
    Ok(())
}
