use clap::Parser;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{error, info};
use ratatui::backend::CrosstermBackend;
use snake::app::runner::{run, MonotonicClock};
use snake::constants::{FRAME_SLEEP_MS, MIN_TERMINAL_COLS, MIN_TERMINAL_ROWS};
use snake::input::KeyboardInput;
use snake::ui::{setup_or_restore, TerminalRenderer};
use snake::{logger, App, BoundaryPolicy, EngineRules, FileStore};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "snake", version, about = "Snake in the terminal")]
struct Args {
    /// Directory for settings, scores and the log file (default: ~/.snake)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Rule preset
    #[arg(long, default_value = "classic", value_parser = ["classic", "premium", "mobile"])]
    rules: String,

    /// Wrap around the field edges instead of ending the game
    #[arg(long)]
    wrap: bool,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = logger::parse_level(&args.log_level)
        .ok_or_else(|| format!("unknown log level: {}", args.log_level))?;
    let mut rules = EngineRules::by_name(&args.rules)
        .ok_or_else(|| format!("unknown rule preset: {}", args.rules))?;
    if args.wrap {
        rules.boundary = BoundaryPolicy::Wrap;
    }

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => FileStore::default_dir()?,
    };
    let store = FileStore::new(&data_dir)?;
    let log_path = logger::init(store.dir(), level)?;
    info!(
        "snake {} starting: rules={} boundary={:?} data={}",
        env!("CARGO_PKG_VERSION"),
        args.rules,
        rules.boundary,
        data_dir.display()
    );

    let (cols, rows) = crossterm::terminal::size()?;
    if cols < MIN_TERMINAL_COLS || rows < MIN_TERMINAL_ROWS {
        error!("terminal too small: {}x{}", cols, rows);
        eprintln!(
            "Terminal too small: {}x{} (need at least {}x{}).",
            cols, rows, MIN_TERMINAL_COLS, MIN_TERMINAL_ROWS
        );
        std::process::exit(1);
    }

    let clock = MonotonicClock::new();
    let mut app = match args.seed {
        Some(seed) => App::with_seed(Arc::new(store), rules, 0, seed),
        None => App::new(Arc::new(store), rules, 0),
    };

    // Put the terminal back, then a short notice instead of the panic text
    let notice = logger::crash_notice(&log_path);
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        error!("panic: {}", panic_info);
        eprintln!("{notice}");
    }));

    let mut renderer = setup_or_restore(
        || {
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            let mut renderer = TerminalRenderer::new(CrosstermBackend::new(stdout))?;
            renderer.terminal_mut().hide_cursor()?;
            Ok(renderer)
        },
        restore_terminal,
    )?;

    let result = run(
        &mut app,
        &mut renderer,
        &mut KeyboardInput::new(),
        &clock,
        Duration::from_millis(FRAME_SLEEP_MS),
    );

    // Cleanup terminal
    disable_raw_mode()?;
    renderer.terminal_mut().backend_mut().execute(LeaveAlternateScreen)?;
    renderer.terminal_mut().show_cursor()?;

    if let Err(e) = result {
        error!("front end failed: {e}");
        eprintln!("Error: {e} (see {})", log_path.display());
        return Err(e.into());
    }

    info!("exiting, best score {}", app.ledger.high_score());
    println!("Thanks for playing! Best score: {}", app.ledger.high_score());

    Ok(())
}
