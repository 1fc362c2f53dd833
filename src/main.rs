use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use snakify::config::{
    BoardConfig, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_CELL_SIZE, DEFAULT_TICK_RATE,
    THEME_DEFAULT,
};
use snakify::game::{Control, Session};
use snakify::grid::Grid;
use snakify::input::InputHandler;
use snakify::terminal_runtime::TerminalSession;
use snakify::{headless, logging, renderer};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in pixels; must be a multiple of the cell size.
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    board_width: u32,

    /// Board height in pixels; must be a multiple of the cell size.
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    board_height: u32,

    /// Edge length of one grid cell in pixels.
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    cell_size: u32,

    /// Simulation steps per second.
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Read one line of commands per tick from stdin and print JSON snapshots.
    #[arg(long)]
    headless: bool,

    /// Directory for the log file.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn board_config(&self) -> BoardConfig {
        BoardConfig {
            board_width: self.board_width,
            board_height: self.board_height,
            cell_size: self.cell_size,
            tick_rate: self.tick_rate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.board_config();
    let grid = config.grid().context("invalid board configuration")?;

    let log_dir = cli.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    let _log_guard = logging::init(&log_dir)
        .with_context(|| format!("failed to initialise logging in {}", log_dir.display()))?;

    let mut session = match cli.seed {
        Some(seed) => Session::with_seed(grid, seed),
        None => Session::new(grid),
    };
    info!(?config, seed = ?cli.seed, headless = cli.headless, "starting");

    if cli.headless {
        let frames = headless::run(&mut session, io::stdin().lock(), io::stdout().lock())?;
        info!(frames, "headless run finished");
        return Ok(());
    }

    run(&mut session, grid, &config)
}

/// Fixed-rate loop: drain input, step once, draw, then wait for the next tick.
fn run(session: &mut Session, grid: Grid, config: &BoardConfig) -> Result<()> {
    let mut terminal = TerminalSession::enter().context("failed to set up the terminal")?;
    let mut input = InputHandler::new();
    let tick_interval = config.tick_interval();
    let mut next_tick = Instant::now();

    loop {
        let inputs = input.drain()?;
        if session.tick(inputs) == Control::Quit {
            info!(score = session.score, "quit");
            break;
        }

        let snapshot = session.snapshot();
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &snapshot, grid, &THEME_DEFAULT))?;

        next_tick += tick_interval;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            // Fell behind; resume pacing from now instead of bursting.
            next_tick = now;
        }
    }

    Ok(())
}
