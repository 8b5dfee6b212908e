use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jailgame_core::{GameConfig, GameSession, LoopControl, RulesetKind};
use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod assets;
mod tui;

/// Frame period of the main loop (60 Hz).
const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RulesetArg {
    /// Panels, gang, businesses, bank and calendar
    Full,
    /// Click to buy; owned territories pay tax every second
    TaxOnly,
}

impl From<RulesetArg> for RulesetKind {
    fn from(arg: RulesetArg) -> Self {
        match arg {
            RulesetArg::Full => RulesetKind::Full,
            RulesetArg::TaxOnly => RulesetKind::TaxOnly,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Buy Europe one country at a time", long_about = None)]
struct Args {
    /// Background map image (scaled to 800x600)
    #[arg(long, default_value = "europe_map.png")]
    map: PathBuf,

    /// Rule variant to play
    #[arg(long, value_enum, default_value_t = RulesetArg::Full)]
    ruleset: RulesetArg,

    /// JSON game config; replaces the built-in ruleset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file. Without it the terminal UI discards logs.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run without a terminal UI
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode (600 frames = 10 s of game time)
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Headless: print the final render snapshot as JSON
    #[arg(long)]
    dump_snapshot: bool,
}

fn init_logger(args: &Args) -> Result<()> {
    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp(None);

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !args.headless {
        // stderr would draw over the alternate screen
        builder.target(env_logger::Target::Pipe(Box::new(std::io::sink())));
    }

    builder.init();
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GameConfig::for_ruleset(args.ruleset.into())),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args)?;

    log::info!("Starting jailgame...");

    let config = load_config(&args)?;
    let map = assets::load_map(&args.map)?;
    log::info!(
        "Loaded map {} ({:?} ruleset, {} territories)",
        args.map.display(),
        config.ruleset,
        config.territories.len()
    );

    let session = GameSession::new(config);
    if args.headless {
        run_headless(session, args.frames, args.dump_snapshot)
    } else {
        run_tui(session, map)
    }
}

/// Steps the session on a simulated 60 Hz clock, without sleeping.
fn run_headless(mut session: GameSession, frames: u32, dump_snapshot: bool) -> Result<()> {
    let mut wall = Duration::ZERO;
    for _ in 0..frames {
        session.update(wall);
        wall += FRAME;
    }

    let state = session.state();
    log::info!(
        "Finished {} frames: money ${}, {} owned, date {}",
        frames,
        state.money,
        state.owned_count(),
        state.date
    );

    if dump_snapshot {
        let json = session
            .snapshot(wall)
            .to_json()
            .context("failed to serialize snapshot")?;
        println!("{json}");
    }
    Ok(())
}

fn run_tui(mut session: GameSession, map: image::RgbaImage) -> Result<()> {
    let mut tui = tui::TuiSystem::new(map)?;
    let start = Instant::now();

    'frames: loop {
        let frame_start = Instant::now();
        let wall = start.elapsed();

        for event in tui.poll_events()? {
            if session.handle_event(event, wall) == LoopControl::Exit {
                break 'frames;
            }
        }

        session.update(wall);

        if let Err(e) = tui.render(&session.snapshot(wall)) {
            log::warn!("Skipped frame: {e:#}");
        }

        if let Some(rest) = FRAME.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    log::info!("Quit at {}", session.state().date);
    Ok(())
}

