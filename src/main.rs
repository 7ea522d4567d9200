use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use skyward::audio;
use skyward::build_info;
use skyward::core::constants::TICK_INTERVAL_MS;
use skyward::input::{map_key, map_mouse, InputAction};
use skyward::ui::backdrop::Backdrop;
use skyward::utils::persistence::{data_dir, JsonScoreStore};
use skyward::{logging, Session, Toggles};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Flap between the pipes for as long as you can
#[derive(Parser)]
#[command(author, version = build_info::VERSION_LINE, about, long_about = None)]
struct Args {
    /// Start with hard mode enabled
    #[arg(long)]
    hard: bool,

    /// Start with the night sky
    #[arg(long)]
    night: bool,

    /// Start with sound off
    #[arg(long)]
    mute: bool,

    /// Seed for pipe placement, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the score and log files (default ~/.skyward)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

type Game = Session<StdRng, JsonScoreStore>;

fn resolve_data_dir(requested: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = requested {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Warning: could not create {}: {}", dir.display(), e);
        }
        return dir;
    }

    match data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: {}; keeping scores in the current directory", e);
            PathBuf::from(".")
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let dir = resolve_data_dir(args.data_dir);
    logging::init(args.verbose, &dir);
    log::info!("skyward {}", build_info::VERSION_LINE);

    let (game_rng, scenery_rng) = match args.seed {
        Some(seed) => {
            log::info!("using seed {}", seed);
            (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            )
        }
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    };

    let toggles = Toggles {
        hard_mode: args.hard,
        night_mode: args.night,
        sound_enabled: !args.mute,
    };
    let store = JsonScoreStore::in_dir(&dir);
    log::debug!("score file at {}", store.path().display());
    let mut session = Session::new(game_rng, store, toggles);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session, scenery_rng);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        log::error!("terminal loop failed: {}", e);
    }
    log::info!("exiting with best score {}", session.best_score());
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Game,
    mut scenery_rng: StdRng,
) -> io::Result<()> {
    let mut backdrop = Backdrop::new(&mut scenery_rng, session.toggles().night_mode);
    let mut sink = audio::default_sink();
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| skyward::ui::draw(frame, session, &backdrop))?;

        // Handle input
        if event::poll(Duration::from_millis(TICK_INTERVAL_MS))? {
            let action = match event::read()? {
                Event::Key(key) => map_key(key, session.state()),
                Event::Mouse(mouse) => map_mouse(mouse, session.state()),
                _ => InputAction::Ignore,
            };
            match action {
                InputAction::Quit => return Ok(()),
                InputAction::Command(command) => {
                    let cues = session.handle(command);
                    sink.play_all(&cues);
                }
                InputAction::Ignore => {}
            }
        }

        // Advance the simulation by the real time that passed
        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_millis() as u64;
        last_frame = now;

        let before = session.engine().tick_count();
        let events = session.advance(dt_ms);
        let ticks = session.engine().tick_count().saturating_sub(before);
        backdrop.advance(&mut scenery_rng, ticks, session.tier());
        sink.play_all(&session.cues_for(&events));

        backdrop.set_night(&mut scenery_rng, session.toggles().night_mode);
    }
}
