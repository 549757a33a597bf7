use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    event::{
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use balloon_pop::{App, AudioManager, GameConfig, MonotonicClock, Session};

/// Pop rising balloons before they float away
#[derive(Debug, Parser)]
#[command(name = "balloon-pop", version, about)]
struct Args {
    /// Playfield width in world units
    #[arg(long, default_value_t = 400)]
    width: i32,

    /// Playfield height in world units
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Seed for reproducible balloon and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Disable sound effects
    #[arg(long)]
    mute: bool,

    /// Directory holding shoot.wav, pop.wav and powerup.wav
    #[arg(long, default_value = "assets/sounds")]
    sounds_dir: PathBuf,

    /// Log file; the terminal itself is used by the game
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    init_logging(&args)?;

    let config = GameConfig::with_playfield(args.width, args.height);
    let session = Session::new(config, args.seed).wrap_err("invalid game configuration")?;
    let audio = if args.mute {
        AudioManager::silent()
    } else {
        AudioManager::load_or_silent(&args.sounds_dir)
    };

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!(supports_keyboard_enhancement, "terminal capabilities");

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(session, MonotonicClock::new(), audio, args.fps).run(&mut terminal);

    // Cleanup runs before the loop's result is returned
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }

    terminal.show_cursor()?;

    result
}

/// Sends tracing output to the log file, filtered by `RUST_LOG` (default `info`)
fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .wrap_err_with(|| format!("cannot create log file {}", args.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
