use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    panic,
    path::PathBuf,
    sync::Mutex,
    time::Instant,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wordbomb::{
    app_dirs::AppDirs,
    audio::default_audio,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::Corpora,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::{Rules, Session},
    App,
};

/// type a word containing the prompt before the bomb goes off
#[derive(Parser, Debug, Clone, Default)]
#[clap(version, about)]
pub struct Cli {
    /// prompt file, one fragment per line; (notes) and [notes] are ignored
    #[clap(short = 'p', long, value_name = "FILE")]
    prompts: Option<PathBuf>,

    /// dictionary file, one word per line
    #[clap(short = 'w', long, value_name = "FILE")]
    words: Option<PathBuf>,

    /// seconds on the fuse for each prompt
    #[clap(short = 't', long, value_name = "SECS")]
    time: Option<u64>,

    /// number of lives per game
    #[clap(short = 'l', long)]
    lives: Option<u32>,

    /// frames per second
    #[clap(long)]
    fps: Option<u32>,

    /// disable sound
    #[clap(short = 'm', long)]
    mute: bool,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layers the command line over the stored config.
    fn apply(&self, cfg: &mut Config) {
        if let Some(path) = &self.prompts {
            cfg.prompts_path = Some(path.clone());
        }
        if let Some(path) = &self.words {
            cfg.words_path = Some(path.clone());
        }
        if let Some(secs) = self.time {
            cfg.initial_time_ms = secs.saturating_mul(1000);
        }
        if let Some(lives) = self.lives {
            cfg.max_lives = lives;
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        if self.mute {
            cfg.sound = false;
        }
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = FileConfigStore::new();
    let mut cfg = store.load();
    cli.apply(&mut cfg);
    if let Err(e) = cfg.validate() {
        Cli::command().error(ErrorKind::ValueValidation, e).exit();
    }
    if cli.save_config {
        if let Err(e) = store.save(&cfg) {
            warn!(error = %e, path = %store.path().display(), "could not save config");
        }
    }

    let corpora = match Corpora::load(cfg.prompts_path.as_deref(), cfg.words_path.as_deref()) {
        Ok(corpora) => corpora,
        Err(e) => Cli::command().error(ErrorKind::Io, e).exit(),
    };
    info!(
        prompts = corpora.prompts.len(),
        words = corpora.words.len(),
        "corpora loaded"
    );

    let session = Session::new(Rules::from(&cfg), corpora, default_audio(cfg.sound));
    let mut app = App::new(session);

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_state();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, cfg.fps);

    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    restore_terminal_state()?;
    terminal.show_cursor()?;

    result
}

fn restore_terminal_state() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    fps: u32,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::from_fps(fps));
    let mut last = Instant::now();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            app.layout(area);
            f.render_widget(&*app, area);
        })?;

        let events = runner.next_tick();
        app.handle_events(&events);
        if app.should_quit() {
            info!("quit");
            return Ok(());
        }

        let now = Instant::now();
        app.tick(now - last)?;
        last = now;
    }
}
