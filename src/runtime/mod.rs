use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioEngine;
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_warning) = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(path) => info!("logging to {}", path.display()),
        Err(e) => eprintln!("lumina: logging disabled: {e}"),
    }
    if let Some(msg) = settings_warning {
        warn!("{msg}");
        eprintln!("lumina: {msg}");
    }

    let files: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let engine = RodioEngine::open_default(settings.audio.volume)?;
    let controller = startup::build_controller(engine, &settings, files);
    let mut app = App::new(controller, settings.controls.seek_step_ms);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("shutting down");
    run_result
}
