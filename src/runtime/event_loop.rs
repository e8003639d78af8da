use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::PlaybackEngine;
use crate::config;
use crate::ui;

/// Main terminal event loop: applies engine events, draws, and handles input.
/// Returns `Ok(())` when the user quits.
pub fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll = Duration::from_millis(settings.audio.poll_interval_ms);

    loop {
        // Engine events first, in the order the engine emitted them.
        app.controller.process_engine_events();
        app.follow_playback();

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns true when the app should quit.
pub(crate) fn handle_key_event<E: PlaybackEngine>(key: KeyEvent, app: &mut App<E>) -> bool {
    if app.open_prompt.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_open_prompt(),
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => {
                app.submit_open_prompt();
            }
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('o') => app.enter_open_prompt(),
        KeyCode::Enter => app.play_selected(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.controller.toggle_play_pause(),
        KeyCode::Char('s') => app.controller.stop(),
        KeyCode::Char('l') | KeyCode::Char('n') => app.controller.next(),
        KeyCode::Char('h') | KeyCode::Char('b') => app.controller.previous(),
        KeyCode::Right => app.seek_forward(),
        KeyCode::Left => app.seek_backward(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        _ => {}
    }

    false
}
