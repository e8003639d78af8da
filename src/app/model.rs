//! Application model: the controller plus what the terminal UI adds on top
//! (list cursor and the "open" prompt).

use std::path::PathBuf;

use tracing::{info, warn};

use crate::audio::PlaybackEngine;
use crate::player::Controller;

/// The main application model.
pub struct App<E: PlaybackEngine> {
    pub controller: Controller<E>,
    pub selected: usize,
    /// Text typed into the "open" prompt; `None` when the prompt is closed.
    pub open_prompt: Option<String>,
    pub seek_step_ms: u64,
    last_current: Option<usize>,
}

impl<E: PlaybackEngine> App<E> {
    pub fn new(controller: Controller<E>, seek_step_ms: u64) -> Self {
        Self {
            controller,
            selected: 0,
            open_prompt: None,
            seek_step_ms,
            last_current: None,
        }
    }

    /// Return true if the playlist contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.controller.is_empty()
    }

    /// Move selection to the next track, stopping at the last one.
    pub fn next(&mut self) {
        if self.selected + 1 < self.controller.len() {
            self.selected += 1;
        }
    }

    /// Move selection to the previous track, stopping at the first one.
    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.controller.len().saturating_sub(1);
    }

    /// Play the entry under the cursor.
    pub fn play_selected(&mut self) {
        if !self.has_tracks() {
            return;
        }
        if let Err(e) = self.controller.play_selected(self.selected) {
            warn!("{e}");
        }
    }

    /// Move the cursor onto the playing track whenever playback moves to a new one.
    pub fn follow_playback(&mut self) {
        let current = self.controller.current_index();
        if current != self.last_current {
            if let Some(i) = current {
                self.selected = i;
            }
            self.last_current = current;
        }
    }

    /// Step forward, stopping at the end of the track when its length is known.
    pub fn seek_forward(&mut self) {
        let pos = self.controller.position();
        let mut target = pos.position_ms.saturating_add(self.seek_step_ms);
        if pos.duration_ms > 0 {
            target = target.min(pos.duration_ms);
        }
        self.controller.seek(target);
    }

    pub fn seek_backward(&mut self) {
        let target = self
            .controller
            .position()
            .position_ms
            .saturating_sub(self.seek_step_ms);
        self.controller.seek(target);
    }

    /// Open the prompt used to add files.
    pub fn enter_open_prompt(&mut self) {
        self.open_prompt = Some(String::new());
    }

    pub fn cancel_open_prompt(&mut self) {
        self.open_prompt = None;
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(p) = self.open_prompt.as_mut() {
            p.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.open_prompt.as_mut() {
            p.pop();
        }
    }

    /// Close the prompt and add the typed path. Returns how many entries were added.
    pub fn submit_open_prompt(&mut self) -> usize {
        let Some(text) = self.open_prompt.take() else {
            return 0;
        };
        let text = text.trim();
        if text.is_empty() {
            return 0;
        }
        let added = self.controller.add_files([expand_home(text)]);
        info!("open: {added} file(s) added from {text:?}");
        added
    }
}

/// Expand a leading `~/` against `$HOME`.
pub(crate) fn expand_home(text: &str) -> PathBuf {
    match (text.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(text),
    }
}
