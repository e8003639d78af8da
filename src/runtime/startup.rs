use std::path::PathBuf;

use tracing::info;

use crate::audio::PlaybackEngine;
use crate::config;
use crate::metadata::{CoverPolicy, Resolver};
use crate::player::{Controller, Playlist};

/// Build the controller around `engine` and add the files named on the command line.
pub fn build_controller<E: PlaybackEngine>(
    engine: E,
    settings: &config::Settings,
    files: Vec<PathBuf>,
) -> Controller<E> {
    let resolver = Resolver::with_policy(CoverPolicy::from(&settings.cover));
    let playlist = Playlist::new(settings.playlist.extensions.as_slice());
    let mut controller = Controller::new(engine, resolver, playlist);

    let requested = files.len();
    let added = controller.add_files(files);
    info!("startup: {added} of {requested} command-line file(s) added");
    controller
}
