use std::fs;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use super::*;
use crate::audio::fake::{Call, FakeEngine};
use crate::audio::{EngineEvent, MediaStatus};
use crate::metadata::{CoverPolicy, CoverSource, Resolver, SUPPORTED_EXTENSIONS};

fn controller() -> Controller<FakeEngine> {
    Controller::new(
        FakeEngine::default(),
        Resolver::with_policy(CoverPolicy::default()),
        Playlist::new(&SUPPORTED_EXTENSIONS),
    )
}

fn controller_with(n: usize) -> Controller<FakeEngine> {
    let mut c = controller();
    let paths: Vec<String> = (0..n).map(|i| format!("/music/track{i}.mp3")).collect();
    assert_eq!(c.add_files(paths), n);
    c
}

fn paths(c: &Controller<FakeEngine>) -> Vec<PathBuf> {
    c.playlist().entries().iter().map(|e| e.path.clone()).collect()
}

/// Let the fake engine finish the current track and feed the events back.
fn finish_track(c: &mut Controller<FakeEngine>) {
    c.engine_mut().finish_track();
    c.process_engine_events();
}

#[test]
fn add_files_filters_unsupported_and_keeps_order() {
    let mut c = controller();
    assert_eq!(c.add_files(["a.mp3", "b.txt", "c.flac"]), 2);
    assert_eq!(paths(&c), vec![PathBuf::from("a.mp3"), PathBuf::from("c.flac")]);
}

#[test]
fn add_files_is_case_insensitive_and_allows_duplicates() {
    let mut c = controller();
    c.add_files(["x/A.MP3", "x/b.Wav", "x/A.MP3", "x/noext", "x/d.m4a", "x/e.OGG"]);
    assert_eq!(
        paths(&c),
        vec![
            PathBuf::from("x/A.MP3"),
            PathBuf::from("x/b.Wav"),
            PathBuf::from("x/A.MP3"),
            PathBuf::from("x/d.m4a"),
            PathBuf::from("x/e.OGG"),
        ]
    );
}

#[test]
fn add_files_appends_after_existing_entries() {
    let mut c = controller();
    c.add_files(["one.mp3"]);
    c.add_files(["two.ogg", "three.doc"]);
    assert_eq!(paths(&c), vec![PathBuf::from("one.mp3"), PathBuf::from("two.ogg")]);
}

#[test]
fn add_files_lists_entries_by_file_stem_when_untagged() {
    let mut c = controller();
    c.add_files(["/x/My Song.mp3"]);
    assert_eq!(c.playlist().entries()[0].display, "My Song");
}

#[test]
fn playlist_accepts_configured_extensions_with_or_without_dot() {
    let p = Playlist::new(&[".OPUS", " mp3 ", ""]);
    assert!(p.is_supported(std::path::Path::new("a.opus")));
    assert!(p.is_supported(std::path::Path::new("a.MP3")));
    assert!(!p.is_supported(std::path::Path::new("a.flac")));
    assert!(!p.is_supported(std::path::Path::new("a")));
}

#[test]
fn starts_idle() {
    let c = controller_with(2);
    assert_eq!(c.state(), PlayerState::Idle);
    assert_eq!(c.current_index(), None);
    assert!(!c.is_playing());
    assert!(c.track_info().is_none());
}

#[test]
fn play_selected_loads_then_plays() {
    let mut c = controller_with(3);
    c.play_selected(1).unwrap();

    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.state(), PlayerState::Playing);
    assert_eq!(
        c.engine().calls,
        vec![
            Call::Stop,
            Call::SetSource(PathBuf::from("/music/track1.mp3")),
            Call::Play,
        ]
    );
    let info = c.track_info().unwrap();
    assert_eq!(info.title, "track1");
    assert!(info.cover.is_placeholder());
}

#[test]
fn play_selected_out_of_range_is_rejected_without_side_effects() {
    let mut c = controller_with(2);
    assert_eq!(
        c.play_selected(2),
        Err(PlayerError::IndexOutOfRange { index: 2, len: 2 })
    );
    assert_eq!(c.current_index(), None);
    assert!(c.engine().calls.is_empty());
}

#[test]
fn toggle_twice_from_idle_loads_first_then_pauses() {
    let mut c = controller_with(3);
    c.toggle_play_pause();
    assert_eq!(c.current_index(), Some(0));
    assert_eq!(c.state(), PlayerState::Playing);

    c.engine_mut().advance_to(12_000);
    c.process_engine_events();
    c.engine_mut().clear_calls();

    c.toggle_play_pause();
    assert_eq!(c.state(), PlayerState::Paused);
    assert_eq!(c.engine().calls, vec![Call::Pause]);
    assert_eq!(c.engine().position_ms, 12_000);
    assert_eq!(c.current_index(), Some(0));
}

#[test]
fn toggle_resumes_without_reloading() {
    let mut c = controller_with(2);
    c.play_selected(1).unwrap();
    c.toggle_play_pause();
    c.engine_mut().clear_calls();

    c.toggle_play_pause();
    assert_eq!(c.engine().calls, vec![Call::Play]);
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn toggle_with_empty_playlist_stays_idle() {
    let mut c = controller();
    c.toggle_play_pause();
    assert_eq!(c.state(), PlayerState::Idle);
    assert!(!c.is_playing());
    assert_eq!(c.engine().calls, vec![Call::Play]);
}

#[test]
fn stop_keeps_current_and_toggle_resumes_same_track() {
    let mut c = controller_with(3);
    c.play_selected(2).unwrap();
    c.stop();
    assert_eq!(c.current_index(), Some(2));
    assert_eq!(c.state(), PlayerState::Loaded);
    c.engine_mut().clear_calls();

    c.toggle_play_pause();
    assert_eq!(c.current_index(), Some(2));
    assert_eq!(c.engine().calls, vec![Call::Play]);
}

#[test]
fn next_advances_and_is_noop_at_end() {
    let mut c = controller_with(2);
    c.play_selected(0).unwrap();
    c.next();
    assert_eq!(c.current_index(), Some(1));
    assert_eq!(c.engine().source, Some(PathBuf::from("/music/track1.mp3")));
    c.engine_mut().clear_calls();

    c.next();
    assert_eq!(c.current_index(), Some(1));
    assert!(c.engine().calls.is_empty());
    assert_eq!(c.state(), PlayerState::Playing);
}

#[test]
fn next_without_current_starts_at_first_track() {
    let mut c = controller_with(2);
    c.next();
    assert_eq!(c.current_index(), Some(0));
    assert!(c.is_playing());
}

#[test]
fn previous_retreats_and_is_noop_at_start() {
    let mut c = controller_with(3);
    c.play_selected(1).unwrap();
    c.previous();
    assert_eq!(c.current_index(), Some(0));
    c.engine_mut().clear_calls();

    c.previous();
    assert_eq!(c.current_index(), Some(0));
    assert!(c.engine().calls.is_empty());
}

#[test]
fn previous_without_current_does_nothing() {
    let mut c = controller_with(2);
    c.previous();
    assert_eq!(c.current_index(), None);
    assert!(c.engine().calls.is_empty());
}

#[test]
fn end_of_media_walks_to_the_last_track_then_stops() {
    for len in 1..=4 {
        for start in 0..len {
            let mut c = controller_with(len);
            c.play_selected(start).unwrap();
            for _ in 0..(len - 1 - start) {
                finish_track(&mut c);
                assert!(c.is_playing());
            }
            assert_eq!(c.current_index(), Some(len - 1));

            finish_track(&mut c);
            assert_eq!(c.current_index(), Some(len - 1));
            assert!(!c.is_playing());
            assert_eq!(c.state(), PlayerState::Loaded);
        }
    }
}

#[test]
fn end_of_media_at_last_track_does_not_wrap() {
    let mut c = controller_with(2);
    c.play_selected(1).unwrap();
    c.engine_mut().clear_calls();
    c.on_end_of_media();
    assert!(c.engine().calls.is_empty());
    assert_eq!(c.current_index(), Some(1));
}

#[test]
fn engine_events_are_mirrored_into_position() {
    let mut c = controller_with(1);
    c.play_selected(0).unwrap();
    c.process_engine_events();
    assert_eq!(
        c.position(),
        PlaybackPosition {
            position_ms: 0,
            duration_ms: 180_000
        }
    );

    c.handle_engine_event(EngineEvent::PositionChanged(4_321));
    c.handle_engine_event(EngineEvent::DurationChanged(9_000));
    assert_eq!(c.position().position_ms, 4_321);
    assert_eq!(c.position().duration_ms, 9_000);
}

#[test]
fn invalid_media_status_is_not_fatal() {
    let mut c = controller_with(2);
    c.play_selected(0).unwrap();
    c.on_media_status_changed(MediaStatus::InvalidMedia);
    c.on_media_status_changed(MediaStatus::Loaded);
    assert_eq!(c.current_index(), Some(0));
}

#[test]
fn seek_forwards_to_engine_unvalidated() {
    let mut c = controller_with(1);
    c.seek(999_999);
    assert_eq!(c.engine().calls, vec![Call::SetPosition(999_999)]);
}

#[test]
fn every_load_recomputes_track_info() {
    let dir = tempfile::tempdir().unwrap();
    let track = dir.path().join("song.mp3");
    fs::write(&track, b"not audio").unwrap();

    let mut c = controller();
    c.add_files([track.clone(), track.clone()]);
    c.play_selected(0).unwrap();
    assert!(c.track_info().unwrap().cover.is_placeholder());

    RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))
        .save_with_format(dir.path().join("cover.png"), image::ImageFormat::Png)
        .unwrap();
    c.next();
    assert_eq!(
        c.track_info().unwrap().cover.source,
        CoverSource::File(dir.path().join("cover.png"))
    );
}

#[test]
fn duration_is_restored_after_loading_a_track_of_equal_length() {
    let mut c = controller_with(2);
    c.play_selected(0).unwrap();
    c.process_engine_events();
    c.next();
    assert_eq!(c.position().duration_ms, 0);

    c.process_engine_events();
    assert_eq!(c.position().duration_ms, 180_000);
}
