//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the playback controller
//! with the list cursor and the "open files" prompt.

mod model;

pub use model::*;
