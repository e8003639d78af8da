mod app;
mod audio;
mod config;
mod logging;
mod metadata;
mod player;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
