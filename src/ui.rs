//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::PlaybackEngine;
use crate::config::UiSettings;
use crate::metadata::CoverSource;
use crate::player::{PlaybackPosition, PlayerState};

const CONTROLS: [(&str, &str); 9] = [
    ("o", "open"),
    ("enter", "play selected"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("h/b", "prev"),
    ("l/n", "next"),
    ("←/→", "seek"),
    ("j/k", "up/down"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format milliseconds as `MM:SS`.
fn format_mmss(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn position_ratio(pos: PlaybackPosition) -> f64 {
    if pos.duration_ms == 0 {
        return 0.0;
    }
    (pos.position_ms as f64 / pos.duration_ms as f64).clamp(0.0, 1.0)
}

fn state_text(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Idle => "Idle",
        PlayerState::Loaded => "Stopped",
        PlayerState::Playing => "Playing",
        PlayerState::Paused => "Paused",
    }
}

/// Downsample `image` into `cols` columns of half-block cells.
///
/// Each cell shows two vertically stacked pixels: the upper one as the
/// foreground of `▀`, the lower one as the background.
fn cover_lines(image: &RgbaImage, cols: u16) -> Vec<Line<'static>> {
    let px = u32::from(cols.max(1));
    let scaled = imageops::resize(image, px, px, FilterType::Triangle);

    (0..px)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..px)
                .map(|x| {
                    let top = scaled.get_pixel(x, y).0;
                    let style = Style::default().fg(Color::Rgb(top[0], top[1], top[2]));
                    let style = if y + 1 < px {
                        let bottom = scaled.get_pixel(x, y + 1).0;
                        style.bg(Color::Rgb(bottom[0], bottom[1], bottom[2]))
                    } else {
                        style
                    };
                    Span::styled("▀", style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<E: PlaybackEngine>(frame: &mut Frame, app: &App<E>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(14),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.window_title.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" lumina ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let now = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(10)])
        .split(chunks[1]);

    draw_cover(frame, app, now[0]);
    draw_now_playing(frame, app, ui_settings, now[1]);
    draw_playlist(frame, app, chunks[2]);

    // Footer doubles as the "open" prompt.
    let footer = match app.open_prompt.as_deref() {
        Some(text) => Paragraph::new(format!("{text}▏"))
            .block(padded(" open file (enter adds, esc cancels) ")),
        None => Paragraph::new(controls_text())
            .block(padded(" controls "))
            .wrap(Wrap { trim: true }),
    };
    frame.render_widget(footer, chunks[3]);
}

fn draw_cover<E: PlaybackEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" cover ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = inner.width.min(inner.height.saturating_mul(2));
    if cols == 0 {
        return;
    }

    let placeholder;
    let image = match app.controller.track_info() {
        Some(info) => &info.cover.image,
        None => {
            placeholder = app.controller.resolver().placeholder();
            &placeholder.image
        }
    };

    let x = inner.x + (inner.width - cols) / 2;
    let target = Rect {
        x,
        y: inner.y,
        width: cols,
        height: inner.height,
    };
    frame.render_widget(Paragraph::new(cover_lines(image, cols)), target);
}

fn draw_now_playing<E: PlaybackEngine>(
    frame: &mut Frame,
    app: &App<E>,
    ui_settings: &UiSettings,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let controller = &app.controller;
    let title = controller
        .track_info()
        .map(|info| info.title.as_str())
        .unwrap_or(ui_settings.idle_title.as_str());

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("State: {}", state_text(controller.state()))),
    ];
    if let Some(index) = controller.current_index() {
        lines.push(Line::from(format!(
            "Track: {} of {}",
            index + 1,
            controller.len()
        )));
    }
    if let Some(info) = controller.track_info() {
        let source = match &info.cover.source {
            CoverSource::Embedded => "embedded".to_string(),
            CoverSource::File(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string()),
            CoverSource::Placeholder => "none".to_string(),
        };
        lines.push(Line::from(format!("Cover: {source}")));
    }
    if let Some(path) = controller.current_path() {
        lines.push(Line::from(format!("File: {}", path.display())));
    }

    let info = Paragraph::new(lines)
        .block(padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, rows[0]);

    let pos = controller.position();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" position "))
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED))
        .ratio(position_ratio(pos))
        .label(format!(
            "{} / {}",
            format_mmss(pos.position_ms),
            format_mmss(pos.duration_ms)
        ));
    frame.render_widget(gauge, rows[1]);
}

fn draw_playlist<E: PlaybackEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let current = app.controller.current_index();
    let entries = app.controller.playlist().entries();

    // Only build ListItems for the visible window, keeping the cursor centered when possible.
    let total = entries.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, selected_in_view) = if total <= height || height == 0 {
        (0, total, app.selected)
    } else {
        let half = height / 2;
        let mut start = app.selected.saturating_sub(half);
        if start + height > total {
            start = total - height;
        }
        (start, start + height, app.selected - start)
    };

    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .enumerate()
        .map(|(offset, entry)| {
            let marker = if current == Some(start + offset) {
                "♪ "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{}", entry.display))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" playlist ({total}) ")),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_in_view));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
