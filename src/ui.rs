//! UI rendering helpers for the terminal user interface.
//!
//! The controller's surfaces are plain state holders; this module turns them
//! into `ratatui` widgets each frame.

use std::path::Path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::UiSettings;
use crate::controller::PlaybackController;
use crate::surface::{
    ArtworkPanel, ArtworkSurface, Label, ProgressBar, ProgressIndicator, SongItem,
    SongItemSurface, TitleLabel,
};

/// The controller wired to terminal surfaces.
pub type Card<E> = PlaybackController<E, Label, ProgressBar, ArtworkPanel, SongItem>;

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("enter", "play selected song"),
    ("space/p", "play/pause"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Gauge ratio safe to hand to `ratatui` (it panics outside `[0, 1]`).
fn gauge_ratio(fill: f64) -> f64 {
    if fill.is_finite() {
        fill.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Short name for an artwork locator: its file name, or the locator itself.
fn artwork_name(locator: &str) -> &str {
    Path::new(locator)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(locator)
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

fn draw_now_playing<E>(frame: &mut Frame, area: Rect, card: &Card<E>, ui: &UiSettings) {
    let (title_area, artwork_area) = if ui.show_artwork {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(32)])
            .split(area);
        (cols[0], Some(cols[1]))
    } else {
        (area, None)
    };

    let title = Paragraph::new(card.title().text())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(title, title_area);

    if let Some(artwork_area) = artwork_area {
        let text = match card.artwork().image() {
            Some(locator) => vec![
                Line::from(artwork_name(locator)),
                Line::from(Span::styled(
                    locator,
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ],
            None => vec![Line::from("no artwork")],
        };
        let artwork = Paragraph::new(text)
            .block(padded(" artwork "))
            .wrap(Wrap { trim: true });
        frame.render_widget(artwork, artwork_area);
    }
}

/// Render the whole card into `frame`; `cursor` is the list row under the cursor.
pub fn draw<E>(frame: &mut Frame, card: &Card<E>, cursor: usize, ui: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" songcard ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_now_playing(frame, chunks[1], card, ui);

    let ratio = gauge_ratio(card.progress().fill());
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, chunks[2]);

    let items: Vec<ListItem> = card
        .items()
        .iter()
        .map(|item| {
            let title = item.track().title.as_str();
            if item.is_highlighted() {
                ListItem::new(format!("♪ {}", title)).style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ListItem::new(format!("  {}", title))
            }
        })
        .collect();
    let total = items.len();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" songs "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(cursor.min(total - 1)));
    }
    frame.render_stateful_widget(list, chunks[3], &mut state);

    let footer = Paragraph::new(controls_text())
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
