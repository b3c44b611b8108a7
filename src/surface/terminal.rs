//! Terminal-backed surfaces. They only hold state; `ui::draw` turns them into
//! `ratatui` widgets every frame.

use crate::library::Track;

use super::{ArtworkSurface, ProgressIndicator, SongItemSurface, TitleLabel};

#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TitleLabel for Label {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressBar {
    ratio: f64,
}

impl ProgressIndicator for ProgressBar {
    fn set_fill(&mut self, ratio: f64) {
        self.ratio = ratio;
    }

    fn fill(&self) -> f64 {
        self.ratio
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArtworkPanel {
    locator: Option<String>,
}

impl ArtworkSurface for ArtworkPanel {
    fn set_image(&mut self, locator: &str) {
        self.locator = Some(locator.to_string());
    }

    fn image(&self) -> Option<&str> {
        self.locator.as_deref()
    }
}

/// A song-list row; remembers the track it stands for.
#[derive(Debug, Clone)]
pub struct SongItem {
    track: Track,
    highlighted: bool,
}

impl SongItem {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            highlighted: false,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }
}

impl SongItemSurface for SongItem {
    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}
