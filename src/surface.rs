//! Display surfaces the playback controller writes to.
//!
//! Each surface is a small trait so the controller can be handed terminal
//! widgets at runtime and plain recording doubles in tests. The `terminal`
//! module provides the implementations that `ui` renders.

mod terminal;

pub use terminal::{ArtworkPanel, Label, ProgressBar, SongItem};

/// A piece of text showing what is playing.
pub trait TitleLabel {
    fn set_text(&mut self, text: &str);
    fn text(&self) -> &str;
}

/// A bar filled proportionally to playback progress.
pub trait ProgressIndicator {
    /// Set the fill as a fraction in `[0, 1]`.
    fn set_fill(&mut self, ratio: f64);
    fn fill(&self) -> f64;
}

/// Where the current song's artwork is shown.
pub trait ArtworkSurface {
    fn set_image(&mut self, locator: &str);
    fn image(&self) -> Option<&str>;
}

/// One selectable entry of the song list.
pub trait SongItemSurface {
    fn set_highlighted(&mut self, highlighted: bool);
    fn is_highlighted(&self) -> bool;
}
