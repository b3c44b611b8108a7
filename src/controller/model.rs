//! The playback controller: binds song selection and engine notifications to
//! the display surfaces.

use std::time::Duration;

use crate::audio::{EngineEvent, PlaybackEngine};
use crate::library::Track;
use crate::surface::{ArtworkSurface, ProgressIndicator, SongItemSurface, TitleLabel};

/// Fraction of `duration` covered by `position`, clamped to `[0, 1]`.
///
/// Returns `None` while the duration is unknown or zero.
pub fn progress_ratio(position: Duration, duration: Option<Duration>) -> Option<f64> {
    let total = duration?.as_secs_f64();
    let ratio = position.as_secs_f64() / total;
    if ratio.is_finite() {
        Some(ratio.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Keeps the title, progress, artwork and highlight surfaces consistent with
/// what the playback engine is doing.
///
/// The controller does not track playback state itself; it only forwards
/// selections to the engine and reacts to the engine's notifications.
pub struct PlaybackController<E, T, P, A, S> {
    engine: E,
    title: T,
    progress: P,
    artwork: A,
    items: Vec<S>,
    placeholder: String,
}

impl<E, T, P, A, S> PlaybackController<E, T, P, A, S> {
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn title(&self) -> &T {
        &self.title
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn artwork(&self) -> &A {
        &self.artwork
    }

    pub fn items(&self) -> &[S] {
        &self.items
    }
}

impl<E, T, P, A, S> PlaybackController<E, T, P, A, S>
where
    E: PlaybackEngine,
    T: TitleLabel,
    P: ProgressIndicator,
    A: ArtworkSurface,
    S: SongItemSurface,
{
    pub fn new(
        engine: E,
        title: T,
        progress: P,
        artwork: A,
        items: Vec<S>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            title,
            progress,
            artwork,
            items,
            placeholder: placeholder.into(),
        }
    }

    /// Load `track` into the engine, start it, and update the display.
    ///
    /// `trigger` is the index of the song item the selection came from. With
    /// `None` the highlight is left as it is; an out-of-range index clears
    /// every highlight without marking anything.
    ///
    /// Steps run in a fixed order and nothing is rolled back: if the engine
    /// fails to start, the title and artwork still show the new track.
    pub fn select_and_play(&mut self, track: &Track, trigger: Option<usize>) {
        self.engine.set_source(&track.source);
        self.engine.play();
        self.title.set_text(&track.title);

        if let Some(artwork) = track.artwork.as_deref() {
            self.artwork.set_image(artwork);
        }

        let Some(index) = trigger else {
            return;
        };

        for item in &mut self.items {
            item.set_highlighted(false);
        }
        match self.items.get_mut(index) {
            Some(item) => item.set_highlighted(true),
            None => tracing::warn!(
                index,
                items = self.items.len(),
                "selection came from an unknown song item"
            ),
        }
    }

    /// React to one engine notification.
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Progress => self.on_progress(),
            EngineEvent::Ended => self.on_ended(),
            EngineEvent::Started => {
                tracing::info!(title = self.title.text(), "playing");
            }
            EngineEvent::Paused => {
                tracing::info!("paused");
            }
        }
    }

    fn on_progress(&mut self) {
        // Unknown duration (e.g. before metadata is read) leaves the bar as it is.
        if let Some(ratio) = progress_ratio(self.engine.position(), self.engine.duration()) {
            self.progress.set_fill(ratio);
        }
    }

    fn on_ended(&mut self) {
        self.progress.set_fill(0.0);
        self.title.set_text(&self.placeholder);
    }
}
