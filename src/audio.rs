//! Playback engine.
//!
//! [`PlaybackEngine`] is the capability the controller drives. [`AudioPlayer`]
//! implements it on top of a `rodio` sink owned by a dedicated audio thread,
//! which reports [`EngineEvent`]s back over a channel as [`Notice`]s tagged
//! with the source they belong to.

use std::time::Duration;

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{EngineEvent, Notice};

/// What the controller needs from a playback engine.
pub trait PlaybackEngine {
    /// Replace the current media source.
    fn set_source(&mut self, locator: &str);
    /// Request playback of the current source. Failures are not reported here.
    fn play(&mut self);
    /// Position inside the current source.
    fn position(&self) -> Duration;
    /// Length of the current source, `None` until it is known.
    fn duration(&self) -> Option<Duration>;
}

/// Engines that count source changes, so late notices can be told apart.
pub trait SourceGeneration {
    /// Number of `set_source` calls so far.
    fn generation(&self) -> u64;
}

#[cfg(test)]
mod tests;
