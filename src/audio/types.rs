//! Audio-related small types and handles.
//!
//! This module defines the engine's command set, the notifications it emits,
//! and the playback info shared with the UI thread.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Lifecycle notifications emitted by the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Playback position advanced.
    Progress,
    /// The current source played to its end.
    Ended,
    /// Playback started or resumed.
    Started,
    /// Playback paused (also emitted right before `Ended`).
    Paused,
}

/// An [`EngineEvent`] tagged with the source it was emitted for.
///
/// `generation` is the counter value sent with the `SetSource` that loaded the
/// source; it goes up by one on every source change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub generation: u64,
    pub event: EngineEvent,
}

impl Notice {
    /// The event, or `None` when it belongs to a source other than `current`.
    pub fn for_generation(self, current: u64) -> Option<EngineEvent> {
        (self.generation == current).then_some(self.event)
    }
}

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Replace the current source; playback stays paused until `Play`.
    SetSource { locator: String, generation: u64 },
    /// Start (or restart after the end) the current source.
    Play,
    /// Toggle pause/resume.
    TogglePause,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Position inside the current source.
    pub position: Duration,
    /// Total length of the current source, when known.
    pub duration: Option<Duration>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
