use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::error::{Error, Result};

use super::{PlaybackEngine, SourceGeneration};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, Notice, PlaybackHandle, PlaybackInfo};

/// Handle to the audio thread. Commands are fire-and-forget; lifecycle
/// notifications come back on the `events` channel given to [`AudioPlayer::new`],
/// tagged with the [`generation`](SourceGeneration::generation) of their source.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    generation: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread and wait until it has an output device.
    pub fn new(audio_settings: AudioSettings, events: Sender<Notice>) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<()>>(1);
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(
            rx,
            events,
            playback_info.clone(),
            audio_settings,
            ready_tx,
        );

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(Error::AudioOutput(
                    "audio thread exited during startup".to_string(),
                ));
            }
        }

        Ok(Self {
            tx,
            playback: playback_info,
            generation: 0,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            tracing::warn!("audio thread is gone; command dropped");
        }
    }

    /// Pause when playing, resume (or restart after the end) otherwise.
    pub fn toggle_pause(&self) {
        self.send(AudioCmd::TogglePause);
    }

    /// Stop the audio thread and wait for it. Blocks for the whole fade-out.
    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn info(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }
}

impl PlaybackEngine for AudioPlayer {
    fn set_source(&mut self, locator: &str) {
        // Reset the shared view right away so a stale position never pairs with the new source.
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo::default();
        }
        self.generation += 1;
        self.send(AudioCmd::SetSource {
            locator: locator.to_string(),
            generation: self.generation,
        });
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn position(&self) -> Duration {
        self.info().position
    }

    fn duration(&self) -> Option<Duration> {
        self.info().duration
    }
}

impl SourceGeneration for AudioPlayer {
    fn generation(&self) -> u64 {
        self.generation
    }
}
