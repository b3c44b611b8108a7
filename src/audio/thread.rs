use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::error::{Error, Result};

use super::sink::create_sink;
use super::types::{AudioCmd, EngineEvent, Notice, PlaybackHandle};

/// The part of a sink the deck drives.
pub(super) trait Transport {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    /// True once everything appended has played out.
    fn empty(&self) -> bool;
    fn get_pos(&self) -> Duration;
}

impl Transport for Sink {
    fn play(&self) {
        Sink::play(self)
    }

    fn pause(&self) {
        Sink::pause(self)
    }

    fn stop(&self) {
        Sink::stop(self)
    }

    fn empty(&self) -> bool {
        Sink::empty(self)
    }

    fn get_pos(&self) -> Duration {
        Sink::get_pos(self)
    }
}

/// What the audio thread currently has loaded, and the notices it owes the UI.
pub(super) struct Deck<S> {
    locator: Option<String>,
    sink: Option<S>,
    duration: Option<Duration>,
    playing: bool,
    generation: u64,
    info: PlaybackHandle,
    events: Sender<Notice>,
}

impl<S: Transport> Deck<S> {
    pub(super) fn new(info: PlaybackHandle, events: Sender<Notice>) -> Self {
        Self {
            locator: None,
            sink: None,
            duration: None,
            playing: false,
            generation: 0,
            info,
            events,
        }
    }

    pub(super) fn is_playing(&self) -> bool {
        self.playing
    }

    pub(super) fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(Notice {
            generation: self.generation,
            event,
        });
    }

    fn publish(&self, position: Duration) {
        if let Ok(mut info) = self.info.lock() {
            info.position = position;
            info.duration = self.duration;
        }
    }

    /// Replace the current source with `locator`, paused.
    pub(super) fn load<F>(&mut self, locator: String, generation: u64, open: F)
    where
        F: FnOnce(&str) -> Result<(S, Option<Duration>)>,
    {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.playing = false;
        self.duration = None;
        self.generation = generation;

        match open(&locator) {
            Ok((sink, duration)) => {
                tracing::debug!(%locator, ?duration, generation, "source loaded");
                self.sink = Some(sink);
                self.duration = duration;
            }
            // The controller never hears about this; the title may show a song that never plays.
            Err(e) => tracing::error!(%locator, error = %e, "cannot load source"),
        }

        self.locator = Some(locator);
        self.publish(Duration::ZERO);
    }

    /// Start the loaded source. `open` is only used to reload it after its end.
    pub(super) fn play<F>(&mut self, open: F)
    where
        F: FnOnce(&str) -> Result<(S, Option<Duration>)>,
    {
        if self.playing {
            return;
        }

        // Playing again after the end starts the source over.
        if self.sink.as_ref().is_some_and(|s| s.empty()) {
            if let Some(locator) = self.locator.as_deref() {
                match open(locator) {
                    Ok((sink, _)) => self.sink = Some(sink),
                    Err(e) => {
                        tracing::error!(%locator, error = %e, "cannot reload source");
                        self.sink = None;
                    }
                }
            }
        }

        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        sink.play();
        self.playing = true;
        self.publish(sink.get_pos());
        self.emit(EngineEvent::Started);
    }

    pub(super) fn pause(&mut self) {
        if !self.playing {
            return;
        }
        let position = match self.sink.as_ref() {
            Some(sink) => {
                sink.pause();
                sink.get_pos()
            }
            None => Duration::ZERO,
        };
        self.playing = false;
        self.publish(position);
        self.emit(EngineEvent::Paused);
    }

    /// The play control: pause when playing, play otherwise.
    pub(super) fn toggle<F>(&mut self, open: F)
    where
        F: FnOnce(&str) -> Result<(S, Option<Duration>)>,
    {
        if self.playing {
            self.pause();
        } else {
            self.play(open);
        }
    }

    /// Periodic update: report progress, detect the natural end.
    pub(super) fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            let end = self.duration.unwrap_or_else(|| sink.get_pos());
            self.playing = false;
            self.publish(end);
            self.emit(EngineEvent::Progress);
            self.emit(EngineEvent::Paused);
            self.emit(EngineEvent::Ended);
        } else {
            self.publish(sink.get_pos());
            self.emit(EngineEvent::Progress);
        }
    }

    /// Drop the current source and clear the shared playback info.
    pub(super) fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
        self.duration = None;
        self.publish(Duration::ZERO);
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<Notice>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
    ready: SyncSender<Result<()>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => {
                let _ = ready.send(Ok(()));
                stream
            }
            Err(e) => {
                let _ = ready.send(Err(Error::AudioOutput(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which garbles the TUI.
        stream.log_on_drop(false);

        let open = |locator: &str| create_sink(&stream, locator);
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        let mut deck: Deck<Sink> = Deck::new(playback_info, events);
        let mut last_tick = Instant::now();

        loop {
            let wait = tick.saturating_sub(last_tick.elapsed());
            match rx.recv_timeout(wait) {
                Ok(AudioCmd::SetSource {
                    locator,
                    generation,
                }) => deck.load(locator, generation, open),
                Ok(AudioCmd::Play) => deck.play(open),
                Ok(AudioCmd::TogglePause) => deck.toggle(open),
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if deck.is_playing() {
                        if let Some(sink) = deck.sink() {
                            fade_out_sink(sink, fade_out_ms);
                        }
                    }
                    deck.stop();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();
                deck.tick();
            }
        }
    })
}
