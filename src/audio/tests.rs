use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::sink::{locator_path, open_source};
use super::thread::{Deck, Transport};
use super::types::{EngineEvent, Notice, PlaybackHandle, PlaybackInfo};
use crate::error::{Error, Result};

#[derive(Default)]
struct SinkState {
    playing: Cell<bool>,
    finished: Cell<bool>,
    stopped: Cell<bool>,
    position: Cell<Duration>,
}

/// Sink double; clones share state so tests can steer a sink the deck owns.
#[derive(Clone, Default)]
struct FakeSink(Rc<SinkState>);

impl Transport for FakeSink {
    fn play(&self) {
        self.0.playing.set(true);
    }

    fn pause(&self) {
        self.0.playing.set(false);
    }

    fn stop(&self) {
        self.0.stopped.set(true);
    }

    fn empty(&self) -> bool {
        self.0.finished.get()
    }

    fn get_pos(&self) -> Duration {
        self.0.position.get()
    }
}

const LENGTH: Duration = Duration::from_secs(120);

fn deck() -> (Deck<FakeSink>, PlaybackHandle, Receiver<Notice>) {
    let info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
    let (tx, rx) = mpsc::channel();
    (Deck::new(info.clone(), tx), info, rx)
}

fn opens(sink: &FakeSink) -> impl FnOnce(&str) -> Result<(FakeSink, Option<Duration>)> + '_ {
    move |_: &str| Ok((sink.clone(), Some(LENGTH)))
}

fn fails(locator: &str) -> Result<(FakeSink, Option<Duration>)> {
    Err(Error::DecodeSource {
        path: PathBuf::from(locator),
        message: "unsupported format".to_string(),
    })
}

fn drain(rx: &Receiver<Notice>) -> Vec<EngineEvent> {
    rx.try_iter().map(|n| n.event).collect()
}

#[test]
fn locator_path_strips_file_scheme() {
    assert_eq!(
        locator_path("file:///music/a.mp3"),
        PathBuf::from("/music/a.mp3")
    );
    assert_eq!(locator_path("track1.mp3"), PathBuf::from("track1.mp3"));
    assert_eq!(locator_path("  b.ogg "), PathBuf::from("b.ogg"));
}

#[test]
fn open_source_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.mp3");

    let err = open_source(missing.to_str().unwrap()).err().unwrap();
    match err {
        Error::OpenSource { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_source_reports_undecodable_file() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.mp3");
    std::fs::write(&junk, b"definitely not audio").unwrap();

    let err = open_source(junk.to_str().unwrap()).err().unwrap();
    assert!(matches!(err, Error::DecodeSource { .. }));
}

#[test]
fn load_publishes_duration_and_stays_paused() {
    let (mut deck, info, rx) = deck();
    let sink = FakeSink::default();

    deck.load("a.mp3".into(), 1, opens(&sink));

    assert!(!deck.is_playing());
    assert!(!sink.0.playing.get());
    assert_eq!(info.lock().unwrap().duration, Some(LENGTH));
    assert!(drain(&rx).is_empty());
}

#[test]
fn play_starts_the_sink_and_reports_started() {
    let (mut deck, _info, rx) = deck();
    let sink = FakeSink::default();
    deck.load("a.mp3".into(), 1, opens(&sink));

    deck.play(fails);

    assert!(sink.0.playing.get());
    assert_eq!(drain(&rx), vec![EngineEvent::Started]);
}

#[test]
fn tick_reports_progress_with_position() {
    let (mut deck, info, rx) = deck();
    let sink = FakeSink::default();
    deck.load("a.mp3".into(), 1, opens(&sink));
    deck.play(fails);
    drain(&rx);

    sink.0.position.set(Duration::from_secs(30));
    deck.tick();

    assert_eq!(drain(&rx), vec![EngineEvent::Progress]);
    assert_eq!(info.lock().unwrap().position, Duration::from_secs(30));
}

#[test]
fn natural_end_reports_progress_paused_ended_in_order() {
    let (mut deck, info, rx) = deck();
    let sink = FakeSink::default();
    deck.load("a.mp3".into(), 1, opens(&sink));
    deck.play(fails);
    drain(&rx);

    sink.0.finished.set(true);
    deck.tick();

    assert_eq!(
        drain(&rx),
        vec![EngineEvent::Progress, EngineEvent::Paused, EngineEvent::Ended]
    );
    assert!(!deck.is_playing());
    assert_eq!(info.lock().unwrap().position, LENGTH);

    deck.tick();
    assert!(drain(&rx).is_empty());
}

#[test]
fn play_after_the_end_reloads_the_source() {
    let (mut deck, _info, rx) = deck();
    let first = FakeSink::default();
    deck.load("a.mp3".into(), 1, opens(&first));
    deck.play(fails);
    first.0.finished.set(true);
    deck.tick();
    drain(&rx);

    let reloaded = FakeSink::default();
    let reopened = Cell::new(false);
    deck.play(|locator: &str| {
        assert_eq!(locator, "a.mp3");
        reopened.set(true);
        Ok((reloaded.clone(), Some(LENGTH)))
    });

    assert!(reopened.get());
    assert!(reloaded.0.playing.get());
    assert_eq!(drain(&rx), vec![EngineEvent::Started]);
}

#[test]
fn play_without_a_loaded_source_reports_nothing() {
    let (mut deck, _info, rx) = deck();
    deck.load("broken.mp3".into(), 1, fails);

    deck.play(fails);
    deck.tick();

    assert!(!deck.is_playing());
    assert!(drain(&rx).is_empty());
}

#[test]
fn toggle_alternates_paused_and_started() {
    let (mut deck, _info, rx) = deck();
    let sink = FakeSink::default();
    deck.load("a.mp3".into(), 1, opens(&sink));

    deck.toggle(fails);
    deck.toggle(fails);
    assert!(!sink.0.playing.get());
    deck.toggle(fails);

    assert_eq!(
        drain(&rx),
        vec![EngineEvent::Started, EngineEvent::Paused, EngineEvent::Started]
    );
    assert!(sink.0.playing.get());
}

#[test]
fn notices_carry_the_generation_of_their_source() {
    let (mut deck, _info, rx) = deck();
    let first = FakeSink::default();
    let second = FakeSink::default();

    deck.load("a.mp3".into(), 1, opens(&first));
    deck.play(fails);
    deck.load("b.mp3".into(), 2, opens(&second));
    deck.play(fails);

    assert!(first.0.stopped.get());
    let generations: Vec<u64> = rx.try_iter().map(|n| n.generation).collect();
    assert_eq!(generations, vec![1, 2]);
}

#[test]
fn notice_is_dropped_for_another_generation() {
    let notice = Notice {
        generation: 3,
        event: EngineEvent::Ended,
    };
    assert_eq!(notice.for_generation(3), Some(EngineEvent::Ended));
    assert_eq!(notice.for_generation(4), None);
}

#[test]
fn stop_clears_shared_info() {
    let (mut deck, info, _rx) = deck();
    let sink = FakeSink::default();
    deck.load("a.mp3".into(), 1, opens(&sink));
    deck.play(fails);

    deck.stop();

    assert!(sink.0.stopped.get());
    assert!(deck.sink().is_none());
    let info = info.lock().unwrap();
    assert_eq!(info.position, Duration::ZERO);
    assert_eq!(info.duration, None);
}
