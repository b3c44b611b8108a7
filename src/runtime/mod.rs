use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::audio::{AudioPlayer, Notice};
use crate::controller::PlaybackController;
use crate::library::load_tracks;
use crate::surface::{ArtworkPanel, Label, ProgressBar, SongItem};

mod event_loop;
mod logging;
mod settings;
mod terminal;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let log_path = logging::init();
    let settings = settings::load_settings();

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"));

    let tracks = load_tracks(&dir, &settings);
    tracing::info!(
        dir = %dir.display(),
        songs = tracks.len(),
        log = ?log_path,
        "songcard starting"
    );

    let (events_tx, events_rx) = mpsc::channel::<Notice>();
    let audio_player = AudioPlayer::new(settings.audio.clone(), events_tx)?;

    let mut card = PlaybackController::new(
        audio_player,
        Label::new(settings.ui.placeholder.as_str()),
        ProgressBar::default(),
        ArtworkPanel::default(),
        tracks.into_iter().map(SongItem::new).collect(),
        settings.ui.placeholder.as_str(),
    );

    let (mut terminal, restore) = terminal::setup()?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut card, &events_rx, &mut state);

    drop(restore);

    if let Err(ref e) = run_result {
        tracing::error!(error = %e, "event loop failed");
    }
    run_result
}
