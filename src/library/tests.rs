use super::*;
use crate::config::{Settings, SongEntry};
use std::fs;
use tempfile::tempdir;

fn entry(source: &str, title: &str, artwork: Option<&str>) -> SongEntry {
    SongEntry {
        source: source.into(),
        title: title.into(),
        artwork: artwork.map(str::to_string),
    }
}

#[test]
fn load_tracks_prefers_configured_songs_in_written_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scanned.mp3"), b"not real").unwrap();

    let settings = Settings {
        songs: vec![
            entry("track2.mp3", "Song B", None),
            entry(" track1.mp3 ", "Song A", Some("art1.jpg")),
        ],
        ..Settings::default()
    };

    let tracks = load_tracks(dir.path(), &settings);
    assert_eq!(
        tracks,
        vec![
            Track::new("track2.mp3", "Song B", None),
            Track::new("track1.mp3", "Song A", Some("art1.jpg".to_string())),
        ]
    );
}

#[test]
fn load_tracks_falls_back_to_directory_scan() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("scanned.mp3"), b"not real").unwrap();

    let tracks = load_tracks(dir.path(), &Settings::default());
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "scanned");
}
