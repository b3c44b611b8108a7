//! Song library: the list of tracks the card offers.
//!
//! Songs either come straight from the `[[songs]]` config entries, kept in
//! the order they were written, or from scanning a music directory.

use std::path::Path;

use crate::config::Settings;

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;

/// Build the song list: explicit config entries win over a directory scan.
pub fn load_tracks(dir: &Path, settings: &Settings) -> Vec<Track> {
    if !settings.songs.is_empty() {
        return settings
            .songs
            .iter()
            .map(|s| Track::new(s.source.trim(), s.title.clone(), s.artwork.clone()))
            .collect();
    }

    let tracks = scan(dir, &settings.library);
    tracing::debug!(dir = %dir.display(), count = tracks.len(), "scanned library");
    tracks
}

#[cfg(test)]
mod tests;
