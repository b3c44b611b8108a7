//! Opening media sources and turning them into `rodio` sinks.
//!
//! Decoding is split from sink creation so source failures can be checked
//! without an output device.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

/// Map a media locator to a filesystem path (`file://` prefix is optional).
pub(crate) fn locator_path(locator: &str) -> PathBuf {
    let locator = locator.trim();
    PathBuf::from(locator.strip_prefix("file://").unwrap_or(locator))
}

/// Open and decode `locator`, returning the decoder and its length when known.
pub(super) fn open_source(locator: &str) -> Result<(Decoder<BufReader<File>>, Option<Duration>)> {
    let path = locator_path(locator);
    let file = File::open(&path).map_err(|source| Error::OpenSource {
        path: path.clone(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| Error::DecodeSource {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let duration = decoder.total_duration().or_else(|| probe_duration(&path));
    Ok((decoder, duration))
}

/// Fall back to container metadata for formats whose decoder cannot tell.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Create a paused `Sink` for `locator` on `stream`.
pub(super) fn create_sink(stream: &OutputStream, locator: &str) -> Result<(Sink, Option<Duration>)> {
    let (source, duration) = open_source(locator)?;
    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, duration))
}
