/// A song as the card sees it: where to play it from, what to call it, and
/// optionally which image to show while it plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Media locator handed to the playback engine (a path or `file://` URI).
    pub source: String,
    pub title: String,
    /// Artwork locator; `None` keeps whatever artwork is already shown.
    pub artwork: Option<String>,
}

impl Track {
    pub fn new(source: impl Into<String>, title: impl Into<String>, artwork: Option<String>) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            artwork,
        }
    }
}
