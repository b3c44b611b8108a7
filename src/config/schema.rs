use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/songcard/config.toml` or `~/.config/songcard/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SONGCARD__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub audio: AudioSettings,
    pub library: LibrarySettings,
    /// Explicit song list. When non-empty it replaces the directory scan.
    pub songs: Vec<SongEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Title label text shown when nothing is playing (and after a song ends).
    pub placeholder: String,
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the artwork panel is drawn next to the title.
    pub show_artwork: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            placeholder: "Select a song".to_string(),
            header_text: " ~ songcard ~ ".to_string(),
            show_artwork: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Interval between progress notifications while playing (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// File names looked up next to a song to use as its artwork, first match wins.
    pub artwork_names: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            artwork_names: vec![
                "cover.jpg".into(),
                "cover.png".into(),
                "folder.jpg".into(),
                "folder.png".into(),
            ],
        }
    }
}

/// One hand-written `[[songs]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SongEntry {
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub artwork: Option<String>,
}
