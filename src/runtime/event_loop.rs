use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioPlayer, Notice, PlaybackEngine, SourceGeneration};
use crate::config;
use crate::ui::{self, Card};

/// What a key press asks the card to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorDown,
    CursorUp,
    /// Select-and-play the song under the cursor.
    PlaySelected,
    /// The play control: pause or resume.
    TogglePause,
    Quit,
}

/// Map a key press to an [`Action`].
pub fn action_for(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::CursorUp),
        KeyCode::Enter => Some(Action::PlaySelected),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::TogglePause),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Row of the song list under the cursor.
    pub cursor: usize,
}

impl EventLoopState {
    /// Move the cursor one row down, stopping at the last of `len` rows.
    pub fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

/// Feed pending engine notices to the card.
///
/// Notices emitted for a source that has since been replaced are dropped, so a
/// late `Ended` from the previous song cannot reset the title of the new one.
pub fn drain_notices<E>(card: &mut Card<E>, notices: &Receiver<Notice>)
where
    E: PlaybackEngine + SourceGeneration,
{
    while let Ok(notice) = notices.try_recv() {
        match notice.for_generation(card.engine().generation()) {
            Some(event) => card.handle_event(event),
            None => tracing::debug!(?notice, "dropping notice for a replaced source"),
        }
    }
}

/// Main terminal event loop: feeds engine notifications to the controller,
/// draws, and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    card: &mut Card<AudioPlayer>,
    events: &Receiver<Notice>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        drain_notices(card, events);

        terminal.draw(|f| ui::draw(f, card, state.cursor, &settings.ui))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match action_for(key) {
            Some(Action::CursorDown) => state.cursor_down(card.items().len()),
            Some(Action::CursorUp) => state.cursor_up(),
            Some(Action::PlaySelected) => {
                // The row under the cursor is both the song and the triggering surface.
                if let Some(item) = card.items().get(state.cursor) {
                    let track = item.track().clone();
                    card.select_and_play(&track, Some(state.cursor));
                }
            }
            Some(Action::TogglePause) => card.engine().toggle_pause(),
            // No redraws while the audio thread fades out; the screen freezes for `quit_fade_out_ms`.
            Some(Action::Quit) => {
                card.engine()
                    .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
                return Ok(());
            }
            None => {}
        }
    }
}
