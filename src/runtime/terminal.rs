//! Terminal setup and teardown around the event loop.

use std::io::{self, Stdout};

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Runs its closure when dropped, however the enclosing scope is left.
pub struct RestoreGuard<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreGuard<F> {
    pub fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

/// Leave raw mode and the alternate screen. Safe to call after a partial setup.
pub fn restore() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "cannot leave raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        tracing::warn!(error = %e, "cannot leave alternate screen");
    }
}

/// Switch to raw mode and the alternate screen.
///
/// The returned guard restores the terminal when dropped, including when a
/// later setup step fails.
pub fn setup() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, RestoreGuard<fn()>)> {
    enable_raw_mode()?;
    let guard = RestoreGuard::new(restore as fn());

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn partial_setup(restored: &Cell<u32>, fail_at_second_step: bool) -> Result<(), String> {
        let _guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
        if fail_at_second_step {
            return Err("alternate screen unavailable".to_string());
        }
        Ok(())
    }

    #[test]
    fn guard_restores_when_a_later_step_fails() {
        let restored = Cell::new(0);
        assert!(partial_setup(&restored, true).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn guard_restores_exactly_once_on_success() {
        let restored = Cell::new(0);
        partial_setup(&restored, false).unwrap();
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn guard_restores_when_moved_out_and_dropped() {
        let restored = Cell::new(0);
        let guard = RestoreGuard::new(|| restored.set(restored.get() + 1));
        let moved = guard;
        assert_eq!(restored.get(), 0);
        drop(moved);
        assert_eq!(restored.get(), 1);
    }
}
