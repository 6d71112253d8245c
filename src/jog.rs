//! Keyboard jog input: raw-mode terminal events mapped to axis toggles.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::axis::AxisId;
use crate::error::{InputError, Result};

/// A discrete manual-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogEvent {
    /// Flip the direction bit of one axis.
    ToggleDirection(AxisId),
    /// Flip the enable bit of one axis.
    ToggleEnable(AxisId),
    /// Operator requested a clean shutdown.
    Quit,
}

/// Scoped raw-mode acquisition.
///
/// Raw mode is restored on drop, so the terminal comes back on every exit
/// path: normal return, error, or panic unwind.
pub struct RawModeGuard(());

impl RawModeGuard {
    /// Enable raw (unbuffered, no-echo) terminal input.
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(|e| InputError::RawMode(e.to_string()))?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Lazy, non-restartable source of [`JogEvent`]s from the terminal.
pub struct KeyboardJogSource {
    _raw_mode: RawModeGuard,
}

impl KeyboardJogSource {
    /// Put the terminal into raw mode and start listening.
    pub fn new() -> Result<Self> {
        Ok(Self {
            _raw_mode: RawModeGuard::new()?,
        })
    }

    /// Wait up to `timeout` for the next mapped key event.
    ///
    /// Unmapped keys and non-key events return `None`, as does a timeout.
    pub fn next_event(&mut self, timeout: Duration) -> Result<Option<JogEvent>> {
        if !event::poll(timeout).map_err(|e| InputError::ReadEvent(e.to_string()))? {
            return Ok(None);
        }

        match event::read().map_err(|e| InputError::ReadEvent(e.to_string()))? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Keymap: q/w toggle direction, a/s toggle enable, Esc or Ctrl-C quits.
fn map_key(key: KeyEvent) -> Option<JogEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // In raw mode Ctrl-C arrives as a key event, not a signal.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(JogEvent::Quit);
    }

    match key.code {
        KeyCode::Char('q') => Some(JogEvent::ToggleDirection(AxisId::X)),
        KeyCode::Char('w') => Some(JogEvent::ToggleDirection(AxisId::Y)),
        KeyCode::Char('a') => Some(JogEvent::ToggleEnable(AxisId::X)),
        KeyCode::Char('s') => Some(JogEvent::ToggleEnable(AxisId::Y)),
        KeyCode::Esc => Some(JogEvent::Quit),
        _ => None,
    }
}
