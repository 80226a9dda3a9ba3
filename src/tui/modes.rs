use super::TuiError;
use crossterm::{
    cursor,
    terminal::{self, ClearType},
};
use std::io::{self, Write};

const WINDOW_TITLE: &str = "🍅 Pomodoro Timer";

/// Switches raw mode on and off.
#[derive(Clone, Copy)]
pub struct RawModeSwitch {
    pub enable: fn() -> io::Result<()>,
    pub disable: fn() -> io::Result<()>,
}

pub const CROSSTERM_RAW_MODE: RawModeSwitch = RawModeSwitch {
    enable: terminal::enable_raw_mode,
    disable: terminal::disable_raw_mode,
};

/// Raw mode plus the alternate screen, with the window title set and the cursor hidden.
pub struct TerminalModes<W: Write> {
    out: W,
    raw_mode: RawModeSwitch,
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl<W: Write> TerminalModes<W> {
    pub fn new(out: W, raw_mode: RawModeSwitch) -> Self {
        Self {
            out,
            raw_mode,
            raw_mode_enabled: false,
            alternate_screen_enabled: false,
        }
    }

    /// A failed enable restores whatever it had already switched on.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        let enabled = self.enable_steps();
        if enabled.is_err() {
            let _ = self.disable();
        }
        enabled
    }

    fn enable_steps(&mut self) -> Result<(), TuiError> {
        (self.raw_mode.enable)().map_err(TuiError::RawModeToggle)?;
        self.raw_mode_enabled = true;

        // Set first: a partly written switch still has to be undone.
        self.alternate_screen_enabled = true;
        crossterm::execute!(
            self.out,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(WINDOW_TITLE),
            terminal::Clear(ClearType::All),
        )
        .map_err(TuiError::AlternateScreenToggle)?;

        crossterm::execute!(self.out, cursor::Hide).map_err(TuiError::Cursor)?;

        Ok(())
    }

    /// Leaves raw mode even when the screen could not be restored, reporting the first error.
    pub fn disable(&mut self) -> Result<(), TuiError> {
        let screen_restored = self.leave_alternate_screen();
        let raw_mode_left = self.leave_raw_mode();

        screen_restored.and(raw_mode_left)
    }

    fn leave_alternate_screen(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            crossterm::execute!(
                self.out,
                terminal::Clear(ClearType::All),
                cursor::Show,
                terminal::LeaveAlternateScreen,
            )
            .map_err(TuiError::AlternateScreenToggle)?;
            self.alternate_screen_enabled = false;
        }

        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            (self.raw_mode.disable)().map_err(TuiError::RawModeToggle)?;
            self.raw_mode_enabled = false;
        }

        Ok(())
    }
}
