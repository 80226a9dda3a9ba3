use crate::event::Event;
use crate::shell::Shell;
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures::{Stream, StreamExt};
use std::io;
use thiserror::Error;
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod animation;
mod modes;
mod render;
mod widgets;

use modes::{TerminalModes, CROSSTERM_RAW_MODE};
use render::render_ui;

pub type TerminalTui = Tui<CrosstermBackend<io::Stdout>, EventStream>;

pub struct Tui<B: Backend, S> {
    terminal: Terminal<B>,
    events: S,
    modes: TerminalModes<io::Stdout>,
}

impl TerminalTui {
    pub fn new() -> Result<Self, TuiError> {
        Tui::with_backend(CrosstermBackend::new(io::stdout()), EventStream::new())
    }
}

impl<B, S> Tui<B, S>
where
    B: Backend,
    S: Stream<Item = io::Result<CrosstermEvent>> + Unpin,
{
    pub fn with_backend(backend: B, events: S) -> Result<Self, TuiError> {
        Ok(Tui {
            terminal: Terminal::new(backend).map_err(TuiError::Creation)?,
            events,
            modes: TerminalModes::new(io::stdout(), CROSSTERM_RAW_MODE),
        })
    }

    /// Has to be explicitly disabled, because disabling can cause errors that have to be catched.
    /// Is not disabled by dropping.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        self.modes.enable()
    }

    pub fn disable(&mut self) -> Result<(), TuiError> {
        self.modes.disable()
    }

    pub fn size(&self) -> Result<(u16, u16), TuiError> {
        let area = self.terminal.size().map_err(TuiError::Size)?;
        Ok((area.width, area.height))
    }

    pub fn render(&mut self, shell: &Shell) -> Result<(), TuiError> {
        // Alerts ring the bell through stdout from another thread; keep it out of the frame.
        let _stdout = io::stdout().lock();
        self.terminal
            .draw(|f| {
                render_ui(f, shell);
            })
            .map_err(TuiError::Rendering)?;

        Ok(())
    }

    /// Waits for the next terminal event. Input the shell has no use for yields `None`.
    pub async fn read_event(&mut self) -> Result<Option<Event>, TuiError> {
        let crossterm_event = self
            .events
            .next()
            .await
            .ok_or(TuiError::InputClosed)?
            .map_err(TuiError::ReadInputEvent)?;

        Ok(Event::try_from(crossterm_event).ok())
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("failed to initialize terminal ui: {0}")]
    Creation(io::Error),
    #[error("failed to toggle terminal raw mode: {0}")]
    RawModeToggle(io::Error),
    #[error("failed to toggle alternate terminal screen: {0}")]
    AlternateScreenToggle(io::Error),
    #[error("failed to toggle cursor visibility: {0}")]
    Cursor(io::Error),
    #[error("failed to query terminal size: {0}")]
    Size(io::Error),
    #[error("failed to render terminal ui: {0}")]
    Rendering(io::Error),
    #[error("failed to read input event from terminal: {0}")]
    ReadInputEvent(io::Error),
    #[error("terminal input stream closed")]
    InputClosed,
}
