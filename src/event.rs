use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};

/// Everything the shell reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Resize(u16, u16),
    Key(Key),
    Tick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Quit,
    ToggleTimer,
    ToggleHelp,
    ResetTimer,
}

#[derive(Debug)]
pub struct EventConversionUndefinedError;

impl TryFrom<CrosstermEvent> for Event {
    type Error = EventConversionUndefinedError;

    fn try_from(value: CrosstermEvent) -> Result<Self, Self::Error> {
        match value {
            CrosstermEvent::Key(key_event) if key_event.kind != KeyEventKind::Press => None,
            CrosstermEvent::Key(key_event)
                if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                match key_event.code {
                    KeyCode::Char('c') => Some(Event::Key(Key::Quit)),
                    _ => None,
                }
            }
            CrosstermEvent::Key(key_event) => match key_event.code {
                KeyCode::Char('q') => Some(Event::Key(Key::Quit)),
                KeyCode::Esc => Some(Event::Key(Key::Quit)),
                KeyCode::Char(' ') => Some(Event::Key(Key::ToggleTimer)),
                KeyCode::Char('h') | KeyCode::Char('?') => Some(Event::Key(Key::ToggleHelp)),
                KeyCode::Char('r') => Some(Event::Key(Key::ResetTimer)),
                _ => None,
            },
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
        .ok_or(EventConversionUndefinedError)
    }
}
