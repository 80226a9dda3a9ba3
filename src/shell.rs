use crate::event::{Event, Key};
use crate::pomodoro::{Settings, State};
use tracing::{debug, info};

/// What the event loop has to do after an event has been handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Schedule the next tick.
    ArmTick,
    /// A session ran out.
    Alert,
    Quit,
}

/// Everything that is rendered: the countdown plus the state of the view around it.
#[derive(Debug)]
pub struct Shell {
    pomodoro_state: State,
    show_help: bool,
    viewport_width: u16,
    viewport_height: u16,
}

impl Shell {
    pub fn new(settings: Settings) -> Self {
        Self {
            pomodoro_state: State::new(settings),
            show_help: false,
            viewport_width: 0,
            viewport_height: 0,
        }
    }

    /// Applies one event. While the help screen is open the countdown is frozen
    /// and neither toggling nor resetting reaches it.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Resize(width, height) => {
                self.viewport_width = width;
                self.viewport_height = height;
                vec![]
            }
            Event::Key(Key::Quit) => vec![Effect::Quit],
            Event::Key(Key::ToggleTimer) => {
                if !self.show_help {
                    self.pomodoro_state.toggle_timer();
                    debug!(state = %self.pomodoro_state, "toggled timer");
                }
                vec![]
            }
            Event::Key(Key::ToggleHelp) => {
                self.show_help = !self.show_help;
                vec![]
            }
            Event::Key(Key::ResetTimer) => {
                if !self.show_help {
                    self.pomodoro_state.reset();
                    debug!(state = %self.pomodoro_state, "reset timer");
                }
                vec![]
            }
            Event::Tick => {
                if !self.show_help && self.pomodoro_state.tick() {
                    info!(
                        next = %self.pomodoro_state.current_activity(),
                        "session complete"
                    );
                    vec![Effect::Alert, Effect::ArmTick]
                } else {
                    vec![Effect::ArmTick]
                }
            }
        }
    }

    pub fn pomodoro_state(&self) -> &State {
        &self.pomodoro_state
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.viewport_width, self.viewport_height)
    }
}
