use crate::event::{Event, Key};
use crate::notification::Alert;
use crate::pomodoro::{Settings, TICK};
use crate::shell::{Effect, Shell};
use crate::tui::{TerminalTui, Tui, TuiError};
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures::Stream;
use std::io;
use std::ops::Deref;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tokio::select;
use tokio::time::{sleep, Instant, Sleep};
use tracing::{debug, info};
use tui::backend::{Backend, CrosstermBackend};

pub struct App<A, B: Backend = CrosstermBackend<io::Stdout>, S = EventStream> {
    shell: Shell,
    tui: Tui<B, S>,
    alert: A,
}

impl<A: Alert> App<A> {
    pub fn new(settings: Settings, alert: A) -> Result<Self, UnrecoverableError> {
        let tui = TerminalTui::new()?;

        Ok(Self {
            shell: Shell::new(settings),
            tui,
            alert,
        })
    }
}

impl<A, B, S> App<A, B, S>
where
    A: Alert,
    B: Backend,
    S: Stream<Item = io::Result<CrosstermEvent>> + Unpin,
{
    pub async fn run(&mut self) -> Result<(), UnrecoverableError> {
        self.tui.enable()?;
        let maybe_err = self.run_inner().await;
        let restored = self.tui.disable();

        maybe_err?;
        restored?;
        Ok(())
    }

    async fn run_inner(&mut self) -> Result<(), UnrecoverableError> {
        let mut tick_source = TickSource::new(TICK);
        tick_source.arm();

        let (width, height) = self.tui.size()?;
        self.shell.update(Event::Resize(width, height));
        info!(width, height, "event loop started");

        loop {
            self.tui.render(&self.shell)?;

            let event = select! {
                _ = tick_source.fired() => Event::Tick,
                tui_event = self.tui.read_event() => match tui_event? {
                    Some(event) => event,
                    None => continue,
                },
                Ok(()) = tokio::signal::ctrl_c() => Event::Key(Key::Quit),
            };
            debug!(?event, "dispatching");

            let effects = self.shell.update(event);
            if *apply_effects(&effects, &mut tick_source, &self.alert) {
                break;
            }
        }

        info!("event loop stopped");
        Ok(())
    }
}

/// Performs the effects of one handled event. Stops at the first quit request.
fn apply_effects(
    effects: &[Effect],
    tick_source: &mut TickSource,
    alert: &impl Alert,
) -> AppShouldQuit {
    for effect in effects {
        match effect {
            Effect::ArmTick => tick_source.arm(),
            Effect::Alert => alert.alert(),
            Effect::Quit => return AppShouldQuit(true),
        }
    }

    AppShouldQuit(false)
}

/// One-shot timer that has to be re-armed after every firing,
/// so there is never more than one tick pending.
struct TickSource {
    period: Duration,
    sleep: Pin<Box<Sleep>>,
    armed: bool,
}

impl TickSource {
    fn new(period: Duration) -> Self {
        Self {
            period,
            sleep: Box::pin(sleep(period)),
            armed: false,
        }
    }

    fn arm(&mut self) {
        self.sleep.as_mut().reset(Instant::now() + self.period);
        self.armed = true;
    }

    /// Completes once the armed period has elapsed; pends forever while disarmed.
    async fn fired(&mut self) {
        if !self.armed {
            futures::future::pending::<()>().await;
        }
        self.sleep.as_mut().await;
        self.armed = false;
    }
}

struct AppShouldQuit(bool);

impl Deref for AppShouldQuit {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Represents errors the app has no control over.
#[derive(Debug, Error)]
pub enum UnrecoverableError {
    #[error("error while interfacing with the terminal: {0}")]
    Tui(#[from] TuiError),
}
