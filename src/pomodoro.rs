use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use thiserror::Error;

/// Amount of time a single call to [`State::tick`] advances the countdown.
pub const TICK: Duration = Duration::from_secs(1);

/// Countdown of alternating work and break sessions.
///
/// The state is advanced by discrete ticks and never looks at a clock itself.
/// When a session runs out, the next one is loaded at its full duration in the
/// same tick, paused, so nothing counts down unattended.
#[derive(Clone, Debug)]
pub struct State {
    activity: Activity,
    remaining: SessionDuration,
    total: SessionDuration,
    is_running: bool,
    settings: Settings,
}

impl State {
    pub fn new(settings: Settings) -> State {
        State {
            activity: Activity::Work,
            remaining: settings.work_duration,
            total: settings.work_duration,
            is_running: false,
            settings,
        }
    }

    /// Has no effect on a session with no time left.
    #[allow(dead_code)]
    pub fn start_timer(&mut self) {
        if !self.remaining.is_zero() {
            self.is_running = true;
        }
    }

    #[allow(dead_code)]
    pub fn stop_timer(&mut self) {
        self.is_running = false;
    }

    pub fn toggle_timer(&mut self) {
        self.is_running = !self.is_running;
    }

    /// Counts down one [`TICK`]. Returns whether a session ran out on this call.
    pub fn tick(&mut self) -> bool {
        if !self.is_running || self.remaining.is_zero() {
            return false;
        }

        *self.remaining = self.remaining.saturating_sub(TICK);

        if self.remaining.is_zero() {
            self.is_running = false;
            self.switch_activity();
            return true;
        }

        false
    }

    pub fn reset(&mut self) {
        self.load(Activity::Work);
        self.is_running = false;
    }

    fn switch_activity(&mut self) {
        self.load(self.activity.next());
    }

    fn load(&mut self, activity: Activity) {
        self.activity = activity;
        self.total = self.settings.duration_of(activity);
        self.remaining = self.total;
    }

    pub fn time_remaining(&self) -> SessionDuration {
        self.remaining
    }

    #[allow(dead_code)]
    pub fn total(&self) -> SessionDuration {
        self.total
    }

    pub fn timer_is_active(&self) -> bool {
        self.is_running
    }

    pub fn current_activity(&self) -> Activity {
        self.activity
    }

    /// Elapsed share of the current session, from 0 to 100.
    #[allow(dead_code)]
    pub fn progress_percentage(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        let elapsed = self.total.saturating_sub(*self.remaining);
        elapsed.as_secs_f64() / self.total.as_secs_f64() * 100.0
    }

    /// Remaining share of the current session, from 0 to 100.
    pub fn remaining_percentage(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.remaining.as_secs_f64() / self.total.as_secs_f64() * 100.0
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.activity,
            self.remaining,
            if self.is_running { "running" } else { "paused" }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Work,
    Break,
}

impl Activity {
    pub fn next(self) -> Activity {
        match self {
            Activity::Work => Activity::Break,
            Activity::Break => Activity::Work,
        }
    }

    pub fn is_work(self) -> bool {
        self == Activity::Work
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Activity::Work => write!(f, "work"),
            Activity::Break => write!(f, "break"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub work_duration: SessionDuration,
    pub break_duration: SessionDuration,
}

impl Settings {
    /// Builds settings from whole minutes, rejecting anything that is not strictly positive.
    pub fn from_minutes(work_minutes: i64, break_minutes: i64) -> Result<Settings, SettingsError> {
        if work_minutes <= 0 {
            return Err(SettingsError::NonPositiveWork(work_minutes));
        }
        if break_minutes <= 0 {
            return Err(SettingsError::NonPositiveBreak(break_minutes));
        }

        let work_duration = SessionDuration::checked_from_minutes(work_minutes.unsigned_abs())
            .ok_or(SettingsError::TooLongWork(work_minutes))?;
        let break_duration = SessionDuration::checked_from_minutes(break_minutes.unsigned_abs())
            .ok_or(SettingsError::TooLongBreak(break_minutes))?;

        Ok(Settings {
            work_duration,
            break_duration,
        })
    }

    pub fn duration_of(&self, activity: Activity) -> SessionDuration {
        match activity {
            Activity::Work => self.work_duration,
            Activity::Break => self.break_duration,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            work_duration: SessionDuration::from_minutes(25),
            break_duration: SessionDuration::from_minutes(5),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("work duration must be positive, got {0}")]
    NonPositiveWork(i64),
    #[error("break duration must be positive, got {0}")]
    NonPositiveBreak(i64),
    #[error("work duration of {0} minutes is too long")]
    TooLongWork(i64),
    #[error("break duration of {0} minutes is too long")]
    TooLongBreak(i64),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionDuration(pub Duration);

impl SessionDuration {
    /// Saturates at the longest representable duration.
    pub fn from_minutes(minutes: u64) -> Self {
        SessionDuration(Duration::from_secs(minutes.saturating_mul(60)))
    }

    pub fn checked_from_minutes(minutes: u64) -> Option<Self> {
        minutes
            .checked_mul(60)
            .map(|seconds| SessionDuration(Duration::from_secs(seconds)))
    }
}

impl Deref for SessionDuration {
    type Target = Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SessionDuration {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Duration> for SessionDuration {
    fn from(duration: Duration) -> Self {
        SessionDuration(duration)
    }
}

/// Formats as `MM:SS`. Minutes are not wrapped into hours.
impl Display for SessionDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = self.0.as_secs() / 60;
        let seconds = self.0.as_secs() % 60;
        write!(f, "{minutes:02}:{seconds:02}")
    }
}
