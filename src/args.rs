use crate::notification::SoundPreference;
pub use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  pomodoro                 # Default: 25min work, 5min break
  pomodoro -w 30 -b 10     # 30min work, 10min break
  pomodoro -w 45           # 45min work, 5min break (default)";

#[derive(Debug, Parser)]
#[command(version, about = "Pomodoro Timer", after_help = EXAMPLES)]
pub struct Args {
    /// Work session duration in minutes
    #[arg(
        short,
        long = "work",
        value_name = "MINUTES",
        default_value_t = 25,
        allow_negative_numbers = true
    )]
    pub work_minutes: i64,

    /// Break session duration in minutes
    #[arg(
        short,
        long = "break",
        value_name = "MINUTES",
        default_value_t = 5,
        allow_negative_numbers = true
    )]
    pub break_minutes: i64,

    /// How to play the sound when a session is over
    #[arg(long, value_enum, default_value_t = SoundPreference::Auto)]
    pub sound: SoundPreference,

    /// Do not show a desktop notification when a session is over
    #[arg(long)]
    pub no_desktop_notification: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
