use crate::app::App;
use crate::args::{Args, Parser};
use crate::notification::Notifier;
use crate::pomodoro::Settings;
use std::fs::File;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::info;

mod app;
mod args;
mod event;
mod notification;
mod pomodoro;
mod shell;
mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match Settings::from_minutes(args.work_minutes, args.break_minutes) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.log_file {
        if let Err(err) = init_tracing(path) {
            eprintln!("Error: failed to open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }
    info!(
        work_duration = %settings.work_duration,
        break_duration = %settings.break_duration,
        sound = ?args.sound,
        "starting"
    );

    let notifier = Notifier::new(args.sound, !args.no_desktop_notification);

    let result = match App::new(settings, notifier) {
        Ok(mut app) => app.run().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "terminating");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to a file because the terminal belongs to the timer.
fn init_tracing(path: &Path) -> std::io::Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
