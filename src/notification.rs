use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, Sink};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Sample shipped with ALSA on most Linux systems.
const ALERT_SAMPLE: &str = "/usr/share/sounds/alsa/Front_Left.wav";
const TONE_FREQUENCY: f32 = 800.0;
const TONE_LENGTH: Duration = Duration::from_millis(600);

const NOTIFICATION_SUMMARY: &str = "Pomodoro Timer";
const NOTIFICATION_BODY: &str = "Session complete";

/// Something that draws the user's attention when a session is over.
///
/// Implementations must return immediately and must not fail; whatever goes
/// wrong while alerting stays inside the implementation.
pub trait Alert {
    fn alert(&self);
}

/// How the alert sound should be produced, as chosen on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SoundPreference {
    /// Try everything available, best first
    #[default]
    Auto,
    /// Play a tone through the default audio device
    Tone,
    /// Use an external audio player
    Command,
    /// Ring the terminal bell
    Bell,
    /// No sound
    Off,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoundStrategy {
    Tone,
    Command(PlayerCommand),
    Bell,
    Silent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerCommand {
    program: PathBuf,
    args: Vec<&'static str>,
}

impl PlayerCommand {
    fn play(&self) -> Result<(), NotificationError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NotificationError::Spawn(self.program.clone(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(NotificationError::PlayerFailed(self.program.clone(), status))
        }
    }
}

impl SoundStrategy {
    /// Builds the ordered list of strategies to try, looking up external players in `path`.
    /// The bell ends every list except the silent one. `Auto` only includes the tone when an
    /// audio device was found.
    pub fn chain(
        preference: SoundPreference,
        path: Option<&OsStr>,
        audio_device: bool,
    ) -> Vec<SoundStrategy> {
        let mut chain = match preference {
            SoundPreference::Off => return vec![SoundStrategy::Silent],
            SoundPreference::Bell => vec![],
            SoundPreference::Tone => vec![SoundStrategy::Tone],
            SoundPreference::Command => probe_players(path),
            SoundPreference::Auto => {
                let mut chain = Vec::new();
                if audio_device {
                    chain.push(SoundStrategy::Tone);
                }
                chain.extend(probe_players(path));
                chain
            }
        };
        chain.push(SoundStrategy::Bell);
        chain
    }

    fn play(&self) -> Result<(), NotificationError> {
        match self {
            SoundStrategy::Tone => play_tone(),
            SoundStrategy::Command(command) => command.play(),
            SoundStrategy::Bell => ring_bell(),
            SoundStrategy::Silent => Ok(()),
        }
    }
}

/// External players in order of preference. Only probed on Linux.
fn probe_players(path: Option<&OsStr>) -> Vec<SoundStrategy> {
    if !cfg!(target_os = "linux") {
        return vec![];
    }

    let candidates: [(&str, Vec<&'static str>); 3] = [
        ("paplay", vec![ALERT_SAMPLE]),
        ("aplay", vec!["-q", ALERT_SAMPLE]),
        ("speaker-test", vec!["-t", "sine", "-f", "800", "-l", "1"]),
    ];

    candidates
        .into_iter()
        .filter_map(|(name, args)| {
            find_program(name, path?).map(|program| {
                SoundStrategy::Command(PlayerCommand { program, args })
            })
        })
        .collect()
}

fn find_program(name: &str, path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn play_tone() -> Result<(), NotificationError> {
    let (_stream, stream_handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&stream_handle)?;

    let sample = Path::new(ALERT_SAMPLE);
    if sample.is_file() {
        let file = File::open(sample).map_err(NotificationError::Sample)?;
        sink.append(Decoder::new(BufReader::new(file))?);
    } else {
        sink.append(
            SineWave::new(TONE_FREQUENCY)
                .take_duration(TONE_LENGTH)
                .amplify(0.25),
        );
    }
    sink.set_volume(1.0);
    sink.sleep_until_end();

    Ok(())
}

/// Holding the lock keeps the bell from landing inside a frame that is being drawn.
fn ring_bell() -> Result<(), NotificationError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(b"\x07").map_err(NotificationError::Bell)?;
    stdout.flush().map_err(NotificationError::Bell)?;
    Ok(())
}

fn show_desktop_notification(title: &str, message: &str) -> Result<(), NotificationError> {
    notify_rust::Notification::new()
        .summary(title)
        .body(message)
        .show()?;
    Ok(())
}

/// Alerts with a desktop notification and the first sound strategy that works.
#[derive(Clone, Debug)]
pub struct Notifier {
    sounds: Vec<SoundStrategy>,
    desktop_notification: bool,
}

impl Notifier {
    pub fn new(preference: SoundPreference, desktop_notification: bool) -> Self {
        let path = std::env::var_os("PATH");
        // A missing device makes the audio backend complain on stderr, so only find out once.
        let audio_device =
            preference == SoundPreference::Auto && OutputStream::try_default().is_ok();
        let sounds = SoundStrategy::chain(preference, path.as_deref(), audio_device);
        debug!(?sounds, desktop_notification, "alert strategies");

        Self {
            sounds,
            desktop_notification,
        }
    }

    fn alert_sync(&self) {
        if self.desktop_notification {
            if let Err(err) = show_desktop_notification(NOTIFICATION_SUMMARY, NOTIFICATION_BODY) {
                warn!(%err, "desktop notification failed");
            }
        }

        for sound in &self.sounds {
            match sound.play() {
                Ok(()) => return,
                Err(err) => warn!(%err, ?sound, "alert sound failed, trying next"),
            }
        }
    }
}

impl Alert for Notifier {
    fn alert(&self) {
        let notifier = self.clone();
        thread::spawn(move || notifier.alert_sync());
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to show desktop notification: {0}")]
    Show(#[from] notify_rust::error::Error),
    #[error("failed to create audio stream for notification sound: {0}")]
    StreamCreation(#[from] rodio::StreamError),
    #[error("failed to play notification sound: {0}")]
    Play(#[from] rodio::PlayError),
    #[error("failed to decode notification sound: {0}")]
    Decoding(#[from] rodio::decoder::DecoderError),
    #[error("failed to open notification sound: {0}")]
    Sample(io::Error),
    #[error("failed to start {}: {}", .0.display(), .1)]
    Spawn(PathBuf, io::Error),
    #[error("{} exited with {}", .0.display(), .1)]
    PlayerFailed(PathBuf, ExitStatus),
    #[error("failed to ring terminal bell: {0}")]
    Bell(io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn path_with(programs: &[&str]) -> (tempfile::TempDir, OsString) {
        let dir = tempfile::tempdir().unwrap();
        for program in programs {
            File::create(dir.path().join(program)).unwrap();
        }
        let path = std::env::join_paths([dir.path()]).unwrap();
        (dir, path)
    }

    fn program_names(chain: &[SoundStrategy]) -> Vec<String> {
        chain
            .iter()
            .map(|strategy| match strategy {
                SoundStrategy::Tone => "tone".to_string(),
                SoundStrategy::Command(command) => command
                    .program
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned(),
                SoundStrategy::Bell => "bell".to_string(),
                SoundStrategy::Silent => "silent".to_string(),
            })
            .collect()
    }

    #[test]
    fn off_is_silent() {
        let (_dir, path) = path_with(&["paplay"]);
        assert_eq!(
            SoundStrategy::chain(SoundPreference::Off, Some(path.as_os_str()), true),
            vec![SoundStrategy::Silent]
        );
    }

    #[test]
    fn bell_ends_every_audible_chain() {
        for preference in [
            SoundPreference::Auto,
            SoundPreference::Tone,
            SoundPreference::Command,
            SoundPreference::Bell,
        ] {
            let chain = SoundStrategy::chain(preference, None, true);
            assert_eq!(chain.last(), Some(&SoundStrategy::Bell));
        }
        assert_eq!(
            SoundStrategy::chain(SoundPreference::Bell, None, true),
            vec![SoundStrategy::Bell]
        );
    }

    #[test]
    fn missing_players_fall_back_to_bell() {
        let (_dir, path) = path_with(&[]);
        assert_eq!(
            program_names(&SoundStrategy::chain(
                SoundPreference::Command,
                Some(path.as_os_str()),
                true
            )),
            vec!["bell"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn players_are_probed_in_order() {
        let (_dir, path) = path_with(&["speaker-test", "paplay"]);
        assert_eq!(
            program_names(&SoundStrategy::chain(
                SoundPreference::Auto,
                Some(path.as_os_str()),
                true
            )),
            vec!["tone", "paplay", "speaker-test", "bell"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn directories_do_not_count_as_players() {
        let (dir, path) = path_with(&[]);
        std::fs::create_dir(dir.path().join("aplay")).unwrap();
        assert_eq!(
            program_names(&SoundStrategy::chain(
                SoundPreference::Command,
                Some(path.as_os_str()),
                true
            )),
            vec!["bell"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn auto_skips_the_tone_without_an_audio_device() {
        let (_dir, path) = path_with(&["aplay"]);
        assert_eq!(
            program_names(&SoundStrategy::chain(
                SoundPreference::Auto,
                Some(path.as_os_str()),
                false
            )),
            vec!["aplay", "bell"]
        );
        assert_eq!(
            SoundStrategy::chain(SoundPreference::Tone, None, false),
            vec![SoundStrategy::Tone, SoundStrategy::Bell]
        );
    }

    #[test]
    fn bell_waits_for_the_frame_being_drawn() {
        let frame = io::stdout().lock();
        let bell = thread::spawn(|| ring_bell().is_ok());

        thread::sleep(Duration::from_millis(100));
        assert!(!bell.is_finished());

        drop(frame);
        assert!(bell.join().unwrap());
    }

    #[test]
    fn silent_alert_returns_immediately() {
        let notifier = Notifier {
            sounds: vec![SoundStrategy::Silent],
            desktop_notification: false,
        };
        notifier.alert();
        notifier.alert_sync();
    }
}
