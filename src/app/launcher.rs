// launcher.rs
use crate::app::conversion::ConversionCommand;
use crate::config::Settings;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::sync::mpsc::{channel, Receiver, Sender};
use thiserror::Error;

/// `$0` of the wrapper script inside the terminal.
const SCRIPT_NAME: &str = "dnglab-gui";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no source has been selected")]
    NoSource,
    #[error("source {} has no file name", .0.display())]
    MissingFileName(PathBuf),
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Reported by the watcher thread once the spawned process ends.
#[derive(Debug)]
pub enum LaunchUpdate {
    Exited { id: u64, status: ExitStatus },
    WaitFailed { id: u64, error: String },
}

/// Starts a conversion command somewhere the user can watch it.
pub trait ProcessLauncher {
    /// Returns an id that later [`LaunchUpdate`]s refer to.
    fn launch(&mut self, command: &ConversionCommand) -> Result<u64, LaunchError>;
}

/// Runs the converter inside a new terminal window. The terminal's exit
/// status is observed, nothing else: no timeout, no cancellation.
pub struct TerminalLauncher {
    terminal: String,
    terminal_args: Vec<String>,
    shell: String,
    keep_open: bool,
    next_id: u64,
    sender: Sender<LaunchUpdate>,
}

impl TerminalLauncher {
    pub fn new(settings: &Settings) -> (Self, Receiver<LaunchUpdate>) {
        let (sender, receiver) = channel();
        let launcher = Self {
            terminal: settings.terminal.clone(),
            terminal_args: settings.terminal_args.clone(),
            shell: settings.shell.clone(),
            keep_open: settings.keep_terminal_open,
            next_id: 1,
            sender,
        };
        (launcher, receiver)
    }

    /// Arguments handed to the terminal program. The converter argv follows
    /// the script as positional parameters, so paths are never re-parsed.
    pub fn terminal_argv(&self, command: &ConversionCommand) -> Vec<OsString> {
        let mut argv: Vec<OsString> = self.terminal_args.iter().map(OsString::from).collect();
        argv.push(OsString::from(&self.shell));
        argv.push(OsString::from("-c"));
        argv.push(OsString::from(wrapper_script(self.keep_open)));
        argv.push(OsString::from(SCRIPT_NAME));
        argv.extend(command.argv());
        argv
    }
}

impl ProcessLauncher for TerminalLauncher {
    fn launch(&mut self, command: &ConversionCommand) -> Result<u64, LaunchError> {
        let mut child = Command::new(&self.terminal)
            .args(self.terminal_argv(command))
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.terminal.clone(),
                source,
            })?;

        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, pid = child.id(), terminal = %self.terminal, "terminal spawned");

        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let update = match child.wait() {
                Ok(status) => LaunchUpdate::Exited { id, status },
                Err(e) => LaunchUpdate::WaitFailed {
                    id,
                    error: e.to_string(),
                },
            };
            // The window may already be gone.
            let _ = sender.send(update);
        });

        Ok(id)
    }
}

fn wrapper_script(keep_open: bool) -> &'static str {
    if keep_open {
        r#""$@"; status=$?; echo; echo "Converter exited with status $status"; exec "${SHELL:-sh}""#
    } else {
        r#""$@"; status=$?; echo; echo "Converter exited with status $status""#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::conversion::Source;
    use crate::config::ConversionOptions;
    use std::path::Path;
    use std::time::Duration;

    fn command() -> ConversionCommand {
        ConversionCommand::build(
            "dnglab",
            &Source::File(PathBuf::from("/a b/IMG_0001.CR3")),
            Path::new("/out"),
            &ConversionOptions::default(),
        )
        .unwrap()
    }

    fn settings_with_terminal(terminal: &str) -> Settings {
        Settings {
            terminal: terminal.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn terminal_argv_passes_converter_as_positional_parameters() {
        let (launcher, _receiver) = TerminalLauncher::new(&Settings::default());
        let argv: Vec<String> = launcher
            .terminal_argv(&command())
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(&argv[..3], &["--", "bash", "-c"]);
        assert!(argv[3].starts_with("\"$@\";"));
        assert!(argv[3].contains("exec \"${SHELL:-sh}\""));
        assert_eq!(
            &argv[4..],
            &["dnglab-gui", "dnglab", "convert", "/a b/IMG_0001.CR3", "/out/IMG_0001.DNG"]
        );
    }

    #[test]
    fn closing_terminal_skips_interactive_shell() {
        let settings = Settings {
            keep_terminal_open: false,
            ..Settings::default()
        };
        let (launcher, _receiver) = TerminalLauncher::new(&settings);
        let argv = launcher.terminal_argv(&command());
        assert!(!argv[3].to_string_lossy().contains("exec"));
    }

    #[test]
    fn missing_terminal_reports_spawn_error() {
        let (mut launcher, _receiver) =
            TerminalLauncher::new(&settings_with_terminal("/nonexistent/dnglab-gui-terminal"));
        let err = launcher.launch(&command()).unwrap_err();
        match err {
            LaunchError::Spawn { program, .. } => {
                assert_eq!(program, "/nonexistent/dnglab-gui-terminal")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_is_reported_with_launch_id() {
        let (mut launcher, receiver) = TerminalLauncher::new(&settings_with_terminal("true"));
        let first = launcher.launch(&command()).unwrap();
        let update = receiver.recv_timeout(Duration::from_secs(10)).unwrap();
        match update {
            LaunchUpdate::Exited { id, status } => {
                assert_eq!(id, first);
                assert!(status.success());
            }
            other => panic!("unexpected update: {other:?}"),
        }

        let (mut launcher, receiver) = TerminalLauncher::new(&settings_with_terminal("false"));
        launcher.launch(&command()).unwrap();
        match receiver.recv_timeout(Duration::from_secs(10)).unwrap() {
            LaunchUpdate::Exited { status, .. } => assert!(!status.success()),
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn ids_increase_per_launch() {
        let (mut launcher, _receiver) = TerminalLauncher::new(&settings_with_terminal("true"));
        let a = launcher.launch(&command()).unwrap();
        let b = launcher.launch(&command()).unwrap();
        assert!(b > a);
    }
}
