//! Interactive terminal sessions for the download pipeline.
//!
//! The spawned command owns the foreground interaction: the launcher
//! blocks until the terminal exits, and any pause-before-close behavior
//! belongs to the spawned script itself, not to the caller.

use std::io;
use std::path::Path;
use std::process::Command;

use crate::command;

/// Fixed title of the download terminal.
const TITLE: &str = "Download (close window to abort)";

/// Fixed terminal geometry, columns x rows.
const GEOMETRY: &str = "100x30";

/// Runs a shell script inside an interactive terminal, teeing its output
/// to a log file.
pub trait Terminal {
    fn run(&mut self, script: &str, log_file: &Path) -> io::Result<()>;
}

/// xterm-backed implementation.
#[derive(Debug, Default)]
pub struct Xterm {
    /// Root coordinates of the launcher window; the terminal opens there.
    pub origin: Option<(i32, i32)>,
}

impl Terminal for Xterm {
    fn run(&mut self, script: &str, log_file: &Path) -> io::Result<()> {
        let geometry = geometry_arg(self.origin);
        let log = log_file.to_string_lossy();
        let args = [
            "-title",
            TITLE,
            "-geometry",
            geometry.as_str(),
            "-l",
            "-lf",
            log.as_ref(),
            "-e",
            "sh",
            "-c",
            script,
        ];

        command::echo_command(&format!("xterm {}", shell_words::join(args)));

        // The exit status is not inspected: the pipeline's own pause and
        // the log file are the user's feedback channel.
        Command::new("xterm").args(args).status()?;
        Ok(())
    }
}

fn geometry_arg(origin: Option<(i32, i32)>) -> String {
    match origin {
        Some((x, y)) => format!("{GEOMETRY}+{x}+{y}"),
        None => GEOMETRY.to_string(),
    }
}
