//! Starting a game session.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::command;
use crate::config::ConfigDir;
use crate::dataset::Game;

/// The game engine binary, expected somewhere in PATH.
const GAME_BINARY: &str = "alephone";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("`alephone' is not in PATH")]
    NotFound,
    #[error("failed to run {binary}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

/// Run the game engine on one data set and wait for the session to end.
pub fn launch(game: Game, config: &ConfigDir) -> Result<(), LaunchError> {
    launch_binary(GAME_BINARY, &game.data_path(config))
}

fn launch_binary(binary: &str, data_path: &Path) -> Result<(), LaunchError> {
    command::echo_command(&format!(
        "{binary} {}",
        shell_words::quote(&data_path.to_string_lossy())
    ));

    match Command::new(binary).arg(data_path).status() {
        Ok(status) => {
            // a non-zero exit from a binary that did start is a normal
            // session end
            if !status.success() {
                tracing::debug!(binary, ?status, "game exited with non-zero status");
            }
            Ok(())
        }
        Err(source) => {
            // distinguish "binary missing" from "present but unspawnable"
            if which::which(binary).is_err() {
                Err(LaunchError::NotFound)
            } else {
                Err(LaunchError::Spawn {
                    binary: binary.to_string(),
                    source,
                })
            }
        }
    }
}
