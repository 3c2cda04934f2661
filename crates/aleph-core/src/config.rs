//! The per-user launcher state directory (`~/.alephone/`).
//!
//! Everything the launcher persists lives here: the three game data
//! directories, the cached icon and the download log.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Directory name under the user's home.
pub const CONFIG_DIR_NAME: &str = ".alephone";

/// File name of the cached application icon.
pub const ICON_FILE: &str = "alephone.png";

/// File name of the download log written by the terminal session.
pub const LOG_FILE: &str = "download.log";

/// Resolved root of the launcher's writable state. Immutable once built.
#[derive(Debug, Clone)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// Resolve `~/.alephone/` from the user's home directory.
    ///
    /// Every other core operation assumes a valid root, so an unresolvable
    /// home directory is fatal here rather than recoverable later.
    pub fn locate() -> anyhow::Result<Self> {
        let home = dirs::home_dir().context("home directory could not be determined")?;
        Ok(Self {
            root: home.join(CONFIG_DIR_NAME),
        })
    }

    /// A config directory rooted at an explicit path.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A path directly under the root. `name` is always one of the fixed
    /// entry names the launcher owns, never user input.
    pub fn join(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// `~/.alephone/alephone.png`, rewritten by the download pipeline.
    pub fn icon_path(&self) -> PathBuf {
        self.join(ICON_FILE)
    }

    /// `~/.alephone/download.log`.
    pub fn log_path(&self) -> PathBuf {
        self.join(LOG_FILE)
    }

    /// Create the root if it does not exist yet.
    pub fn ensure_exists(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }
}
