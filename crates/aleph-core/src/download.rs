//! Drives the game data (re-)download flow.
//!
//! One flight at a time: the launcher blocks while the spawned terminal
//! owns the interaction, so no two of these operations ever overlap
//! within a process.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ConfigDir;
use crate::dataset::{self, Game};
use crate::purge::{self, PurgeError};
use crate::terminal::Terminal;

/// Pinned icon fetched alongside the game data.
const ICON_URL: &str = "https://raw.githubusercontent.com/Aleph-One-Marathon/alephone/5653d64ba12f2cf058abcd8fd9ec2f06bcae9839/flatpak/alephone.png";

/// Upstream repositories holding the three data sets, one per suffix.
const DATA_REPO: &str = "https://github.com/Aleph-One-Marathon/data-marathon";

/// Network fetch tool required by the built-in pipeline.
const FETCH_TOOL: &str = "wget";

/// Shell fragment keeping the terminal open until the user has read the
/// log.
const PAUSE: &str = "set +x;echo;echo \"Press ENTER to close window\";read x";

/// Answers the re-download confirmation prompts.
pub trait Confirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

#[derive(Debug, Error)]
pub enum DownloadError {
    /// Detected before anything is touched on disk.
    #[error("`wget' is required to download the game files")]
    FetchToolMissing,
    /// A stale data directory could not be cleared; the run is aborted.
    #[error(transparent)]
    Purge(#[from] PurgeError),
    #[error("failed to prepare {}", path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The terminal itself could not be spawned.
    #[error("failed to open download terminal")]
    Terminal(#[source] io::Error),
}

/// Orchestrates one download run: confirmation, purge, then the external
/// pipeline inside an interactive terminal.
pub struct Downloader<C, T> {
    config: ConfigDir,
    /// User-supplied download script; the built-in pipeline runs when
    /// unset. Selected once at startup.
    script: Option<PathBuf>,
    fetch_tool: &'static str,
    confirm: C,
    terminal: T,
}

impl<C: Confirm, T: Terminal> Downloader<C, T> {
    pub fn new(config: ConfigDir, script: Option<PathBuf>, confirm: C, terminal: T) -> Self {
        if let Some(script) = &script {
            tracing::info!(script = %script.display(), "using custom download script");
        }
        Self {
            config,
            script,
            fetch_tool: FETCH_TOOL,
            confirm,
            terminal,
        }
    }

    /// Run one download flow. `Ok(true)` means the icon may have changed
    /// and should be re-resolved; `Ok(false)` means nothing happened.
    pub fn trigger(&mut self) -> Result<bool, DownloadError> {
        match self.script.clone() {
            Some(script) => self.run_custom(&script),
            None => self.run_builtin(),
        }
    }

    fn run_custom(&mut self, script: &Path) -> Result<bool, DownloadError> {
        // a custom script always re-confirms, present data or not
        let message = format!(
            "Do you want to (re-)download the game files using this custom script?\n\n>> {}",
            script.display()
        );
        if !self.confirm.confirm("Custom download script", &message) {
            return Ok(false);
        }

        self.prepare()?;

        let quoted = shell_words::quote(&script.to_string_lossy()).into_owned();
        let pipeline = format!("sh -c {quoted} ; {PAUSE}");
        self.terminal
            .run(&pipeline, &self.config.log_path())
            .map_err(DownloadError::Terminal)?;

        Ok(true)
    }

    fn run_builtin(&mut self) -> Result<bool, DownloadError> {
        // before anything destructive happens
        if which::which(self.fetch_tool).is_err() {
            return Err(DownloadError::FetchToolMissing);
        }

        // there is only something to lose when every data set is already
        // on disk
        if dataset::all_data_present(&self.config)
            && !self
                .confirm
                .confirm("Download again?", "Do you want to re-download the game files?")
        {
            return Ok(false);
        }

        self.prepare()?;

        for game in Game::ALL {
            purge::remove_data_dir(&self.config, game.data_dir_name())?;
        }

        // the pipeline writes a fresh copy
        remove_stale(&self.config.icon_path());

        let pipeline = builtin_pipeline(&self.config);
        self.terminal
            .run(&pipeline, &self.config.log_path())
            .map_err(DownloadError::Terminal)?;

        Ok(true)
    }

    /// Ensure the config root exists and drop the previous download log.
    fn prepare(&self) -> Result<(), DownloadError> {
        self.config
            .ensure_exists()
            .map_err(|source| DownloadError::Prepare {
                path: self.config.root().to_path_buf(),
                source,
            })?;
        remove_stale(&self.config.log_path());
        Ok(())
    }
}

/// Delete a leftover file, tolerating its absence.
fn remove_stale(path: &Path) {
    tracing::debug!(path = %path.display(), "delete");
    if let Err(err) = std::fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %err, "could not delete stale file");
        }
    }
}

/// The default download: best-effort icon fetch, then the three data
/// archives in sequence, each gated on the previous one succeeding. On
/// failure the pipeline halts and pauses so the log stays readable.
fn builtin_pipeline(config: &ConfigDir) -> String {
    let root = shell_words::quote(&config.root().to_string_lossy()).into_owned();
    let icon = shell_words::quote(&config.icon_path().to_string_lossy()).into_owned();

    let fetch: Vec<String> = Game::ALL
        .iter()
        .map(|game| {
            format!(
                "(wget -O- {DATA_REPO}{}/archive/refs/heads/master.tar.gz | tar xfz - -C {root})",
                game.repo_suffix()
            )
        })
        .collect();

    format!(
        "set -x;(wget -O {icon} {ICON_URL} ;{}) || ({PAUSE})",
        fetch.join(" && ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedConfirm {
        answer: bool,
        prompts: Vec<String>,
    }

    impl ScriptedConfirm {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                prompts: Vec::new(),
            }
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&mut self, title: &str, _message: &str) -> bool {
            self.prompts.push(title.to_string());
            self.answer
        }
    }

    #[derive(Default)]
    struct RecordingTerminal {
        runs: Vec<String>,
    }

    impl Terminal for RecordingTerminal {
        fn run(&mut self, script: &str, _log_file: &Path) -> io::Result<()> {
            self.runs.push(script.to_string());
            Ok(())
        }
    }

    fn downloader(
        config: ConfigDir,
        script: Option<PathBuf>,
        answer: bool,
    ) -> Downloader<ScriptedConfirm, RecordingTerminal> {
        Downloader {
            config,
            script,
            // guaranteed to be present in the test environment
            fetch_tool: "sh",
            confirm: ScriptedConfirm::new(answer),
            terminal: RecordingTerminal::default(),
        }
    }

    fn seed_all_data(config: &ConfigDir) {
        for game in Game::ALL {
            let dir = game.data_path(config);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("Shapes.shps"), "data").unwrap();
        }
    }

    #[test]
    fn custom_script_always_prompts() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path().join(".alephone"));

        // no data on disk, and still the prompt comes first
        let mut d = downloader(config.clone(), Some(PathBuf::from("/opt/fetch.sh")), false);
        assert!(!d.trigger().unwrap());
        assert_eq!(d.confirm.prompts, vec!["Custom download script"]);
        assert!(d.terminal.runs.is_empty());
        assert!(!config.root().exists());
    }

    #[test]
    fn custom_script_runs_after_confirm() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path().join(".alephone"));

        let mut d = downloader(config.clone(), Some(PathBuf::from("/opt/fetch.sh")), true);
        assert!(d.trigger().unwrap());
        assert!(config.root().is_dir());
        assert_eq!(d.terminal.runs.len(), 1);
        assert!(d.terminal.runs[0].contains("/opt/fetch.sh"));
        assert!(d.terminal.runs[0].contains("Press ENTER to close window"));
    }

    #[test]
    fn builtin_prompts_when_all_data_present() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path());
        seed_all_data(&config);

        let mut d = downloader(config.clone(), None, false);
        assert!(!d.trigger().unwrap());
        assert_eq!(d.confirm.prompts, vec!["Download again?"]);
        assert!(d.terminal.runs.is_empty());
        assert!(Game::Marathon.has_data(&config));
    }

    #[test]
    fn builtin_skips_prompt_when_data_incomplete() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path());

        let dir = Game::Marathon.data_path(&config);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Shapes.shps"), "data").unwrap();

        // would decline if asked, but must not be asked
        let mut d = downloader(config, None, false);
        assert!(d.trigger().unwrap());
        assert!(d.confirm.prompts.is_empty());
        assert_eq!(d.terminal.runs.len(), 1);
    }

    #[test]
    fn builtin_purges_before_fetch() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path());
        seed_all_data(&config);
        std::fs::write(config.icon_path(), "old icon").unwrap();
        std::fs::write(config.log_path(), "old log").unwrap();

        let mut d = downloader(config.clone(), None, true);
        assert!(d.trigger().unwrap());

        // the fake terminal downloads nothing, so the purge is observable
        for game in Game::ALL {
            assert!(!game.data_path(&config).exists());
        }
        assert!(!config.icon_path().exists());
        assert!(!config.log_path().exists());

        assert_eq!(d.terminal.runs.len(), 1);
        let pipeline = &d.terminal.runs[0];
        assert!(pipeline.contains("wget -O- https://github.com/Aleph-One-Marathon/data-marathon"));
        assert!(pipeline.contains(&config.root().to_string_lossy().to_string()));
    }

    #[test]
    fn fresh_environment_runs_without_prompt_or_purge() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path().join("home/.alephone"));

        let mut d = downloader(config.clone(), None, false);
        assert!(d.trigger().unwrap());
        assert!(d.confirm.prompts.is_empty());
        assert!(config.root().is_dir());
        assert_eq!(d.terminal.runs.len(), 1);
    }

    #[test]
    fn missing_fetch_tool_has_no_side_effects() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path());
        seed_all_data(&config);
        std::fs::write(config.log_path(), "old log").unwrap();

        let mut d = downloader(config.clone(), None, true);
        d.fetch_tool = "definitely-not-a-real-fetch-tool";

        match d.trigger() {
            Err(DownloadError::FetchToolMissing) => {}
            other => panic!("expected FetchToolMissing, got {other:?}"),
        }
        assert!(d.confirm.prompts.is_empty());
        assert!(d.terminal.runs.is_empty());
        assert!(Game::Infinity.has_data(&config));
        assert!(config.log_path().exists());
    }

    #[test]
    fn builtin_pipeline_chains_the_three_archives() {
        let config = ConfigDir::at("/home/user/.alephone");
        let pipeline = builtin_pipeline(&config);

        let first = pipeline.find("data-marathon/archive").unwrap();
        let second = pipeline.find("data-marathon-2/archive").unwrap();
        let third = pipeline.find("data-marathon-infinity/archive").unwrap();
        assert!(first < second && second < third);

        // icon fetch is best-effort, data fetches are gated on each other
        assert!(pipeline.contains("alephone.png"));
        assert_eq!(pipeline.matches(" && ").count(), 2);
        assert!(pipeline.ends_with("|| (set +x;echo;echo \"Press ENTER to close window\";read x)"));
    }
}
