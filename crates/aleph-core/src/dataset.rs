//! The three game data bundles the launcher manages.
//!
//! Presence is derived state: always recomputed by looking at the
//! filesystem, never cached.

use std::path::{Path, PathBuf};

use crate::config::ConfigDir;

/// One of the three bundled game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Game {
    Marathon,
    Durandal,
    Infinity,
}

impl Game {
    pub const ALL: [Game; 3] = [Game::Marathon, Game::Durandal, Game::Infinity];

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            Game::Marathon => "Marathon",
            Game::Durandal => "Marathon 2: Durandal",
            Game::Infinity => "Marathon Infinity",
        }
    }

    /// Fixed data directory name under the config root.
    pub fn data_dir_name(self) -> &'static str {
        match self {
            Game::Marathon => "data-marathon-master",
            Game::Durandal => "data-marathon-2-master",
            Game::Infinity => "data-marathon-infinity-master",
        }
    }

    /// Suffix of the upstream `data-marathon` repository this variant's
    /// archive is fetched from.
    pub fn repo_suffix(self) -> &'static str {
        match self {
            Game::Marathon => "",
            Game::Durandal => "-2",
            Game::Infinity => "-infinity",
        }
    }

    pub fn data_path(self, config: &ConfigDir) -> PathBuf {
        config.join(self.data_dir_name())
    }

    /// Whether this variant's data directory is present and non-empty.
    pub fn has_data(self, config: &ConfigDir) -> bool {
        is_full_directory(&self.data_path(config))
    }
}

/// True only if the path exists, is a directory after symlink resolution,
/// and contains at least one entry.
pub fn is_full_directory(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_dir() {
        return false;
    }
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Whether all three game data directories are present, stopping at the
/// first absent one.
pub fn all_data_present(config: &ConfigDir) -> bool {
    Game::ALL.iter().all(|game| game.has_data(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_names_are_fixed() {
        assert_eq!(Game::Marathon.data_dir_name(), "data-marathon-master");
        assert_eq!(Game::Durandal.data_dir_name(), "data-marathon-2-master");
        assert_eq!(
            Game::Infinity.data_dir_name(),
            "data-marathon-infinity-master"
        );
    }

    #[test]
    fn missing_path_is_not_present() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!is_full_directory(&tmp.path().join("nope")));
    }

    #[test]
    fn empty_directory_is_not_present() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("empty");
        std::fs::create_dir(&dir).unwrap();
        assert!(!is_full_directory(&dir));
    }

    #[test]
    fn file_is_not_present() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert!(!is_full_directory(&file));
    }

    #[test]
    fn directory_with_entry_is_present() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("full");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("Shapes.shps"), "data").unwrap();
        assert!(is_full_directory(&dir));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_resolved() {
        let tmp = tempfile::tempdir().unwrap();
        let real = tmp.path().join("real");
        std::fs::create_dir(&real).unwrap();
        std::fs::write(real.join("entry"), "x").unwrap();

        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(is_full_directory(&link));
    }

    #[test]
    fn all_data_present_needs_every_variant() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(tmp.path());
        assert!(!all_data_present(&config));

        for game in [Game::Marathon, Game::Durandal] {
            let dir = game.data_path(&config);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("Map.sceA"), "data").unwrap();
        }
        assert!(!all_data_present(&config));

        let dir = Game::Infinity.data_path(&config);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Map.sceA"), "data").unwrap();
        assert!(all_data_present(&config));
    }
}
