//! Bounded recursive deletion inside the config root.
//!
//! The equivalent of `rm -rf ~/.alephone/<dir>` with the traversal rules
//! the launcher needs: depth-first with children removed before parents,
//! symbolic links unlinked but never followed, no crossing of filesystem
//! mount boundaries, and a fixed cap on simultaneously open directory
//! handles.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::ConfigDir;

/// Upper bound on simultaneously open directory handles during the walk.
const MAX_OPEN_DIRS: usize = 20;

/// A deletion that failed partway. The caller reports it and aborts the
/// surrounding operation.
#[derive(Debug, Error)]
#[error("failed to delete {}", path.display())]
pub struct PurgeError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Recursively remove `<root>/<subdir_name>`.
///
/// `subdir_name` is one of the fixed data directory names, so the target
/// can never point outside the config root. A missing target is success.
pub fn remove_data_dir(config: &ConfigDir, subdir_name: &str) -> Result<(), PurgeError> {
    let target = config.join(subdir_name);

    tracing::debug!(path = %target.display(), "delete");

    // A dangling link at the target is still something to unlink, so the
    // existence check must not resolve symlinks.
    match std::fs::symlink_metadata(&target) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(PurgeError {
                path: target,
                source: err,
            })
        }
        Ok(_) => {}
    }

    let walk = WalkDir::new(&target)
        .follow_links(false)
        .contents_first(true)
        .same_file_system(true)
        .max_open(MAX_OPEN_DIRS);

    for entry in walk {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(PathBuf::from)
                .unwrap_or_else(|| target.clone());
            PurgeError {
                path,
                source: err.into(),
            }
        })?;

        // A symlink entry reports a non-directory file type here and is
        // unlinked as a leaf; its target is never entered.
        let removed = if entry.file_type().is_dir() {
            std::fs::remove_dir(entry.path())
        } else {
            std::fs::remove_file(entry.path())
        };

        if let Err(source) = removed {
            return Err(PurgeError {
                path: entry.path().to_path_buf(),
                source,
            });
        }
    }

    Ok(())
}
