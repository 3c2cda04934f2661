//! Paths derived from how the running process was started.
//!
//! The standard library already selects the right per-platform strategy
//! for resolving the running executable, so no OS-specific branches live
//! here.

use std::path::{Path, PathBuf};

/// argv\[0\], but only when it names an actual file path. A bare command
/// name looked up through PATH is not usable as one.
pub fn invocation_path() -> Option<PathBuf> {
    let arg0 = std::env::args_os().next()?;
    let path = PathBuf::from(arg0);
    if names_a_path(&path) {
        Some(path)
    } else {
        None
    }
}

/// Resolved real path of the running executable.
pub fn executable_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.canonicalize().unwrap_or(exe))
}

/// `<path>.png`, appended to the full file name rather than replacing an
/// existing extension.
pub fn with_png_suffix(path: PathBuf) -> PathBuf {
    let mut name = path.into_os_string();
    name.push(".png");
    PathBuf::from(name)
}

fn names_a_path(path: &Path) -> bool {
    match path.parent() {
        Some(parent) => !parent.as_os_str().is_empty(),
        None => false,
    }
}
