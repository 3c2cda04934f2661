//! Application icon resolution.
//!
//! A fixed cascade of candidate PNG locations, first one that decodes
//! wins. The embedded fallback guarantees the launcher is never left
//! iconless.

use std::path::PathBuf;

use image::DynamicImage;

use crate::config::{ConfigDir, ICON_FILE};
use crate::exepath;

/// "input-gaming.svg" from the Tango Icon Library, converted to PNG,
/// released into the Public Domain.
static FALLBACK_ICON: &[u8] = include_bytes!("../assets/input-gaming.png");

/// Icon theme sizes probed under `/usr/share/icons/hicolor/`, largest
/// first.
const HICOLOR_SIZES: [u32; 9] = [512, 256, 128, 64, 48, 32, 24, 22, 16];

/// Where a resolved icon came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    File(PathBuf),
    Builtin,
}

/// A fully decoded application icon.
pub struct AppIcon {
    pub image: DynamicImage,
    pub source: IconSource,
}

/// Resolve the application icon. Re-running after a download picks up a
/// freshly written `~/.alephone/alephone.png`.
pub fn resolve(config: &ConfigDir) -> AppIcon {
    load_first(candidate_paths(config))
}

/// Candidate locations in resolution order.
fn candidate_paths(config: &ConfigDir) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    let invocation = exepath::invocation_path().map(exepath::with_png_suffix);
    if let Some(path) = &invocation {
        candidates.push(path.clone());
    }

    if let Some(path) = exepath::executable_path().map(exepath::with_png_suffix) {
        // identical to the invocation candidate means a redundant decode
        // attempt
        if invocation.as_ref() != Some(&path) {
            candidates.push(path);
        }
    }

    candidates.push(config.icon_path());

    for size in HICOLOR_SIZES {
        candidates.push(PathBuf::from(format!(
            "/usr/share/icons/hicolor/{size}x{size}/apps/{ICON_FILE}"
        )));
    }

    candidates.push(PathBuf::from(format!("/usr/share/pixmaps/{ICON_FILE}")));

    candidates
}

/// First candidate that decodes wins; a present-but-corrupt file is a
/// miss, not an error.
fn load_first(candidates: Vec<PathBuf>) -> AppIcon {
    for path in candidates {
        match image::open(&path) {
            Ok(image) => {
                tracing::debug!(path = %path.display(), "loaded icon");
                return AppIcon {
                    image,
                    source: IconSource::File(path),
                };
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "cannot load icon candidate");
            }
        }
    }

    let image = image::load_from_memory(FALLBACK_ICON)
        .expect("embedded fallback icon is a valid PNG");
    AppIcon {
        image,
        source: IconSource::Builtin,
    }
}
