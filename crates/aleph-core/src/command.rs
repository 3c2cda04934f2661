//! Verbose echoing of external command lines.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set once at startup from the command line.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Echo an external command line to stdout before it runs.
pub fn echo_command(line: &str) {
    tracing::debug!(command = line, "spawning external command");
    if verbose() {
        println!("+ {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_round_trips() {
        set_verbose(true);
        assert!(verbose());
        set_verbose(false);
        assert!(!verbose());
    }
}
