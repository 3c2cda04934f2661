//! Headless front-end for the Marathon launcher core.
//!
//! Stands in for the graphical shell: parses the flags, resolves the
//! window icon, and drives the download/launch entry points from a small
//! interactive menu.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use aleph_core::command;
use aleph_core::config::ConfigDir;
use aleph_core::dataset::Game;
use aleph_core::download::{Confirm, Downloader};
use aleph_core::exepath;
use aleph_core::icon::{self, AppIcon, IconSource};
use aleph_core::launch;
use aleph_core::terminal::Xterm;

/// Launcher for the Marathon trilogy running on the Aleph One engine.
#[derive(Parser)]
#[command(name = "marathon-launcher", version, about, after_help = paths_help())]
struct Cli {
    /// Print every external command before it runs
    #[arg(long)]
    verbose: bool,

    /// Shell script that downloads the game data instead of the built-in
    /// wget pipeline; checks for tools and paths are up to the script
    #[arg(long, value_name = "SCRIPT")]
    download_script: Option<PathBuf>,

    /// Anything unrecognized is warned about and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<String>,
}

/// Everything the original help listed beyond the flags: where the data
/// lives and where icons are looked up.
fn paths_help() -> String {
    let mut help = String::from(
        "SCRIPT must be a shell script that downloads the game data into the\n\
         directories listed below.\n\
         \n\
         Aleph One config directory:\n\
         \x20 ~/.alephone\n\
         \n\
         Search/download paths for...\n\
         \x20 Marathon:           ~/.alephone/data-marathon-master\n\
         \x20 Marathon 2:         ~/.alephone/data-marathon-2-master\n\
         \x20 Marathon Infinity:  ~/.alephone/data-marathon-infinity-master\n\
         \n\
         Download log file:\n\
         \x20 ~/.alephone/download.log\n\
         \n\
         Icon lookup paths:\n",
    );

    let invocation = exepath::invocation_path().map(exepath::with_png_suffix);
    if let Some(path) = &invocation {
        help.push_str(&format!("  {}\n", path.display()));
    }
    if let Some(path) = exepath::executable_path().map(exepath::with_png_suffix) {
        if invocation.as_ref() != Some(&path) {
            help.push_str(&format!("  {}\n", path.display()));
        }
    }

    help.push_str(
        "\x20 ~/.alephone/alephone.png  (will be overwritten on new game downloads)\n\
         \x20 /usr/share/icons/hicolor/<...>/apps/alephone.png\n\
         \x20 /usr/share/pixmaps/alephone.png",
    );
    help
}

/// Confirmation prompts on the controlling terminal; `y`/`yes` confirms,
/// anything else declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        println!("{title}");
        print!("{message} [y/N] ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

fn describe_icon(icon: &AppIcon) {
    match &icon.source {
        IconSource::File(path) => tracing::info!(path = %path.display(), "window icon"),
        IconSource::Builtin => tracing::info!("window icon: built-in fallback"),
    }
}

fn run_game(game: Game, config: &ConfigDir) {
    if let Err(err) = launch::launch(game, config) {
        eprintln!("Error: {err}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    for arg in &cli.ignored {
        eprintln!("unknown argument ignored: {arg}");
    }

    command::set_verbose(cli.verbose);

    let config = ConfigDir::locate()?;

    // an empty --download-script= means "no custom script"
    let script = cli
        .download_script
        .filter(|path| !path.as_os_str().is_empty());

    let mut icon = icon::resolve(&config);
    describe_icon(&icon);

    let mut downloader = Downloader::new(config.clone(), script, StdinConfirm, Xterm::default());

    let stdin = io::stdin();
    loop {
        println!();
        println!("Marathon Launcher");
        for (key, game) in Game::ALL.iter().enumerate() {
            println!("  {}) {}", key + 1, game.title());
        }
        println!("  d) Download Files");
        println!("  q) Quit");
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "1" => run_game(Game::Marathon, &config),
            "2" => run_game(Game::Durandal, &config),
            "3" => run_game(Game::Infinity, &config),
            "d" | "D" => match downloader.trigger() {
                Ok(true) => {
                    icon = icon::resolve(&config);
                    describe_icon(&icon);
                }
                Ok(false) => {}
                Err(err) => eprintln!("Error: {err}"),
            },
            "q" | "Q" => break,
            "" => {}
            other => eprintln!("unknown choice: {other}"),
        }
    }

    Ok(())
}
