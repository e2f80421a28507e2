//! git-assume CLI
//!
//! Interactive manager for git's assume-unchanged flag in the current
//! directory.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use git_assume::discovery::DirectorySource;
use git_assume::tui;
use git_assume::vcs::GitGateway;

#[derive(Parser)]
#[command(name = "git-assume")]
#[command(about = "Toggle git's assume-unchanged flag on files in the current directory")]
#[command(long_about = "Toggle git's assume-unchanged flag on files in the current directory.\n\n\
The tool is driven entirely by keystrokes. The only option, --log-file, \
is optional diagnostics and changes nothing about its behaviour.")]
#[command(version)]
struct Cli {
    /// Optional diagnostics: write debug logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path) {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();

    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, config, file);
        }
        Err(e) => eprintln!("Note: could not open log file {}: {}", path.display(), e),
    }
}

fn run() -> std::io::Result<()> {
    let source = DirectorySource::current_dir().unwrap_or_else(|e| {
        log::warn!("{}", e);
        DirectorySource::new(".")
    });
    let mut gateway = GitGateway::new(source.root());

    log::info!("git-assume starting in {}", source.root().display());

    tui::run(&source, &mut gateway)
}
