//! Git access for the assume-unchanged bit.
//!
//! Structure:
//! - Trait: the three operations the TUI needs
//! - Pure functions: `git ls-files -v` parsing, command formatting
//! - Effect functions: running git

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Output};

// ============================================================================
// TRAIT
// ============================================================================

/// Reads and flips the assume-unchanged flag on individual paths.
///
/// `set_flag`/`clear_flag` succeed when the underlying command exits
/// cleanly. Callers that only need a yes/no use `.is_ok()`.
pub trait VcsGateway {
    /// Every path currently marked assume-unchanged, in tool order.
    fn list_flagged(&self) -> Result<Vec<String>, GatewayError>;

    /// Mark `path` assume-unchanged.
    fn set_flag(&mut self, path: &str) -> Result<(), GatewayError>;

    /// Remove the assume-unchanged mark from `path`.
    fn clear_flag(&mut self, path: &str) -> Result<(), GatewayError>;
}

// ============================================================================
// TYPES
// ============================================================================

/// Runs the real `git` binary in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitGateway {
    workdir: PathBuf,
    program: OsString,
}

/// Failure of a git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The program could not be started at all.
    Spawn { program: String, message: String },

    /// The program ran but exited unsuccessfully.
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl GitGateway {
    /// Gateway running `git` in `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        GitGateway {
            workdir: workdir.into(),
            program: OsString::from("git"),
        }
    }

    /// Override the program name (tests, or a git outside PATH).
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }
}

// ============================================================================
// PURE FUNCTIONS (Parsing)
// ============================================================================

/// Extract assume-unchanged paths from `git ls-files -v -z` output.
///
/// Records are NUL-terminated `<tag> <path>` pairs. With `-z` git emits
/// paths verbatim, without C-style quoting, so the result matches what
/// directory discovery reports. A lowercase tag marks an assume-unchanged
/// entry (`h` for a plain cached file). Everything after the first space
/// is the path.
pub fn parse_ls_files(output: &str) -> Vec<String> {
    output
        .split('\0')
        .filter_map(|record| {
            let (tag, path) = record.split_once(' ')?;
            let mut chars = tag.chars();
            let tag = chars.next()?;
            if chars.next().is_some() || !tag.is_ascii_lowercase() || path.is_empty() {
                return None;
            }
            Some(path.to_string())
        })
        .collect()
}

/// First non-empty stderr line, for one-line status messages.
fn first_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}

// ============================================================================
// EFFECT FUNCTIONS (Running git)
// ============================================================================

impl GitGateway {
    fn run(&self, args: &[&str]) -> Result<Output, GatewayError> {
        let program = self.program.to_string_lossy().into_owned();
        let command = format!("{} {}", program, args.join(" "));
        log::debug!("running `{}` in {}", command, self.workdir.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| GatewayError::Spawn {
                program,
                message: e.to_string(),
            })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(GatewayError::Failed {
                command,
                status: output.status.code(),
                stderr: first_line(&output.stderr),
            })
        }
    }

    fn update_index(&self, flag: &str, path: &str) -> Result<(), GatewayError> {
        self.run(&["update-index", flag, "--", path]).map(|_| ())
    }
}

impl VcsGateway for GitGateway {
    fn list_flagged(&self) -> Result<Vec<String>, GatewayError> {
        let output = self.run(&["ls-files", "-v", "-z"])?;
        let flagged = parse_ls_files(&String::from_utf8_lossy(&output.stdout));
        log::info!("{} paths currently assume-unchanged", flagged.len());
        Ok(flagged)
    }

    fn set_flag(&mut self, path: &str) -> Result<(), GatewayError> {
        self.update_index("--assume-unchanged", path)
    }

    fn clear_flag(&mut self, path: &str) -> Result<(), GatewayError> {
        self.update_index("--no-assume-unchanged", path)
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Spawn { program, message } => {
                write!(f, "could not run {}: {}", program, message)
            }
            GatewayError::Failed {
                command,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "`{}` exited with status {}", command, code)?,
                    None => write!(f, "`{}` was terminated by a signal", command)?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GatewayError {}

// ============================================================================
// TESTS
// ============================================================================
