//! File discovery for the working directory.
//!
//! Lists the regular files that could be marked assume-unchanged.
//! Only the immediate directory is scanned; subdirectories are not entered.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

// ============================================================================
// TYPES
// ============================================================================

/// Source of candidate file paths.
///
/// Implementations return paths relative to the directory they enumerate.
pub trait PathSource {
    fn list_files(&self) -> Result<Vec<String>, DiscoveryError>;
}

/// Enumerates the regular files directly inside `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySource {
    root: PathBuf,
}

/// Error while reading the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryError {
    pub root: PathBuf,
    pub message: String,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySource { root: root.into() }
    }

    /// Source rooted at the process working directory.
    pub fn current_dir() -> Result<Self, DiscoveryError> {
        std::env::current_dir()
            .map(DirectorySource::new)
            .map_err(|e| DiscoveryError {
                root: PathBuf::from("."),
                message: e.to_string(),
            })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// ENUMERATION
// ============================================================================

impl PathSource for DirectorySource {
    /// Regular files in `root`, sorted by name.
    ///
    /// Symlinks are followed when classifying, so a link to a file is
    /// listed and a link to a directory is not. Unreadable entries are
    /// skipped; failing to read `root` itself is an error.
    fn list_files(&self) -> Result<Vec<String>, DiscoveryError> {
        if !self.root.is_dir() {
            return Err(DiscoveryError {
                root: self.root.clone(),
                message: "not a directory".to_string(),
            });
        }

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Depth 0 is the root itself: nothing can be listed.
                    if e.depth() == 0 {
                        return Err(DiscoveryError {
                            root: self.root.clone(),
                            message: e.to_string(),
                        });
                    }
                    log::debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(relative) = relative_name(&self.root, entry.path()) {
                files.push(relative);
            }
        }

        log::info!(
            "discovered {} files in {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }
}

/// Path of `path` relative to `root`, as a display string.
fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let name = relative.to_string_lossy().into_owned();
    if name.is_empty() { None } else { Some(name) }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not list files in {}: {}",
            self.root.display(),
            self.message
        )
    }
}

impl std::error::Error for DiscoveryError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_regular_files_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("Cargo.toml"), "").unwrap();

        let files = DirectorySource::new(temp.path()).list_files().unwrap();
        assert_eq!(files, vec!["Cargo.toml", "a.txt", "b.txt"]);
    }

    #[test]
    fn skips_directories_and_does_not_recurse() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("top.txt"), "").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("inner.txt"), "").unwrap();

        let files = DirectorySource::new(temp.path()).list_files().unwrap();
        assert_eq!(files, vec!["top.txt"]);
    }

    #[test]
    fn includes_hidden_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "").unwrap();

        let files = DirectorySource::new(temp.path()).list_files().unwrap();
        assert_eq!(files, vec![".env"]);
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let temp = TempDir::new().unwrap();
        let files = DirectorySource::new(temp.path()).list_files().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        let err = DirectorySource::new(&missing).list_files().unwrap_err();
        assert_eq!(err.root, missing);
        assert!(err.to_string().contains("gone"));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_to_files_but_not_directories() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("real.txt"), "").unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();
        symlink(temp.path().join("real.txt"), temp.path().join("link.txt")).unwrap();
        symlink(temp.path().join("dir"), temp.path().join("link-dir")).unwrap();

        let files = DirectorySource::new(temp.path()).list_files().unwrap();
        assert_eq!(files, vec!["link.txt", "real.txt"]);
    }
}
