//! TUI state: the model plus what the screen needs beyond it.
//!
//! The selection model owns the lists and cursor. `App` adds the status
//! line left by the last git call and the quit flag. Actions are the
//! semantic form of key presses; `update` turns them into model calls.

use crate::model::{SelectionModel, ToggleDirection, ToggleOutcome};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub model: SelectionModel,

    /// Result of the most recent toggle, shown above the list.
    pub status: Option<StatusLine>,

    /// Set when the loop should exit after this iteration.
    pub should_quit: bool,
}

/// One-line report of a git call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Failure,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Show the other list.
    SwitchTab,
    /// Move the selected file to the other list.
    Toggle,
    Quit,
}

/// Result of dispatching an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    pub fn new(model: SelectionModel) -> Self {
        App {
            model,
            status: None,
            should_quit: false,
        }
    }
}

impl From<&ToggleOutcome> for StatusLine {
    fn from(outcome: &ToggleOutcome) -> Self {
        let verb = match outcome.direction {
            ToggleDirection::Set => "Marked",
            ToggleDirection::Clear => "Unmarked",
        };
        match &outcome.result {
            Ok(()) => StatusLine {
                kind: StatusKind::Success,
                text: format!("{} '{}' as assume-unchanged.", verb, outcome.path),
            },
            Err(e) => StatusLine {
                kind: StatusKind::Failure,
                text: format!("Failed to execute command on '{}': {}", outcome.path, e),
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::GatewayError;

    #[test]
    fn new_app_has_no_status() {
        let app = App::new(SelectionModel::default());
        assert!(app.status.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn success_status_names_file() {
        let outcome = ToggleOutcome {
            path: "secrets.env".into(),
            direction: ToggleDirection::Set,
            result: Ok(()),
        };
        let status = StatusLine::from(&outcome);
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.text, "Marked 'secrets.env' as assume-unchanged.");
    }

    #[test]
    fn failure_status_names_file_and_error() {
        let outcome = ToggleOutcome {
            path: "secrets.env".into(),
            direction: ToggleDirection::Clear,
            result: Err(GatewayError::Spawn {
                program: "git".into(),
                message: "No such file or directory".into(),
            }),
        };
        let status = StatusLine::from(&outcome);
        assert_eq!(status.kind, StatusKind::Failure);
        assert!(status.text.contains("'secrets.env'"));
        assert!(status.text.contains("could not run git"));
    }
}
