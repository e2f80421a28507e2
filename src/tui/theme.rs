//! TUI style constants.
//!
//! Color semantics:
//! - Green: header text and successful git calls
//! - Red: failed git calls
//! - Reversed: the cursor row
//! - Dim: secondary text (counts of the inactive tab)

use ratatui::style::{Color, Modifier, Style};

/// Header and instructions block.
pub const STYLE_HEADER: Style = Style::new().fg(Color::Green);

/// Application title in the header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Box border and list text.
pub const STYLE_LIST: Style = Style::new().fg(Color::White);

/// Cursor row in the list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Status line after a successful git call.
pub const STYLE_SUCCESS: Style = Style::new().fg(Color::Green);

/// Status line after a failed git call.
pub const STYLE_FAILURE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Active tab label in the box footer.
pub const STYLE_TAB_ACTIVE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Inactive tab label.
pub const STYLE_TAB_INACTIVE: Style = Style::new().fg(Color::DarkGray);
