//! The two-list selection model.
//!
//! Files live in exactly one of two lists: `available` (not flagged) or
//! `flagged` (assume-unchanged). One list is active at a time; the cursor
//! and scroll offset index into it. Every operation is total and keeps the
//! cursor inside the list and inside the viewport.

use crate::vcs::{GatewayError, VcsGateway};

// ============================================================================
// TYPES
// ============================================================================

/// Which list is shown and navigable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Files that can be marked assume-unchanged.
    #[default]
    Available,
    /// Files currently marked assume-unchanged.
    Flagged,
}

/// Direction of a toggle, named after the git operation it issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleDirection {
    /// Moved from available to flagged.
    Set,
    /// Moved from flagged to available.
    Clear,
}

/// What happened to the file that was toggled.
///
/// The list move has already happened by the time this is returned;
/// `result` only reports whether git agreed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub path: String,
    pub direction: ToggleDirection,
    pub result: Result<(), GatewayError>,
}

/// Two disjoint file lists plus cursor state for the active one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionModel {
    available: Vec<String>,
    flagged: Vec<String>,
    active_tab: Tab,
    /// Only meaningful while the active list is non-empty.
    selected: usize,
    scroll_offset: usize,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl SelectionModel {
    /// Model over two already-partitioned lists, cursor at the top of
    /// the available tab.
    pub fn new(available: Vec<String>, flagged: Vec<String>) -> Self {
        SelectionModel {
            available,
            flagged,
            ..Default::default()
        }
    }

    /// Partition discovered files against the flagged set.
    ///
    /// `flagged` is taken as-is, even for paths that were not discovered
    /// on disk. Discovered paths that are flagged are left out of
    /// `available`.
    pub fn from_discovery(discovered: Vec<String>, flagged: Vec<String>) -> Self {
        let available = discovered
            .into_iter()
            .filter(|path| !flagged.contains(path))
            .collect();
        SelectionModel::new(available, flagged)
    }
}

impl Tab {
    pub fn other(self) -> Tab {
        match self {
            Tab::Available => Tab::Flagged,
            Tab::Flagged => Tab::Available,
        }
    }

    /// Heading for the list box.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Available => "Available to Assume Unchanged",
            Tab::Flagged => "Currently Assumed Unchanged",
        }
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

impl SelectionModel {
    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn flagged(&self) -> &[String] {
        &self.flagged
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn active_list(&self) -> &[String] {
        match self.active_tab {
            Tab::Available => &self.available,
            Tab::Flagged => &self.flagged,
        }
    }

    /// Cursor position, or None when the active list is empty.
    pub fn selected_index(&self) -> Option<usize> {
        if self.active_list().is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.active_list().get(self.selected).map(String::as_str)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// True when there is nothing to manage in either list.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.flagged.is_empty()
    }

    fn active_list_mut(&mut self) -> &mut Vec<String> {
        match self.active_tab {
            Tab::Available => &mut self.available,
            Tab::Flagged => &mut self.flagged,
        }
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

impl SelectionModel {
    /// Cursor up one row, scrolling if it leaves the top of the window.
    pub fn move_up(&mut self) {
        if self.active_list().is_empty() || self.selected == 0 {
            return;
        }
        self.selected -= 1;
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
    }

    /// Cursor down one row, scrolling so it stays on the last visible row.
    pub fn move_down(&mut self, viewport_height: usize) {
        let len = self.active_list().len();
        if len == 0 || self.selected + 1 >= len {
            return;
        }
        self.selected += 1;
        let height = viewport_height.max(1);
        if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }

    /// Flip tabs; the new list is shown from the top.
    pub fn switch_tab(&mut self) {
        self.active_tab = self.active_tab.other();
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Pull the scroll offset back into range after the viewport changed.
    ///
    /// Keeps the cursor where it is and only moves the window.
    pub fn fit_viewport(&mut self, viewport_height: usize) {
        if self.active_list().is_empty() {
            self.selected = 0;
            self.scroll_offset = 0;
            return;
        }
        let height = viewport_height.max(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }
}

// ============================================================================
// TOGGLE
// ============================================================================

impl SelectionModel {
    /// Move the selected file to the other list, telling git about it.
    ///
    /// The move is applied whatever git reports; the outcome carries the
    /// git result for display. Returns None on an empty active list.
    pub fn toggle_selected<G: VcsGateway + ?Sized>(
        &mut self,
        gateway: &mut G,
    ) -> Option<ToggleOutcome> {
        if self.selected >= self.active_list().len() {
            return None;
        }

        let index = self.selected;
        let path = self.active_list_mut().remove(index);

        let (direction, result) = match self.active_tab {
            Tab::Available => (ToggleDirection::Set, gateway.set_flag(&path)),
            Tab::Flagged => (ToggleDirection::Clear, gateway.clear_flag(&path)),
        };

        match self.active_tab {
            Tab::Available => self.flagged.push(path.clone()),
            Tab::Flagged => self.available.push(path.clone()),
        }

        let len = self.active_list().len();
        if self.selected >= len && self.selected > 0 {
            self.selected -= 1;
        }
        if len == 0 {
            self.selected = 0;
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }

        Some(ToggleOutcome {
            path,
            direction,
            result,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
