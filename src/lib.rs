//! git-assume: toggle git's assume-unchanged flag from a terminal UI.

pub mod discovery;
pub mod model;
pub mod tui;
pub mod vcs;
