//! TUI module for the interactive terminal interface.
//!
//! - `state`: App, Action, Transition
//! - `update`: action dispatch onto the selection model
//! - `view`: pure rendering
//! - `theme`: style constants
//! - `run`: terminal lifecycle and event loop (effects)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
