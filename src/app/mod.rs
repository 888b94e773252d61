//! Application state and logic
//!
//! This module is organized into submodules:
//! - `overlay`: Sampling core (histories, throttle, snapshot, filter)
//! - `state`: UI state wrapped around the core
//! - `actions`: Action targets and capabilities
//! - `process_ops`: Kill confirmation and action menu
//! - `navigation`: Selection movement
//! - `input`: Keyboard event handling
//! - `cli`: Command-line and config-file settings

mod actions;
mod cli;
mod filter;
mod history;
mod input;
mod navigation;
mod overlay;
mod process_ops;
mod snapshot;
mod state;
mod throttle;
mod view_mode;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::{ActionTarget, ProcessAction};
pub use cli::{Args, Config};
pub use history::RollingHistory;
pub use input::KeyAction;
pub use overlay::OverlayState;
pub use snapshot::{ProcessRecord, ServiceRecord};
pub use state::App;
pub use view_mode::Tab;
