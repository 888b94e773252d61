//! User interface rendering
//!
//! This module provides all terminal UI rendering functionality:
//! - `render` - Main rendering entry point
//! - `components` - Header, tab bar, search bar, column headers, footer
//! - `performance` - CPU/RAM readings and history graphs
//! - `process_list` - Process and service tables
//! - `network` - Interface counters
//! - `menu` - Action menu dialog
//! - `utils` - Shared utilities

mod components;
mod menu;
mod network;
mod performance;
mod process_list;
mod render;
mod utils;

pub use render::render;
