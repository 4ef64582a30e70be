//! TUI module for the Pulse Dashboard.
//!
//! Provides a terminal user interface built on ratatui and crossterm,
//! rendering the widget grid, the layout editor and the live feed.

pub mod app;
pub mod event;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
