//! Tests for the crate-level preference types.
//!
//! Tests are organized by domain:
//! - `preferences` - Theme, Unit, TimeRange and WidgetId parsing/display

mod preferences;
