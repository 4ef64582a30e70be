//! Tests for the `pulse` binary.

mod cli;
