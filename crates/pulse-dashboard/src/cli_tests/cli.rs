//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn verify_cli() {
    // Verify the CLI configuration is valid
    Cli::command().debug_assert();
}

#[test]
fn test_tui_without_config() {
    let cli = Cli::try_parse_from(["pulse", "tui"]).unwrap();
    assert!(matches!(cli.command, Commands::Tui));
    assert_eq!(cli.config, None);
}

#[test]
fn test_global_config_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["pulse", "tui", "--config", "/tmp/pulse.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/pulse.toml")));
}

#[test]
fn test_global_config_flag_before_subcommand() {
    let cli = Cli::try_parse_from(["pulse", "--config", "/tmp/pulse.toml", "layout"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/pulse.toml")));
    assert!(matches!(cli.command, Commands::Layout { json: false }));
}

#[test]
fn test_layout_json_flag() {
    let cli = Cli::try_parse_from(["pulse", "layout", "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::Layout { json: true }));
}

#[test]
fn test_config_init_force() {
    let cli = Cli::try_parse_from(["pulse", "config", "init", "--force"]).unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("unexpected command variant"),
    }
}

#[test]
fn test_config_subcommands_parse() {
    for (arg, expected) in [("path", "path"), ("validate", "validate"), ("show", "show")] {
        let cli = Cli::try_parse_from(["pulse", "config", arg]).unwrap();
        let name = match cli.command {
            Commands::Config {
                action: ConfigAction::Path,
            } => "path",
            Commands::Config {
                action: ConfigAction::Validate,
            } => "validate",
            Commands::Config {
                action: ConfigAction::Show,
            } => "show",
            _ => "other",
        };
        assert_eq!(name, expected);
    }
}

#[test]
fn test_config_without_action_fails() {
    assert!(Cli::try_parse_from(["pulse", "config"]).is_err());
}

#[test]
fn test_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["pulse", "daemon"]).is_err());
}
