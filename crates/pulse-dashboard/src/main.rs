//! Pulse Dashboard - CLI entry point
//!
//! This binary launches the terminal dashboard and provides helper
//! subcommands for managing the configuration file and inspecting the
//! configured widget layout.

use clap::{Parser, Subcommand};
use pulse_dashboard::config::{default, loader::ConfigLoader, xdg, Config, ConfigError};
use pulse_dashboard::layout::DashboardLayout;
use pulse_dashboard::logging::{self, Fallback};
use pulse_dashboard::tui::app::App;
use pulse_dashboard::widgets::{Resolution, WidgetRegistry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Pulse terminal dashboard
#[derive(Parser)]
#[command(name = "pulse")]
#[command(version, about = "Terminal dashboard with weather, news, finance and live-feed widgets")]
struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the pulse CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface
    Tui,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show how the configured widget ids resolve
    Layout {
        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
    /// Print the effective configuration as TOML
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Tui => run_tui(config_path),
        Commands::Config { action } => {
            init_cli_logging(config_path);
            if let Err(e) = run_config_command(action, config_path) {
                eprintln!("Config error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Commands::Layout { json } => {
            init_cli_logging(config_path);
            run_layout_command(config_path, json)
        }
    }
}

/// Loads the config and runs the dashboard until the user quits.
fn run_tui(config_path: Option<&Path>) -> ExitCode {
    let config = match ConfigLoader::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(&config.log, Fallback::Discard) {
        eprintln!("Warning: could not open log file: {e}");
    }

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = rt.block_on(app.run()) {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Sets up stderr logging for one-shot subcommands.
///
/// An unreadable config falls back to defaults here; the subcommand itself
/// reports the error.
fn init_cli_logging(config_path: Option<&Path>) {
    let log = ConfigLoader::load(config_path)
        .map(|config| config.log)
        .unwrap_or_default();
    if let Err(e) = logging::init(&log, Fallback::Stderr) {
        eprintln!("Warning: could not open log file: {e}");
    }
}

fn run_config_command(action: ConfigAction, config_path: Option<&Path>) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => {
                    default::create_default_config_at(path, force)?;
                    path.to_path_buf()
                }
                None => default::create_default_config(force)?,
            };
            println!("Created configuration at {}", path.display());
        }
        ConfigAction::Path => {
            let path = config_path.map_or_else(xdg::config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigAction::Validate => {
            let config = ConfigLoader::load(config_path)?;
            config.validate()?;
            println!("Configuration is valid");
        }
        ConfigAction::Show => {
            let config = ConfigLoader::load(config_path)?;
            print!("{}", render_config(&config)?);
        }
    }
    Ok(())
}

fn render_config(config: &Config) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError {
        message: e.to_string(),
    })
}

/// Prints each configured widget id with how the registry resolves it.
fn run_layout_command(config_path: Option<&Path>, json: bool) -> ExitCode {
    let config = match ConfigLoader::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let layout = DashboardLayout::from_ids(config.dashboard.widgets.iter().cloned());
    let registry = WidgetRegistry::new();
    let rows: Vec<(usize, String, Option<&'static str>)> = layout
        .ids()
        .iter()
        .enumerate()
        .map(|(slot, id)| {
            let kind = match registry.lookup(id) {
                Resolution::Registered(kind) => Some(kind.title()),
                Resolution::Unregistered => None,
            };
            (slot, id.to_string(), kind)
        })
        .collect();

    if json {
        let entries: Vec<serde_json::Value> = rows
            .iter()
            .map(|(slot, id, kind)| {
                serde_json::json!({
                    "slot": slot,
                    "id": id,
                    "registered": kind.is_some(),
                    "widget": kind,
                })
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: failed to serialize layout: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if rows.is_empty() {
        println!("No widgets configured");
    }
    for (slot, id, kind) in rows {
        match kind {
            Some(title) => println!("{}. {}  {}", slot + 1, id, title),
            None => println!("{}. {}  (unregistered, not rendered)", slot + 1, id),
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod cli_tests;
