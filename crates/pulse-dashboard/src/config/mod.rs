/// Default configuration template and file creation.
pub mod default;

/// Configuration error types.
pub mod error;

/// Configuration file loader.
pub mod loader;

/// TOML configuration schema types.
pub mod schema;

/// XDG Base Directory path resolution utilities.
pub mod xdg;

pub use error::ConfigError;
pub use schema::Config;
