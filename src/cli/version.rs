//! Version string for the fixstream CLI.

/// The current version of fixstream, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The line printed for `--version`.
pub fn version_line() -> String {
    format!("fixstream {}", VERSION)
}
