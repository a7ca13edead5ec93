//! CLI module for fixstream.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Reading the code and error context from files or stdin
//!
//! # Usage
//!
//! ```ignore
//! use fixstream::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", fixstream::cli::version_line()),
//!     CliCommand::Help => println!("{}", fixstream::cli::USAGE),
//!     CliCommand::Submit(args) => { /* run a session */ }
//! }
//! ```

pub mod args;
pub mod input;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, CodeSource, ErrorSource, SubmitArgs, USAGE};
pub use input::{read_code, read_error_context};
pub use version::{version_line, VERSION};

/// Process exit status for a session that produced a successful fix.
pub const EXIT_FIXED: i32 = 0;
/// Process exit status for a failed fix or a failed session.
pub const EXIT_FAILED: i32 = 1;
/// Process exit status for usage errors.
pub const EXIT_USAGE: i32 = 2;
