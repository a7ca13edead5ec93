//! Command-line argument parsing for fixstream.
//!
//! This module turns the raw argument list into a [`CliCommand`]. Parsing is
//! hand-rolled: the surface is a handful of flags and one positional.

use std::path::PathBuf;

use crate::config::{ClientConfig, ResponseMode};

/// Usage text printed for `--help` and after usage errors.
pub const USAGE: &str = "\
Usage: fixstream [OPTIONS] <CODE_FILE | ->

Submit code and its error output to the fix service and stream progress.

Arguments:
  <CODE_FILE | ->        File holding the code to fix, or - for stdin

Options:
  -e, --error <TEXT>     Error message or traceback the code produced
      --error-file <PATH>
                         Read the error context from a file
      --endpoint <URL>   Fix service endpoint (env: FIXSTREAM_ENDPOINT)
      --legacy           Expect one JSON response instead of a stream
  -V, --version          Print version
  -h, --help             Print help";

/// Where the code to fix comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeSource {
    File(PathBuf),
    Stdin,
}

/// Where the error context comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ErrorSource {
    /// No error context; an empty string is sent
    #[default]
    None,
    Text(String),
    File(PathBuf),
}

/// Arguments of a fix submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitArgs {
    pub code: CodeSource,
    pub error: ErrorSource,
    pub endpoint: Option<String>,
    pub legacy: bool,
}

impl SubmitArgs {
    /// Layer the command-line overrides on top of `config`.
    pub fn apply_to(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if self.legacy {
            config = config.with_mode(ResponseMode::Legacy);
        }
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run one fix session
    Submit(SubmitArgs),
}

/// Usage errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("missing code file (use - to read from stdin)")]
    MissingCode,

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' requires a value")]
    MissingValue(String),

    #[error("--error and --error-file cannot be used together")]
    ConflictingErrorSources,
}

/// Parse command-line arguments and return the command to run.
///
/// `--version` and `--help` win over everything else, wherever they appear.
///
/// # Examples
///
/// ```
/// use fixstream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["fixstream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut code = None;
    let mut error = ErrorSource::None;
    let mut endpoint = None;
    let mut legacy = false;
    let mut pending_error: Option<ArgsError> = None;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        let result = match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--legacy" => {
                legacy = true;
                Ok(())
            }
            "--endpoint" => take_value(&arg, &mut args).map(|v| endpoint = Some(v)),
            "--error" | "-e" => take_value(&arg, &mut args)
                .and_then(|v| set_error(&mut error, ErrorSource::Text(v))),
            "--error-file" => take_value(&arg, &mut args)
                .and_then(|v| set_error(&mut error, ErrorSource::File(PathBuf::from(v)))),
            "-" => set_code(&mut code, CodeSource::Stdin, &arg),
            flag if flag.starts_with('-') => Err(ArgsError::UnknownOption(arg.clone())),
            path => set_code(&mut code, CodeSource::File(PathBuf::from(path)), &arg),
        };

        // Keep scanning so a later --help/--version still wins
        if let Err(e) = result {
            pending_error.get_or_insert(e);
        }
    }

    if let Some(e) = pending_error {
        return Err(e);
    }

    Ok(CliCommand::Submit(SubmitArgs {
        code: code.ok_or(ArgsError::MissingCode)?,
        error,
        endpoint,
        legacy,
    }))
}

fn take_value<I>(flag: &str, args: &mut I) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn set_error(slot: &mut ErrorSource, source: ErrorSource) -> Result<(), ArgsError> {
    if *slot != ErrorSource::None {
        return Err(ArgsError::ConflictingErrorSources);
    }
    *slot = source;
    Ok(())
}

fn set_code(slot: &mut Option<CodeSource>, source: CodeSource, raw: &str) -> Result<(), ArgsError> {
    if slot.is_some() {
        return Err(ArgsError::UnexpectedArgument(raw.to_string()));
    }
    *slot = Some(source);
    Ok(())
}
