use fixstream::adapters::ReqwestHttpClient;
use fixstream::cli::{
    self, parse_args, read_code, read_error_context, CliCommand, SubmitArgs, EXIT_FAILED,
    EXIT_FIXED, EXIT_USAGE, USAGE,
};
use fixstream::cli_output::TerminalSink;
use fixstream::config::ClientConfig;
use fixstream::session::{FixClient, SubmitError};
use fixstream::traits::HttpClient;
use std::convert::Infallible;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays clean for the session printout.
///
/// `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("{}", cli::version_line());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Submit(args)) => args,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(EXIT_USAGE);
        }
    };

    init_logging();

    let code = run(&args)?;
    std::process::exit(code);
}

/// Run one session and return the process exit status.
fn run(args: &SubmitArgs) -> Result<i32> {
    let code = read_code(&args.code).wrap_err("failed to read code")?;
    let error_context = read_error_context(&args.error).wrap_err("failed to read error context")?;

    let config = args.apply_to(ClientConfig::from_env());
    let http = ReqwestHttpClient::from_config(&config).wrap_err("failed to build HTTP client")?;
    let client = FixClient::new(http, config);

    let runtime = tokio::runtime::Runtime::new()?;
    let mut sink = TerminalSink::stdout();

    let outcome = runtime.block_on(async {
        tokio::select! {
            outcome = client.submit(&code, &error_context, &mut sink) => outcome,
            never = abort_on_ctrl_c(&client) => match never {},
        }
    });

    match outcome {
        Ok(outcome) if outcome.is_fixed() => Ok(EXIT_FIXED),
        Ok(_) => Ok(EXIT_FAILED),
        Err(SubmitError::EmptyCode) => {
            eprintln!("error: {}", SubmitError::EmptyCode);
            Ok(EXIT_USAGE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Turn Ctrl-C into a session abort. Never resolves.
async fn abort_on_ctrl_c<C: HttpClient>(client: &FixClient<C>) -> Infallible {
    loop {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        client.abort();
    }
}
