use model_audit::cli::{Args, Command};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    // Logs go to stderr; stdout carries the report and the verdict
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = Command::from_args(args).run();
    process::exit(exit_code);
}
