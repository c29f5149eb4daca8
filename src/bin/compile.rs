//! Schema Compile CLI
//!
//! Compiles every schema named by `schema/schema-compile.config.json` in the
//! current directory and reports missing `$id`s and unresolved refs.
//!
//! Usage:
//!   schema-compile
//!   RUST_LOG=schema_compile=debug schema-compile

use clap::Parser;
use schema_compile::report::EXIT_FATAL;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-compile")]
#[command(about = "Check that every JSON Schema in the repository compiles")]
#[command(version)]
struct Cli {}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = Cli::try_parse() {
        // --help and --version go to stdout and exit 0
        if !err.use_stderr() {
            err.exit();
        }
        // Usage errors exit 1; clap's own code 2 means "issues found" here
        eprint!("{}", err);
        std::process::exit(EXIT_FATAL);
    }

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_FATAL);
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let root = std::env::current_dir()?;
    let report = schema_compile::run(&root)?;

    print!("{}", report);
    Ok(report.exit_code())
}
