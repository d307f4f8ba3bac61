//! The `run` command: parse, compile and execute a Keel source file.

use keel_eval::{RunError, SharedPrintHandler, Value};

use super::{fail, read_file};
use crate::DriverConfig;

/// Run `source` under `config` with the given program arguments.
#[tracing::instrument(level = "debug", skip(source, config, print))]
pub fn run_source(
    path: &str,
    source: &str,
    config: &DriverConfig,
    args: &[String],
    print: SharedPrintHandler,
) -> Result<Value, RunError> {
    config
        .interpreter()
        .print_handler(print)
        .args(args.iter().cloned())
        .build()
        .run_source(path, source)
}

/// Run a file, writing program output to stdout.
///
/// Exits with status 1 on a bad `KEEL_MAX_DEPTH`, a parse error or a
/// runtime error. The program's final value is not printed.
pub fn run_file(path: &str, args: &[String]) {
    let content = read_file(path);
    let config = match DriverConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = run_source(path, &content, &config, args, keel_eval::stdout_handler()) {
        fail(&e.to_diagnostic(), &content);
    }
}
