use crudsmith::cli::run_cli;
use crudsmith::logging::{init_logging, LogConfig};

fn main() {
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("warning: {err:#}");
    }
    if let Err(err) = run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
