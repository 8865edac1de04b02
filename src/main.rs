mod builtins;
mod config;
mod error;
mod exec;
mod input;
mod parser;
mod shell;
mod utils;

use config::{Options, ShellConfig};
use std::process;

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments.
    let opts: Options = argh::from_env();

    utils::init_tracing();

    // Run the main shell loop with the options.
    let code = shell::run_shell(ShellConfig::from(opts))?;
    process::exit(code);
}
