//! Translate, explain and run filtered queries over the Sakila sample database.
//!
//! Set `RUST_LOG=debug` to see the generated SQL and its parameters.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sakila_cli::{run, Command, Context};
use sakila_configuration::environment::ProcessEnvironment;

/// The command-line arguments.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// The directory holding the configuration.
    #[arg(
        long = "context-path",
        env = "SAKILA_CONTEXT_PATH",
        value_name = "DIRECTORY",
        default_value = "."
    )]
    pub context_path: PathBuf,

    /// The command to invoke.
    #[command(subcommand)]
    pub subcommand: Command,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let context = Context {
        context_path: args.context_path,
        environment: ProcessEnvironment,
    };
    match run(args.subcommand, context).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
