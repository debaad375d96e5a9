//! azlog - Azure Pipelines logging commands from the shell

use std::process::ExitCode;

fn main() -> ExitCode {
    azure_pipelines_logging::cli::run()
}
