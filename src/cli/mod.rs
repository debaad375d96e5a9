//! # Command-Line Interface
//!
//! `azlog` prints logging commands for shell steps in a pipeline.
//!
//! ## Subcommands
//!
//! | Subcommand | Purpose | Example |
//! |------------|---------|---------|
//! | `command` | Structured command | `azlog command task logissue -p type=error "Error summary"` |
//! | `format` | Formatting markers | `azlog format error "first" "second"` |
//! | `catalog` | List commands/formats | `azlog catalog formats` |
//!
//! ## Output
//!
//! Logging lines always go to stdout unchanged. `--format json` only affects
//! listings and error reports (which go to stderr).
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logging on stderr; `RUST_LOG` works too.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod catalog_cmd;
mod emit_cmd;
mod logging;
mod output;

pub use app::{run, Cli, Commands};
pub use catalog_cmd::{describe_schema, CatalogKind};
pub use emit_cmd::parse_assignments;
pub use logging::init_logging;
pub use output::{Output, OutputFormat};
