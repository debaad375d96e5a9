//! Azure Pipelines logging commands
//!
//! Builds the lines the Azure Pipelines agent scrapes from a step's output:
//! structured commands (`##vso[area.action key=value;]message`) and
//! formatting markers (`##[format]message`). Commands are checked against
//! the catalog of known actions and their property schemas, either at run
//! time ([`build_command`]) or at compile time ([`Command`]).
//!
//! ```
//! use azure_pipelines_logging::{build_command, build_format, emit};
//!
//! let tag = build_command("build", "addbuildtag", None).unwrap();
//! emit(&tag.line("Tag_UnitTestPassed"));
//!
//! let error = build_format("error").unwrap();
//! emit(&error.render(["Details about error.", "Second line of details."]).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod emit;

pub use domain::{
    build_command, build_format, split_lines, Command, CommandCatalog, CommandError, CommandLine,
    Format, FormatCatalog, FormatError, FormatMarker, Properties, PropertyValue,
};
pub use emit::{emit, emit_to};
