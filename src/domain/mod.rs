//! Domain models for Azure Pipelines logging commands
//!
//! Contains the catalogs, validation and serialization without any I/O concerns.

mod catalog;
mod command;
mod format;
mod properties;
mod schema;
mod typed;
mod value;

pub use catalog::{ActionSpec, CommandCatalog, FamilySpec};
pub use command::{build_command, CommandError, CommandLine};
pub use format::{
    build_format, is_valid_format_name, split_lines, Arity, Format, FormatCatalog, FormatError,
    FormatMarker, FormatSpec, MessageViolation,
};
pub use properties::Properties;
pub use schema::{
    PropertySchema, PropertySpec, PropertyViolation, UnionBranch, UnionSchema, ValueDomain,
};
pub use typed::{
    ArtifactCommand, ArtifactType, BuildCommand, Command, EndpointField, IssueType, LogDetail,
    LogIssue, ReleaseCommand, SetEndpoint, SetVariable, TaskCommand, TaskResult, TimelineState,
};
pub use value::PropertyValue;
