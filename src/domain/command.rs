//! Structured `##vso[area.action key=value;]message` commands
//!
//! [`build_command`] validates a property set against the catalog and
//! returns a [`CommandLine`], which renders the final line for any number of
//! messages:
//!
//! ```
//! use azure_pipelines_logging::{build_command, Properties};
//!
//! let props = Properties::new().with("type", "error");
//! let issue = build_command("task", "logissue", Some(props)).unwrap();
//! assert_eq!(
//!     issue.line("Error summary"),
//!     "##vso[task.logissue type=error;]Error summary"
//! );
//! ```
//!
//! Property values and messages are written verbatim. Nothing is escaped, so
//! `;`, `]` or line breaks in a value reach the log scraper unchanged.

use thiserror::Error;
use tracing::debug;

use super::catalog::{ActionSpec, CommandCatalog};
use super::properties::Properties;
use super::schema::PropertyViolation;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{family}.{action}'")]
    UnknownCommand { family: String, action: String },

    #[error("Invalid properties for '{command}': {reason}")]
    InvalidProperty {
        command: String,
        #[source]
        reason: PropertyViolation,
    },
}

/// A validated command awaiting its message
///
/// Immutable once built; every call to [`CommandLine::line`] is independent.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    family: String,
    action: String,
    /// Pre-rendered property block including its leading space, or empty
    properties: String,
}

impl CommandLine {
    /// Renders the command without validating it
    pub(crate) fn unchecked(family: &str, action: &str, properties: Option<&Properties>) -> Self {
        let block = properties.map(Properties::serialize).unwrap_or_default();
        let properties = if block.is_empty() {
            block
        } else {
            format!(" {}", block)
        };

        Self {
            family: family.to_string(),
            action: action.to_string(),
            properties,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Produces the final line for `message`
    pub fn line(&self, message: &str) -> String {
        format!(
            "##vso[{}.{}{}]{}",
            self.family, self.action, self.properties, message
        )
    }
}

impl CommandCatalog {
    /// Resolves a (family, action) pair
    pub fn resolve(&self, family: &str, action: &str) -> Result<&'static ActionSpec, CommandError> {
        self.action(family, action)
            .ok_or_else(|| CommandError::UnknownCommand {
                family: family.to_string(),
                action: action.to_string(),
            })
    }

    /// Validates a command against this catalog and prepares its line
    pub fn build_command(
        &self,
        family: &str,
        action: &str,
        properties: Option<Properties>,
    ) -> Result<CommandLine, CommandError> {
        let spec = self.resolve(family, action)?;

        if let Err(reason) = spec.schema.validate(properties.as_ref()) {
            debug!(family, action, %reason, "rejected command properties");
            return Err(CommandError::InvalidProperty {
                command: format!("{}.{}", family, action),
                reason,
            });
        }

        let line = CommandLine::unchecked(family, action, properties.as_ref());
        debug!(family, action, "built command");
        Ok(line)
    }
}

/// Validates a command against the standard catalog and prepares its line
///
/// `properties` must be `None` for actions that take no properties and is
/// otherwise checked against the action's schema.
pub fn build_command(
    family: &str,
    action: &str,
    properties: Option<Properties>,
) -> Result<CommandLine, CommandError> {
    CommandCatalog::standard().build_command(family, action, properties)
}
