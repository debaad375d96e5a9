//! `azlog command` and `azlog format`

use anyhow::{bail, Result};
use tracing::debug;

use super::output::Output;
use crate::config::Config;
use crate::domain::{split_lines, ActionSpec, CommandCatalog, Properties};

/// Parses `KEY=VALUE` assignments, coercing values to the key's domain
pub fn parse_assignments(spec: &ActionSpec, assignments: &[String]) -> Result<Properties> {
    let mut properties = Properties::new();
    for assignment in assignments {
        let Some((key, raw)) = assignment.split_once('=') else {
            bail!("Invalid property '{}': expected KEY=VALUE", assignment);
        };
        if key.is_empty() {
            bail!("Invalid property '{}': empty key", assignment);
        }
        properties.push(key, spec.coerce(key, raw));
    }
    Ok(properties)
}

/// Prints a structured command line
pub fn command(
    output: &Output,
    family: &str,
    action: &str,
    assignments: &[String],
    message: &str,
) -> Result<()> {
    let catalog = CommandCatalog::standard();
    let spec = catalog.resolve(family, action)?;

    // No assignments means "omitted", which propertyless actions require
    let properties = if assignments.is_empty() {
        None
    } else {
        Some(parse_assignments(spec, assignments)?)
    };
    debug!(
        family,
        action,
        count = assignments.len(),
        "formatting command"
    );

    let line = catalog.build_command(family, action, properties)?;
    output.line(&line.line(message));
    Ok(())
}

/// Prints formatting marker lines
pub fn format(
    output: &Output,
    config: &Config,
    name: &str,
    messages: &[String],
    split: bool,
) -> Result<()> {
    let catalog = config.format_catalog()?;
    let marker = catalog.build_format(name)?;

    let lines: Vec<&str> = if split {
        messages.iter().flat_map(|m| split_lines(m)).collect()
    } else {
        messages.iter().map(String::as_str).collect()
    };
    debug!(marker = name, count = lines.len(), "formatting marker");

    output.line(&marker.render(lines)?);
    Ok(())
}
