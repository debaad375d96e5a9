//! `azlog catalog`: list known commands and formats

use anyhow::Result;
use clap::ValueEnum;
use serde_json::json;

use super::output::Output;
use crate::config::Config;
use crate::domain::{CommandCatalog, PropertySchema, PropertySpec};

/// What to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CatalogKind {
    #[default]
    All,
    Commands,
    Formats,
}

/// Renders one property spec as `key:domain`, with `?` marking optional keys
fn describe_spec(spec: &PropertySpec) -> String {
    let marker = if spec.required { "" } else { "?" };
    format!("{}{}:{}", spec.key, marker, spec.domain)
}

/// Renders a schema on a single line
pub fn describe_schema(schema: &PropertySchema) -> String {
    match schema {
        PropertySchema::None => "(no properties)".to_string(),
        PropertySchema::Fields { fields } => fields
            .iter()
            .map(describe_spec)
            .collect::<Vec<_>>()
            .join(" "),
        PropertySchema::Union(union) => {
            let mut parts: Vec<String> = union.common.iter().map(describe_spec).collect();
            parts.push(describe_spec(&union.discriminant));
            for branch in union.branches {
                let fields: Vec<String> = branch.fields.iter().map(describe_spec).collect();
                parts.push(format!(
                    "[{}={}: {}]",
                    union.discriminant.key,
                    branch.when.join("|"),
                    fields.join(" ")
                ));
            }
            parts.join(" ")
        }
    }
}

pub fn run(output: &Output, config: &Config, kind: CatalogKind) -> Result<()> {
    let commands = CommandCatalog::standard();
    let formats = config.format_catalog()?;
    let show_commands = matches!(kind, CatalogKind::All | CatalogKind::Commands);
    let show_formats = matches!(kind, CatalogKind::All | CatalogKind::Formats);

    // Text mode prints the rows, JSON mode the collected map
    let mut data = serde_json::Map::new();

    if show_commands {
        for (family, action) in commands.commands() {
            let name = format!("{}.{}", family.name, action.name);
            let schema = describe_schema(&action.schema);
            output.row(&[name.as_str(), schema.as_str()]);
        }
        data.insert("commands".to_string(), json!(commands));
    }

    if show_formats {
        for spec in formats.iter() {
            let marker = format!("##[{}]", spec.name);
            output.row(&[marker.as_str(), spec.arity.as_str()]);
        }
        data.insert("formats".to_string(), json!(formats));
    }

    output.data(&data);
    Ok(())
}
