//! Property schemas for logging commands
//!
//! A schema describes which keys an action accepts, whether each key is
//! required, and which values are allowed. `task.setendpoint` needs a union
//! schema: the value of its `field` key decides whether `key` is required.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::properties::Properties;
use super::value::PropertyValue;

/// Allowed values for a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ValueDomain {
    String,
    Number,
    Boolean,
    Enum(&'static [&'static str]),
}

impl ValueDomain {
    /// Returns true if `value` lies within this domain
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (ValueDomain::String, PropertyValue::String(_)) => true,
            (ValueDomain::Number, PropertyValue::Number(_)) => true,
            (ValueDomain::Boolean, PropertyValue::Boolean(_)) => true,
            (ValueDomain::Enum(allowed), PropertyValue::String(s)) => allowed.contains(&s.as_str()),
            _ => false,
        }
    }
}

impl fmt::Display for ValueDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueDomain::String => f.write_str("string"),
            ValueDomain::Number => f.write_str("number"),
            ValueDomain::Boolean => f.write_str("boolean"),
            ValueDomain::Enum(allowed) => write!(f, "one of {}", allowed.join("|")),
        }
    }
}

/// A single key accepted by an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertySpec {
    pub key: &'static str,
    pub domain: ValueDomain,
    pub required: bool,
}

impl PropertySpec {
    pub const fn required(key: &'static str, domain: ValueDomain) -> Self {
        Self {
            key,
            domain,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, domain: ValueDomain) -> Self {
        Self {
            key,
            domain,
            required: false,
        }
    }
}

/// One case of a union schema, selected by the discriminant's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnionBranch {
    /// Discriminant values selecting this branch
    pub when: &'static [&'static str],
    /// Keys added by this branch
    pub fields: &'static [PropertySpec],
}

/// Schema whose key set depends on the value of a discriminant key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnionSchema {
    /// Keys shared by every branch
    pub common: &'static [PropertySpec],
    /// The discriminant key; its domain lists every branch value
    pub discriminant: PropertySpec,
    pub branches: &'static [UnionBranch],
}

impl UnionSchema {
    /// Finds the branch selected by a discriminant value
    pub fn branch(&self, value: &str) -> Option<&UnionBranch> {
        self.branches.iter().find(|b| b.when.contains(&value))
    }
}

/// Property schema of one (family, action) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertySchema {
    /// The action accepts no properties at all
    None,
    Fields {
        fields: &'static [PropertySpec],
    },
    Union(UnionSchema),
}

/// Why a property set was rejected
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PropertyViolation {
    #[error("this command takes no properties")]
    Unexpected,

    #[error("missing required property '{0}'")]
    Missing(&'static str),

    #[error("unknown property '{0}'")]
    Extraneous(String),

    #[error("property '{0}' given more than once")]
    Duplicate(String),

    #[error("property '{key}' expects {expected}, got {found} '{value}'")]
    Domain {
        key: String,
        expected: ValueDomain,
        found: &'static str,
        value: String,
    },

    #[error("property '{key}' is required when '{discriminant}' is '{value}'")]
    BranchRequires {
        key: &'static str,
        discriminant: &'static str,
        value: String,
    },
}

impl PropertySchema {
    /// Returns true if the action takes no properties
    pub fn is_none(&self) -> bool {
        matches!(self, PropertySchema::None)
    }

    /// Finds the spec for a key, searching every branch of a union
    pub fn spec(&self, key: &str) -> Option<&PropertySpec> {
        match self {
            PropertySchema::None => None,
            PropertySchema::Fields { fields } => fields.iter().find(|s| s.key == key),
            PropertySchema::Union(union) => union
                .common
                .iter()
                .chain(std::iter::once(&union.discriminant))
                .chain(union.branches.iter().flat_map(|b| b.fields.iter()))
                .find(|s| s.key == key),
        }
    }

    /// Checks a property set against this schema
    ///
    /// `None` means the caller omitted properties entirely. That is the only
    /// accepted input for [`PropertySchema::None`]; for other schemas it is
    /// treated as an empty set so missing keys are reported.
    pub fn validate(&self, properties: Option<&Properties>) -> Result<(), PropertyViolation> {
        let empty = Properties::new();
        let props = match (self, properties) {
            (PropertySchema::None, None) => return Ok(()),
            (PropertySchema::None, Some(_)) => return Err(PropertyViolation::Unexpected),
            (_, Some(props)) => props,
            (_, None) => &empty,
        };

        check_duplicates(props)?;

        match self {
            PropertySchema::None => Ok(()),
            PropertySchema::Fields { fields } => {
                check_fields(props, fields.iter())?;
                check_required(props, fields.iter())
            }
            PropertySchema::Union(union) => validate_union(union, props),
        }
    }
}

fn check_duplicates(props: &Properties) -> Result<(), PropertyViolation> {
    let mut seen: Vec<&str> = Vec::with_capacity(props.len());
    for (key, _) in props.iter() {
        if seen.contains(&key) {
            return Err(PropertyViolation::Duplicate(key.to_string()));
        }
        seen.push(key);
    }
    Ok(())
}

/// Rejects unknown keys and values outside their domain
fn check_fields<'a>(
    props: &Properties,
    specs: impl Iterator<Item = &'a PropertySpec> + Clone,
) -> Result<(), PropertyViolation> {
    for (key, value) in props.iter() {
        let spec = specs
            .clone()
            .find(|s| s.key == key)
            .ok_or_else(|| PropertyViolation::Extraneous(key.to_string()))?;

        if !spec.domain.accepts(value) {
            return Err(PropertyViolation::Domain {
                key: key.to_string(),
                expected: spec.domain,
                found: value.kind(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

fn check_required<'a>(
    props: &Properties,
    mut specs: impl Iterator<Item = &'a PropertySpec>,
) -> Result<(), PropertyViolation> {
    match specs.find(|s| s.required && !props.contains(s.key)) {
        Some(spec) => Err(PropertyViolation::Missing(spec.key)),
        None => Ok(()),
    }
}

fn validate_union(union: &UnionSchema, props: &Properties) -> Result<(), PropertyViolation> {
    let disc = &union.discriminant;
    let value = props
        .get(disc.key)
        .ok_or(PropertyViolation::Missing(disc.key))?;

    let branch = value
        .as_str()
        .and_then(|v| union.branch(v))
        .ok_or_else(|| PropertyViolation::Domain {
            key: disc.key.to_string(),
            expected: disc.domain,
            found: value.kind(),
            value: value.to_string(),
        })?;

    let specs = union
        .common
        .iter()
        .chain(std::iter::once(disc))
        .chain(branch.fields.iter());
    check_fields(props, specs)?;
    check_required(props, union.common.iter())?;

    if let Some(spec) = branch.fields.iter().find(|s| s.required && !props.contains(s.key)) {
        return Err(PropertyViolation::BranchRequires {
            key: spec.key,
            discriminant: disc.key,
            value: value.to_string(),
        });
    }
    Ok(())
}
