//! The closed catalog of logging commands
//!
//! Reference: https://docs.microsoft.com/en-us/azure/devops/pipelines/scripts/logging-commands
//!
//! | Family | Actions |
//! |--------|---------|
//! | `artifact` | `associate`, `upload` |
//! | `build` | `uploadlog`, `updatebuildnumber`, `addbuildtag` |
//! | `release` | `updatereleasename` |
//! | `task` | `addattachment`, `complete`, `logdetail`, `logissue`, `prependpath`, `setendpoint`, `setprogress`, `setvariable`, `uploadfile`, `uploadsummary` |

use serde::Serialize;

use super::schema::ValueDomain::{Boolean, Number, String as Text};
use super::schema::{PropertySchema, PropertySpec, UnionBranch, UnionSchema, ValueDomain};
use super::value::PropertyValue;

pub const ARTIFACT_TYPES: &[&str] = &[
    "container",
    "filepath",
    "versioncontrol",
    "gitref",
    "tfvclabel",
];
pub const TASK_RESULTS: &[&str] = &["Succeeded", "SucceededWithIssues", "Failed"];
pub const TIMELINE_STATES: &[&str] = &["Unknown", "Initialized", "InProgress", "Completed"];
pub const ISSUE_TYPES: &[&str] = &["error", "warning"];
pub const ENDPOINT_FIELDS: &[&str] = &["authParameter", "dataParameter", "url"];

const fn req(key: &'static str, domain: ValueDomain) -> PropertySpec {
    PropertySpec::required(key, domain)
}

const fn opt(key: &'static str, domain: ValueDomain) -> PropertySpec {
    PropertySpec::optional(key, domain)
}

const fn fields(fields: &'static [PropertySpec]) -> PropertySchema {
    PropertySchema::Fields { fields }
}

/// One action and its property schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionSpec {
    pub name: &'static str,
    pub schema: PropertySchema,
}

/// One command family (the `area` in `##vso[area.action]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilySpec {
    pub name: &'static str,
    pub actions: &'static [ActionSpec],
}

/// Registry of every known (family, action) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandCatalog {
    families: &'static [FamilySpec],
}

const FAMILIES: &[FamilySpec] = &[
    FamilySpec {
        name: "artifact",
        actions: &[
            ActionSpec {
                name: "associate",
                schema: fields(&[
                    req("artifactname", Text),
                    req("type", ValueDomain::Enum(ARTIFACT_TYPES)),
                ]),
            },
            ActionSpec {
                name: "upload",
                schema: fields(&[
                    opt("artifactname", Text),
                    req("containerfolder", Text),
                ]),
            },
        ],
    },
    FamilySpec {
        name: "build",
        actions: &[
            ActionSpec {
                name: "uploadlog",
                schema: PropertySchema::None,
            },
            ActionSpec {
                name: "updatebuildnumber",
                schema: PropertySchema::None,
            },
            ActionSpec {
                name: "addbuildtag",
                schema: PropertySchema::None,
            },
        ],
    },
    FamilySpec {
        name: "release",
        actions: &[ActionSpec {
            name: "updatereleasename",
            schema: PropertySchema::None,
        }],
    },
    FamilySpec {
        name: "task",
        actions: &[
            ActionSpec {
                name: "addattachment",
                schema: fields(&[req("type", Text), req("name", Text)]),
            },
            ActionSpec {
                name: "complete",
                schema: fields(&[req("result", ValueDomain::Enum(TASK_RESULTS))]),
            },
            ActionSpec {
                name: "logdetail",
                schema: fields(&[
                    req("id", Text),
                    opt("parentid", Text),
                    opt("type", Text),
                    opt("name", Text),
                    opt("order", Number),
                    opt("starttime", Text),
                    opt("finishtime", Text),
                    opt("progress", Number),
                    opt("state", ValueDomain::Enum(TIMELINE_STATES)),
                    opt("result", ValueDomain::Enum(TASK_RESULTS)),
                ]),
            },
            ActionSpec {
                name: "logissue",
                schema: fields(&[
                    req("type", ValueDomain::Enum(ISSUE_TYPES)),
                    opt("sourcepath", Text),
                    opt("linenumber", Number),
                    opt("columnnumber", Number),
                    opt("code", Number),
                ]),
            },
            ActionSpec {
                name: "prependpath",
                schema: PropertySchema::None,
            },
            ActionSpec {
                name: "setendpoint",
                schema: PropertySchema::Union(UnionSchema {
                    common: &[req("id", Text)],
                    discriminant: req("field", ValueDomain::Enum(ENDPOINT_FIELDS)),
                    branches: &[
                        UnionBranch {
                            when: &["authParameter", "dataParameter"],
                            fields: &[req("key", Text)],
                        },
                        // "Required, unless field = url"
                        UnionBranch {
                            when: &["url"],
                            fields: &[opt("key", Text)],
                        },
                    ],
                }),
            },
            ActionSpec {
                name: "setprogress",
                schema: fields(&[req("value", Number)]),
            },
            ActionSpec {
                name: "setvariable",
                schema: fields(&[
                    req("variable", Text),
                    opt("issecret", Boolean),
                    opt("isoutput", Boolean),
                    opt("isreadonly", Boolean),
                ]),
            },
            ActionSpec {
                name: "uploadfile",
                schema: PropertySchema::None,
            },
            ActionSpec {
                name: "uploadsummary",
                schema: PropertySchema::None,
            },
        ],
    },
];

impl CommandCatalog {
    /// The reference catalog of Azure Pipelines logging commands
    pub const fn standard() -> Self {
        Self { families: FAMILIES }
    }

    /// Iterates over all families
    pub fn families(&self) -> impl Iterator<Item = &'static FamilySpec> {
        let families = self.families;
        families.iter()
    }

    /// Looks up a family by name
    pub fn family(&self, name: &str) -> Option<&'static FamilySpec> {
        let families = self.families;
        families.iter().find(|f| f.name == name)
    }

    /// Looks up an action within a family
    pub fn action(&self, family: &str, action: &str) -> Option<&'static ActionSpec> {
        self.family(family)?.action(action)
    }

    /// Iterates over every (family, action) pair
    pub fn commands(&self) -> impl Iterator<Item = (&'static FamilySpec, &'static ActionSpec)> {
        let families = self.families;
        families
            .iter()
            .flat_map(|f| f.actions.iter().map(move |a| (f, a)))
    }
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl FamilySpec {
    pub fn action(&self, name: &str) -> Option<&'static ActionSpec> {
        let actions = self.actions;
        actions.iter().find(|a| a.name == name)
    }
}

impl ActionSpec {
    /// Converts raw text into a value of the key's domain
    ///
    /// Numbers and booleans are parsed; strings and enum members stay text
    /// (enum membership is checked when the property set is validated).
    /// Keys the schema does not know stay text as well, so validation can
    /// report them as unknown rather than failing here.
    pub fn coerce(&self, key: &str, raw: &str) -> PropertyValue {
        match self.schema.spec(key).map(|s| s.domain) {
            Some(ValueDomain::Number) => match raw.trim().parse::<f64>() {
                Ok(n) => PropertyValue::Number(n),
                Err(_) => PropertyValue::from(raw),
            },
            Some(ValueDomain::Boolean) => match raw.trim() {
                "true" => PropertyValue::Boolean(true),
                "false" => PropertyValue::Boolean(false),
                _ => PropertyValue::from(raw),
            },
            _ => PropertyValue::from(raw),
        }
    }
}
