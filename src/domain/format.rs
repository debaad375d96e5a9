//! Formatting markers: `##[format]message`
//!
//! Each format belongs to an arity class:
//!
//! | Arity | Formats | Accepts |
//! |-------|---------|---------|
//! | no-message | `endgroup` | nothing |
//! | single-line | `command`, `group` | exactly one line |
//! | multi-line | `debug`, `error`, `warning` (`section` in the extended catalog) | one or more lines |
//!
//! Messages must not contain line breaks. Text that may contain them is
//! split with [`split_lines`] before rendering, one marker per line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Message class of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    NoMessage,
    SingleLine,
    MultiLine,
}

impl Arity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arity::NoMessage => "no_message",
            Arity::SingleLine => "single_line",
            Arity::MultiLine => "multi_line",
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the messages passed to a marker were rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageViolation {
    #[error("takes no message, got {0}")]
    NoneExpected(usize),

    #[error("takes exactly one message, got {0}")]
    ExactlyOne(usize),

    #[error("takes at least one message")]
    AtLeastOne,

    #[error("message {0} contains a line break")]
    LineBreak(usize),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unknown format '{0}'")]
    UnknownFormat(String),

    #[error("Invalid message for format '{format}': {reason}")]
    InvalidMessage {
        format: String,
        #[source]
        reason: MessageViolation,
    },
}

/// A format name and its arity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    pub name: String,
    pub arity: Arity,
}

/// The set of formats a marker may be built for
///
/// Kept as data so the catalog variant can be chosen by configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormatCatalog {
    formats: Vec<FormatSpec>,
}

const STANDARD_FORMATS: &[(&str, Arity)] = &[
    ("command", Arity::SingleLine),
    ("debug", Arity::MultiLine),
    ("endgroup", Arity::NoMessage),
    ("error", Arity::MultiLine),
    ("group", Arity::SingleLine),
    ("warning", Arity::MultiLine),
];

impl FormatCatalog {
    /// An empty catalog
    pub fn empty() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// `endgroup`; `command`, `group`; `debug`, `error`, `warning`
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        for (name, arity) in STANDARD_FORMATS {
            catalog.insert(*name, *arity);
        }
        catalog
    }

    /// The standard catalog plus `section` as a multi-line format
    pub fn extended() -> Self {
        let mut catalog = Self::standard();
        catalog.insert("section", Arity::MultiLine);
        catalog
    }

    /// Adds a format, replacing the arity of an existing one
    pub fn insert(&mut self, name: impl Into<String>, arity: Arity) {
        let name = name.into();
        match self.formats.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.arity = arity,
            None => self.formats.push(FormatSpec { name, arity }),
        }
    }

    /// Looks up a format's arity
    pub fn arity(&self, name: &str) -> Option<Arity> {
        self.formats.iter().find(|f| f.name == name).map(|f| f.arity)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arity(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormatSpec> {
        self.formats.iter()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Prepares a marker for a format in this catalog
    pub fn build_format(&self, name: &str) -> Result<FormatMarker, FormatError> {
        let arity = self
            .arity(name)
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))?;
        Ok(FormatMarker {
            name: name.to_string(),
            arity,
        })
    }
}

impl Default for FormatCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Returns true if `name` can appear between `##[` and `]`
pub fn is_valid_format_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c == '[' || c == ']')
}

/// A format ready to render messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMarker {
    name: String,
    arity: Arity,
}

impl FormatMarker {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Renders one marker line per message, joined by `\n`
    pub fn render<I, S>(&self, messages: I) -> Result<String, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let messages: Vec<S> = messages.into_iter().collect();
        self.check(&messages).map_err(|reason| {
            debug!(marker = %self.name, %reason, "rejected format messages");
            FormatError::InvalidMessage {
                format: self.name.clone(),
                reason,
            }
        })?;

        if messages.is_empty() {
            return Ok(format!("##[{}]", self.name));
        }

        let lines: Vec<String> = messages
            .iter()
            .map(|m| format!("##[{}]{}", self.name, m.as_ref()))
            .collect();
        Ok(lines.join("\n"))
    }

    /// Renders a marker that takes no message
    pub fn render_empty(&self) -> Result<String, FormatError> {
        self.render(std::iter::empty::<&str>())
    }

    /// Renders a single message
    pub fn render_one(&self, message: &str) -> Result<String, FormatError> {
        self.render([message])
    }

    fn check<S: AsRef<str>>(&self, messages: &[S]) -> Result<(), MessageViolation> {
        match (self.arity, messages.len()) {
            (Arity::NoMessage, 0) => {}
            (Arity::NoMessage, n) => return Err(MessageViolation::NoneExpected(n)),
            (Arity::SingleLine, 1) => {}
            (Arity::SingleLine, n) => return Err(MessageViolation::ExactlyOne(n)),
            (Arity::MultiLine, 0) => return Err(MessageViolation::AtLeastOne),
            (Arity::MultiLine, _) => {}
        }

        match messages
            .iter()
            .position(|m| m.as_ref().contains(['\n', '\r']))
        {
            Some(index) => Err(MessageViolation::LineBreak(index)),
            None => Ok(()),
        }
    }
}

/// Prepares a marker for a format in the standard catalog
pub fn build_format(name: &str) -> Result<FormatMarker, FormatError> {
    FormatCatalog::standard().build_format(name)
}

/// Splits text into lines suitable for a multi-line marker
///
/// Accepts both `\n` and `\r\n` line endings. Empty text yields one empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Every format known to the scraper, including the extended `section`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Command,
    Debug,
    EndGroup,
    Error,
    Group,
    Section,
    Warning,
}

impl Format {
    pub const ALL: &'static [Format] = &[
        Format::Command,
        Format::Debug,
        Format::EndGroup,
        Format::Error,
        Format::Group,
        Format::Section,
        Format::Warning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Command => "command",
            Format::Debug => "debug",
            Format::EndGroup => "endgroup",
            Format::Error => "error",
            Format::Group => "group",
            Format::Section => "section",
            Format::Warning => "warning",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Format::EndGroup => Arity::NoMessage,
            Format::Command | Format::Group => Arity::SingleLine,
            Format::Debug | Format::Error | Format::Section | Format::Warning => Arity::MultiLine,
        }
    }

    /// A marker for this format, independent of any catalog
    pub fn marker(&self) -> FormatMarker {
        FormatMarker {
            name: self.name().to_string(),
            arity: self.arity(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| FormatError::UnknownFormat(s.to_string()))
    }
}
