//! Statically typed logging commands
//!
//! Every catalog entry has a variant here, so an unknown action, a missing
//! required property or an out-of-range enum value is a compile error rather
//! than a [`CommandError`](super::CommandError). The `setendpoint` union is a
//! tagged variant ([`EndpointField`]): `key` is mandatory for auth and data
//! parameters and optional for `url`.
//!
//! Typed commands render through the same serializer as the dynamic API.
//! Properties appear in catalog order.

use std::fmt;
use std::str::FromStr;

use super::command::CommandLine;
use super::properties::Properties;
use super::value::PropertyValue;

/// Declares a closed set of wire literals as a Rust enum
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the literal written on the wire
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(format!(concat!("invalid ", stringify!($name), ": '{}'"), s)),
                }
            }
        }

        impl From<$name> for PropertyValue {
            fn from(value: $name) -> Self {
                PropertyValue::from(value.as_str())
            }
        }
    };
}

wire_enum!(
    /// Artifact kind for `artifact.associate`
    ArtifactType {
        Container => "container",
        FilePath => "filepath",
        VersionControl => "versioncontrol",
        GitRef => "gitref",
        TfvcLabel => "tfvclabel",
    }
);

wire_enum!(
    /// Outcome of a task or timeline record
    TaskResult {
        Succeeded => "Succeeded",
        SucceededWithIssues => "SucceededWithIssues",
        Failed => "Failed",
    }
);

wire_enum!(
    /// State of a timeline record
    TimelineState {
        Unknown => "Unknown",
        Initialized => "Initialized",
        InProgress => "InProgress",
        Completed => "Completed",
    }
);

wire_enum!(
    /// Severity of `task.logissue`
    IssueType {
        Error => "error",
        Warning => "warning",
    }
);

/// A logging command from the reference catalog
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Artifact(ArtifactCommand),
    Build(BuildCommand),
    Release(ReleaseCommand),
    Task(TaskCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactCommand {
    /// Initializes an artifact
    Associate {
        artifact_name: String,
        artifact_type: ArtifactType,
    },
    /// Uploads a local file into a file container folder
    Upload {
        artifact_name: Option<String>,
        container_folder: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildCommand {
    UploadLog,
    UpdateBuildNumber,
    AddBuildTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseCommand {
    UpdateReleaseName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskCommand {
    AddAttachment {
        attachment_type: String,
        name: String,
    },
    Complete {
        result: TaskResult,
    },
    LogDetail(LogDetail),
    LogIssue(LogIssue),
    PrependPath,
    SetEndpoint(SetEndpoint),
    SetProgress {
        value: f64,
    },
    SetVariable(SetVariable),
    UploadFile,
    UploadSummary,
}

/// Creates or updates a timeline record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogDetail {
    /// Timeline record GUID
    pub id: String,
    pub parent_id: Option<String>,
    pub record_type: Option<String>,
    pub name: Option<String>,
    pub order: Option<u32>,
    pub start_time: Option<String>,
    pub finish_time: Option<String>,
    pub progress: Option<f64>,
    pub state: Option<TimelineState>,
    pub result: Option<TaskResult>,
}

impl LogDetail {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Logs an error or warning
#[derive(Debug, Clone, PartialEq)]
pub struct LogIssue {
    pub issue_type: IssueType,
    pub source_path: Option<String>,
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
    pub code: Option<i32>,
}

impl LogIssue {
    pub fn new(issue_type: IssueType) -> Self {
        Self {
            issue_type,
            source_path: None,
            line_number: None,
            column_number: None,
            code: None,
        }
    }

    pub fn error() -> Self {
        Self::new(IssueType::Error)
    }

    pub fn warning() -> Self {
        Self::new(IssueType::Warning)
    }
}

/// Modifies a service connection field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEndpoint {
    pub id: String,
    pub field: EndpointField,
}

/// The `field` of `task.setendpoint`, carrying the `key` it requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointField {
    AuthParameter { key: String },
    DataParameter { key: String },
    Url { key: Option<String> },
}

impl EndpointField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointField::AuthParameter { .. } => "authParameter",
            EndpointField::DataParameter { .. } => "dataParameter",
            EndpointField::Url { .. } => "url",
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            EndpointField::AuthParameter { key } | EndpointField::DataParameter { key } => {
                Some(key)
            }
            EndpointField::Url { key } => key.as_deref(),
        }
    }
}

/// Initializes or modifies a pipeline variable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetVariable {
    pub variable: String,
    pub is_secret: Option<bool>,
    pub is_output: Option<bool>,
    pub is_readonly: Option<bool>,
}

impl SetVariable {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            ..Self::default()
        }
    }
}

impl Command {
    /// The `area` token
    pub fn family(&self) -> &'static str {
        match self {
            Command::Artifact(_) => "artifact",
            Command::Build(_) => "build",
            Command::Release(_) => "release",
            Command::Task(_) => "task",
        }
    }

    /// The `action` token
    pub fn action(&self) -> &'static str {
        match self {
            Command::Artifact(cmd) => match cmd {
                ArtifactCommand::Associate { .. } => "associate",
                ArtifactCommand::Upload { .. } => "upload",
            },
            Command::Build(cmd) => match cmd {
                BuildCommand::UploadLog => "uploadlog",
                BuildCommand::UpdateBuildNumber => "updatebuildnumber",
                BuildCommand::AddBuildTag => "addbuildtag",
            },
            Command::Release(ReleaseCommand::UpdateReleaseName) => "updatereleasename",
            Command::Task(cmd) => match cmd {
                TaskCommand::AddAttachment { .. } => "addattachment",
                TaskCommand::Complete { .. } => "complete",
                TaskCommand::LogDetail(_) => "logdetail",
                TaskCommand::LogIssue(_) => "logissue",
                TaskCommand::PrependPath => "prependpath",
                TaskCommand::SetEndpoint(_) => "setendpoint",
                TaskCommand::SetProgress { .. } => "setprogress",
                TaskCommand::SetVariable(_) => "setvariable",
                TaskCommand::UploadFile => "uploadfile",
                TaskCommand::UploadSummary => "uploadsummary",
            },
        }
    }

    /// The dynamic property set, or `None` for actions without properties
    pub fn properties(&self) -> Option<Properties> {
        match self {
            Command::Artifact(cmd) => Some(artifact_properties(cmd)),
            Command::Build(_) | Command::Release(_) => None,
            Command::Task(cmd) => task_properties(cmd),
        }
    }

    /// Produces the final line for `message`
    pub fn line(&self, message: &str) -> String {
        CommandLine::from(self).line(message)
    }
}

impl From<&Command> for CommandLine {
    fn from(cmd: &Command) -> Self {
        CommandLine::unchecked(cmd.family(), cmd.action(), cmd.properties().as_ref())
    }
}

fn artifact_properties(cmd: &ArtifactCommand) -> Properties {
    let mut props = Properties::new();
    match cmd {
        ArtifactCommand::Associate {
            artifact_name,
            artifact_type,
        } => {
            props.push("artifactname", artifact_name);
            props.push("type", *artifact_type);
        }
        ArtifactCommand::Upload {
            artifact_name,
            container_folder,
        } => {
            props.push_opt("artifactname", artifact_name.as_ref());
            props.push("containerfolder", container_folder);
        }
    }
    props
}

fn task_properties(cmd: &TaskCommand) -> Option<Properties> {
    let mut props = Properties::new();
    match cmd {
        TaskCommand::PrependPath | TaskCommand::UploadFile | TaskCommand::UploadSummary => {
            return None
        }
        TaskCommand::AddAttachment {
            attachment_type,
            name,
        } => {
            props.push("type", attachment_type);
            props.push("name", name);
        }
        TaskCommand::Complete { result } => props.push("result", *result),
        TaskCommand::LogDetail(detail) => {
            props.push("id", &detail.id);
            props.push_opt("parentid", detail.parent_id.as_ref());
            props.push_opt("type", detail.record_type.as_ref());
            props.push_opt("name", detail.name.as_ref());
            props.push_opt("order", detail.order);
            props.push_opt("starttime", detail.start_time.as_ref());
            props.push_opt("finishtime", detail.finish_time.as_ref());
            props.push_opt("progress", detail.progress);
            props.push_opt("state", detail.state);
            props.push_opt("result", detail.result);
        }
        TaskCommand::LogIssue(issue) => {
            props.push("type", issue.issue_type);
            props.push_opt("sourcepath", issue.source_path.as_ref());
            props.push_opt("linenumber", issue.line_number);
            props.push_opt("columnnumber", issue.column_number);
            props.push_opt("code", issue.code);
        }
        TaskCommand::SetEndpoint(endpoint) => {
            props.push("id", &endpoint.id);
            props.push("field", endpoint.field.as_str());
            props.push_opt("key", endpoint.field.key());
        }
        TaskCommand::SetProgress { value } => props.push("value", *value),
        TaskCommand::SetVariable(var) => {
            props.push("variable", &var.variable);
            props.push_opt("issecret", var.is_secret);
            props.push_opt("isoutput", var.is_output);
            props.push_opt("isreadonly", var.is_readonly);
        }
    }
    Some(props)
}

impl From<ArtifactCommand> for Command {
    fn from(cmd: ArtifactCommand) -> Self {
        Command::Artifact(cmd)
    }
}

impl From<BuildCommand> for Command {
    fn from(cmd: BuildCommand) -> Self {
        Command::Build(cmd)
    }
}

impl From<ReleaseCommand> for Command {
    fn from(cmd: ReleaseCommand) -> Self {
        Command::Release(cmd)
    }
}

impl From<TaskCommand> for Command {
    fn from(cmd: TaskCommand) -> Self {
        Command::Task(cmd)
    }
}

impl From<LogDetail> for Command {
    fn from(detail: LogDetail) -> Self {
        Command::Task(TaskCommand::LogDetail(detail))
    }
}

impl From<LogIssue> for Command {
    fn from(issue: LogIssue) -> Self {
        Command::Task(TaskCommand::LogIssue(issue))
    }
}

impl From<SetEndpoint> for Command {
    fn from(endpoint: SetEndpoint) -> Self {
        Command::Task(TaskCommand::SetEndpoint(endpoint))
    }
}

impl From<SetVariable> for Command {
    fn from(var: SetVariable) -> Self {
        Command::Task(TaskCommand::SetVariable(var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_command, CommandCatalog};

    /// One instance of every action, with optional properties filled in
    fn every_command() -> Vec<Command> {
        vec![
            ArtifactCommand::Associate {
                artifact_name: "drop".to_string(),
                artifact_type: ArtifactType::Container,
            }
            .into(),
            ArtifactCommand::Upload {
                artifact_name: None,
                container_folder: "testresult".to_string(),
            }
            .into(),
            BuildCommand::UploadLog.into(),
            BuildCommand::UpdateBuildNumber.into(),
            BuildCommand::AddBuildTag.into(),
            ReleaseCommand::UpdateReleaseName.into(),
            TaskCommand::AddAttachment {
                attachment_type: "t".to_string(),
                name: "n".to_string(),
            }
            .into(),
            TaskCommand::Complete {
                result: TaskResult::SucceededWithIssues,
            }
            .into(),
            LogDetail {
                parent_id: Some("p".to_string()),
                order: Some(2),
                progress: Some(50.0),
                state: Some(TimelineState::InProgress),
                result: Some(TaskResult::Failed),
                ..LogDetail::new("guid")
            }
            .into(),
            LogIssue {
                line_number: Some(3),
                code: Some(-1),
                ..LogIssue::warning()
            }
            .into(),
            TaskCommand::PrependPath.into(),
            SetEndpoint {
                id: "e".to_string(),
                field: EndpointField::DataParameter {
                    key: "k".to_string(),
                },
            }
            .into(),
            TaskCommand::SetProgress { value: 12.5 }.into(),
            SetVariable {
                is_secret: Some(true),
                is_readonly: Some(false),
                ..SetVariable::new("v")
            }
            .into(),
            TaskCommand::UploadFile.into(),
            TaskCommand::UploadSummary.into(),
        ]
    }

    #[test]
    fn typed_commands_cover_the_catalog() {
        let catalog = CommandCatalog::standard();
        let commands = every_command();
        assert_eq!(commands.len(), catalog.commands().count());

        for (family, action) in catalog.commands() {
            assert!(
                commands
                    .iter()
                    .any(|c| c.family() == family.name && c.action() == action.name),
                "no typed command for {}.{}",
                family.name,
                action.name
            );
        }
    }

    #[test]
    fn typed_commands_validate_and_match_dynamic_lines() {
        for cmd in every_command() {
            let dynamic = build_command(cmd.family(), cmd.action(), cmd.properties())
                .unwrap_or_else(|e| panic!("{}.{}: {}", cmd.family(), cmd.action(), e));
            assert_eq!(dynamic.line("msg"), cmd.line("msg"));
        }
    }

    #[test]
    fn setendpoint_variants() {
        let url = Command::from(SetEndpoint {
            id: "000-0000-0000".to_string(),
            field: EndpointField::Url { key: None },
        });
        assert_eq!(
            url.line("https://example.com/service"),
            "##vso[task.setendpoint id=000-0000-0000;field=url;]https://example.com/service"
        );

        let auth = Command::from(SetEndpoint {
            id: "000-0000-0000".to_string(),
            field: EndpointField::AuthParameter {
                key: "AccessToken".to_string(),
            },
        });
        assert_eq!(
            auth.line("testvalue"),
            "##vso[task.setendpoint id=000-0000-0000;field=authParameter;key=AccessToken;]testvalue"
        );
    }

    #[test]
    fn logissue_renders_in_catalog_order() {
        let issue = Command::from(LogIssue {
            source_path: Some("consoleapp/main.cs".to_string()),
            line_number: Some(1),
            column_number: Some(1),
            code: Some(100),
            ..LogIssue::warning()
        });

        assert_eq!(
            issue.line("Found something that could be a problem."),
            "##vso[task.logissue type=warning;sourcepath=consoleapp/main.cs;linenumber=1;columnnumber=1;code=100;]Found something that could be a problem."
        );
    }

    #[test]
    fn setvariable_booleans() {
        let cmd = Command::from(SetVariable {
            is_secret: Some(true),
            ..SetVariable::new("secretSauce")
        });
        assert_eq!(
            cmd.line("crushed tomatoes with garlic"),
            "##vso[task.setvariable variable=secretSauce;issecret=true;]crushed tomatoes with garlic"
        );
    }

    #[test]
    fn propertyless_commands() {
        assert_eq!(Command::from(BuildCommand::AddBuildTag).properties(), None);
        assert_eq!(
            Command::from(TaskCommand::UploadFile).line("c:\\additionalfile.log"),
            "##vso[task.uploadfile]c:\\additionalfile.log"
        );
    }

    #[test]
    fn wire_enums_parse_and_print() {
        assert_eq!("gitref".parse::<ArtifactType>(), Ok(ArtifactType::GitRef));
        assert!("GitRef".parse::<ArtifactType>().is_err());
        assert_eq!(
            TaskResult::SucceededWithIssues.to_string(),
            "SucceededWithIssues"
        );
        assert_eq!(TimelineState::ALL.len(), 4);

        for state in TimelineState::ALL {
            assert_eq!(state.as_str().parse::<TimelineState>(), Ok(*state));
        }
    }

    #[test]
    fn wire_enums_match_catalog_domains() {
        use crate::domain::catalog::{ARTIFACT_TYPES, ISSUE_TYPES, TASK_RESULTS, TIMELINE_STATES};

        fn wire_names<T>(all: &[T], name: fn(&T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(name).collect()
        }

        let names = wire_names(ArtifactType::ALL, ArtifactType::as_str);
        assert_eq!(names, ARTIFACT_TYPES);
        let names = wire_names(TaskResult::ALL, TaskResult::as_str);
        assert_eq!(names, TASK_RESULTS);
        let names = wire_names(TimelineState::ALL, TimelineState::as_str);
        assert_eq!(names, TIMELINE_STATES);
        let names = wire_names(IssueType::ALL, IssueType::as_str);
        assert_eq!(names, ISSUE_TYPES);
    }
}
