//! Golden tests against the logging-commands documentation
//!
//! Every example below is copied from
//! https://docs.microsoft.com/en-us/azure/devops/pipelines/scripts/logging-commands
//! and must be reproduced byte for byte. The line format is the contract
//! with the agent's log scraper.

use azure_pipelines_logging::domain::{
    ArtifactCommand, ArtifactType, BuildCommand, EndpointField, LogDetail, LogIssue,
    ReleaseCommand, SetEndpoint, SetVariable, TaskCommand, TaskResult, TimelineState,
};
use azure_pipelines_logging::{build_command, build_format, Command, Properties};

fn props() -> Properties {
    Properties::new()
}

/// Builds a command through the dynamic API and renders `message`
fn line(family: &str, action: &str, properties: Option<Properties>, message: &str) -> String {
    build_command(family, action, properties)
        .unwrap_or_else(|e| panic!("{}.{}: {}", family, action, e))
        .line(message)
}

// =============================================================================
// artifact
// =============================================================================

#[test]
fn artifact_associate() {
    let properties = props()
        .with("artifactname", "MyServerDrop")
        .with("type", "container");
    assert_eq!(
        line("artifact", "associate", Some(properties), "#/1/build"),
        "##vso[artifact.associate artifactname=MyServerDrop;type=container;]#/1/build"
    );

    let typed = Command::from(ArtifactCommand::Associate {
        artifact_name: "MyServerDrop".to_string(),
        artifact_type: ArtifactType::Container,
    });
    assert_eq!(
        typed.line("#/1/build"),
        "##vso[artifact.associate artifactname=MyServerDrop;type=container;]#/1/build"
    );
}

#[test]
fn artifact_upload() {
    let properties = props()
        .with("artifactname", "uploadedresult")
        .with("containerfolder", "testresult");
    assert_eq!(
        line("artifact", "upload", Some(properties), "c:\\testresult.trx"),
        "##vso[artifact.upload artifactname=uploadedresult;containerfolder=testresult;]c:\\testresult.trx"
    );

    let typed = Command::from(ArtifactCommand::Upload {
        artifact_name: Some("uploadedresult".to_string()),
        container_folder: "testresult".to_string(),
    });
    assert_eq!(
        typed.line("c:\\testresult.trx"),
        "##vso[artifact.upload artifactname=uploadedresult;containerfolder=testresult;]c:\\testresult.trx"
    );
}

// =============================================================================
// build / release
// =============================================================================

#[test]
fn build_addbuildtag() {
    assert_eq!(
        line("build", "addbuildtag", None, "Tag_UnitTestPassed"),
        "##vso[build.addbuildtag]Tag_UnitTestPassed"
    );
}

#[test]
fn build_updatebuildnumber() {
    assert_eq!(
        Command::from(BuildCommand::UpdateBuildNumber).line("my-new-build-number"),
        "##vso[build.updatebuildnumber]my-new-build-number"
    );
}

#[test]
fn build_uploadlog() {
    assert_eq!(
        line("build", "uploadlog", None, "c:\\msbuild.log"),
        "##vso[build.uploadlog]c:\\msbuild.log"
    );
}

#[test]
fn release_updatereleasename() {
    assert_eq!(
        Command::from(ReleaseCommand::UpdateReleaseName).line("my-new-release-name"),
        "##vso[release.updatereleasename]my-new-release-name"
    );
}

// =============================================================================
// task
// =============================================================================

#[test]
fn task_addattachment() {
    let properties = props()
        .with("type", "myattachmenttype")
        .with("name", "myattachmentname");
    assert_eq!(
        line(
            "task",
            "addattachment",
            Some(properties),
            "c:\\myattachment.txt",
        ),
        "##vso[task.addattachment type=myattachmenttype;name=myattachmentname;]c:\\myattachment.txt"
    );
}

#[test]
fn task_complete() {
    let properties = props().with("result", "Succeeded");
    assert_eq!(
        line("task", "complete", Some(properties), "DONE"),
        "##vso[task.complete result=Succeeded;]DONE"
    );

    let typed = Command::from(TaskCommand::Complete {
        result: TaskResult::Succeeded,
    });
    assert_eq!(
        typed.line("DONE"),
        "##vso[task.complete result=Succeeded;]DONE"
    );
}

#[test]
fn task_logdetail() {
    let properties = props()
        .with("id", "new guid")
        .with("name", "project1")
        .with("type", "build")
        .with("order", 1);
    assert_eq!(
        line(
            "task",
            "logdetail",
            Some(properties),
            "create new timeline record",
        ),
        "##vso[task.logdetail id=new guid;name=project1;type=build;order=1;]create new timeline record"
    );

    let properties = props()
        .with("id", "new guid")
        .with("parentid", "exist timeline record guid")
        .with("name", "project1")
        .with("type", "build")
        .with("order", 1);
    assert_eq!(
        line(
            "task",
            "logdetail",
            Some(properties),
            "create new nested timeline record",
        ),
        "##vso[task.logdetail id=new guid;parentid=exist timeline record guid;name=project1;type=build;order=1;]create new nested timeline record"
    );

    let properties = props()
        .with("id", "existing timeline record guid")
        .with("progress", 15)
        .with("state", "InProgress");
    assert_eq!(
        line(
            "task",
            "logdetail",
            Some(properties),
            "update timeline record",
        ),
        "##vso[task.logdetail id=existing timeline record guid;progress=15;state=InProgress;]update timeline record"
    );

    let typed = Command::from(LogDetail {
        progress: Some(15.0),
        state: Some(TimelineState::InProgress),
        ..LogDetail::new("existing timeline record guid")
    });
    assert_eq!(
        typed.line("update timeline record"),
        "##vso[task.logdetail id=existing timeline record guid;progress=15;state=InProgress;]update timeline record"
    );
}

#[test]
fn task_logissue() {
    let properties = props()
        .with("type", "warning")
        .with("sourcepath", "consoleapp/main.cs")
        .with("linenumber", 1)
        .with("columnnumber", 1)
        .with("code", 100);
    assert_eq!(
        line(
            "task",
            "logissue",
            Some(properties),
            "Found something that could be a problem.",
        ),
        "##vso[task.logissue type=warning;sourcepath=consoleapp/main.cs;linenumber=1;columnnumber=1;code=100;]Found something that could be a problem."
    );

    let properties = props().with("type", "error");
    assert_eq!(
        line("task", "logissue", Some(properties), "Error summary"),
        "##vso[task.logissue type=error;]Error summary"
    );
    assert_eq!(
        Command::from(LogIssue::error()).line("Error summary"),
        "##vso[task.logissue type=error;]Error summary"
    );
}

#[test]
fn task_prependpath() {
    assert_eq!(
        line("task", "prependpath", None, "c:\\my\\directory\\path"),
        "##vso[task.prependpath]c:\\my\\directory\\path"
    );
}

#[test]
fn task_setendpoint() {
    let endpoint = |field: &str, key: Option<&str>| {
        let mut p = props().with("id", "000-0000-0000").with("field", field);
        p.push_opt("key", key);
        Some(p)
    };

    assert_eq!(
        line(
            "task",
            "setendpoint",
            endpoint("authParameter", Some("AccessToken")),
            "testvalue",
        ),
        "##vso[task.setendpoint id=000-0000-0000;field=authParameter;key=AccessToken;]testvalue"
    );
    assert_eq!(
        line(
            "task",
            "setendpoint",
            endpoint("dataParameter", Some("userVariable")),
            "testvalue",
        ),
        "##vso[task.setendpoint id=000-0000-0000;field=dataParameter;key=userVariable;]testvalue"
    );
    assert_eq!(
        line(
            "task",
            "setendpoint",
            endpoint("url", None),
            "https://example.com/service",
        ),
        "##vso[task.setendpoint id=000-0000-0000;field=url;]https://example.com/service"
    );

    let typed = Command::from(SetEndpoint {
        id: "000-0000-0000".to_string(),
        field: EndpointField::DataParameter {
            key: "userVariable".to_string(),
        },
    });
    assert_eq!(
        typed.line("testvalue"),
        "##vso[task.setendpoint id=000-0000-0000;field=dataParameter;key=userVariable;]testvalue"
    );
}

#[test]
fn task_setprogress() {
    let properties = props().with("value", 5);
    assert_eq!(
        line(
            "task",
            "setprogress",
            Some(properties),
            "Sample Progress Indicator",
        ),
        "##vso[task.setprogress value=5;]Sample Progress Indicator"
    );
}

#[test]
fn task_setvariable() {
    let properties = props().with("variable", "sauce");
    assert_eq!(
        line("task", "setvariable", Some(properties), "crushed tomatoes"),
        "##vso[task.setvariable variable=sauce;]crushed tomatoes"
    );

    let properties = props()
        .with("variable", "secretSauce")
        .with("issecret", true);
    assert_eq!(
        line(
            "task",
            "setvariable",
            Some(properties),
            "crushed tomatoes with garlic",
        ),
        "##vso[task.setvariable variable=secretSauce;issecret=true;]crushed tomatoes with garlic"
    );

    let typed = Command::from(SetVariable {
        is_output: Some(true),
        ..SetVariable::new("outputSauce")
    });
    assert_eq!(
        typed.line("canned goods"),
        "##vso[task.setvariable variable=outputSauce;isoutput=true;]canned goods"
    );
}

#[test]
fn task_uploadfile() {
    assert_eq!(
        line("task", "uploadfile", None, "c:\\additionalfile.log"),
        "##vso[task.uploadfile]c:\\additionalfile.log"
    );
}

#[test]
fn task_uploadsummary() {
    assert_eq!(
        Command::from(TaskCommand::UploadSummary).line("c:\\testsummary.md"),
        "##vso[task.uploadsummary]c:\\testsummary.md"
    );
}

// =============================================================================
// Formatting commands
// =============================================================================

#[test]
fn format_command() {
    let marker = build_format("command").unwrap();
    assert_eq!(
        marker.render_one("Command-line being run").unwrap(),
        "##[command]Command-line being run"
    );
}

#[test]
fn format_debug() {
    let marker = build_format("debug").unwrap();
    assert_eq!(
        marker.render(["Debug text", "Next line"]).unwrap(),
        "##[debug]Debug text\n##[debug]Next line"
    );
}

#[test]
fn format_group_and_endgroup() {
    let group = build_format("group").unwrap();
    assert_eq!(
        group.render_one("Beginning of a group").unwrap(),
        "##[group]Beginning of a group"
    );

    let endgroup = build_format("endgroup").unwrap();
    assert_eq!(endgroup.render_empty().unwrap(), "##[endgroup]");
}

#[test]
fn format_error() {
    let marker = build_format("error").unwrap();
    assert_eq!(
        marker
            .render([
                "Details about error.",
                "Second line of details.",
                "Third line.",
            ])
            .unwrap(),
        "##[error]Details about error.\n##[error]Second line of details.\n##[error]Third line."
    );
}

#[test]
fn format_warning() {
    let marker = build_format("warning").unwrap();
    assert_eq!(
        marker.render(["Warning message", "Next line"]).unwrap(),
        "##[warning]Warning message\n##[warning]Next line"
    );
}
