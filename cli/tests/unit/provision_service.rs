//! Tests for the `ProvisionRun` service: inventory caching, argument
//! assembly, UI reporting and execution through mocked collaborators.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use ansible_provision::application::services::provision::{ProvisionRun, RunOptions};
use ansible_provision::domain::environment::{FORCE_COLOR_VAR, NO_COLOR_VAR, ROLES_PATH_VAR};
use ansible_provision::domain::{Operation, ProvisionError, ProvisionerConfig};

use crate::helpers::{
    CountingHosts, FailingHosts, MockCommandRunner, RecordingReporter, RecordingWriter,
};

fn config() -> ProvisionerConfig {
    ProvisionerConfig {
        playbook: PathBuf::from("site.yml"),
        ..ProvisionerConfig::default()
    }
}

fn opts(color: bool) -> RunOptions {
    RunOptions {
        machine_name: "web1".to_string(),
        color,
    }
}

// ── Inventory path resolution ────────────────────────────────────────────────

#[test]
fn test_inventory_path_generated_once_and_cached() {
    let cfg = config();
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);

    let first = run.inventory_path().expect("first");
    let second = run.inventory_path().expect("second");

    assert_eq!(first, second);
    assert_eq!(first, PathBuf::from(RecordingWriter::PATH));
    assert_eq!(writer.writes().len(), 1);
    assert_eq!(hosts.calls.get(), 1);
}

#[test]
fn test_configured_inventory_bypasses_generation() {
    let cfg = ProvisionerConfig {
        inventory_path: Some(PathBuf::from("hosts.ini")),
        ..config()
    };
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);

    assert_eq!(run.inventory_path().unwrap(), PathBuf::from("hosts.ini"));
    assert!(writer.writes().is_empty());
    assert_eq!(hosts.calls.get(), 0);
}

#[test]
fn test_generated_inventory_contains_hosts_and_groups() {
    let mut cfg = config();
    cfg.groups.insert("web".into(), vec!["web1", "web2"].into());
    cfg.groups.insert("db".into(), "db1".into());
    cfg.groups.insert("all:children".into(), vec!["web", "db", "cache"].into());
    cfg.groups.insert("web:vars".into(), vec!["port=80"].into());
    let hosts = CountingHosts::new(&["web1", "db1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);

    run.inventory_path().expect("inventory");

    assert_eq!(
        writer.writes()[0],
        "# Generated by ansible-provision\n\n\
         web1\ndb1\n\n\
         [web]\nweb1\n\n\
         [db]\ndb1\n\n\
         [all]\nweb\ndb\n"
    );
}

#[test]
fn test_host_enumeration_failure_is_surfaced() {
    let cfg = config();
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), FailingHosts, &writer);

    let err = run.inventory_path().unwrap_err();
    assert!(
        format!("{err:#}").contains("machine index unavailable"),
        "got: {err:#}"
    );
    assert!(writer.writes().is_empty());
}

// ── Invocation assembly ──────────────────────────────────────────────────────

#[test]
fn test_playbook_invocation_defaults_limit_to_machine() {
    let cfg = config();
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(false), &hosts, &writer);

    let inv = run.playbook_invocation().unwrap();
    assert_eq!(
        inv.args,
        [
            "--limit=web1",
            "--inventory-file=/tmp/generated_inventory",
            "site.yml"
        ]
    );
    assert!(inv.env.contains_key(NO_COLOR_VAR));
    assert!(!inv.env.contains_key(FORCE_COLOR_VAR));
}

#[test]
fn test_is_verbose_follows_verbosity_flag() {
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    for (verbose, expected) in [(None, false), (Some(""), false), (Some("vv"), true)] {
        let cfg = ProvisionerConfig {
            verbose: verbose.map(str::to_string),
            ..config()
        };
        let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);
        assert_eq!(run.is_verbose(), expected, "verbose = {verbose:?}");
    }
}

// ── Provisioning ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_provision_runs_playbook_only_without_galaxy() {
    let cfg = config();
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);
    let runner = MockCommandRunner::new_ok();
    let reporter = RecordingReporter::default();

    run.provision(&runner, &reporter).await.expect("provision");

    let calls = runner.recorded_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "ansible-playbook");
    assert_eq!(reporter.running_events(), [(Operation::Playbook, None)]);
    assert_eq!(reporter.successes.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_provision_runs_galaxy_before_playbook() {
    let cfg = ProvisionerConfig {
        galaxy_role_file: Some(PathBuf::from("requirements.yml")),
        galaxy_roles_path: Some(PathBuf::from("vendor/roles")),
        ..config()
    };
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);
    let runner = MockCommandRunner::new_ok();
    let reporter = RecordingReporter::default();

    run.provision(&runner, &reporter).await.expect("provision");

    let calls = runner.recorded_calls();
    let programs: Vec<&str> = calls.iter().map(|c| c.program.as_str()).collect();
    assert_eq!(programs, ["ansible-galaxy", "ansible-playbook"]);
    assert_eq!(
        calls[1].env.get(ROLES_PATH_VAR).map(String::as_str),
        Some("vendor/roles")
    );
    let ops: Vec<Operation> = reporter.running_events().into_iter().map(|e| e.0).collect();
    assert_eq!(ops, [Operation::Galaxy, Operation::Playbook]);
}

#[tokio::test]
async fn test_provision_verbose_reports_command_line() {
    let cfg = ProvisionerConfig {
        verbose: Some("vvv".into()),
        ..config()
    };
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(false), &hosts, &writer);
    let runner = MockCommandRunner::new_ok();
    let reporter = RecordingReporter::default();

    run.provision(&runner, &reporter).await.expect("provision");

    let events = reporter.running_events();
    let line = events[0].1.as_deref().expect("command line reported");
    assert!(line.starts_with("ANSIBLE_NOCOLOR=true PYTHONUNBUFFERED=1 ansible-playbook"));
    assert!(line.contains("--limit=\"web1\""), "got: {line}");
    assert!(line.contains(" -vvv "), "got: {line}");
}

#[tokio::test]
async fn test_provision_non_zero_exit_is_command_failed() {
    let cfg = config();
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);
    let runner = MockCommandRunner::with_exit_code(2);
    let reporter = RecordingReporter::default();

    let err = run.provision(&runner, &reporter).await.unwrap_err();

    match err.downcast_ref::<ProvisionError>() {
        Some(ProvisionError::CommandFailed { program, code }) => {
            assert_eq!(program, "ansible-playbook");
            assert_eq!(*code, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(reporter.successes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_provision_galaxy_failure_skips_playbook() {
    let cfg = ProvisionerConfig {
        galaxy_role_file: Some(PathBuf::from("requirements.yml")),
        ..config()
    };
    let hosts = CountingHosts::new(&["web1"]);
    let writer = RecordingWriter::default();
    let run = ProvisionRun::new(&cfg, opts(true), &hosts, &writer);
    let runner = MockCommandRunner::with_exit_code(1);
    let reporter = RecordingReporter::default();

    assert!(run.provision(&runner, &reporter).await.is_err());
    assert_eq!(runner.recorded_calls().len(), 1);
    assert!(writer.writes().is_empty());
}
