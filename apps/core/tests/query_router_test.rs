use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use flow_zoxide::action_executor::{LaunchError, PathOpener};
use flow_zoxide::contract::{METHOD_DELETE_DIRECTORY, METHOD_OPEN_DIRECTORY};
use flow_zoxide::error::PluginError;
use flow_zoxide::query_router::QueryRouter;
use flow_zoxide::ranking_tool::{RankingToolClient, ToolOutput, ToolPath, ToolRunner};
use serde_json::Value;

type Calls = Rc<RefCell<Vec<Vec<String>>>>;

struct ScriptedRunner {
    responses: RefCell<VecDeque<std::io::Result<ToolOutput>>>,
    calls: Calls,
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, _program: &Path, args: &[String]) -> std::io::Result<ToolOutput> {
        self.calls.borrow_mut().push(args.to_vec());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(exit_ok("")))
    }
}

#[derive(Default)]
struct RecordingOpener {
    opened: Rc<RefCell<Vec<PathBuf>>>,
    fail: bool,
}

impl PathOpener for RecordingOpener {
    fn open_path(&self, path: &Path) -> Result<(), LaunchError> {
        if self.fail {
            return Err(LaunchError::LaunchFailed {
                message: "no handler".to_string(),
                code: Some(2),
            });
        }
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

fn exit_ok(stdout: &str) -> ToolOutput {
    ToolOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn exit_err(stderr: &str) -> ToolOutput {
    ToolOutput {
        code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

struct Harness {
    router: QueryRouter,
    calls: Calls,
    opened: Rc<RefCell<Vec<PathBuf>>>,
}

fn harness(responses: Vec<std::io::Result<ToolOutput>>) -> Harness {
    harness_with_opener(responses, false)
}

fn harness_with_opener(responses: Vec<std::io::Result<ToolOutput>>, opener_fails: bool) -> Harness {
    let calls: Calls = Rc::default();
    let opened = Rc::new(RefCell::new(Vec::new()));
    let runner = ScriptedRunner {
        responses: RefCell::new(responses.into()),
        calls: Rc::clone(&calls),
    };
    let opener = RecordingOpener {
        opened: Rc::clone(&opened),
        fail: opener_fails,
    };
    let client = RankingToolClient::with_runner(ToolPath::new("zoxide"), Box::new(runner));
    Harness {
        router: QueryRouter::with_parts("zoxide", Some(client), Box::new(opener)),
        calls,
        opened,
    }
}

fn router_without_tool() -> QueryRouter {
    QueryRouter::with_parts(
        "missing-zoxide",
        None,
        Box::new(RecordingOpener::default()),
    )
}

#[test]
fn lookup_projects_rows_in_tool_order() {
    let h = harness(vec![Ok(exit_ok(
        "3.0 /home/me/low\n41.7 /home/me/high\n",
    ))]);

    let rows = h.router.handle_query("me  proj");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "low");
    assert_eq!(rows[0].score, Some(30));
    assert_eq!(rows[1].title, "high");
    assert_eq!(rows[1].score, Some(417));
    assert_eq!(rows[1].context_data.as_deref(), Some("/home/me/high"));

    let action = rows[1].action.as_ref().expect("lookup rows open the path");
    assert_eq!(action.method, METHOD_OPEN_DIRECTORY);
    assert_eq!(action.parameters, vec![Value::from("/home/me/high")]);

    assert_eq!(
        *h.calls.borrow(),
        vec![vec!["query", "--list", "--score", "me", "proj"]]
    );
}

#[test]
fn blank_input_returns_no_rows_without_calling_tool() {
    for input in ["", "   ", "\t", "cd ", "cd     "] {
        let h = harness(Vec::new());
        assert!(h.router.handle_query(input).is_empty(), "input {input:?}");
        assert!(h.calls.borrow().is_empty(), "input {input:?}");
    }
}

#[test]
fn lookup_with_no_matches_returns_no_rows() {
    let h = harness(vec![Ok(exit_ok("\n"))]);
    assert!(h.router.handle_query("nothing").is_empty());
}

#[test]
fn failing_query_renders_single_error_row() {
    let h = harness(vec![Ok(exit_err("  zoxide: no match found\n"))]);

    let rows = h.router.handle_query("zzz");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "QueryError");
    assert_eq!(
        rows[0].subtitle,
        "Zoxide query failed for 'zzz': zoxide: no match found"
    );
    assert!(rows[0].action.is_none());
}

#[test]
fn malformed_output_renders_parse_error_without_partial_rows() {
    let h = harness(vec![Ok(exit_ok("5.0 /ok\nbroken-line\n"))]);

    let rows = h.router.handle_query("ok");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "ResultParseError");
    assert!(rows[0].subtitle.contains("broken-line"));
}

#[test]
fn spawn_failure_renders_error_row() {
    let h = harness(vec![Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "access denied",
    ))]);

    let rows = h.router.handle_query("proj");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "ToolSpawnError");
}

#[test]
fn missing_tool_offers_install_row() {
    let rows = router_without_tool().handle_query("proj");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Zoxide not found");
    let action = rows[0].action.as_ref().expect("install row has an action");
    assert_eq!(action.method, "Flow.Launcher.OpenUrl");
}

#[test]
fn register_mode_offers_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();
    let h = harness(Vec::new());

    let rows = h.router.handle_query(&format!("cd {path}"));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, path);
    let action = rows[0].action.as_ref().expect("register row has an action");
    assert_eq!(action.method, METHOD_OPEN_DIRECTORY);
    assert_eq!(action.parameters, vec![Value::from(path.as_str())]);
    assert!(h.calls.borrow().is_empty());
}

#[test]
fn register_mode_rejects_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-dir");
    let missing = missing.to_string_lossy().to_string();
    let h = harness(Vec::new());

    let rows = h.router.handle_query(&format!("cd {missing}"));

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, format!("Invalid directory: {missing}"));
    assert!(rows[0].action.is_none());
}

#[test]
fn register_mode_rejects_regular_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, b"x").unwrap();
    let h = harness(Vec::new());

    let rows = h.router.handle_query(&format!("cd {}", file.display()));

    assert_eq!(rows.len(), 1);
    assert!(rows[0].title.starts_with("Invalid directory: "));
    assert!(rows[0].action.is_none());
}

#[test]
fn open_launches_then_registers_access() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();
    let h = harness(Vec::new());

    h.router.handle_open(&path).unwrap();

    assert_eq!(*h.opened.borrow(), vec![dir.path().to_path_buf()]);
    assert_eq!(*h.calls.borrow(), vec![vec!["add".to_string(), path]]);
}

#[test]
fn open_missing_directory_fails_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone").to_string_lossy().to_string();
    let h = harness(Vec::new());

    match h.router.handle_open(&missing) {
        Err(PluginError::DirectoryNotFound { path }) => assert_eq!(path, missing),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(h.opened.borrow().is_empty());
    assert!(h.calls.borrow().is_empty());
}

#[test]
fn add_failure_is_reported_after_directory_opened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();
    let h = harness(vec![Ok(exit_err("database is read-only"))]);

    match h.router.handle_open(&path) {
        Err(PluginError::Add { message, .. }) => assert_eq!(message, "database is read-only"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(h.opened.borrow().len(), 1);
}

#[test]
fn open_failure_skips_registration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();
    let h = harness_with_opener(Vec::new(), true);

    match h.router.handle_open(&path) {
        Err(error @ PluginError::Open { .. }) => assert_eq!(error.kind(), "OpenError"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(h.calls.borrow().is_empty());
}

#[test]
fn delete_removes_trimmed_path() {
    let h = harness(Vec::new());

    h.router.handle_delete(" /home/me/old ").unwrap();

    assert_eq!(
        *h.calls.borrow(),
        vec![vec!["remove".to_string(), "/home/me/old".to_string()]]
    );
}

#[test]
fn delete_failure_carries_tool_message() {
    let h = harness(vec![Ok(exit_err("path not found in database\n"))]);

    match h.router.handle_delete("/nowhere") {
        Err(PluginError::Remove { path, message }) => {
            assert_eq!(path, "/nowhere");
            assert_eq!(message, "path not found in database");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn actions_without_tool_report_not_found() {
    let router = router_without_tool();
    match router.handle_delete("/x") {
        Err(PluginError::ToolNotFound { path }) => assert_eq!(path, "missing-zoxide"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn context_menu_is_static_and_ordered() {
    for router in [router_without_tool(), harness(Vec::new()).router] {
        let rows = router.handle_context_menu("/x/y");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Copy path");
        assert_eq!(rows[1].title, "Remove from zoxide");

        let copy = rows[0].action.as_ref().expect("copy row has an action");
        assert_eq!(copy.method, "Flow.Launcher.CopyToClipboard");
        assert_eq!(copy.parameters[0], Value::from("/x/y"));

        let remove = rows[1].action.as_ref().expect("remove row has an action");
        assert_eq!(remove.method, METHOD_DELETE_DIRECTORY);
        assert_eq!(remove.parameters, vec![Value::from("/x/y")]);
    }
}

#[test]
fn open_without_tool_still_opens_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_string_lossy().to_string();
    let opened = Rc::new(RefCell::new(Vec::new()));
    let opener = RecordingOpener {
        opened: Rc::clone(&opened),
        fail: false,
    };
    let router = QueryRouter::with_parts("missing-zoxide", None, Box::new(opener));

    match router.handle_open(&path) {
        Err(PluginError::ToolNotFound { path }) => assert_eq!(path, "missing-zoxide"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(*opened.borrow(), vec![dir.path().to_path_buf()]);
}
