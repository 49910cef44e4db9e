//! Runs the `kgassist` binary against temporary projects.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn kgassist(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kgassist"))
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run kgassist")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// A project with the given document folders and a config pointing the
/// query tool at a shell script with `tool_body`.
fn project(docs: &[&str], tool_body: &str) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    for doc in docs {
        fs::create_dir_all(tmp.path().join("project").join(doc)).unwrap();
    }

    let tool = tmp.path().join("fake-graphrag");
    fs::write(&tool, format!("#!/bin/sh\n{tool_body}\n")).unwrap();
    let mut perms = fs::metadata(&tool).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&tool, perms).unwrap();

    let config = tmp.path().join("kgassist.toml");
    fs::write(
        &config,
        format!("[tool]\nprogram = \"{}\"\n", tool.display()),
    )
    .unwrap();
    (tmp, config)
}

#[test]
fn docs_lists_available_indexes_in_order() {
    let (tmp, _) = project(&["all_docs", "doc_power_schedule", "scratch"], "exit 0");
    let out = kgassist(tmp.path(), &["docs"]);
    assert!(out.status.success());

    let text = stdout(&out);
    let power = text.find("doc_power_schedule").unwrap();
    let all = text.find("all_docs").unwrap();
    assert!(power < all);
    assert!(!text.contains("scratch"));
    assert!(text.contains("not found: doc_invoice"));
}

#[test]
fn ask_prints_the_tool_answer() {
    let (tmp, config) = project(&["doc_invoice"], r#"echo "method=$5 question=$7""#);
    let out = kgassist(
        tmp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "ask",
            "Explain how peak energy affects billing amount.",
            "--method",
            "local",
        ],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    assert!(text.contains("Answer"));
    assert!(text.contains("method=local question=Explain how peak energy affects billing amount."));
}

#[test]
fn ask_failure_shows_stderr_and_exit_code() {
    let (tmp, _) = project(&["doc_invoice"], "echo 'settings.yaml missing' >&2\nexit 4");
    let out = kgassist(tmp.path(), &["ask", "anything", "--doc", "doc_invoice"]);
    assert_eq!(out.status.code(), Some(4));
    let text = stdout(&out);
    assert!(text.contains("Error occurred"));
    assert!(text.contains("settings.yaml missing"));
}

#[test]
fn ask_rejects_unknown_documents_and_blank_questions() {
    let (tmp, _) = project(&["doc_invoice"], "exit 0");

    let out = kgassist(tmp.path(), &["ask", "q", "--doc", "doc_rsopl_schedule"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown document"));

    let out = kgassist(tmp.path(), &["ask", "   "]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("please enter a question"));
}

#[test]
fn missing_project_root_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let out = kgassist(tmp.path(), &["--root", "nowhere", "docs"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("project folder not found"));
}

#[test]
fn graph_reports_missing_and_present_images() {
    let (tmp, _) = project(&["doc_invoice", "all_docs"], "exit 0");

    let out = kgassist(tmp.path(), &["graph", "--doc", "all_docs"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Knowledge graph image not found."));

    let image = tmp.path().join("project/output/knowledge_graph_FINAL.png");
    fs::create_dir_all(image.parent().unwrap()).unwrap();
    fs::write(&image, b"png").unwrap();
    let out = kgassist(tmp.path(), &["graph", "--doc", "all_docs"]);
    assert!(stdout(&out).contains("knowledge_graph_FINAL.png"));
}

#[test]
fn visualize_writes_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("entities.csv"), "title,type\nA,org\nB,event\n").unwrap();
    fs::write(output.join("relationships.csv"), "source,target\nA,B\n").unwrap();

    let out = kgassist(tmp.path(), &["visualize"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Density:             1.0000"));
    assert!(output.join("knowledge_graph_FINAL.svg").is_file());
    assert!(output.join("top_entities.csv").is_file());
}

#[test]
fn visualize_skips_type_block_without_type_column() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("entities.csv"), "title\nA\nB\n").unwrap();
    fs::write(output.join("relationships.csv"), "source,target\nA,B\n").unwrap();

    let out = kgassist(tmp.path(), &["visualize"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    assert!(!text.contains("Entity Types"));
    assert!(text.contains("Network Statistics"));
}

#[test]
fn visualize_lists_files_when_entities_are_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("entities.parquet"), b"PAR1").unwrap();

    let out = kgassist(tmp.path(), &["visualize"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("- entities.parquet"));
}
