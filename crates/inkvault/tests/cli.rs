//! CLI integration tests.
//!
//! These tests exercise the inkvault binary end-to-end against a
//! temporary data directory, with the generative summarizer left
//! unconfigured so the local fallback is used.

use std::process::{Command, Output};
use tempfile::TempDir;

fn inkvault(data_dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inkvault"))
        .arg("--data-dir")
        .arg(data_dir.path())
        .args(args)
        .env_remove("INKVAULT_API_KEY")
        .env_remove("INKVAULT_OLLAMA_MODEL")
        .output()
        .expect("failed to execute inkvault")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Create a chapter and return its id.
fn create_chapter(data_dir: &TempDir, title: &str, content: &str) -> String {
    let output = inkvault(data_dir, &["new", title, "--content", content]);
    assert!(output.status.success(), "new failed: {output:?}");

    let line = stdout(&output);
    let id = line
        .split_whitespace()
        .nth(1)
        .expect("no id in output")
        .to_string();
    assert!(id.starts_with("cha_"), "unexpected id: {id}");
    id
}

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().expect("temp dir");
    let output = inkvault(&temp, &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("save"));
    assert!(text.contains("history"));
    assert!(text.contains("restore"));
    assert!(text.contains("diff"));
}

#[test]
fn new_show_roundtrip() {
    let temp = TempDir::new().expect("temp dir");
    let id = create_chapter(&temp, "Chapter One", "It was a dark night.");

    let output = inkvault(&temp, &["show", &id]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Chapter One"));
    assert!(text.contains("It was a dark night."));
}

#[test]
fn small_save_records_no_version() {
    let temp = TempDir::new().expect("temp dir");
    let id = create_chapter(&temp, "One", "start");

    let output = inkvault(&temp, &["save", &id, "--content", "start plus a bit"]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("snapshot"));

    let history = inkvault(&temp, &["history", &id]);
    assert!(history.status.success());
    assert!(stdout(&history).trim().is_empty());
}

#[test]
fn forced_save_snapshots_and_shows_in_history() {
    let temp = TempDir::new().expect("temp dir");
    let id = create_chapter(&temp, "One", "start");

    let output = inkvault(&temp, &["save", &id, "--content", "rewritten", "--force"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("snapshot ver_"));

    let history = inkvault(&temp, &["history", &id]);
    assert!(stdout(&history).contains("ver_"));
}

#[test]
fn restore_returns_old_content() {
    let temp = TempDir::new().expect("temp dir");
    let id = create_chapter(&temp, "One", "original text");

    let snap = inkvault(&temp, &["snapshot", &id]);
    assert!(snap.status.success());
    let version_id = stdout(&snap)
        .split_whitespace()
        .nth(1)
        .expect("no version id")
        .to_string();

    let save = inkvault(&temp, &["save", &id, "--content", "completely different"]);
    assert!(save.status.success());

    let restore = inkvault(&temp, &["restore", &id, &version_id]);
    assert!(restore.status.success());

    let show = inkvault(&temp, &["show", &id]);
    assert!(stdout(&show).contains("original text"));
}

#[test]
fn diff_prints_ops_and_local_summary() {
    let temp = TempDir::new().expect("temp dir");
    let id = create_chapter(&temp, "One", "line1\nline2");

    inkvault(&temp, &["snapshot", &id]);
    let save = inkvault(
        &temp,
        &[
            "save",
            &id,
            "--content",
            "line1\nlineTWO\nline2",
            "--force",
        ],
    );
    let version_id = stdout(&save)
        .split("snapshot ")
        .nth(1)
        .expect("no snapshot id")
        .trim()
        .trim_end_matches(')')
        .to_string();

    let diff = inkvault(&temp, &["diff", &version_id]);
    assert!(diff.status.success());
    let text = stdout(&diff);
    assert!(text.contains("+lineTWO"));
    assert!(text.contains(" line1"));
    assert!(text.contains("tags: local"));
    assert!(text.contains("+8 chars"));
}

#[test]
fn delete_cascades() {
    let temp = TempDir::new().expect("temp dir");
    let id = create_chapter(&temp, "One", "text");
    inkvault(&temp, &["snapshot", &id]);

    let delete = inkvault(&temp, &["delete", &id]);
    assert!(delete.status.success());

    let show = inkvault(&temp, &["show", &id]);
    assert!(!show.status.success());
}

#[test]
fn unknown_chapter_fails() {
    let temp = TempDir::new().expect("temp dir");
    let output = inkvault(&temp, &["show", "cha_missing"]);
    assert!(!output.status.success());
}
