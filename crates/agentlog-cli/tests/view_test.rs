mod common;
use common::{CLAUDE_SAMPLE_ID, CODEX_SAMPLE_ID, TestFixture};
use predicates::prelude::*;

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

#[test]
fn test_raw_file_is_byte_identical() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_session.jsonl", "2025/10/01/rollout.jsonl");

    let output = fixture
        .command()
        .args(["view", "--raw-file"])
        .arg(&path)
        .output()
        .expect("Failed to run view");

    assert!(output.status.success());
    assert_eq!(output.stdout, std::fs::read(&path).unwrap());
}

#[test]
fn test_raw_format_all_levels_reproduces_records() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_session.jsonl", "2025/10/01/rollout.jsonl");

    let output = fixture
        .command()
        .args(["view", "--format", "raw", "--level", "all"])
        .arg(&path)
        .output()
        .expect("Failed to run view");
    assert!(output.status.success());

    let content = std::fs::read_to_string(&path).unwrap();
    let expected: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
    let stdout = stdout_of(&output);
    let actual: Vec<&str> = stdout.lines().collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_conversation_level_is_narrower_than_all() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_session.jsonl", "2025/10/01/rollout.jsonl");

    let run = |level: &str| {
        let output = fixture
            .command()
            .args(["view", "--format", "raw", "--level", level])
            .arg(&path)
            .output()
            .expect("Failed to run view");
        assert!(output.status.success());
        stdout_of(&output)
    };

    let conversation = run("conversation");
    let all = run("all");

    assert_eq!(conversation.lines().count(), 3);
    assert!(conversation.lines().count() < all.lines().count());
    for kind in ["session_meta", "event_msg", "turn_context", "function_call"] {
        assert!(!conversation.contains(kind), "{} leaked into conversation", kind);
    }
}

#[test]
fn test_text_view_by_session_id() {
    let fixture = TestFixture::new();
    fixture.add_codex_session("codex_session.jsonl", "2025/10/01/rollout.jsonl");

    fixture
        .command()
        .args(["view", CODEX_SAMPLE_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[#002] user | 2025-10-01T12:00:05Z\n\
             ----------------------------------\n\
             | Add a --limit flag to the list command\n",
        ))
        .stdout(predicate::str::contains("[#003] assistant | 2025-10-01T12:00:20Z"));
}

#[test]
fn test_max_events_keeps_most_recent() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_session.jsonl", "2025/10/01/rollout.jsonl");

    let output = fixture
        .command()
        .args(["view", "--level", "all", "--max-events", "2"])
        .arg(&path)
        .output()
        .expect("Failed to run view");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let headers: Vec<&str> = stdout.lines().filter(|l| l.starts_with("[#")).collect();
    assert_eq!(
        headers,
        vec![
            "[#001] event | 2025-10-01T12:00:21Z",
            "[#002] event | 2025-10-01T12:01:00Z",
        ]
    );
}

#[test]
fn test_huge_max_events_keeps_everything() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_session.jsonl", "2025/10/01/rollout.jsonl");

    let output = fixture
        .command()
        .args(["view", "--format", "raw", "--level", "all", "--max-events", "100000000000"])
        .arg(&path)
        .output()
        .expect("Failed to run view");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).lines().count(), 10);
}

#[test]
fn test_codex_messages_render_without_block_labels() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_session.jsonl", "2025/10/01/rollout.jsonl");

    for format in ["text", "chat"] {
        let output = fixture
            .command()
            .args(["view", "--format", format, "--wrap", "100"])
            .arg(&path)
            .output()
            .expect("Failed to run view");
        assert!(output.status.success());

        let stdout = stdout_of(&output);
        assert!(stdout.contains("Add a --limit flag to the list command"));
        assert!(!stdout.contains("[input_text]"), "{}", stdout);
        assert!(!stdout.contains("[output_text]"), "{}", stdout);
    }
}

#[test]
fn test_chat_view_when_piped() {
    let fixture = TestFixture::new();
    let path = fixture.add_claude_session("claude_session.jsonl", "-work-uploader", "chat.jsonl");

    let output = fixture
        .command()
        .args(["view", "--format", "chat", "--wrap", "60"])
        .arg(&path)
        .output()
        .expect("Failed to run view");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let tops: Vec<&str> = stdout.lines().filter(|l| l.contains('╭')).collect();
    assert_eq!(tops.len(), 3);
    assert!(tops[0].find('╭').unwrap() > 2);
    assert!(tops[1].starts_with("  ╭"));
    assert!(stdout.contains("add a retry to the uploader"));
}

#[test]
fn test_claude_session_found_by_id() {
    let fixture = TestFixture::new();
    fixture.add_claude_session("claude_session.jsonl", "-work-uploader", "chat.jsonl");

    fixture
        .command()
        .args(["view", "--agent", "claude", CLAUDE_SAMPLE_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains("| add a retry to the uploader"));
}

#[test]
fn test_invalid_level_is_rejected_before_reading() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["view", "--level", "invalid", "/nonexistent/session.jsonl"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid level"));
}

#[test]
fn test_unsupported_format_is_rejected() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_session.jsonl", "rollout.jsonl");

    fixture
        .command()
        .args(["view", "--format", "html"])
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported format: html"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_metadata_exits_with_distinct_code() {
    let fixture = TestFixture::new();
    let path = fixture.write_file(
        "no_meta.jsonl",
        br#"{"timestamp":"2025-10-01T12:00:01Z","type":"response_item","payload":{"type":"message","role":"user","content":"hi"}}
"#,
    );

    fixture
        .command()
        .args(["view", "--agent", "codex"])
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no session metadata"));
}

#[test]
fn test_corrupt_line_reports_location() {
    let fixture = TestFixture::new();
    let path = fixture.add_codex_session("codex_malformed.jsonl", "broken.jsonl");

    fixture
        .command()
        .args(["view", "--level", "all"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.jsonl:3"));
}

#[test]
fn test_unknown_session_id() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["view", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
