//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Runs the binary with recording and replay switched off unless the
/// test opts in through `envs`.
fn run_techtasks(args: &[&str], envs: &[(&str, &Path)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_techtasks"));
    cmd.args(args)
        .env_remove("TECHTASKS_RECORD")
        .env_remove("TECHTASKS_REPLAY_LLM")
        .env_remove("ANTHROPIC_API_KEY")
        .env("TECHTASKS_LOG", "warn");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run techtasks binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn fresh_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn generate_into(out_dir: &Path) -> Output {
    let plan = fixture("coffee_app_plan.yaml");
    let cassette = fixture("coffee_app_llm.cassette.yaml");
    run_techtasks(
        &[
            "generate",
            "--plan",
            plan.to_str().unwrap(),
            "--out-dir",
            out_dir.to_str().unwrap(),
            "--stem",
            "coffee",
        ],
        &[("TECHTASKS_REPLAY_LLM", cassette.as_path())],
    )
}

#[test]
fn help_lists_subcommands() {
    let output = run_techtasks(&["--help"], &[]);
    let text = stdout(&output);
    assert!(output.status.success());
    for sub in ["generate", "prompt", "render", "check"] {
        assert!(text.contains(sub), "help should mention {sub}");
    }
}

#[test]
fn prompt_prints_both_prompts() {
    let plan = fixture("coffee_app_plan.yaml");
    let wbs = fixture("coffee_app_wbs.yaml");
    let args = ["prompt", "--plan", plan.to_str().unwrap(), "--wbs", wbs.to_str().unwrap()];
    let output = run_techtasks(&args, &[]);
    let text = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(text.contains("=== System prompt ==="));
    assert!(text.contains("**Project Name:** Coffee App"));
    assert!(text.contains("- Time-bound: Launch within 12 weeks"));
    assert!(text.contains("- Foundation: Menu and order model"));
}

#[test]
fn generate_writes_three_artifacts_from_a_replayed_completion() {
    let out = fresh_dir("techtasks_cli_generate");
    let output = generate_into(&out);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Generated 5 tasks for Coffee App"));

    let json = std::fs::read_to_string(out.join("coffee.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["project_name"], "Coffee App");
    assert_eq!(value["tasks"].as_array().unwrap().len(), 5);
    assert_eq!(value["tasks"][3]["estimated_effort"], "X-Large");

    let audit = std::fs::read_to_string(out.join("coffee.raw.json")).unwrap();
    let audit: serde_json::Value = serde_json::from_str(&audit).unwrap();
    assert_eq!(audit["metadata"]["task_count"], 5);
    assert!(audit["raw_response"].as_str().unwrap().contains("task-005"));

    let md = std::fs::read_to_string(out.join("coffee.md")).unwrap();
    assert!(md.starts_with("# Technical Task List: Coffee App"));
    assert_eq!(md.matches("\n## Task ").count(), 5);

    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn generate_without_api_key_reports_upstream_failure() {
    let out = fresh_dir("techtasks_cli_no_key");
    let plan = fixture("coffee_app_plan.yaml");
    let output = run_techtasks(
        &["generate", "--plan", plan.to_str().unwrap(), "--out-dir", out.to_str().unwrap()],
        &[],
    );

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Generation failed (upstream)"), "stderr: {err}");
    assert!(err.contains("ANTHROPIC_API_KEY"));
    assert!(!out.join("technical_tasks.json").exists());

    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn render_and_check_read_a_generated_list() {
    let out = fresh_dir("techtasks_cli_render_check");
    assert!(generate_into(&out).status.success());
    let json = out.join("coffee.json");

    let output = run_techtasks(&["check", "--input", json.to_str().unwrap()], &[]);
    let text = stdout(&output);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(text.contains("OK: 5 tasks for Coffee App"));
    assert!(text.contains("Build order: task-001 -> task-002 -> task-003 -> task-004 -> task-005"));

    let md_path = out.join("rendered.md");
    let output = run_techtasks(
        &["render", "--input", json.to_str().unwrap(), "--output", md_path.to_str().unwrap()],
        &[],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let rendered = std::fs::read_to_string(&md_path).unwrap();
    assert_eq!(rendered, std::fs::read_to_string(out.join("coffee.md")).unwrap());

    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn check_rejects_a_list_with_a_dangling_dependency() {
    let out = fresh_dir("techtasks_cli_check_invalid");
    let path = out.join("broken.json");
    std::fs::write(
        &path,
        r#"{"project_name": "Coffee App", "project_description": "", "tasks": [
            {"id": "task-001", "title": "Model orders", "description": "",
             "acceptance_criteria": ["done"], "dependencies": ["task-009"],
             "estimated_effort": "Small", "priority": "High"}
        ]}"#,
    )
    .unwrap();

    let output = run_techtasks(&["check", "--input", path.to_str().unwrap()], &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("depends on unknown task `task-009`"));

    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn record_writes_cassettes_for_every_port() {
    let out = fresh_dir("techtasks_cli_record");
    let cassettes = out.join("cassettes");
    let plan = fixture("coffee_app_plan.yaml");
    let replay = fixture("coffee_app_llm.cassette.yaml");

    let output = run_techtasks(
        &["generate", "--plan", plan.to_str().unwrap(), "--out-dir", out.to_str().unwrap()],
        &[("TECHTASKS_REPLAY_LLM", replay.as_path()), ("TECHTASKS_RECORD", cassettes.as_path())],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Recording saved to:"));

    let session = std::fs::read_dir(&cassettes).unwrap().next().unwrap().unwrap().path();
    for port in ["llm", "fs", "clock", "id_gen"] {
        assert!(session.join(format!("{port}.cassette.yaml")).exists(), "missing {port} cassette");
    }

    let _ = std::fs::remove_dir_all(&out);
}
