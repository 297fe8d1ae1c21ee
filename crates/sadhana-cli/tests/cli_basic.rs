//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway config path and verify
//! outputs.

use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

/// Run a CLI command against `config` and return (code, stdout, stderr).
fn run_cli(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_sadhana-cli"))
        .arg("--config")
        .arg(config)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

/// Start `timer run` with piped stdin and stdout so the test can type
/// commands while the sitting is in progress.
fn spawn_timer(config: &Path, args: &[&str]) -> Child {
    Command::new(env!("CARGO_BIN_EXE_sadhana-cli"))
        .arg("--config")
        .arg(config)
        .args(["timer", "run"])
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn CLI")
}

/// Wait for the child to exit, failing the test instead of hanging.
fn wait_for_exit(child: &mut Child, limit: Duration) -> i32 {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status.code().unwrap_or(-1);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            panic!("timer did not exit within {limit:?}");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}

fn parse_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn event_types(lines: &[serde_json::Value]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect()
}

fn config_in(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("config.toml")
}

#[test]
fn test_mala_full_round() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["mala", "count", "--taps", "108"]);
    assert_eq!(code, 0, "Mala count failed");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["state"]["count"], 0);
    assert_eq!(report["state"]["totalCount"], 108);
    assert_eq!(report["state"]["roundsCompleted"], 1);
    assert_eq!(report["currentRound"], 2);
}

#[test]
fn test_mala_custom_target() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &["mala", "count", "--taps", "10", "--target", "4"],
    );
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["state"]["count"], 2);
    assert_eq!(report["state"]["roundsCompleted"], 2);
    assert_eq!(report["progressPct"], 50.0);
}

#[test]
fn test_timer_run_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        &config_in(&dir),
        &["timer", "run", "--seconds", "3", "--interval-ms", "5"],
    );
    assert_eq!(code, 0, "Timer run failed: {stderr}");

    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let types: Vec<_> = lines[..lines.len() - 1]
        .iter()
        .map(|v| v["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        types,
        ["timer_started", "timer_ticked", "timer_ticked", "timer_completed"]
    );

    let last = lines.last().unwrap();
    assert_eq!(last["phase"], "completed");
    assert_eq!(last["remainingSeconds"], 0);
}

#[test]
fn test_timer_format_and_presets() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["timer", "format", "905"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "15:05");

    let (code, stdout, _) = run_cli(&config_in(&dir), &["timer", "presets"]);
    assert_eq!(code, 0);
    let presets: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(presets.as_array().unwrap().len(), 7);
    assert_eq!(presets[0]["clock"], "05:00");
}

#[test]
fn test_calendar_month() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &["calendar", "month", "--year", "2024", "--month", "11"],
    );
    assert_eq!(code, 0);
    let grid: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(grid["title"], "November 2024");
    assert_eq!(grid["weeks"].as_array().unwrap().len(), 6);
    assert_eq!(grid["weeks"][0][0]["date"], "2024-10-27");
    assert_eq!(grid["weeks"][0][0]["inMonth"], false);
}

#[test]
fn test_calendar_month_rejects_bad_month() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        &config_in(&dir),
        &["calendar", "month", "--year", "2024", "--month", "13"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid month"));
}

#[test]
fn test_calendar_upcoming() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("observances.json");
    std::fs::write(
        &file,
        r#"[
            {"date": "2024-12-11", "name": "Gita Jayanti", "kind": "festival"},
            {"date": "2024-11-15", "name": "Kartik Purnima", "kind": "purnima"},
            {"date": "2024-11-12", "name": "Diwali", "kind": "festival"}
        ]"#,
    )
    .unwrap();

    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &[
            "calendar",
            "upcoming",
            "--file",
            file.to_str().unwrap(),
            "--today",
            "2024-11-13",
        ],
    );
    assert_eq!(code, 0);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "Kartik Purnima");
    assert_eq!(list[0]["daysUntil"], 2);
}

#[test]
fn test_config_set_get_reset() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let (code, stdout, _) = run_cli(&config, &["config", "get", "mala.target"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "108");
    assert!(!config.exists(), "get must not write the config file");

    let (code, _, _) = run_cli(&config, &["config", "set", "mala.target", "27"]);
    assert_eq!(code, 0, "Config set failed");
    let (_, stdout, _) = run_cli(&config, &["config", "get", "mala.target"]);
    assert_eq!(stdout.trim(), "27");

    let (code, stdout, _) = run_cli(&config, &["mala", "count", "--taps", "27"]);
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["state"]["roundsCompleted"], 1);

    let (code, _, _) = run_cli(&config, &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(&config, &["config", "get", "mala.target"]);
    assert_eq!(stdout.trim(), "108");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(&config_in(&dir), &["config", "set", "ui.theme", "dark"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&config_in(&dir), &["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let cfg: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(cfg["meditation"]["duration_min"], 15);
}

#[test]
fn test_timer_exits_after_completion_with_stdin_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = spawn_timer(&config_in(&dir), &["--seconds", "2", "--interval-ms", "5"]);
    // Hold the write end open for the whole sitting.
    let _stdin = child.stdin.take().unwrap();

    let code = wait_for_exit(&mut child, Duration::from_secs(10));
    assert_eq!(code, 0);

    let mut stdout = String::new();
    child.stdout.take().unwrap().read_to_string(&mut stdout).unwrap();
    let lines = parse_lines(&stdout);
    assert_eq!(
        event_types(&lines),
        ["timer_started", "timer_ticked", "timer_completed"]
    );
    assert_eq!(lines.last().unwrap()["phase"], "completed");
}

#[test]
fn test_timer_pause_then_eof_stops() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = spawn_timer(&config_in(&dir), &["--seconds", "100", "--interval-ms", "50"]);
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(b"pause\n").unwrap();
        // Dropping the handle closes stdin.
    }

    let code = wait_for_exit(&mut child, Duration::from_secs(10));
    assert_eq!(code, 0);

    let mut stdout = String::new();
    child.stdout.take().unwrap().read_to_string(&mut stdout).unwrap();
    let lines = parse_lines(&stdout);
    let types = event_types(&lines);
    let paused = types.iter().position(|t| t == "timer_paused").unwrap();
    assert_eq!(types[paused + 1], "timer_reset");
    assert_eq!(lines.last().unwrap()["phase"], "idle");
    assert_eq!(lines.last().unwrap()["remainingSeconds"], 100);
}

#[test]
fn test_timer_pause_resume_completes_with_same_ticks() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = spawn_timer(&config_in(&dir), &["--seconds", "4", "--interval-ms", "50"]);
    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = BufReader::new(child.stdout.take().unwrap());

    // A typed tick is ignored; only the loop delivers ticks.
    stdin.write_all(b"tick\npause\n").unwrap();
    stdin.flush().unwrap();

    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        assert!(stdout.read_line(&mut line).unwrap() > 0, "stdout closed before pause");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let paused = value["type"] == "timer_paused";
        lines.push(value);
        if paused {
            break;
        }
    }

    stdin.write_all(b"resume\n").unwrap();
    stdin.flush().unwrap();

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).unwrap();
    lines.extend(parse_lines(&rest));
    assert_eq!(wait_for_exit(&mut child, Duration::from_secs(10)), 0);

    let types = event_types(&lines);
    assert_eq!(types.iter().filter(|t| *t == "timer_ticked").count(), 3);
    assert!(types.contains(&"timer_resumed".to_string()));
    assert_eq!(types.last().unwrap(), "timer_completed");
    assert_eq!(lines.last().unwrap()["phase"], "completed");
    assert_eq!(lines.last().unwrap()["remainingSeconds"], 0);
}

#[test]
fn test_timer_stop_from_stdin_returns_to_idle() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = spawn_timer(&config_in(&dir), &["--seconds", "100", "--interval-ms", "50"]);
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"stop\n").unwrap();
    stdin.flush().unwrap();

    // stdin stays open; stopping alone must end the process.
    let code = wait_for_exit(&mut child, Duration::from_secs(10));
    assert_eq!(code, 0);
    drop(stdin);

    let mut stdout = String::new();
    child.stdout.take().unwrap().read_to_string(&mut stdout).unwrap();
    let lines = parse_lines(&stdout);
    assert_eq!(event_types(&lines).last().unwrap(), "timer_reset");
    assert_eq!(lines.last().unwrap()["phase"], "idle");
    assert_eq!(lines.last().unwrap()["remainingSeconds"], 100);
}

const MANTRAS: &str = r#"[
  {"id": 1, "name": "Om Namah Shivaya", "translation": "I bow to Shiva", "category": "shiva"},
  {"id": 2, "name": "Hare Krishna", "translation": "Maha mantra", "category": "krishna"},
  {"id": 3, "name": "Mahamrityunjaya", "translation": "Victory over death", "category": "shiva"}
]"#;

#[test]
fn test_library_search_filters_by_category() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("mantras.json");
    std::fs::write(&file, MANTRAS).unwrap();
    let file = file.to_str().unwrap();

    let (code, stdout, stderr) = run_cli(
        &config_in(&dir),
        &["library", "search", "--file", file, "--category", "shiva", "--favorites", "3"],
    );
    assert_eq!(code, 0, "Library search failed: {stderr}");
    let found: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["favorite"], false);
    assert_eq!(found[1]["favorite"], true);

    let (_, stdout, _) = run_cli(
        &config_in(&dir),
        &["library", "search", "--file", file, "--query", "KRISHNA"],
    );
    let found: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], 2);

    let (code, _, stderr) = run_cli(
        &config_in(&dir),
        &["library", "search", "--file", file, "--category", "vishnu"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("vishnu"));
}

#[test]
fn test_library_categories() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("mantras.json");
    std::fs::write(&file, MANTRAS).unwrap();

    let (code, stdout, _) = run_cli(
        &config_in(&dir),
        &["library", "categories", "--file", file.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    let counts: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();
    assert_eq!(counts[0]["category"], "all");
    assert_eq!(counts[0]["count"], 3);
    assert_eq!(counts[1]["category"], "shiva");
    assert_eq!(counts[1]["count"], 2);
}

#[test]
fn test_config_sound_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let (code, stdout, _) = run_cli(&config, &["config", "get", "meditation.sound"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "silence");

    let (code, _, _) = run_cli(&config, &["config", "set", "meditation.sound", "bell"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(&config, &["config", "set", "meditation.muted", "true"]);
    assert_eq!(code, 0);
    let (code, _, _) = run_cli(&config, &["config", "set", "meditation.sound", "thunder"]);
    assert_ne!(code, 0);

    let (_, stdout, _) = run_cli(&config, &["config", "list"]);
    let cfg: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(cfg["meditation"]["sound"], "bell");
    assert_eq!(cfg["meditation"]["muted"], true);
    assert_eq!(cfg["meditation"]["volume"], 50);

    let (_, stdout, _) = run_cli(&config, &["mala", "count", "--taps", "1"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["mantra"], "Om Namah Shivaya");
}
