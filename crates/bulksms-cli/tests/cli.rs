use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

const CONTACTS_CSV: &str = "Name,Phone Number\n\
Jane,0712 345 678\n\
John,+256772000111\n\
Broken,12\n\
Jane Again,712345678\n";

fn run_raw(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("bulksms")
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(home: &Path, args: &[&str]) -> String {
    let output = run_raw(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_raw(home, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

fn write_contacts(dir: &Path) -> PathBuf {
    let path = dir.join("contacts.csv");
    fs::write(&path, CONTACTS_CSV).expect("write csv");
    path
}

#[cfg(unix)]
fn write_config(dir: &Path, contents: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("bulksms.toml");
    fs::write(&path, contents).expect("write config");
    let mut perms = fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o600);
    fs::set_permissions(&path, perms).expect("chmod");
    path
}

#[test]
fn normalize_prints_canonical_numbers() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd(temp.path(), &["normalize", "0712 345 678", "+1 (415) 555-0100"]);
    assert!(out.contains("0712 345 678 -> +256712345678"));
    assert!(out.contains("-> +14155550100"));

    let json = run_cmd_json(temp.path(), &["normalize", "--country", "254", "254712345678"]);
    assert_eq!(json[0]["phone"], "+254712345678");
}

#[test]
fn normalize_rejects_invalid_numbers() {
    let temp = TempDir::new().expect("temp dir");
    let output = run_raw(temp.path(), &["normalize", "0712345678", "abc"]);
    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("+256712345678"));
}

#[test]
fn import_merges_and_writes_report() {
    let temp = TempDir::new().expect("temp dir");
    let csv = write_contacts(temp.path());
    let reports = temp.path().join("reports");
    fs::create_dir(&reports).expect("reports dir");

    let json = run_cmd_json(
        temp.path(),
        &[
            "import",
            csv.to_str().expect("csv path"),
            "--report",
            reports.to_str().expect("reports path"),
        ],
    );

    let contacts = json["contacts"].as_array().expect("contacts");
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["phone"], "+256712345678");
    assert_eq!(contacts[0]["original_phone"], "0712 345 678");
    assert_eq!(contacts[0]["status"], "pending");
    assert_eq!(contacts[1]["phone"], "+256772000111");
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["duplicates"], 1);
    assert_eq!(json["summary"]["ready"], 2);
    assert_eq!(json["country"], "+256");
    assert_eq!(json["country_name"], "Uganda");

    let report_path = json["report"].as_str().expect("report path");
    assert!(report_path.contains("sms-report-"));
    let report = fs::read_to_string(report_path).expect("read report");
    assert!(report.starts_with("Name,Phone,Original Phone,Status,Error\r\n"));
    assert!(report.contains("Jane,+256712345678,0712 345 678,pending,"));
}

#[test]
fn import_missing_file_is_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.csv");
    let output = run_raw(temp.path(), &["import", missing.to_str().expect("path")]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn import_rejects_file_without_valid_contacts() {
    let temp = TempDir::new().expect("temp dir");
    let good = write_contacts(temp.path());
    let bad = temp.path().join("bad.csv");
    fs::write(&bad, "Name,Phone\nA,12\nB,n/a\n").expect("write bad csv");

    let output = run_raw(
        temp.path(),
        &[
            "import",
            good.to_str().expect("good path"),
            bad.to_str().expect("bad path"),
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(
        stderr.contains("no valid contacts found in") && stderr.contains("bad.csv"),
        "stderr: {stderr}"
    );
}

#[test]
fn import_unsupported_extension_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.docx");
    fs::write(&path, "not a contact list").expect("write");
    let output = run_raw(temp.path(), &["import", path.to_str().expect("path")]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn compose_reports_pages_and_cost() {
    let temp = TempDir::new().expect("temp dir");
    let message = "x".repeat(161);
    let json = run_cmd_json(
        temp.path(),
        &["compose", "--message", &message, "--recipients", "3"],
    );
    assert_eq!(json["characters"], 161);
    assert_eq!(json["pages"], 2);
    assert_eq!(json["recipients"], 3);
    let cost = json["estimated_cost"].as_f64().expect("cost");
    assert!((cost - 0.3).abs() < 1e-9);

    let out = run_cmd(temp.path(), &["compose", "-m", "hello"]);
    assert!(out.contains("pages: 1"));
    assert!(out.contains("estimated cost: 0.05"));
}

#[test]
fn countries_marks_default() {
    let temp = TempDir::new().expect("temp dir");
    let json = run_cmd_json(temp.path(), &["countries"]);
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 7);
    let uganda = rows
        .iter()
        .find(|row| row["code"] == "+256")
        .expect("uganda");
    assert_eq!(uganda["name"], "Uganda");
    assert_eq!(uganda["default"], true);
}

#[test]
fn send_without_api_key_is_rejected_before_network() {
    let temp = TempDir::new().expect("temp dir");
    let csv = write_contacts(temp.path());
    let output = run_raw(
        temp.path(),
        &[
            "send",
            csv.to_str().expect("csv path"),
            "--message",
            "Hello",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("api_key"), "stderr: {stderr}");
}

#[test]
fn send_with_empty_message_is_rejected() {
    let temp = TempDir::new().expect("temp dir");
    let csv = write_contacts(temp.path());
    let output = run_raw(
        temp.path(),
        &["send", csv.to_str().expect("csv path"), "--message", "   "],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[cfg(unix)]
#[test]
fn send_to_unreachable_gateway_fails_every_contact() {
    let temp = TempDir::new().expect("temp dir");
    let csv = write_contacts(temp.path());

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let endpoint = format!("http://{}/messaging", listener.local_addr().expect("addr"));
    drop(listener);

    let config = write_config(
        temp.path(),
        &format!(
            "[gateway]\nmode = \"live\"\nusername = \"acme\"\napi_key = \"secret\"\nsender_id = \"ACME\"\nendpoint = \"{endpoint}\"\ntimeout_secs = 5\n"
        ),
    );
    let report = temp.path().join("delivery.csv");

    let json = run_cmd_json(
        temp.path(),
        &[
            "--config",
            config.to_str().expect("config path"),
            "send",
            csv.to_str().expect("csv path"),
            "--message",
            "Hello",
            "--report",
            report.to_str().expect("report path"),
        ],
    );

    assert_eq!(json["sandbox"], false);
    assert!(json["transport_error"].is_string());
    assert_eq!(json["status"]["failed"], 2);
    for contact in json["contacts"].as_array().expect("contacts") {
        assert_eq!(contact["status"], "failed");
        assert_eq!(contact["error"], json["transport_error"]);
    }

    let written = fs::read_to_string(&report).expect("report");
    assert_eq!(written.lines().count(), 3);
    assert!(written.contains(",failed,"));
}

#[test]
fn completions_emit_script() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd(temp.path(), &["completions", "bash"]);
    assert!(out.contains("bulksms"));
}

#[test]
fn completions_do_not_load_config() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.toml");
    let out = run_cmd(
        temp.path(),
        &[
            "--config",
            missing.to_str().expect("config path"),
            "completions",
            "zsh",
        ],
    );
    assert!(out.contains("bulksms"));
}
