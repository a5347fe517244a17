// ABOUTME: Integration tests for the jobtrail CLI binary.
// ABOUTME: Tests extraction from files, stdin and URLs, and the save/log/status store round trip.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const JOB_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Payroll Specialist - Careers</title></head>
<body>
  <h1>Payroll Specialist</h1>
  <div class="company-name">Dunder Mifflin</div>
  <div class="job-location">Scranton, PA</div>
  <p>Responsibilities include weekly payroll runs.</p>
</body>
</html>"#;

const JOB_URL: &str = "https://careers.dundermifflin.example/jobs/77";

fn jobtrail_cmd() -> Command {
    let mut cmd = Command::cargo_bin("jobtrail").unwrap();
    cmd.env_remove("JOBTRAIL_STORE");
    cmd
}

fn write_page(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("job.html");
    fs::write(&path, JOB_HTML).unwrap();
    path
}

fn submit(store: &Path, action: &str, page: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    jobtrail_cmd()
        .arg("--store")
        .arg(store)
        .arg(action)
        .arg(page)
        .arg("--url")
        .arg(JOB_URL)
        .args(extra)
        .assert()
}

#[test]
fn extract_from_file() {
    let dir = TempDir::new().unwrap();
    let page = write_page(&dir);

    let output = jobtrail_cmd()
        .arg("extract")
        .arg(&page)
        .arg("--url")
        .arg(JOB_URL)
        .arg("--compact")
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["title"], "Payroll Specialist");
    assert_eq!(record["company"], "Dunder Mifflin");
    assert_eq!(record["location"], "Scranton, PA");
    assert_eq!(record["url"], JOB_URL);
}

#[test]
fn extract_from_stdin() {
    jobtrail_cmd()
        .arg("extract")
        .arg("-")
        .arg("--url")
        .arg(JOB_URL)
        .write_stdin(JOB_HTML)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dateApplied\""))
        .stdout(predicate::str::contains("Payroll Specialist"));
}

#[test]
fn extract_from_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/jobs/77");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(JOB_HTML);
    });

    jobtrail_cmd()
        .arg("extract")
        .arg(server.url("/jobs/77"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Dunder Mifflin"));
    mock.assert();
}

#[test]
fn check_reports_job_page() {
    let dir = TempDir::new().unwrap();
    let page = write_page(&dir);

    jobtrail_cmd()
        .arg("check")
        .arg(&page)
        .arg("--url")
        .arg(JOB_URL)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isJobPage\": true"));
}

#[test]
fn missing_file_fails() {
    jobtrail_cmd()
        .arg("extract")
        .arg("/definitely/not/here.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn save_log_and_status() {
    let dir = TempDir::new().unwrap();
    let page = write_page(&dir);
    let store = dir.path().join("applications.json");

    submit(&store, "save", &page, &[])
        .success()
        .stdout(predicate::str::contains("Job saved for later!"));

    submit(&store, "save", &page, &[])
        .success()
        .stderr(predicate::str::contains("already saved"));

    submit(&store, "log", &page, &["--set", "salary=$48,000"])
        .success()
        .stdout(predicate::str::contains("Application logged successfully!"));

    submit(&store, "log", &page, &[])
        .success()
        .stderr(predicate::str::contains("already logged"));

    let stored: serde_json::Value = serde_json::from_slice(&fs::read(&store).unwrap()).unwrap();
    assert_eq!(stored["saved"].as_array().unwrap().len(), 0);
    assert_eq!(stored["logged"][0]["salary"], "$48,000");

    jobtrail_cmd()
        .arg("--store")
        .arg(&store)
        .arg("status")
        .arg(JOB_URL)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"inLogged\": true"));
}

#[test]
fn set_rejects_read_only_fields() {
    let dir = TempDir::new().unwrap();
    let page = write_page(&dir);
    let store = dir.path().join("applications.json");

    submit(&store, "log", &page, &["--set", "url=https://elsewhere.example"])
        .failure()
        .stderr(predicate::str::contains("read-only"));
    assert!(!store.exists());
}
