/// End-to-end tests for the CLI binary. Every case here fails before
/// any network call, so the suite runs offline.
use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("sbom-triage").unwrap()
}

#[test]
fn test_help_describes_the_tool() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Analyze a CycloneDX SBOM and rank its vulnerabilities",
        ))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sbom-triage"));
}

#[test]
fn test_missing_arguments_exit_code() {
    cmd().assert().failure().code(2);
}

#[test]
fn test_missing_sbom_file() {
    cmd()
        .args(["/nonexistent/bom.json", "--no-sync"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Failed to read SBOM file"));
}

#[test]
fn test_sbom_that_is_not_json() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bom.json");
    std::fs::write(&path, "this is not json").unwrap();

    cmd()
        .args([path.to_str().unwrap(), "--no-sync"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_sbom_without_components_is_invalid() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bom.json");
    std::fs::write(&path, r#"{"bomFormat": "CycloneDX", "components": []}"#).unwrap();

    cmd()
        .args([path.to_str().unwrap(), "--no-sync"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("invalid SBOM"));
}

#[test]
fn test_unreadable_config_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let sbom_path = dir.path().join("bom.json");
    std::fs::write(&sbom_path, r#"{"components": [{"name": "a"}]}"#).unwrap();

    cmd()
        .args([
            sbom_path.to_str().unwrap(),
            "--no-sync",
            "--config",
            "/nonexistent/config.yml",
        ])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}
