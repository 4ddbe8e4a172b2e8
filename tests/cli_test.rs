use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn tmplgen() -> Command {
    Command::cargo_bin("tmplgen").unwrap()
}

fn write_template(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_invalid_config_path_is_rejected() {
    let root = tempdir().unwrap();
    let missing = root.path().join("missing.yaml");

    tmplgen()
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid path to file"));
}

#[test]
fn test_invalid_templates_dir_is_rejected() {
    let root = tempdir().unwrap();
    let file = root.path().join("not_a_dir.txt");
    fs::write(&file, "").unwrap();

    tmplgen()
        .arg("-t")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid path to dir"));
}

#[test]
fn test_generates_read_only_files() {
    let root = tempdir().unwrap();
    let templates = root.path().join("templates");
    let output = root.path().join("out");
    write_template(&templates, "Version.h.mako", "// {{ file_name }}\n#define VERSION 3 \n");

    tmplgen()
        .arg("-t")
        .arg(&templates)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 files"));

    let generated = output.join("Version.h");
    assert_eq!(
        fs::read_to_string(&generated).unwrap(),
        "// Version.h\r\n#define VERSION 3\r\n"
    );
    assert!(fs::metadata(&generated).unwrap().permissions().readonly());
}

#[test]
fn test_render_failure_exits_non_zero() {
    let root = tempdir().unwrap();
    let templates = root.path().join("templates");
    let output = root.path().join("out");
    write_template(&templates, "Good.h.mako", "// {{ file_name }}\n");
    write_template(&templates, "Bad.h.mako", "{{ undefined_value }}\n");

    tmplgen()
        .arg("-t")
        .arg(&templates)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("1 failed")
                .and(predicate::str::contains("The file is not generated")),
        );

    assert!(output.join("Good.h").is_file());
    assert!(!output.join("Bad.h").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let root = tempdir().unwrap();
    let templates = root.path().join("templates");
    let output = root.path().join("out");
    write_template(&templates, "Version.h.mako", "// {{ file_name }}\n");

    tmplgen()
        .arg("--dry")
        .arg("-t")
        .arg(&templates)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Planned 1 of 1 templates"));

    assert!(!output.exists());
}

#[test]
fn test_missing_templates_directory_fails() {
    let root = tempdir().unwrap();

    tmplgen()
        .current_dir(root.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("No templates directory given").count(1));
}

#[test]
fn test_quiet_hides_progress() {
    let root = tempdir().unwrap();
    let templates = root.path().join("templates");
    let output = root.path().join("out");
    write_template(&templates, "Version.h.mako", "// {{ file_name }}\n");

    tmplgen()
        .arg("-q")
        .arg("-t")
        .arg(&templates)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Generating").not());

    assert!(output.join("Version.h").is_file());
}
