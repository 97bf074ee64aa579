//! End-to-end tests for the `rescreen` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const VECTORIZER: &str = r#"{
    "vocabulary": {"java": 0, "hadoop": 1, "python": 2},
    "idf": [1.0, 1.5, 1.0]
}"#;

const CLASSIFIER: &str = r#"{
    "classes": [15, 13, 20],
    "coef": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    "intercept": [0.0, 0.0, 0.0]
}"#;

const JAVA_RESUME: &str = "Name: John Smith\nEmail: john@example.com\nPhone: +1 555-123-4567\nExperienced Java developer. Java, Java EE and Spring.";

const PYTHON_RESUME: &str = "Django and Flask work, python scripting, python packaging.";

/// Temp workspace holding the model files and an empty config.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let models = dir.path().join("models");
        fs::create_dir_all(&models).unwrap();
        fs::write(models.join("tfidf.json"), VECTORIZER).unwrap();
        fs::write(models.join("clf.json"), CLASSIFIER).unwrap();
        fs::write(dir.path().join("config.json"), r#"{"models": {"classifier": "clf.json"}}"#).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rescreen").unwrap();
        cmd.arg("-c").arg(self.path().join("config.json"));
        cmd
    }

    fn model_dir(&self) -> PathBuf {
        self.path().join("models")
    }
}

#[test]
fn test_screen_text_output() {
    let fx = Fixture::new();
    let resume = fx.write("resume.txt", JAVA_RESUME);

    fx.cmd()
        .arg("screen")
        .arg(&resume)
        .arg("--model-dir")
        .arg(fx.model_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: John Smith"))
        .stdout(predicate::str::contains("Email: john@example.com"))
        .stdout(predicate::str::contains("Phone: +1 555-123-4567"))
        .stdout(predicate::str::contains("Predicted Category: Java Developer"));
}

#[test]
fn test_screen_json_output() {
    let fx = Fixture::new();
    let resume = fx.write("resume.txt", PYTHON_RESUME);

    let output = fx
        .cmd()
        .arg("screen")
        .arg(&resume)
        .args(["-f", "json", "--model-dir"])
        .arg(fx.model_dir())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["category_id"], 20);
    assert_eq!(json["category"], "Python Developer");
    assert_eq!(json["name"], "Name not found");
    assert_eq!(json["email"], "Email not found");
}

#[test]
fn test_screen_unsupported_type() {
    let fx = Fixture::new();
    let image = fx.write("photo.png", "not really a png");

    fx.cmd()
        .arg("screen")
        .arg(&image)
        .args(["--mime", "image/png", "--model-dir"])
        .arg(fx.model_dir())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type: image/png"));
}

#[test]
fn test_screen_missing_models() {
    let fx = Fixture::new();
    let resume = fx.write("resume.txt", JAVA_RESUME);

    fx.cmd()
        .arg("screen")
        .arg(&resume)
        .arg("--model-dir")
        .arg(fx.path().join("no-models-here"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load models"));
}

#[test]
fn test_batch_summary() {
    let fx = Fixture::new();
    let inputs = fx.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), JAVA_RESUME).unwrap();
    fs::write(inputs.join("b.txt"), PYTHON_RESUME).unwrap();
    fs::write(inputs.join("c.pdf"), "broken pdf").unwrap();
    let out = fx.path().join("out");

    fx.cmd()
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .arg("-o")
        .arg(&out)
        .args(["--summary", "--continue-on-error", "-j", "2", "--model-dir"])
        .arg(fx.model_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 successful, 1 failed"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("filename,status,name,email,phone,category_id,category"));
    assert!(lines[1].starts_with("a.txt,success,John Smith,john@example.com"));
    assert!(lines[1].contains("Java Developer"));
    assert!(lines[2].starts_with("b.txt,success"));
    assert!(lines[3].starts_with("c.pdf,error"));

    let a: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("a.json")).unwrap()).unwrap();
    assert_eq!(a["category_id"], 15);
}

#[test]
fn test_batch_stops_on_error() {
    let fx = Fixture::new();
    let inputs = fx.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("bad.pdf"), "broken pdf").unwrap();

    fx.cmd()
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .arg("--model-dir")
        .arg(fx.model_dir())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Screening failed"));
}

#[test]
fn test_batch_failure_stops_remaining_files() {
    let fx = Fixture::new();
    let inputs = fx.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), JAVA_RESUME).unwrap();
    fs::write(inputs.join("b_bad.pdf"), "broken pdf").unwrap();
    for name in ["c.txt", "d.txt", "e.txt", "f.txt", "g.txt"] {
        fs::write(inputs.join(name), PYTHON_RESUME).unwrap();
    }
    let out = fx.path().join("out");

    fx.cmd()
        .arg("-v")
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .arg("-o")
        .arg(&out)
        .args(["-j", "1", "--model-dir"])
        .arg(fx.model_dir())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Screening failed"))
        .stderr(predicate::str::contains("as 'Java Developer'"))
        .stderr(predicate::str::contains("Python Developer").not());

    for name in ["c.json", "d.json", "e.json", "f.json", "g.json"] {
        assert!(!out.join(name).exists(), "{} should not be written", name);
    }
}

#[test]
fn test_models_info() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["models", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Java Developer"))
        .stdout(predicate::str::contains("Web Designing"));
}

#[test]
fn test_models_status_ready() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["models", "status", "--model-dir"])
        .arg(fx.model_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready (3 features"));
}

#[test]
fn test_config_set_and_get() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["config", "set", "reader.max_file_size_mb", "5"])
        .assert()
        .success();

    fx.cmd()
        .args(["config", "get", "reader.max_file_size_mb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));

    fx.cmd()
        .args(["config", "get", "models.classifier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clf.json"));

    fx.cmd()
        .args(["config", "get", "models.nope"])
        .assert()
        .failure();
}
