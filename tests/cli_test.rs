//! End-to-end tests of the fixture-factory binary.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Execute the fixture-factory CLI and return the output
fn execute_fixture_factory(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fixture-factory"))
        .args(args)
        .env("RUST_LOG", "fixture_factory=debug")
        .output()
        .expect("failed to run fixture-factory")
}

/// Verify CLI command succeeded
fn assert_cli_success(output: &Output, command_desc: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "{} failed!\nExit code: {:?}\nStdout: {}\nStderr: {}",
            command_desc,
            output.status.code(),
            stdout,
            stderr
        );
    }
}

fn json_lines(text: &str) -> Vec<serde_json::Value> {
    text.lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect()
}

#[test]
fn test_models_lists_schema() {
    let schema = fixture("models.yaml");
    let output = execute_fixture_factory(&["models", "--schema", schema.to_str().unwrap()]);
    assert_cli_success(&output, "models");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Models:"));
    assert!(stdout.contains("  MapModel\n"));
    assert!(stdout.contains("    map_of: map<ComplexMap>\n"));
    assert!(stdout.contains("Maps:"));
}

#[test]
fn test_generate_to_stdout_is_reproducible() {
    let schema = fixture("models.yaml");
    let schema = schema.to_str().unwrap();
    let args = [
        "generate",
        "--schema",
        schema,
        "--model",
        "MapModel",
        "--count",
        "3",
        "--seed",
        "42",
        "--reference-time",
        "2024-06-15T12:00:00Z",
    ];

    let first = execute_fixture_factory(&args);
    assert_cli_success(&first, "generate");
    let second = execute_fixture_factory(&args);
    assert_cli_success(&second, "generate");

    assert_eq!(first.stdout, second.stdout);
    let records = json_lines(&String::from_utf8_lossy(&first.stdout));
    assert_eq!(records.len(), 3);
    for record in records {
        assert!(record["map_of"].is_object());
        assert!(record["map_of"]["name"].is_string());
    }
}

#[test]
fn test_generate_with_factory_file_and_set() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("users.jsonl");
    let schema = fixture("models.yaml");
    let factory = fixture("factory.yaml");

    let output = execute_fixture_factory(&[
        "generate",
        "--schema",
        schema.to_str().unwrap(),
        "--factory",
        factory.to_str().unwrap(),
        "--count",
        "4",
        "--set",
        "email=user@example.com",
        "--set",
        "password=leaked",
        "--set",
        "dne=1",
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert_cli_success(&output, "generate with factory file");

    let text = std::fs::read_to_string(&output_path).unwrap();
    let records = json_lines(&text);
    assert_eq!(records.len(), 4);

    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["id"], format!("user-{}", i + 1));
        assert_eq!(record["email"], "user@example.com");
        // Ignored in the factory file: only the schema default can appear
        assert_eq!(record["password"], "changeme");
        assert!(record.get("dne").is_none());
        assert!(["ace", "bolt", "comet"].contains(&record["nickname"].as_str().unwrap()));
        // allow_nulls: false and allow_empty: false
        assert!(record.get("location").is_none());
        assert!(!record["scores"].as_array().unwrap().is_empty());
        assert!(record.as_object().unwrap().values().all(|v| !v.is_null()));
    }
}

#[test]
fn test_seed_flag_reproduces_unseeded_factory_file() {
    let temp_dir = TempDir::new().unwrap();
    let factory_path = temp_dir.path().join("unseeded.yaml");
    std::fs::write(
        &factory_path,
        "model: UserModel\n\
         fields:\n  \
           id:\n    type: uuid_v4\n  \
           email:\n    type: value\n    value: a@example.com\n  \
           nickname:\n    type: one_of\n    values: [ace, bolt, comet, dash]\n",
    )
    .unwrap();
    let schema = fixture("models.yaml");
    let args = [
        "generate",
        "--schema",
        schema.to_str().unwrap(),
        "--factory",
        factory_path.to_str().unwrap(),
        "--count",
        "5",
        "--seed",
        "42",
        "--reference-time",
        "2024-06-15T12:00:00Z",
    ];

    let first = execute_fixture_factory(&args);
    assert_cli_success(&first, "generate with --seed");
    let second = execute_fixture_factory(&args);
    assert_cli_success(&second, "generate with --seed");

    assert_eq!(first.stdout, second.stdout);
    let records = json_lines(&String::from_utf8_lossy(&first.stdout));
    assert_eq!(records.len(), 5);
    for record in records {
        assert_eq!(record["id"].as_str().map(str::len), Some(36));
    }
}

#[test]
fn test_generate_missing_required_field_fails() {
    let schema = fixture("models.yaml");
    let factory = fixture("factory.yaml");

    let output = execute_fixture_factory(&[
        "generate",
        "--schema",
        schema.to_str().unwrap(),
        "--factory",
        factory.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("Required argument 'email'"));
}

#[test]
fn test_generate_strict_unsupported_fails() {
    let schema = fixture("models.yaml");
    let output = execute_fixture_factory(&[
        "generate",
        "--schema",
        schema.to_str().unwrap(),
        "--model",
        "UserModel",
        "--seed",
        "1",
        "--no-nulls",
        "--raise-unsupported",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported type"));
}

#[test]
fn test_generate_requires_model() {
    let schema = fixture("models.yaml");
    let output = execute_fixture_factory(&["generate", "--schema", schema.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No model to build"));
}
