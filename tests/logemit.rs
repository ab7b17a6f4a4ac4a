//! logemitバイナリの終了コードと出力先

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn logemit(home: &TempDir, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_logemit"));
    command
        .args(args)
        .env_remove("LOG_LEVEL")
        .env_remove("RUST_LOG")
        .env("HOME", home.path());
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_default_threshold_is_debug() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["threshold"], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "DEBUG");
}

#[test]
fn test_threshold_from_env_case_insensitive() {
    let home = TempDir::new().unwrap();
    for (value, expected) in [
        ("debug", "DEBUG"),
        ("Info", "INFO"),
        ("ERROR", "ERROR"),
        ("fAtAl", "FATAL"),
        ("panic", "PANIC"),
        ("verbose", "DEBUG"),
    ] {
        let output = logemit(&home, &["threshold"], &[("LOG_LEVEL", value)]);
        assert_eq!(stdout(&output).trim(), expected, "LOG_LEVEL={}", value);
    }
}

#[test]
fn test_custom_env_var() {
    let home = TempDir::new().unwrap();
    let output = logemit(
        &home,
        &["--env-var", "APP_LOG_LEVEL", "threshold"],
        &[("APP_LOG_LEVEL", "error"), ("LOG_LEVEL", "info")],
    );
    assert_eq!(stdout(&output).trim(), "ERROR");
}

#[test]
fn test_info_goes_to_stdout() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["emit", "info", "Test", "Info", "Log"], &[]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("INFO"), "got: {}", out);
    assert!(out.ends_with("Test Info Log\n"), "got: {}", out);
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_error_goes_to_stderr() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["emit", "error", "Test Error Log"], &[]);
    assert!(output.status.success());

    let err = stderr(&output);
    assert!(err.starts_with("ERROR"), "got: {}", err);
    assert!(err.ends_with("Test Error Log\n"), "got: {}", err);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_below_threshold_is_silent() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["emit", "info", "hidden"], &[("LOG_LEVEL", "error")]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_fatal_exits_with_status_one() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["emit", "fatal", "Test fatal log"], &[]);
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.starts_with("FATAL"), "got: {}", err);
    assert!(err.ends_with("Test fatal log. Exiting...\n"), "got: {}", err);
}

#[test]
fn test_suppressed_fatal_still_exits() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["--level", "off", "emit", "fatal", "quiet"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "");
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_panic_writes_then_panics() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["emit", "panic", "Test", "panic", "log"], &[]);
    assert_eq!(output.status.code(), Some(101));

    let err = stderr(&output);
    assert!(err.starts_with("PANIC"), "got: {}", err);
    assert!(err.contains("Test panic log. Panicing...\n"), "got: {}", err);
}

#[test]
fn test_suppressed_panic_is_noop() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["--level", "off", "emit", "panic", "quiet"], &[]);
    assert!(output.status.success());
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_redirect_normal_to_file() {
    let home = TempDir::new().unwrap();
    let log_path = home.path().join("logs").join("out.log");
    let output = logemit(
        &home,
        &["--normal", log_path.to_str().unwrap(), "emit", "debug", "to", "file"],
        &[],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");

    let written = fs::read_to_string(&log_path).unwrap();
    assert!(written.starts_with("DEBUG"));
    assert!(written.ends_with("to file\n"));
}

#[test]
fn test_config_file() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("logemit.toml");
    fs::write(&config_path, "level = \"error\"\ndiagnostic = \"stdout\"\n").unwrap();
    let config = config_path.to_str().unwrap();

    let output = logemit(&home, &["--config", config, "emit", "info", "hidden"], &[]);
    assert_eq!(stdout(&output), "");

    let output = logemit(&home, &["--config", config, "emit", "error", "shown"], &[]);
    let out = stdout(&output);
    assert!(out.starts_with("ERROR"), "got: {}", out);
    assert!(out.ends_with("shown\n"));
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_default_config_file_in_home() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".leveled-log");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "level = \"fatal\"\n").unwrap();

    let output = logemit(&home, &["threshold"], &[]);
    assert_eq!(stdout(&output).trim(), "FATAL");
}

#[test]
fn test_cli_level_overrides_config_file() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("logemit.toml");
    fs::write(&config_path, "level = \"error\"\n").unwrap();

    let output = logemit(
        &home,
        &["--config", config_path.to_str().unwrap(), "--level", "info", "threshold"],
        &[],
    );
    assert_eq!(stdout(&output).trim(), "INFO");
}

#[test]
fn test_trace_bridge_maps_warn_to_error() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["trace", "warn", "disk", "almost", "full"], &[]);
    assert!(output.status.success());

    let err = stderr(&output);
    assert!(err.starts_with("ERROR"), "got: {}", err);
    assert!(err.ends_with("disk almost full\n"), "got: {}", err);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_trace_bridge_respects_threshold() {
    let home = TempDir::new().unwrap();
    let output = logemit(&home, &["--level", "info", "trace", "debug", "hidden"], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "");
}
