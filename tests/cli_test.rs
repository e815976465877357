use std::process::Command;

use tempfile::TempDir;

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_git-push-modules"));
    // keep a developer's own pusher.toml out of the picture
    cmd.env("HOME", std::env::temp_dir());
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("git-push-modules-none"));
    cmd
}

#[test]
fn test_help_lists_flags() {
    let output = binary().arg("--help").output().unwrap();
    assert!(output.status.success());

    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--path", "--only", "--message", "--yes", "--config"] {
        assert!(help.contains(flag), "missing {} in help:\n{}", flag, help);
    }
}

#[test]
fn test_missing_path_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let output = binary()
        .current_dir(dir.path())
        .args(["--yes", "-m", "Release"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Not set option path."));
}

#[test]
fn test_empty_root_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let output = binary()
        .current_dir(dir.path())
        .arg("--path")
        .arg(dir.path())
        .args(["--yes", "-m", "Release"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_missing_config_file_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let output = binary()
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading config"));
}

#[test]
fn test_command_failure_exits_with_failure() {
    let git_present = Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !git_present {
        eprintln!("git not available, skipping");
        return;
    }

    // a module directory that is not a repository makes `git config` fail
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("plain")).unwrap();

    let output = binary()
        .current_dir(dir.path())
        .arg("--path")
        .arg(dir.path())
        .args(["--yes", "-m", "Release"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Run stopped at module 'plain'"));
}
