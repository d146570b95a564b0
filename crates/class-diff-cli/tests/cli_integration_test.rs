//! CLI 集成测试
//!
//! 测试命令行接口的各种功能和参数组合

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const OLD_CALCULATOR: &str = r#"
public class Calculator
{
    public int Add(int a, int b)
    {
        return a + b;
    }

    private double Sqrt(double x)
    {
        return Math.Sqrt(x);
    }
}
"#;

const NEW_CALCULATOR: &str = r#"
public class Calculator
{
    public int Add(int a, int b)
    {
        return a + b;
    }

    protected double SquareRoot(double x)
    {
        return Math.Sqrt(x);
    }
}
"#;

/// 获取编译后的二进制文件路径
fn get_binary_path() -> String {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // 移除测试可执行文件名
    if path.ends_with("deps") {
        path.pop(); // 移除 deps 目录
    }
    path.push("class-diff");
    path.to_string_lossy().to_string()
}

/// 在临时目录中写入一对源文件
fn create_sources(old: &str, new: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let old_path = temp_dir.path().join("Old.cs");
    let new_path = temp_dir.path().join("New.cs");
    std::fs::write(&old_path, old).expect("Failed to write old source");
    std::fs::write(&new_path, new).expect("Failed to write new source");
    (temp_dir, old_path, new_path)
}

fn run(args: &[&str], old: &Path, new: &Path) -> std::process::Output {
    Command::new(get_binary_path())
        .arg(old)
        .arg(new)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_help_output() {
    let output = Command::new(get_binary_path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("class-diff"));
    assert!(stdout.contains("OLD_FILE"));
    assert!(stdout.contains("NEW_FILE"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--threshold"));
}

#[test]
fn test_version_output() {
    let output = Command::new(get_binary_path())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_missing_arguments() {
    let output = Command::new(get_binary_path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("required"));
}

#[test]
fn test_nonexistent_input_file() {
    let (_dir, old_path, _) = create_sources(OLD_CALCULATOR, NEW_CALCULATOR);
    let output = run(&[], &old_path, Path::new("/nonexistent/New.cs"));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Input file does not exist"));
}

#[test]
fn test_unsupported_extension() {
    let (dir, old_path, _) = create_sources(OLD_CALCULATOR, NEW_CALCULATOR);
    let text_path = dir.path().join("New.txt");
    std::fs::write(&text_path, NEW_CALCULATOR).unwrap();

    let output = run(&[], &old_path, &text_path);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Unsupported file type"));
}

#[test]
fn test_threshold_out_of_range() {
    let (_dir, old_path, new_path) = create_sources(OLD_CALCULATOR, NEW_CALCULATOR);
    let output = run(&["--threshold", "1.5"], &old_path, &new_path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Threshold must be between 0.0 and 1.0"));
}

#[test]
fn test_text_report() {
    let (_dir, old_path, new_path) = create_sources(OLD_CALCULATOR, NEW_CALCULATOR);
    let output = run(&[], &old_path, &new_path);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Comparing Calculator"));
    assert!(stdout.contains("Signatures equal: no"));
    assert!(stdout.contains("added: Member 'SquareRoot' was added"));
    assert!(stdout.contains("removed: Member 'Sqrt' was removed"));
}

#[test]
fn test_json_report() {
    let (_dir, old_path, new_path) = create_sources(OLD_CALCULATOR, OLD_CALCULATOR);
    let output = run(&["--format", "json"], &old_path, &new_path);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"signatures_equal\": true"));
    assert!(stdout.contains("\"implementations_semantically_equal\": true"));
    assert!(stdout.contains("\"similarity_score\": 1.0"));
}

#[test]
fn test_markdown_report_for_named_type() {
    let source = r#"
class Helper { public void Run() { } }
class Target { public int Value() { return 1; } }
"#;
    let (_dir, old_path, new_path) = create_sources(source, source);
    let output = run(&["-f", "markdown", "-t", "Target"], &old_path, &new_path);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("# Class Comparison"));
    assert!(stdout.contains("Comparing Target"));
}

#[test]
fn test_invalid_source_reports_warning() {
    let (_dir, old_path, new_path) = create_sources("using System;", NEW_CALCULATOR);
    let output = run(&[], &old_path, &new_path);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("One or both inputs are not valid type declarations"));
}

#[test]
fn test_output_file_option() {
    let (dir, old_path, new_path) = create_sources(OLD_CALCULATOR, NEW_CALCULATOR);
    let report_path = dir.path().join("reports").join("diff.txt");
    let output = run(
        &["-o", report_path.to_str().unwrap()],
        &old_path,
        &new_path,
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("Member 'SquareRoot' was added"));
}

#[test]
fn test_verbose_flag() {
    let (_dir, old_path, new_path) = create_sources(OLD_CALCULATOR, NEW_CALCULATOR);
    let output = Command::new(get_binary_path())
        .arg(&old_path)
        .arg(&new_path)
        .arg("--verbose")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Starting class-diff comparison"));
}
