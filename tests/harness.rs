//! Test harness for sizewalk integration tests

use std::path::Path;
use std::process::Command;

pub use sizewalk::test_utils::TestTree;

/// Run the binary against `dir` with `args`, never pausing or coloring.
pub fn run_sizewalk(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_sizewalk");
    let output = Command::new(binary)
        .arg(dir)
        .args(["--color", "never", "--no-protected"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run sizewalk");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// Run with `--json` and parse stdout.
pub fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut all = vec!["--json"];
    all.extend_from_slice(args);
    let (stdout, stderr, success) = run_sizewalk(dir, &all);
    assert!(success, "sizewalk failed: {}", stderr);
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let tree = TestTree::new();
        assert!(tree.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let tree = TestTree::new();
        let file_path = tree.add_file("a/b/c.bin", 7);
        assert_eq!(std::fs::metadata(file_path).unwrap().len(), 7);
    }
}
