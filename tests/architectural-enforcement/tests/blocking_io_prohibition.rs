//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Production code in the core and tui crates runs on the
//! single UI event thread and MUST NOT block it: no synchronous HTTP,
//! no thread sleeps, no blocking file or network I/O.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories, relative to the workspace root
const PRODUCTION_DIRS: &[&str] = &["core/src", "tui/src"];

#[test]
fn test_no_blocking_io_in_production_code() {
    let violations = find_violations();

    if !violations.is_empty() {
        eprintln!("\nBlocking calls found in production code:");
        for violation in &violations {
            eprintln!("  {}", violation);
        }
        eprintln!("\nUse tokio::time::sleep, reqwest (async), and tokio::fs instead.");
        panic!(
            "Found {} blocking call(s) in production code.",
            violations.len()
        );
    }
}

fn workspace_root() -> PathBuf {
    // tests/architectural-enforcement -> workspace root
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root exists")
}

fn find_violations() -> Vec<String> {
    let root = workspace_root();
    let mut violations = Vec::new();
    for dir in PRODUCTION_DIRS {
        let path = root.join(dir);
        if !path.exists() {
            continue;
        }
        for entry in walkdir::WalkDir::new(&path)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
                check_file(entry.path(), &mut violations);
            }
        }
    }
    violations
}

fn check_file(path: &Path, violations: &mut Vec<String>) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    let lines: Vec<&str> = content.lines().collect();

    for (idx, line) in lines.iter().enumerate() {
        let line_number = idx + 1;
        let code_part = line.split("//").next().unwrap_or(line);

        if is_in_test_module(&lines, idx) {
            continue;
        }

        if code_part.contains("std::thread::sleep") || code_part.contains("thread::sleep") {
            violations.push(format!(
                "{}:{} - Thread sleep blocks the event loop: {}",
                path.display(),
                line_number,
                line.trim()
            ));
        }

        if code_part.contains("reqwest::blocking") {
            violations.push(format!(
                "{}:{} - Blocking HTTP client: {}",
                path.display(),
                line_number,
                line.trim()
            ));
        }

        if code_part.contains("std::net::") {
            violations.push(format!(
                "{}:{} - Blocking network I/O: {}",
                path.display(),
                line_number,
                line.trim()
            ));
        }
    }
}

/// Lines inside a `#[cfg(test)]` module are exempt
fn is_in_test_module(lines: &[&str], idx: usize) -> bool {
    lines[..=idx]
        .iter()
        .any(|line| line.contains("#[cfg(test)]"))
}
