//! Hygiene — enforces coding standards at test time
//!
//! Scans the canvas crate's production sources for patterns that crash,
//! swallow errors, or bypass `tracing`. Each pattern has a budget (ideally
//! zero). If you must add one, fix an existing one first; budgets never grow.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics.
    Budget { pattern: ".unwrap()", max: 0, why: "propagate with `?`" },
    Budget { pattern: ".expect(", max: 0, why: "propagate with `?`" },
    Budget { pattern: "panic!(", max: 0, why: "return a CanvasError" },
    Budget { pattern: "unreachable!(", max: 0, why: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, why: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "finish the stub" },
    // Silent loss. The one `.ok()` is hex digit parsing, where the caller
    // reports the whole string as invalid.
    Budget { pattern: "let _ =", max: 0, why: "inspect or log the value" },
    Budget { pattern: ".ok()", max: 1, why: "map the error instead" },
    // Output goes through tracing.
    Budget { pattern: "println!(", max: 0, why: "use tracing" },
    Budget { pattern: "eprintln!(", max: 0, why: "use tracing" },
    Budget { pattern: "dbg!(", max: 0, why: "use tracing" },
    // Structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" },
    Budget { pattern: "unsafe ", max: 0, why: "the rasterizer is safe Rust" },
];

struct SourceFile {
    path: String,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

/// Per-file hit counts, ignoring `//` comment lines.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    assert!(source_files().iter().any(|f| f.path.ends_with("engine.rs")), "run from the canvas crate root");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail = found.iter().map(|(p, c)| format!("    {p}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!(
                "{:?}: found {count}, max {} ({})\n{detail}",
                budget.pattern, budget.max, budget.why
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
