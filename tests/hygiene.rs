//! Hygiene: source-level antipattern budgets for `src/`.
//!
//! Production code propagates errors and logs through `tracing`; these checks
//! keep it that way. Test files (`*_test.rs`) are exempt. Budgets only go down.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics on a bad board" },
    Budget { pattern: ".expect(", max: 0, why: "panics on a bad board" },
    Budget { pattern: "panic!(", max: 0, why: "crashes the host page" },
    Budget { pattern: "unreachable!(", max: 0, why: "crashes the host page" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished code path" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished code path" },
    Budget { pattern: "let _ =", max: 0, why: "discards an error unseen" },
    Budget { pattern: ".ok()", max: 0, why: "discards an error unseen" },
    Budget { pattern: "println!(", max: 0, why: "use tracing instead" },
    Budget { pattern: "eprintln!(", max: 0, why: "use tracing instead" },
    Budget { pattern: "dbg!(", max: 0, why: "leftover debugging" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete dead code instead" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new(env!("CARGO_MANIFEST_DIR")).join("src").as_path(), &mut files);
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: name, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|f| (f.path.clone(), f.content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[test]
fn source_tree_is_found() {
    assert!(!source_files().is_empty(), "no sources under src/");
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut report = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > budget.max {
            report.push(format!("`{}` found {count}, max {} ({})", budget.pattern, budget.max, budget.why));
            report.extend(found.iter().map(|(path, n)| format!("  {path}: {n}")));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}
