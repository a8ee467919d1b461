use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, TEST_FILE_PATTERNS};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths under the source root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Sorted by path, so every run walks files in the same order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Collect the source files under `source_root` that detection should read.
///
/// Directories named in `excludeDirs` are pruned without being entered.
/// Type declaration files (`.d.ts`) are never scanned.
pub fn scan_files(source_root: &Path, config: &Config) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in &config.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(source_root.join(p));
        }
    }

    if config.ignore_test_files {
        for p in TEST_FILE_PATTERNS {
            if let Ok(pattern) = Pattern::new(p) {
                glob_patterns.push(pattern);
            }
        }
    }

    let walker = WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, &config.exclude_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if entry.file_type().is_file() && is_scannable_file(path, &config.extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    tracing::debug!("Found {} source files under {}", files.len(), source_root.display());

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && exclude_dirs
            .iter()
            .any(|dir| entry.file_name().to_str() == Some(dir.as_str()))
}

fn is_scannable_file(path: &Path, extensions: &[String]) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if name.ends_with(".d.ts") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
