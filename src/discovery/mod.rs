use crate::error::DiscoveryError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

fn build_globset(patterns: &[String], label: &str) -> Result<GlobSet, DiscoveryError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| DiscoveryError::GlobPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| DiscoveryError::GlobPattern {
        pattern: label.to_string(),
        source: e,
    })
}

/// Find saved reports under `root`, as paths relative to it.
///
/// Respects `.gitignore` and skips hidden files. An empty include list
/// matches every file.
pub fn discover_reports(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::MissingDir(root.to_path_buf()));
    }

    let include_set = build_globset(include, "include set")?;
    let exclude_set = build_globset(exclude, "exclude set")?;

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        // Match patterns against the path relative to the root
        let rel_path = path.strip_prefix(root).unwrap_or(path);

        if !include.is_empty() && !include_set.is_match(rel_path) {
            continue;
        }

        if exclude_set.is_match(rel_path) {
            continue;
        }

        files.push(rel_path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Drop files (relative to `root`) that resolve to somewhere under `dir`.
/// Paths are compared canonicalized, so `.` and `./parsed` style roots match.
pub fn exclude_under(root: &Path, files: Vec<PathBuf>, dir: &Path) -> Vec<PathBuf> {
    let Ok(dir) = dir.canonicalize() else {
        return files;
    };

    files
        .into_iter()
        .filter(|file| match root.join(file).canonicalize() {
            Ok(path) => !path.starts_with(&dir),
            Err(_) => true,
        })
        .collect()
}
