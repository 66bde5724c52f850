//! Per-file rewrite pipeline
//!
//! For each header: derive the token, read, rewrite in memory, write back.
//! Headers are handled one after the other and the first error aborts the run;
//! headers already written stay written.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::discovery::HeaderFile;
use crate::guard::{GuardOutcome, display_relative, guard_token, rewrite_text};
use crate::storage::FileStore;

/// What the rewriter does with the rewritten content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Write changed headers back
    #[default]
    Write,
    /// Compute and report, never write
    DryRun,
    /// Like `DryRun`; the caller fails when any header is stale
    Check,
}

impl RunMode {
    fn writes(self) -> bool {
        matches!(self, RunMode::Write)
    }
}

/// Result for one header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Root-relative path with `/` separators
    pub path: String,
    pub token: String,
    pub outcome: GuardOutcome,
    /// Rewritten content differs from what was on disk
    pub changed: bool,
}

impl FileReport {
    /// The `<path>: <token>` audit line
    pub fn report_line(&self) -> String {
        format!("{}: {}", self.path, self.token)
    }
}

/// Aggregate of a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.files.len()
    }

    pub fn changed(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    pub fn nested(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, GuardOutcome::Nested { .. }))
            .count()
    }

    pub fn stale(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.changed)
    }
}

/// Rewrites include guards through a [`FileStore`]
pub struct Rewriter<S> {
    store: S,
    mode: RunMode,
}

impl<S: FileStore> Rewriter<S> {
    pub fn new(store: S, mode: RunMode) -> Self {
        Self { store, mode }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rewrite a single header
    pub fn rewrite_file(&mut self, header: &HeaderFile) -> Result<FileReport> {
        let token = guard_token(&header.relative)?;
        let original = self.store.read_to_string(&header.path)?;

        let rewrite = rewrite_text(&original, &token);
        let text = rewrite.text();
        let changed = text != original;

        match &rewrite.outcome {
            GuardOutcome::Nested { previous } => warn!(
                "{}: existing guard {} not recognized, wrapping it in {}",
                header.path.display(),
                previous,
                token
            ),
            outcome => debug!("{}: guard {}", header.path.display(), outcome.label()),
        }

        if changed && self.mode.writes() {
            self.store.write(&header.path, &text)?;
            debug!("{}: written", header.path.display());
        }

        Ok(FileReport {
            path: display_relative(&header.relative),
            token,
            outcome: rewrite.outcome,
            changed,
        })
    }

    /// Rewrite all headers in order, calling `on_file` after each one
    pub fn run<F>(&mut self, headers: &[HeaderFile], mut on_file: F) -> Result<RunSummary>
    where
        F: FnMut(&FileReport),
    {
        let mut summary = RunSummary::default();

        for header in headers {
            let report = self.rewrite_file(header)?;
            on_file(&report);
            summary.files.push(report);
        }

        info!(
            "processed {} headers, {} changed, {} nested guards",
            summary.processed(),
            summary.changed(),
            summary.nested()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::HeaderWalker;
    use crate::storage::{DiskStore, MemoryStore};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn header(relative: &str) -> HeaderFile {
        HeaderFile {
            path: Path::new("include").join(relative),
            relative: PathBuf::from(relative),
        }
    }

    fn store_with(files: &[(&str, &str)]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for (relative, content) in files {
            store.insert(Path::new("include").join(relative), *content);
        }
        store
    }

    #[test]
    fn test_end_to_end_single_header() {
        let store = store_with(&[("foo/bar.hpp", "int x;\n")]);
        let mut rewriter = Rewriter::new(store, RunMode::Write);

        let mut lines = Vec::new();
        let summary = rewriter
            .run(&[header("foo/bar.hpp")], |report| lines.push(report.report_line()))
            .unwrap();

        assert_eq!(lines, vec!["foo/bar.hpp: FOO__BAR_HPP_"]);
        assert_eq!(summary.changed(), 1);
        assert_eq!(
            rewriter.store().get(Path::new("include/foo/bar.hpp")),
            Some("#ifndef FOO__BAR_HPP_\n#define FOO__BAR_HPP_\n\nint x;\n\n#endif\n")
        );
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let store = store_with(&[
            ("a.hpp", "/** License */\n\n#ifndef OLD\n#define OLD\n\nBODY\n\n#endif\n"),
            ("b/c.hpp", "int c;\r\n"),
        ]);
        let headers = [header("a.hpp"), header("b/c.hpp")];

        let mut rewriter = Rewriter::new(store, RunMode::Write);
        rewriter.run(&headers, |_| {}).unwrap();
        let after_first = rewriter.store().clone();

        let summary = rewriter.run(&headers, |_| {}).unwrap();
        assert_eq!(summary.changed(), 0);
        assert_eq!(rewriter.store().writes(), after_first.writes());
        for h in &headers {
            assert_eq!(rewriter.store().get(&h.path), after_first.get(&h.path));
        }
    }

    #[test]
    fn test_dry_run_never_writes() {
        let store = store_with(&[("x.hpp", "int x;\n")]);
        let mut rewriter = Rewriter::new(store, RunMode::DryRun);

        let report = rewriter.rewrite_file(&header("x.hpp")).unwrap();
        assert!(report.changed);
        assert_eq!(rewriter.store().writes(), 0);
        assert_eq!(rewriter.store().get(Path::new("include/x.hpp")), Some("int x;\n"));
    }

    #[test]
    fn test_check_mode_lists_stale_headers() {
        let store = store_with(&[
            ("ok.hpp", "#ifndef OK_HPP_\n#define OK_HPP_\n\nint ok;\n\n#endif\n"),
            ("stale.hpp", "#ifndef WRONG\n#define WRONG\n\nint s;\n\n#endif\n"),
        ]);
        let mut rewriter = Rewriter::new(store, RunMode::Check);

        let summary = rewriter
            .run(&[header("ok.hpp"), header("stale.hpp")], |_| {})
            .unwrap();
        let stale: Vec<_> = summary.stale().map(|f| f.path.as_str()).collect();
        assert_eq!(stale, vec!["stale.hpp"]);
        assert_eq!(rewriter.store().writes(), 0);
    }

    #[test]
    fn test_nested_outcome_is_reported() {
        let store = store_with(&[("n.hpp", "#ifndef N\n#define N\nint n;\n#endif\n")]);
        let mut rewriter = Rewriter::new(store, RunMode::Write);

        let summary = rewriter.run(&[header("n.hpp")], |_| {}).unwrap();
        assert_eq!(summary.nested(), 1);
        assert_eq!(
            summary.files[0].outcome,
            GuardOutcome::Nested {
                previous: "N".to_string()
            }
        );
    }

    #[test]
    fn test_read_failure_aborts_remaining_headers() {
        let store = store_with(&[("a.hpp", "int a;\n"), ("c.hpp", "int c;\n")]);
        let mut rewriter = Rewriter::new(store, RunMode::Write);

        let mut seen = Vec::new();
        let result = rewriter.run(
            &[header("a.hpp"), header("b.hpp"), header("c.hpp")],
            |report| seen.push(report.path.clone()),
        );

        assert!(result.is_err());
        assert_eq!(seen, vec!["a.hpp"]);
        // Earlier header stays rewritten, later one untouched
        assert_ne!(rewriter.store().get(Path::new("include/a.hpp")), Some("int a;\n"));
        assert_eq!(rewriter.store().get(Path::new("include/c.hpp")), Some("int c;\n"));
    }

    #[test]
    fn test_write_failure_on_disk_aborts_remaining_headers() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("include");
        fs::create_dir_all(&root).unwrap();
        for name in ["a.hpp", "b.hpp", "c.hpp"] {
            fs::write(root.join(name), "int x;\n").unwrap();
        }

        let locked = root.join("b.hpp");
        let mut permissions = fs::metadata(&locked).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&locked, permissions).unwrap();
        if fs::OpenOptions::new().write(true).open(&locked).is_ok() {
            // Running with privileges that ignore file modes
            return;
        }

        let headers = HeaderWalker::new(&root, ".hpp").discover().unwrap();
        let mut rewriter = Rewriter::new(DiskStore::new(true), RunMode::Write);

        let mut seen = Vec::new();
        let result = rewriter.run(&headers, |report| seen.push(report.path.clone()));

        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("b.hpp"), "unexpected error: {err}");
        assert_eq!(seen, vec!["a.hpp"]);
        assert_eq!(
            fs::read_to_string(root.join("a.hpp")).unwrap(),
            "#ifndef A_HPP_\n#define A_HPP_\n\nint x;\n\n#endif\n"
        );
        assert_eq!(fs::read_to_string(&locked).unwrap(), "int x;\n");
        assert_eq!(fs::read_to_string(root.join("c.hpp")).unwrap(), "int x;\n");
    }

    #[test]
    fn test_unrelated_files_are_not_read() {
        let store = store_with(&[("x.hpp", "int x;\n"), ("notes.txt", "keep me\n")]);
        let mut rewriter = Rewriter::new(store, RunMode::Write);

        rewriter.run(&[header("x.hpp")], |_| {}).unwrap();
        assert_eq!(rewriter.store().get(Path::new("include/notes.txt")), Some("keep me\n"));
        assert_eq!(rewriter.store().writes(), 1);
    }
}
