//! Batch runner: review every file in a directory and write one report.
//!
//! Files are reviewed one after another, in name order. Hidden files and
//! the report itself are never read. Unreadable and empty files are skipped
//! with a warning; a backend failure is recorded in the report like any
//! other result.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use walkdir::WalkDir;

use crate::dispatcher::Dispatcher;
use crate::models::{ReviewOutcome, ReviewType};

/// Errors from the batch runner.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("input directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("failed to list {path}: {message}")]
    ListDirectory { path: PathBuf, message: String },

    #[error("failed to write report to {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One reviewed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub name: String,
    pub snippet: String,
    pub outcome: ReviewOutcome,
}

/// A file that was not sent for review, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub name: String,
    pub reason: String,
}

/// Everything one batch run produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub review_type: ReviewType,
    pub entries: Vec<BatchEntry>,
    pub skipped: Vec<SkippedFile>,
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of entries whose review came back successfully.
    pub fn reviewed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_reviewed()).count()
    }

    /// Plain-text report: header, timing, then input and output per file.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("--- Code review results ---\n");
        out.push_str(&format!("Total time: {:.2} seconds\n\n", self.elapsed.as_secs_f64()));

        if !self.entries.is_empty() {
            out.push_str(&format!("=== Category: {} ===\n\n", self.review_type.title()));
            for entry in &self.entries {
                out.push_str(&format!("--- Input {} ---\n", entry.name));
                out.push_str(entry.snippet.trim());
                out.push_str("\n\n");
                out.push_str(&format!("--- Output {} (review) ---\n", entry.name));
                out.push_str(entry.outcome.text().trim());
                out.push_str("\n\n");
            }
        }

        if !self.skipped.is_empty() {
            out.push_str("=== Skipped ===\n\n");
            for skipped in &self.skipped {
                out.push_str(&format!("{}: {}\n", skipped.name, skipped.reason));
            }
            out.push('\n');
        }

        out
    }

    /// Write [`BatchReport::render_text`] to `path`, replacing any existing file.
    pub async fn write_to(&self, path: &Path) -> Result<(), BatchError> {
        tokio::fs::write(path, self.render_text())
            .await
            .map_err(|source| BatchError::WriteReport {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Regular files directly inside `dir`, sorted by file name.
///
/// Hidden files (names starting with `.`, such as `.env`) are never
/// returned, nor is `exclude` when it names a file in `dir`.
pub async fn collect_inputs(dir: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, BatchError> {
    let root = dir.to_path_buf();
    let exclude = exclude.map(Path::to_path_buf);

    // walkdir and the metadata calls are synchronous
    tokio::task::spawn_blocking(move || {
        if !root.is_dir() {
            return Err(BatchError::MissingDirectory(root));
        }
        let excluded = exclude.and_then(|path| std::fs::canonicalize(path).ok());

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| BatchError::ListDirectory {
                path: root.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() || is_hidden(entry.file_name()) {
                continue;
            }
            if excluded.is_some()
                && std::fs::canonicalize(entry.path()).ok() == excluded
            {
                tracing::debug!(file = %entry.path().display(), "skipping report file");
                continue;
            }
            files.push(entry.into_path());
        }
        Ok(files)
    })
    .await
    .map_err(|e| BatchError::ListDirectory {
        path: dir.to_path_buf(),
        message: format!("listing task failed: {e}"),
    })?
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Review every file in `dir` with `review_type`.
///
/// `report_path` is the file the report will be written to; it is left out
/// of the inputs so a rerun does not review its own previous report.
pub async fn run(
    dispatcher: &Dispatcher,
    dir: &Path,
    review_type: ReviewType,
    report_path: Option<&Path>,
) -> Result<BatchReport, BatchError> {
    let files = collect_inputs(dir, report_path).await?;
    let total = files.len();
    let started = Instant::now();

    let mut entries = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (index, path) in files.iter().enumerate() {
        let name = display_name(path);

        let snippet = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %name, "skipping unreadable file: {e}");
                skipped.push(SkippedFile {
                    name,
                    reason: format!("unreadable: {e}"),
                });
                continue;
            }
        };

        tracing::info!(
            file = %name,
            review_type = %review_type,
            "reviewing {}/{total}",
            index + 1
        );

        match dispatcher.review(&snippet, review_type).await {
            Ok(outcome) => entries.push(BatchEntry {
                name,
                snippet,
                outcome,
            }),
            Err(e) => {
                tracing::warn!(file = %name, "skipping file: {e}");
                skipped.push(SkippedFile {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    let report = BatchReport {
        review_type,
        entries,
        skipped,
        elapsed: started.elapsed(),
    };
    tracing::info!(
        reviewed = report.reviewed_count(),
        failed = report.entries.len() - report.reviewed_count(),
        skipped = report.skipped.len(),
        "batch finished in {:.2}s",
        report.elapsed.as_secs_f64()
    );
    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
