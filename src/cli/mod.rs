//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use anyhow::{Context, Result};

use args::SnippetSource;

/// Read the snippet from a file or from stdin.
pub async fn read_snippet(source: &SnippetSource) -> Result<String> {
    match source {
        SnippetSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        SnippetSource::Stdin => {
            use tokio::io::AsyncReadExt;
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read snippet from stdin")?;
            Ok(buf)
        }
    }
}
