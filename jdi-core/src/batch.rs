//! Batch runs: documents many source files concurrently.
//!
//! Each file owns its own transform state, so files never share mutable data
//! and may be processed in any interleaving. The report keeps the order in
//! which files were requested.
//!
//! # Error Handling
//! Fail-fast: the first failing file aborts the run and its error is returned.
//! Files already written stay on disk.

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::contract::{DocError, Documenter};

/// Outcome of a batch run, one entry per requested file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    /// Destination relative to the working directory when it lies below it.
    pub destination: PathBuf,
    pub bytes_written: u64,
}

impl RunReport {
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes_written).sum()
    }
}

/// Documents every file in `files`, resolved against `cwd`.
pub async fn run<D>(cwd: &Path, files: &[PathBuf], documenter: &D) -> Result<RunReport, DocError>
where
    D: Documenter + ?Sized,
{
    info!(cwd = %cwd.display(), files = files.len(), "[RUN] Starting documentation run");

    let jobs = files.iter().map(|file| {
        let source = cwd.join(file);
        async move {
            match documenter.document(source.clone()).await {
                Ok(written) => Ok(written),
                Err(e) => {
                    error!(source = %source.display(), error = %e, "[RUN][ERROR] Documenting file failed");
                    Err(e)
                }
            }
        }
    });
    let written = try_join_all(jobs).await?;

    let files = written
        .into_iter()
        .map(|doc| FileReport {
            destination: relative_to(cwd, &doc.destination),
            source: doc.source,
            bytes_written: doc.bytes_written,
        })
        .collect();
    let report = RunReport { files };
    info!(
        files = report.files.len(),
        bytes = report.total_bytes(),
        "[RUN] Documentation run complete"
    );
    Ok(report)
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(base).unwrap_or(path).to_path_buf()
}
