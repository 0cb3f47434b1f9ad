//! Streaming documents: feeds a line source through the transform and writes
//! the result next to the source file.
//!
//! [`Document`] is the only driver of a file's transform. It pulls lines in
//! order, each exactly once, and runs [`finalize`] exactly once when the
//! source is exhausted. Nothing is buffered beyond the output of the current
//! line, so files of any size stream in constant memory.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Lines, Write};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::TransformConfig;
use crate::contract::{DocError, Documenter, WrittenDoc};
use crate::transform::{classify, finalize, ClassifierState};

/// Lazy Markdown rendering of a line source.
///
/// Yields `Err` as soon as the source does and stops there, without a footer.
pub struct Document<I> {
    lines: I,
    config: TransformConfig,
    state: ClassifierState,
    pending: VecDeque<String>,
    done: bool,
}

impl<I> Document<I> {
    pub fn new(lines: I, config: TransformConfig) -> Self {
        Self {
            lines,
            config,
            state: ClassifierState::default(),
            pending: VecDeque::with_capacity(4),
            done: false,
        }
    }
}

impl<I, E> Iterator for Document<I>
where
    I: Iterator<Item = Result<String, E>>,
{
    type Item = Result<String, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                Some(Ok(line)) => {
                    let (out, next) = classify(&line, self.state, &self.config);
                    self.state = next;
                    self.pending.extend(out);
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    self.pending.extend(finalize(self.state, &self.config));
                }
            }
        }
    }
}

impl<I, E> FusedIterator for Document<I> where I: Iterator<Item = Result<String, E>> {}

/// Renders in-memory lines. Infallible counterpart of [`open_document`].
pub fn document_lines<I, S>(lines: I, config: TransformConfig) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let source = lines.into_iter().map(|line| Ok::<_, Infallible>(line.into()));
    Document::new(source, config).map(|line| match line {
        Ok(line) => line,
        Err(never) => match never {},
    })
}

const BOM: char = '\u{feff}';

/// Lines of a file on disk, without terminators (`\n` and `\r\n` both split).
/// A byte order mark at the start of the file is removed.
pub struct SourceLines {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl SourceLines {
    pub fn open(path: &Path) -> Result<Self, DocError> {
        let file = File::open(path).map_err(|e| {
            error!(error = ?e, path = %path.display(), "Failed to open source file");
            DocError::Io(e)
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl Iterator for SourceLines {
    type Item = Result<String, DocError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_no += 1;
        let first = self.line_no == 1;
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => DocError::InvalidUtf8 {
                path: self.path.clone(),
                line: self.line_no,
            },
            _ => DocError::Io(e),
        });
        Some(line.map(|line| strip_bom(line, first)))
    }
}

/// Drops a UTF-8 byte order mark from the first line of a file.
fn strip_bom(line: String, first: bool) -> String {
    match line.strip_prefix(BOM) {
        Some(rest) if first => rest.to_string(),
        _ => line,
    }
}

/// Opens `path` and returns its lazy Markdown rendering.
pub fn open_document(
    path: &Path,
    default_language: &str,
) -> Result<Document<SourceLines>, DocError> {
    let lines = SourceLines::open(path)?;
    Ok(Document::new(lines, TransformConfig::for_path(path, default_language)))
}

/// The Markdown file sits next to its source: `index.js` -> `index.js.md`.
pub fn output_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".md");
    PathBuf::from(name)
}

/// Streams the Markdown for `path` into [`output_path`], replacing any
/// previous file. The destination is only created once the source opened.
pub fn write_document(path: &Path, default_language: &str) -> Result<WrittenDoc, DocError> {
    info!(path = %path.display(), "Documenting source file");
    let document = open_document(path, default_language)?;
    let destination = output_path(path);

    let file = File::create(&destination).map_err(|e| {
        error!(error = ?e, path = %destination.display(), "Failed to create Markdown file");
        DocError::Io(e)
    })?;
    let mut writer = BufWriter::new(file);
    let mut bytes_written = 0u64;
    for line in document {
        let line = line.map_err(|e| {
            error!(error = %e, path = %path.display(), "Failed to read source line");
            e
        })?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        bytes_written += line.len() as u64 + 1;
    }
    writer.flush()?;

    debug!(path = %destination.display(), bytes_written, "Flushed Markdown file");
    info!(
        source = %path.display(),
        destination = %destination.display(),
        bytes_written,
        "Wrote Markdown file"
    );
    Ok(WrittenDoc {
        source: path.to_path_buf(),
        destination,
        bytes_written,
    })
}

/// Writes documents to disk, one blocking task per file.
#[derive(Debug, Clone)]
pub struct FileDocumenter {
    default_language: String,
}

impl FileDocumenter {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
        }
    }
}

#[async_trait::async_trait]
impl Documenter for FileDocumenter {
    async fn document(&self, source: PathBuf) -> Result<WrittenDoc, DocError> {
        let default_language = self.default_language.clone();
        tokio::task::spawn_blocking(move || write_document(&source, &default_language)).await?
    }
}
