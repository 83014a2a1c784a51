//! File and directory conversion.
//!
//! Thin I/O wrappers around [`convert`](crate::convert): open the line
//! source, create the sink, wrap the fragment in the document shell.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::document::{self, DocumentOptions};
use crate::error::{Error, Result};
use crate::{ConvertStats, Options, convert};

/// Extension of files picked up by [`convert_dir`].
pub const MARKDOWN_EXTENSION: &str = "md";

/// Extension given to outputs of [`convert_dir`].
pub const HTML_EXTENSION: &str = "html";

/// Convert a line source into `sink`, optionally inside a document shell.
///
/// With `document` set to `None` only the body fragment is written.
pub fn convert_document<R: BufRead, W: Write>(
    reader: R,
    mut sink: W,
    options: &Options,
    document: Option<&DocumentOptions>,
) -> Result<ConvertStats> {
    if let Some(document) = document {
        document::write_prologue(&mut sink, document).map_err(Error::Write)?;
    }
    let stats = convert(reader, &mut sink, options)?;
    if document.is_some() {
        document::write_epilogue(&mut sink).map_err(Error::Write)?;
    }
    sink.flush().map_err(Error::Write)?;
    Ok(stats)
}

/// Convert one Markdown file into one HTML file.
///
/// An empty `title` in `document` is replaced by the input path.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &Options,
    document: Option<&DocumentOptions>,
) -> Result<ConvertStats> {
    let source = File::open(input).map_err(|source| Error::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let sink = File::create(output).map_err(|source| Error::Create {
        path: output.to_path_buf(),
        source,
    })?;

    let document = document.map(|document| titled_for(document, input));
    let stats = convert_document(
        BufReader::new(source),
        BufWriter::new(sink),
        options,
        document.as_ref(),
    )?;

    log::debug!(
        "converted {} -> {} ({} lines, {} bytes)",
        input.display(),
        output.display(),
        stats.lines,
        stats.bytes_written
    );
    Ok(stats)
}

/// A file converted by [`convert_dir`].
#[derive(Debug)]
pub struct Converted {
    /// Markdown source.
    pub input: PathBuf,
    /// HTML file written next to it.
    pub output: PathBuf,
    /// Counters from the conversion.
    pub stats: ConvertStats,
}

/// Outcome of a directory conversion. One failure does not stop the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files converted, in path order.
    pub converted: Vec<Converted>,
    /// Inputs that failed, with the error for each.
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    /// Whether every file converted.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Markdown files directly inside `dir`, sorted by path.
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let read_dir_error = |source: io::Error| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && is_markdown(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Convert every Markdown file directly inside `dir` to a sibling `.html`.
///
/// Not recursive. An empty `title` in `document` becomes each input's path.
pub fn convert_dir(
    dir: &Path,
    options: &Options,
    document: Option<&DocumentOptions>,
) -> Result<BatchReport> {
    let files = markdown_files(dir)?;
    log::debug!("{} markdown files in {}", files.len(), dir.display());

    let mut report = BatchReport::default();
    for input in files {
        let output = input.with_extension(HTML_EXTENSION);
        match convert_file(&input, &output, options, document) {
            Ok(stats) => report.converted.push(Converted {
                input,
                output,
                stats,
            }),
            Err(err) => {
                log::warn!("skipping {}: {err}", input.display());
                report.failed.push((input, err));
            }
        }
    }
    Ok(report)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

fn titled_for(document: &DocumentOptions, input: &Path) -> DocumentOptions {
    let mut document = document.clone();
    if document.title.is_empty() {
        document.title = input.display().to_string();
    }
    document
}
