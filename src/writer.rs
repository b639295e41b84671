use crate::error::{ExtractError, Result};
use crate::types::{OutputFile, Snippet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prefix of the wrapper line; the namespace name is `n` plus the padded index.
const NAMESPACE_OPEN: &str = "export namespace n";
const NAMESPACE_CLOSE: &str = "}";

/// Two-digit zero padded. Indices past 99 widen rather than truncate.
pub fn format_index(index: usize) -> String {
    format!("{:02}", index)
}

/// True once a run of `count` snippets reaches index 100.
pub fn index_widens(count: usize) -> bool {
    count > 100
}

pub fn snippet_path(out_dir: &Path, prefix: &str, extension: &str, index: usize) -> PathBuf {
    out_dir.join(format!("{}{}.{}", prefix, format_index(index), extension))
}

/// Full file body: wrapper line, captured lines verbatim, closing brace with no newline.
pub fn render_snippet(index: usize, snippet: &Snippet) -> String {
    let mut out = format!("{}{} {{\n", NAMESPACE_OPEN, format_index(index));
    for line in &snippet.lines {
        out.push_str(line);
    }
    out.push_str(NAMESPACE_CLOSE);
    out
}

fn write_one(path: &Path, body: &str) -> std::io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    f.write_all(body.as_bytes())?;
    f.flush()
}

/// Write every snippet to `<out_dir>/<prefix><NN>.<extension>`, overwriting.
pub fn write_snippets(
    snippets: &[Snippet],
    out_dir: &Path,
    prefix: &str,
    extension: &str,
) -> Result<Vec<OutputFile>> {
    if index_widens(snippets.len()) {
        warn!(
            count = snippets.len(),
            "indices past 99 widen beyond two digits"
        );
    }

    let mut written = Vec::with_capacity(snippets.len());
    for (index, snippet) in snippets.iter().enumerate() {
        let path = snippet_path(out_dir, prefix, extension, index);
        write_one(&path, &render_snippet(index, snippet)).map_err(|source| {
            ExtractError::WriteSnippet {
                path: path.clone(),
                source,
            }
        })?;
        debug!(path = %path.display(), lines = snippet.line_count(), "wrote snippet");

        written.push(OutputFile {
            index,
            path,
            lines: snippet.line_count(),
            terminated: snippet.terminated,
        });
    }
    Ok(written)
}
