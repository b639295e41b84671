use serde::Serialize;
use std::path::PathBuf;

/// Lines captured from one tagged fenced block, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    /// Each line keeps its original line ending.
    pub lines: Vec<String>,
    /// False when the document ended before the closing fence.
    pub terminated: bool,
}

impl Snippet {
    pub fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// One generated file on disk
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutputFile {
    pub index: usize,
    pub path: PathBuf,
    pub lines: usize,
    pub terminated: bool,
}

/// What a single extraction run did
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub removed: usize,
    pub failed_removals: usize,
    pub written: Vec<OutputFile>,
}
