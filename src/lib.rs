//! Pulls fenced code blocks of one language out of a markdown document and
//! writes each to its own file, wrapped in a uniquely named namespace so an
//! editor does not see colliding declarations across snippets.

pub mod config;
pub mod error;
pub mod logging;
pub mod parse;
pub mod reset;
pub mod types;
pub mod writer;

use config::ExtractConfig;
use error::{ExtractError, Result};
use std::fs;
use tracing::info;
use types::RunReport;

/// Clear the output directory, scan the source, and write one file per snippet.
pub fn run(config: &ExtractConfig) -> Result<RunReport> {
    let stats = reset::clear_output_dir(&config.out_dir, &config.placeholder)?;

    let document =
        fs::read_to_string(&config.source).map_err(|source| ExtractError::ReadSource {
            path: config.source.clone(),
            source,
        })?;
    let snippets = parse::scan_snippets(&document, &config.lang);

    let written = writer::write_snippets(
        &snippets,
        &config.out_dir,
        &config.file_prefix,
        &config.extension,
    )?;

    info!(
        source = %config.source.display(),
        out_dir = %config.out_dir.display(),
        removed = stats.removed,
        written = written.len(),
        "extracted {} snippet(s)",
        written.len()
    );

    Ok(RunReport {
        removed: stats.removed,
        failed_removals: stats.failed,
        written,
    })
}
