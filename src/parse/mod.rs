pub mod fence;

pub use fence::{scan_snippets, FenceScanner, FenceState};
