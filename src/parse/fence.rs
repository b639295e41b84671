use crate::types::Snippet;
use tracing::warn;

/// Bare fence. Any line containing it closes the current block.
pub const FENCE: &str = "```";

/// Where the scanner is relative to a tagged block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceState {
    /// Lines are ignored.
    #[default]
    Outside,
    /// Lines are appended to the most recently opened snippet.
    Inside,
}

/// Line-driven state machine collecting tagged fenced blocks.
///
/// Transitions, checked in this order for every line:
///
/// 1. the line contains the tagged opener (e.g. "```typescript"): a new empty
///    snippet is started and the state becomes `Inside`, whatever it was before;
/// 2. the line contains a bare fence: the state becomes `Outside`. This also
///    swallows openers carrying another tag, so their bodies are never captured;
/// 3. otherwise the line is captured if the state is `Inside`.
///
/// The tagged opener contains the bare fence, so the order above is what keeps
/// an opener from being read as a close.
#[derive(Debug)]
pub struct FenceScanner {
    opener: String,
    state: FenceState,
    snippets: Vec<Snippet>,
}

impl FenceScanner {
    pub fn new(lang: &str) -> Self {
        Self {
            opener: format!("{FENCE}{lang}"),
            state: FenceState::Outside,
            snippets: Vec::new(),
        }
    }

    pub fn state(&self) -> FenceState {
        self.state
    }

    /// Feed one line, including its line ending.
    pub fn feed(&mut self, line: &str) {
        if line.contains(&self.opener) {
            self.snippets.push(Snippet::default());
            self.state = FenceState::Inside;
        } else if line.contains(FENCE) {
            if self.state == FenceState::Inside {
                if let Some(current) = self.snippets.last_mut() {
                    current.terminated = true;
                }
            }
            self.state = FenceState::Outside;
        } else if self.state == FenceState::Inside {
            if let Some(current) = self.snippets.last_mut() {
                current.push_line(line);
            }
        }
    }

    /// Consume the scanner. A block still open at end of input is kept with
    /// whatever lines it captured and `terminated == false`.
    pub fn finish(self) -> Vec<Snippet> {
        if self.state == FenceState::Inside {
            warn!(
                index = self.snippets.len().saturating_sub(1),
                "document ended inside a fenced block; keeping captured lines"
            );
        }
        self.snippets
    }
}

/// Scan a whole document. Line endings (`\n` or `\r\n`) are preserved in the
/// captured lines.
pub fn scan_snippets(document: &str, lang: &str) -> Vec<Snippet> {
    let mut scanner = FenceScanner::new(lang);
    for line in document.split_inclusive('\n') {
        scanner.feed(line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(snippets: &[Snippet]) -> Vec<String> {
        snippets.iter().map(|s| s.lines.concat()).collect()
    }

    #[test]
    fn collects_tagged_blocks_in_order() {
        let doc = "# Slides\n\
                   ```typescript\nconst a = 1;\n```\n\
                   text\n\
                   ```python\nx = 1\n```\n\
                   ```typescript\nconst b = 2;\nconst c = 3;\n```\n";
        let snippets = scan_snippets(doc, "typescript");
        assert_eq!(
            bodies(&snippets),
            vec!["const a = 1;\n", "const b = 2;\nconst c = 3;\n"]
        );
        assert!(snippets.iter().all(|s| s.terminated));
    }

    #[test]
    fn other_languages_yield_nothing() {
        let doc = "```python\nprint('hi')\n```\n```rust\nfn main() {}\n```\n";
        assert!(scan_snippets(doc, "typescript").is_empty());
    }

    #[test]
    fn empty_block_still_counts() {
        let snippets = scan_snippets("```typescript\n```\n", "typescript");
        assert_eq!(snippets.len(), 1);
        assert!(snippets[0].lines.is_empty());
        assert!(snippets[0].terminated);
    }

    #[test]
    fn bare_fence_always_closes_when_inside() {
        let mut scanner = FenceScanner::new("typescript");
        scanner.feed("```typescript\n");
        assert_eq!(scanner.state(), FenceState::Inside);
        scanner.feed("```\n");
        assert_eq!(scanner.state(), FenceState::Outside);
    }

    #[test]
    fn bare_fence_outside_is_a_no_op() {
        let mut scanner = FenceScanner::new("typescript");
        scanner.feed("```\n");
        scanner.feed("not captured\n");
        assert_eq!(scanner.state(), FenceState::Outside);
        assert!(scanner.finish().is_empty());
    }

    #[test]
    fn tagged_opener_inside_starts_new_snippet() {
        let doc = "```typescript\none\n```typescript\ntwo\n```\n";
        let snippets = scan_snippets(doc, "typescript");
        assert_eq!(bodies(&snippets), vec!["one\n", "two\n"]);
        assert!(!snippets[0].terminated);
        assert!(snippets[1].terminated);
    }

    #[test]
    fn unterminated_block_keeps_captured_lines() {
        let snippets = scan_snippets("```typescript\nlet x = 1;\nlet y = 2;", "typescript");
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].lines, vec!["let x = 1;\n", "let y = 2;"]);
        assert!(!snippets[0].terminated);
    }

    #[test]
    fn crlf_line_endings_are_preserved() {
        let snippets = scan_snippets("```typescript\r\nconst a = 1;\r\n```\r\n", "typescript");
        assert_eq!(snippets[0].lines, vec!["const a = 1;\r\n"]);
    }

    #[test]
    fn markers_match_anywhere_in_line() {
        let doc = "> ```typescript\nquoted\n> ```\n";
        assert_eq!(bodies(&scan_snippets(doc, "typescript")), vec!["quoted\n"]);
    }

    #[test]
    fn custom_lang_tag() {
        let doc = "```typescript\nts\n```\n```rust\nlet r = 1;\n```\n";
        assert_eq!(bodies(&scan_snippets(doc, "rust")), vec!["let r = 1;\n"]);
    }
}
