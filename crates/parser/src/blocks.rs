//! Declaration block scanning
//!
//! `BlockIter` walks comment-stripped document text and yields the raw
//! substring of each `rpc` or `message` declaration in document order.
//! A block runs from its introducing keyword through the brace that
//! closes it (brace depth tracked), or through the terminating `;` for
//! the brace-less rpc form. An opening construct that never closes
//! before end-of-document is discarded and recorded as a warning rather
//! than failing the whole scan; the scan resumes right after the broken
//! keyword so declarations later in the document still surface.

use thiserror::Error;

/// Non-fatal findings surfaced alongside a successful parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("unterminated `{keyword}` declaration near `{context}` was skipped")]
    UnterminatedBlock { keyword: String, context: String },
}

/// Lazy iterator over declaration blocks for one keyword.
///
/// Restartable by constructing a new iterator over the same text; the
/// scan itself holds no state beyond the current offset.
pub struct BlockIter<'a> {
    text: &'a str,
    keyword: &'static str,
    allow_semicolon: bool,
    pos: usize,
    warnings: Vec<ParseWarning>,
}

impl<'a> BlockIter<'a> {
    /// Iterate over `rpc` declaration blocks (braced or `;`-terminated)
    pub fn rpc(text: &'a str) -> Self {
        Self::new(text, "rpc", true)
    }

    /// Iterate over `message` declaration blocks (braced only)
    pub fn message(text: &'a str) -> Self {
        Self::new(text, "message", false)
    }

    fn new(text: &'a str, keyword: &'static str, allow_semicolon: bool) -> Self {
        Self {
            text,
            keyword,
            allow_semicolon,
            pos: 0,
            warnings: Vec::new(),
        }
    }

    /// Warnings recorded so far; complete once the iterator is drained
    pub fn take_warnings(&mut self) -> Vec<ParseWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Find the next keyword occurrence at a word boundary
    fn next_keyword(&self, from: usize) -> Option<usize> {
        let mut search = from;
        while let Some(rel) = self.text[search..].find(self.keyword) {
            let start = search + rel;
            let end = start + self.keyword.len();

            let boundary_before = start == 0
                || self.text[..start]
                    .chars()
                    .next_back()
                    .is_some_and(|c| !c.is_alphanumeric() && c != '_');
            let boundary_after = self.text[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_whitespace());

            if boundary_before && boundary_after {
                return Some(start);
            }
            search = end;
        }
        None
    }

    fn record_unterminated(&mut self, start: usize) {
        let context: String = self.text[start..]
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(40)
            .collect();
        self.warnings.push(ParseWarning::UnterminatedBlock {
            keyword: self.keyword.to_string(),
            context: context.trim_end().to_string(),
        });
    }
}

impl<'a> Iterator for BlockIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        'scan: while let Some(start) = self.next_keyword(self.pos) {
            let mut depth = 0usize;
            let mut opened = false;

            for (rel, c) in self.text[start..].char_indices() {
                match c {
                    '{' => {
                        depth += 1;
                        opened = true;
                    }
                    '}' if opened => {
                        depth -= 1;
                        if depth == 0 {
                            let end = start + rel + 1;
                            self.pos = end;
                            return Some(&self.text[start..end]);
                        }
                    }
                    ';' if !opened => {
                        let end = start + rel + 1;
                        self.pos = end;
                        if self.allow_semicolon {
                            return Some(&self.text[start..end]);
                        }
                        // A `;` before any `{` is not a block for this
                        // keyword; keep scanning from past it.
                        continue 'scan;
                    }
                    _ => {}
                }
            }

            // Ran off the end of the document with the block still
            // open. Skip just the keyword and keep scanning so later
            // declarations inside the broken span still surface.
            self.record_unterminated(start);
            self.pos = start + self.keyword.len();
        }
        None
    }
}
