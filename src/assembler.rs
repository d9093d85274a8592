//! Single-pass driver: source lines -> sequential instruction-memory slots.

use std::io::BufRead;

use serde::Serialize;

use crate::encoder::{encode_tokens, Word};
use crate::error::{AsmError, Result};
use crate::memory::WordStore;

pub const COMMENT_MARKER: char = '#';

/// Split a line on whitespace, commas and parentheses.
/// `lw $1, 4($2)` -> `["lw", "$1", "4", "$2"]`.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Blank and whole-line `#` comments carry no instruction.
pub fn is_skippable(line: &str) -> bool {
    let t = line.trim();
    t.is_empty() || t.starts_with(COMMENT_MARKER)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblySummary {
    pub words: usize,
    pub lines: usize,
    pub skipped: usize,
}

/// Owns the write cursor into an instruction image for one assembly run.
pub struct Assembler<'m, S: WordStore> {
    image: &'m mut S,
    cursor: usize,
    summary: AssemblySummary,
}

impl<'m, S: WordStore> Assembler<'m, S> {
    pub fn new(image: &'m mut S) -> Self {
        Self {
            image,
            cursor: 0,
            summary: AssemblySummary::default(),
        }
    }

    /// Next slot to be written.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn summary(&self) -> AssemblySummary {
        self.summary
    }

    /// Encode one line (1-based `line_no`) and store it at the cursor.
    /// Returns `None` for skipped lines.
    pub fn assemble_line(&mut self, line_no: usize, line: &str) -> Result<Option<Word>> {
        self.summary.lines += 1;
        if is_skippable(line) {
            self.summary.skipped += 1;
            tracing::trace!(line = line_no, "skipped");
            return Ok(None);
        }

        let tokens = tokenize(line.trim());
        let word = encode_tokens(&tokens).map_err(|source| AsmError::Line {
            line_no,
            line: line.trim().to_string(),
            source,
        })?;

        let capacity = self.image.capacity();
        if self.cursor >= capacity {
            return Err(AsmError::ImageOverflow { line_no, capacity });
        }
        self.image.write_word(self.cursor, word)?;
        tracing::debug!(line = line_no, slot = self.cursor, word = %word, "encoded");
        self.cursor += 1;
        self.summary.words += 1;
        Ok(Some(word))
    }

    /// Stops at the first failing line; words already written stay in the image.
    pub fn assemble<R: BufRead>(&mut self, source: R) -> Result<AssemblySummary> {
        for (i, line) in source.lines().enumerate() {
            let line = line.map_err(|e| AsmError::SourceRead { line_no: i + 1, source: e })?;
            self.assemble_line(i + 1, &line)?;
        }
        tracing::info!(
            words = self.summary.words,
            lines = self.summary.lines,
            skipped = self.summary.skipped,
            "assembly finished"
        );
        Ok(self.summary)
    }
}

pub fn assemble_str<S: WordStore>(source: &str, image: &mut S) -> Result<AssemblySummary> {
    Assembler::new(image).assemble(source.as_bytes())
}
