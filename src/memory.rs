use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::encoder::{Word, WORD_BITS};
use crate::error::{AsmError, Result};

/// Flat word-addressed store the assembler writes into.
pub trait WordStore {
    fn capacity(&self) -> usize;
    fn read_word(&self, slot: usize) -> Result<Word>;
    fn write_word(&mut self, slot: usize, word: Word) -> Result<()>;
}

/// How words are laid out in a `.mem` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One 32-digit binary word per line.
    #[default]
    Lines,
    /// 32-digit words back to back, no separator.
    Packed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryImage {
    pub words: Vec<Word>,
}

impl MemoryImage {
    pub fn zeroed(capacity: usize) -> Self {
        Self {
            words: vec![Word::default(); capacity],
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn is_zeroed(&self) -> bool {
        self.words.iter().all(|w| w.0 == 0)
    }

    /// Slots up to and including the last non-zero word.
    pub fn used(&self) -> &[Word] {
        let end = self
            .words
            .iter()
            .rposition(|w| w.0 != 0)
            .map_or(0, |i| i + 1);
        &self.words[..end]
    }

    pub fn to_text(&self, layout: Layout) -> String {
        let mut out = String::with_capacity(self.words.len() * (WORD_BITS + 1));
        for w in &self.words {
            let _ = write!(out, "{w}");
            if layout == Layout::Lines {
                out.push('\n');
            }
        }
        out
    }

    /// Parse either layout; a newline anywhere means [`Layout::Lines`].
    /// Only the final newline may be omitted; blank lines are errors.
    pub fn from_text(text: &str) -> Result<Self> {
        let words: Vec<&str> = if text.contains('\n') {
            let body = text.strip_suffix('\n').unwrap_or(text);
            body.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect()
        } else {
            let t = text.trim_end();
            if t.len() % WORD_BITS != 0 || !t.is_ascii() {
                return Err(AsmError::ImageFormat {
                    reason: format!("packed image length {} is not a multiple of {WORD_BITS}", t.len()),
                });
            }
            (0..t.len()).step_by(WORD_BITS).map(|i| &t[i..i + WORD_BITS]).collect()
        };

        let mut out = Vec::with_capacity(words.len());
        for (slot, digits) in words.iter().enumerate() {
            if digits.len() != WORD_BITS || !digits.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(AsmError::ImageFormat {
                    reason: format!("slot {slot}: `{digits}` is not a {WORD_BITS}-digit binary word"),
                });
            }
            let v = u32::from_str_radix(digits, 2).map_err(|e| AsmError::ImageFormat {
                reason: format!("slot {slot}: {e}"),
            })?;
            out.push(Word(v));
        }
        Ok(Self { words: out })
    }

    pub fn save(&self, path: &Path, layout: Layout) -> Result<()> {
        std::fs::write(path, self.to_text(layout)).map_err(|e| AsmError::io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AsmError::io(path, e))?;
        Self::from_text(&text)
    }

    /// Like [`MemoryImage::load`] but the word count must equal `capacity`.
    pub fn load_exact(path: &Path, capacity: usize) -> Result<Self> {
        let img = Self::load(path)?;
        if img.words.len() != capacity {
            return Err(AsmError::ImageFormat {
                reason: format!(
                    "{}: expected {capacity} words, found {}",
                    path.display(),
                    img.words.len()
                ),
            });
        }
        Ok(img)
    }
}

impl WordStore for MemoryImage {
    fn capacity(&self) -> usize {
        self.words.len()
    }

    fn read_word(&self, slot: usize) -> Result<Word> {
        self.words.get(slot).copied().ok_or(AsmError::SlotOutOfRange {
            slot,
            capacity: self.words.len(),
        })
    }

    fn write_word(&mut self, slot: usize, word: Word) -> Result<()> {
        let capacity = self.words.len();
        let w = self
            .words
            .get_mut(slot)
            .ok_or(AsmError::SlotOutOfRange { slot, capacity })?;
        *w = word;
        Ok(())
    }
}
