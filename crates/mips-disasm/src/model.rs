use anyhow::{Context, Result};
use std::path::Path;

use mips_asm::{MemoryImage, Word, WordStore};

/// Bytes per word slot when slots are shown as byte addresses.
pub const WORD_BYTES: u32 = 4;

#[derive(Debug, Clone)]
pub struct Image {
    pub name: String,
    pub mem: MemoryImage,
}

pub fn load_image(path: &Path) -> Result<Image> {
    let mem = MemoryImage::load(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Image { name, mem })
}

impl Image {
    pub fn word(&self, slot: usize) -> Option<Word> {
        self.mem.read_word(slot).ok()
    }

    pub fn len(&self) -> usize {
        self.mem.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots to list: everything, or up to the last non-zero word.
    pub fn span(&self, all: bool) -> usize {
        if all { self.len() } else { self.mem.used().len() }
    }
}

pub fn slot_addr(slot: usize) -> u32 {
    slot as u32 * WORD_BYTES
}
