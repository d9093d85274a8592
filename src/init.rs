//! Zero-filled instruction, data and register-file images.

use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::AsmConfig;
use crate::error::{AsmError, Result};
use crate::memory::MemoryImage;

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageKinds: u8 {
const INSTRUCTION = 1 << 0;
const DATA = 1 << 1;
const REGISTERS = 1 << 2;
}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryImages {
    pub instruction: MemoryImage,
    pub data: MemoryImage,
    pub registers: MemoryImage,
}

impl MemoryImages {
    pub fn zeroed(cfg: &AsmConfig) -> Self {
        Self {
            instruction: MemoryImage::zeroed(cfg.instruction_words),
            data: MemoryImage::zeroed(cfg.data_words),
            registers: MemoryImage::zeroed(cfg.register_words),
        }
    }

    /// Write the selected images into `dir`, replacing existing files.
    pub fn persist(&self, dir: &Path, cfg: &AsmConfig, kinds: ImageKinds) -> Result<()> {
        let parts = [
            (ImageKinds::INSTRUCTION, &self.instruction, &cfg.instruction_file),
            (ImageKinds::DATA, &self.data, &cfg.data_file),
            (ImageKinds::REGISTERS, &self.registers, &cfg.register_file),
        ];
        for (kind, image, file) in parts {
            if !kinds.contains(kind) {
                continue;
            }
            let path = dir.join(file);
            image.save(&path, cfg.layout)?;
            tracing::debug!(path = %path.display(), words = image.words.len(), "image written");
        }
        Ok(())
    }
}

/// Create `dir` if needed and write all three images zero-filled.
pub fn initialize(dir: &Path, cfg: &AsmConfig) -> Result<MemoryImages> {
    cfg.validate()?;
    std::fs::create_dir_all(dir).map_err(|e| AsmError::io(dir, e))?;
    let images = MemoryImages::zeroed(cfg);
    images.persist(dir, cfg, ImageKinds::all())?;
    tracing::info!(
        dir = %dir.display(),
        instruction = cfg.instruction_words,
        data = cfg.data_words,
        registers = cfg.register_words,
        "memory images initialized"
    );
    Ok(images)
}
