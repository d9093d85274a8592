use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AsmError, Result};
use crate::memory::Layout;

pub const INSTRUCTION_WORDS: usize = 256;
pub const DATA_WORDS: usize = 256;
pub const REGISTER_WORDS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub instruction_words: usize,
    pub data_words: usize,
    pub register_words: usize,
    pub layout: Layout,
    pub instruction_file: String,
    pub data_file: String,
    pub register_file: String,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            instruction_words: INSTRUCTION_WORDS,
            data_words: DATA_WORDS,
            register_words: REGISTER_WORDS,
            layout: Layout::Lines,
            instruction_file: "instruction.mem".into(),
            data_file: "data.mem".into(),
            register_file: "registers.mem".into(),
        }
    }
}

impl AsmConfig {
    /// Missing keys fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AsmError::io(path, e))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, words) in [
            ("instruction_words", self.instruction_words),
            ("data_words", self.data_words),
            ("register_words", self.register_words),
        ] {
            if words == 0 {
                return Err(AsmError::InvalidConfig {
                    reason: format!("{name} must be non-zero"),
                });
            }
        }
        for (name, file) in [
            ("instruction_file", &self.instruction_file),
            ("data_file", &self.data_file),
            ("register_file", &self.register_file),
        ] {
            if file.trim().is_empty() {
                return Err(AsmError::InvalidConfig {
                    reason: format!("{name} must not be empty"),
                });
            }
        }
        Ok(())
    }
}
