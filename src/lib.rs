pub mod assembler;
pub mod config;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod init;
pub mod instructions;
pub mod memory;

pub mod isa {
    pub mod mips; // MIPS I subset: add/sub/and/or/slt/lw/sw/beq
}

pub use assembler::{assemble_str, Assembler, AssemblySummary};
pub use config::AsmConfig;
pub use encoder::{Instruction, Word};
pub use error::{AsmError, EncodeError};
pub use fields::{decode_immediate, encode_immediate, encode_register, Field, Register};
pub use init::{initialize, ImageKinds, MemoryImages};
pub use memory::{Layout, MemoryImage, WordStore};
