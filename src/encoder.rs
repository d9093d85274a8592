//! Mnemonic + operands -> 32-bit instruction word.

use std::fmt;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;
use crate::fields::{
    parse_immediate, parse_register, Field, Register, FUNCT_BITS, IMM_BITS,
    OPCODE_BITS, SHAMT_BITS,
};
use crate::instructions::{Format, MemOp, Mnemonic, ROp, OPCODE_BEQ, OPCODE_RTYPE};

pub const WORD_BITS: usize = 32;

/// One encoded instruction (or any raw image slot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word(pub u32);

impl Word {
    pub fn opcode(self) -> u8 {
        (self.0 >> 26) as u8
    }
    pub fn rs(self) -> u8 {
        ((self.0 >> 21) & 0x1F) as u8
    }
    pub fn rt(self) -> u8 {
        ((self.0 >> 16) & 0x1F) as u8
    }
    pub fn rd(self) -> u8 {
        ((self.0 >> 11) & 0x1F) as u8
    }
    pub fn shamt(self) -> u8 {
        ((self.0 >> 6) & 0x1F) as u8
    }
    pub fn funct(self) -> u8 {
        (self.0 & 0x3F) as u8
    }
    pub fn imm16(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032b}", self.0)
    }
}

/// Instruction by format. Register fields are named after their MIPS slots:
/// `rs`/`rt` are sources, `rd` the R-type destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    RType {
        op: ROp,
        rd: Register,
        rs: Register,
        rt: Register,
    },
    Memory {
        op: MemOp,
        rt: Register,
        offset: i16,
        base: Register,
    },
    Branch {
        rs: Register,
        rt: Register,
        offset: i16,
    },
}

impl Instruction {
    /// Build from a mnemonic token and operand tokens in textual order.
    pub fn parse(mnemonic: &str, operands: &[&str]) -> Result<Self, EncodeError> {
        let mn = Mnemonic::lookup(mnemonic)?;
        let format = mn.format();
        let want = format.operands();
        if operands.len() != want {
            let qty = if operands.len() < want { "too few" } else { "too many" };
            return Err(EncodeError::malformed(format!(
                "{qty} operands for `{}`: expected {want} ({}), found {}",
                mn.name(),
                format.syntax(),
                operands.len()
            )));
        }
        let inst = match mn {
            Mnemonic::R(op) => Instruction::RType {
                op,
                rd: parse_register(operands[0])?,
                rs: parse_register(operands[1])?,
                rt: parse_register(operands[2])?,
            },
            Mnemonic::Mem(op) => Instruction::Memory {
                op,
                rt: parse_register(operands[0])?,
                offset: parse_immediate(operands[1])?,
                base: parse_register(operands[2])?,
            },
            Mnemonic::Beq => Instruction::Branch {
                rs: parse_register(operands[0])?,
                rt: parse_register(operands[1])?,
                offset: parse_immediate(operands[2])?,
            },
        };
        Ok(inst)
    }

    pub fn mnemonic(&self) -> Mnemonic {
        match *self {
            Instruction::RType { op, .. } => Mnemonic::R(op),
            Instruction::Memory { op, .. } => Mnemonic::Mem(op),
            Instruction::Branch { .. } => Mnemonic::Beq,
        }
    }

    pub fn format(&self) -> Format {
        self.mnemonic().format()
    }

    /// Fields in word order, most significant first.
    pub fn fields(&self) -> Vec<Field> {
        match *self {
            Instruction::RType { op, rd, rs, rt } => vec![
                Field::new(OPCODE_RTYPE as u32, OPCODE_BITS),
                rs.field(),
                rt.field(),
                rd.field(),
                Field::new(0, SHAMT_BITS),
                Field::new(op.funct() as u32, FUNCT_BITS),
            ],
            Instruction::Memory {
                op,
                rt,
                offset,
                base,
            } => vec![
                Field::new(op.opcode() as u32, OPCODE_BITS),
                base.field(),
                rt.field(),
                imm_field(offset),
            ],
            Instruction::Branch { rs, rt, offset } => vec![
                Field::new(OPCODE_BEQ as u32, OPCODE_BITS),
                rs.field(),
                rt.field(),
                imm_field(offset),
            ],
        }
    }

    pub fn encode(&self) -> Word {
        pack(&self.fields())
    }
}

fn imm_field(offset: i16) -> Field {
    Field::new(offset as u16 as u32, IMM_BITS)
}

/// Concatenate fields MSB-first into one word.
fn pack(fields: &[Field]) -> Word {
    let mut bits: BitVec<u32, Msb0> = BitVec::with_capacity(WORD_BITS);
    for f in fields {
        bits.extend_from_bitslice(f.bits());
    }
    debug_assert_eq!(bits.len(), WORD_BITS);
    Word(bits.load_be::<u32>())
}

/// Encode a tokenized line: token 0 is the mnemonic.
pub fn encode_tokens(tokens: &[&str]) -> Result<Word, EncodeError> {
    let (mnemonic, operands) = tokens
        .split_first()
        .ok_or_else(|| EncodeError::malformed("empty instruction"))?;
    Instruction::parse(mnemonic, operands).map(|i| i.encode())
}
