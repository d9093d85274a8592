use crate::decoder::Decoder;
use crate::encoder::{Instruction, Word};
use crate::fields::{decode_immediate, Register};
use crate::instructions::{MemOp, ROp, OPCODE_BEQ, OPCODE_LW, OPCODE_RTYPE, OPCODE_SW};

/// Decoder for the MIPS I subset the assembler emits.
#[derive(Debug, Default, Clone, Copy)]
pub struct MipsDecoder;

impl MipsDecoder {
    pub fn new() -> Self {
        Self
    }
}

fn reg(index: u8) -> Register {
    Register::from_field(index)
}

impl Decoder for MipsDecoder {
    fn decode(&self, raw32: u32) -> Option<Instruction> {
        let w = Word(raw32);
        let (rs, rt) = (reg(w.rs()), reg(w.rt()));
        let offset = decode_immediate(w.imm16());

        match w.opcode() {
            OPCODE_RTYPE => {
                if w.shamt() != 0 {
                    return None;
                }
                let op = ROp::from_funct(w.funct())?;
                Some(Instruction::RType { op, rd: reg(w.rd()), rs, rt })
            }
            OPCODE_LW => Some(Instruction::Memory { op: MemOp::Lw, rt, offset, base: rs }),
            OPCODE_SW => Some(Instruction::Memory { op: MemOp::Sw, rt, offset, base: rs }),
            OPCODE_BEQ => Some(Instruction::Branch { rs, rt, offset }),
            _ => None,
        }
    }
}
