use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Opcode shared by every R-type instruction.
pub const OPCODE_RTYPE: u8 = 0b000000;
pub const OPCODE_LW: u8 = 0b100011;
pub const OPCODE_SW: u8 = 0b101011;
pub const OPCODE_BEQ: u8 = 0b000100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    RType,
    Memory,
    Branch,
}

impl Format {
    /// Operand count in textual order.
    pub fn operands(self) -> usize {
        match self {
            Format::RType | Format::Memory | Format::Branch => 3,
        }
    }

    pub fn syntax(self) -> &'static str {
        match self {
            Format::RType => "rd, rs, rt",
            Format::Memory => "rt, offset(base)",
            Format::Branch => "rs, rt, offset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ROp {
    Add,
    Sub,
    And,
    Or,
    Slt,
}

impl ROp {
    pub const ALL: [ROp; 5] = [ROp::Add, ROp::Sub, ROp::And, ROp::Or, ROp::Slt];

    /// Inverse of [`ROp::funct`].
    pub fn from_funct(funct: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.funct() == funct)
    }

    pub fn funct(self) -> u8 {
        match self {
            ROp::Add => 0b100000,
            ROp::Sub => 0b100010,
            ROp::And => 0b100100,
            ROp::Or => 0b100101,
            ROp::Slt => 0b101010,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemOp {
    Lw,
    Sw,
}

impl MemOp {
    pub fn opcode(self) -> u8 {
        match self {
            MemOp::Lw => OPCODE_LW,
            MemOp::Sw => OPCODE_SW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mnemonic {
    R(ROp),
    Mem(MemOp),
    Beq,
}

impl Mnemonic {
    /// Case-insensitive lookup in [`TABLE`].
    pub fn lookup(token: &str) -> Result<Self, EncodeError> {
        let lower = token.to_lowercase();
        TABLE
            .iter()
            .find(|d| d.name == lower)
            .map(|d| d.mnemonic)
            .ok_or(EncodeError::UnknownMnemonic { mnemonic: lower })
    }

    pub fn format(self) -> Format {
        match self {
            Mnemonic::R(_) => Format::RType,
            Mnemonic::Mem(_) => Format::Memory,
            Mnemonic::Beq => Format::Branch,
        }
    }

    pub fn opcode(self) -> u8 {
        match self {
            Mnemonic::R(_) => OPCODE_RTYPE,
            Mnemonic::Mem(op) => op.opcode(),
            Mnemonic::Beq => OPCODE_BEQ,
        }
    }

    pub fn name(self) -> &'static str {
        // TABLE covers every variant.
        TABLE
            .iter()
            .find(|d| d.mnemonic == self)
            .map(|d| d.name)
            .unwrap_or("?")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: Mnemonic,
    pub name: &'static str,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        mnemonic: Mnemonic::R(ROp::Add),
        name: "add",
    },
    InstrDesc {
        mnemonic: Mnemonic::R(ROp::Sub),
        name: "sub",
    },
    InstrDesc {
        mnemonic: Mnemonic::R(ROp::And),
        name: "and",
    },
    InstrDesc {
        mnemonic: Mnemonic::R(ROp::Or),
        name: "or",
    },
    InstrDesc {
        mnemonic: Mnemonic::R(ROp::Slt),
        name: "slt",
    },
    InstrDesc {
        mnemonic: Mnemonic::Mem(MemOp::Lw),
        name: "lw",
    },
    InstrDesc {
        mnemonic: Mnemonic::Mem(MemOp::Sw),
        name: "sw",
    },
    InstrDesc {
        mnemonic: Mnemonic::Beq,
        name: "beq",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_folds_case() {
        assert_eq!(Mnemonic::lookup("ADD").unwrap(), Mnemonic::R(ROp::Add));
        assert_eq!(Mnemonic::lookup("Lw").unwrap(), Mnemonic::Mem(MemOp::Lw));
        assert_eq!(
            Mnemonic::lookup("XOR"),
            Err(EncodeError::UnknownMnemonic {
                mnemonic: "xor".into()
            })
        );
    }

    #[test]
    fn funct_lookup_inverts_funct() {
        for op in ROp::ALL {
            assert_eq!(ROp::from_funct(op.funct()), Some(op));
        }
        assert_eq!(ROp::from_funct(0), None);
        assert_eq!(ROp::from_funct(0b100110), None);
    }

    #[test]
    fn names_round_trip_through_table() {
        for d in TABLE {
            assert_eq!(Mnemonic::lookup(d.name).unwrap(), d.mnemonic);
            assert_eq!(d.mnemonic.name(), d.name);
        }
    }
}
