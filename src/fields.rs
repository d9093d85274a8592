//! Fixed-width bit fields of an instruction word.
//!
//! Registers occupy 5 bits, immediates/offsets 16 bits in two's complement.
//! Out-of-range values are rejected, never truncated.

use std::fmt;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

pub const REG_BITS: u32 = 5;
pub const IMM_BITS: u32 = 16;
pub const OPCODE_BITS: u32 = 6;
pub const SHAMT_BITS: u32 = 5;
pub const FUNCT_BITS: u32 = 6;

pub const REGISTER_SIGIL: char = '$';

/// A value together with the width of the field that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    value: u32,
    width: u32,
}

impl Field {
    /// Panics in debug builds if `value` does not fit; callers range-check first.
    pub(crate) fn new(value: u32, width: u32) -> Self {
        debug_assert!(width > 0 && width <= 32);
        debug_assert!(width == 32 || value >> width == 0);
        Self { value, width }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Field bits, most significant first.
    pub fn bits(&self) -> &BitSlice<u32, Msb0> {
        &self.value.view_bits::<Msb0>()[(32 - self.width) as usize..]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.width as usize)
    }
}

/// Architectural register `$0`..`$31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Register(u8);

impl Register {
    pub fn new(index: u32) -> Result<Self, EncodeError> {
        if index >= 1 << REG_BITS {
            return Err(EncodeError::FieldRange {
                field: "register",
                value: index as i64,
                bits: REG_BITS,
            });
        }
        Ok(Self(index as u8))
    }

    /// From an already 5-bit-wide field; upper bits are masked off.
    pub(crate) fn from_field(bits: u8) -> Self {
        Self(bits & 0x1F)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn field(self) -> Field {
        Field::new(self.0 as u32, REG_BITS)
    }
}

impl TryFrom<u32> for Register {
    type Error = EncodeError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Register::new(index)
    }
}

impl From<Register> for u32 {
    fn from(r: Register) -> u32 {
        r.0 as u32
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REGISTER_SIGIL}{}", self.0)
    }
}

pub fn encode_register(index: u32) -> Result<Field, EncodeError> {
    Register::new(index).map(Register::field)
}

pub fn encode_immediate(value: i64) -> Result<Field, EncodeError> {
    let v = check_immediate(value)?;
    Ok(Field::new(v as u16 as u32, IMM_BITS))
}

/// Inverse of [`encode_immediate`] on the raw 16 field bits.
pub fn decode_immediate(bits: u16) -> i16 {
    bits as i16
}

pub(crate) fn check_immediate(value: i64) -> Result<i16, EncodeError> {
    i16::try_from(value).map_err(|_| EncodeError::FieldRange {
        field: "immediate",
        value,
        bits: IMM_BITS,
    })
}

/// `$N` -> register N. The sigil is required; operands are not case-folded.
pub fn parse_register(token: &str) -> Result<Register, EncodeError> {
    let digits = token
        .strip_prefix(REGISTER_SIGIL)
        .ok_or_else(|| EncodeError::malformed(format!("expected register, found `{token}`")))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodeError::malformed(format!("bad register `{token}`")));
    }
    // All digits: either a real (possibly huge) index or too long for i64.
    match digits.parse::<i64>() {
        Ok(index) => u32::try_from(index)
            .map_err(|_| EncodeError::FieldRange {
                field: "register",
                value: index,
                bits: REG_BITS,
            })
            .and_then(Register::new),
        Err(_) => Err(EncodeError::malformed(format!(
            "register index `{token}` is too large"
        ))),
    }
}

/// Decimal literal with optional sign; `0x` hex is accepted as well.
pub fn parse_immediate(token: &str) -> Result<i16, EncodeError> {
    let bad = || EncodeError::malformed(format!("bad immediate `{token}`"));
    let (negative, body) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let magnitude = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        i64::from_str_radix(hex, 16)
    } else if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
        body.parse::<i64>()
    } else {
        return Err(bad());
    };
    let magnitude = match magnitude {
        Ok(m) => m,
        // Digits only but too long for i64: out of range rather than malformed.
        Err(e) if matches!(e.kind(), std::num::IntErrorKind::PosOverflow) => {
            return Err(EncodeError::FieldRange {
                field: "immediate",
                value: if negative { i64::MIN } else { i64::MAX },
                bits: IMM_BITS,
            })
        }
        Err(_) => return Err(bad()),
    };
    check_immediate(if negative { -magnitude } else { magnitude })
}
