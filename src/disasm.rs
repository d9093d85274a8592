use std::fmt;

use crate::encoder::Instruction;

pub fn fmt_instruction(i: &Instruction) -> String {
    let name = i.mnemonic().name();
    match *i {
        Instruction::RType { rd, rs, rt, .. } => format!("{name} {rd}, {rs}, {rt}"),
        Instruction::Memory { rt, offset, base, .. } => format!("{name} {rt}, {offset}({base})"),
        Instruction::Branch { rs, rt, offset } => format!("{name} {rs}, {rt}, {offset}"),
    }
}

/// Text for a raw slot: the instruction if it decodes, `.word` otherwise.
pub fn fmt_word(raw32: u32, decoded: Option<&Instruction>) -> String {
    match decoded {
        Some(i) => fmt_instruction(i),
        None => format!(".word {raw32:#010x}"),
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fmt_instruction(self))
    }
}
