use crate::encoder::{Instruction, Word};

/// Raw word -> instruction. `None` for anything outside the supported subset.
pub trait Decoder {
    fn decode(&self, raw32: u32) -> Option<Instruction>;

    fn decode_word(&self, word: Word) -> Option<Instruction> {
        self.decode(word.0)
    }
}
