use std::fmt::Write as _;

use serde::Serialize;

use mips_asm::decoder::Decoder;
use mips_asm::disasm::fmt_word;
use mips_asm::isa::mips::MipsDecoder;

use crate::model::{slot_addr, Image};

#[derive(Debug, Clone, Serialize)]
pub struct ListingRow {
    pub slot: usize,
    pub addr: u32,
    pub word: u32,
    pub bits: String,
    pub text: String,
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub image: String,
    pub capacity: usize,
    pub rows: Vec<ListingRow>,
}

impl Report {
    pub fn build(img: &Image, all: bool) -> Self {
        let dec = MipsDecoder::new();
        let rows = (0..img.span(all))
            .filter_map(|slot| img.word(slot).map(|w| (slot, w)))
            .map(|(slot, w)| {
                let d = dec.decode_word(w);
                ListingRow {
                    slot,
                    addr: slot_addr(slot),
                    word: w.0,
                    bits: w.to_string(),
                    text: fmt_word(w.0, d.as_ref()),
                    valid: d.is_some(),
                }
            })
            .collect();
        Report { image: img.name.clone(), capacity: img.len(), rows }
    }

    pub fn invalid(&self) -> usize {
        self.rows.iter().filter(|r| !r.valid).count()
    }
}

pub fn render_text(report: &Report, show_bits: bool) -> String {
    let mut buf = String::new();
    let _ = writeln!(buf, "; {} ({} slots, {} listed)", report.image, report.capacity, report.rows.len());
    for r in &report.rows {
        if show_bits {
            let _ = writeln!(buf, "{:#06x}: {}  {}", r.addr, r.bits, r.text);
        } else {
            let _ = writeln!(buf, "{:#06x}: {:08x}  {}", r.addr, r.word, r.text);
        }
    }
    buf
}
