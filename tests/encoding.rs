use mips_asm::decoder::Decoder;
use mips_asm::encoder::encode_tokens;
use mips_asm::instructions::{MemOp, ROp, OPCODE_BEQ, OPCODE_LW, OPCODE_RTYPE, OPCODE_SW};
use mips_asm::isa::mips::MipsDecoder;
use mips_asm::{EncodeError, Instruction};
use pretty_assertions::assert_eq;

fn enc(line: &str) -> Result<mips_asm::Word, EncodeError> {
    encode_tokens(&mips_asm::assembler::tokenize(line))
}

#[test]
fn add_places_dest_third() {
    let w = enc("add $1, $2, $3").unwrap();
    assert_eq!(w.opcode(), OPCODE_RTYPE);
    assert_eq!(w.funct(), ROp::Add.funct());
    assert_eq!((w.rs(), w.rt(), w.rd(), w.shamt()), (2, 3, 1, 0));
    assert_eq!(w.to_string(), "00000000010000110000100000100000");
}

#[test]
fn r_type_functs() {
    let cases = [
        ("add", 0b100000),
        ("sub", 0b100010),
        ("and", 0b100100),
        ("or", 0b100101),
        ("slt", 0b101010),
    ];
    for (mn, funct) in cases {
        let w = enc(&format!("{mn} $4, $5, $6")).unwrap();
        assert_eq!(w.opcode(), 0, "{mn}");
        assert_eq!(w.funct(), funct, "{mn}");
    }
}

#[test]
fn lw_offset_and_base() {
    let w = enc("lw $1, 8($2)").unwrap();
    assert_eq!(w.opcode(), OPCODE_LW);
    assert_eq!(w.rs(), 2);
    assert_eq!(w.rt(), 1);
    assert_eq!(format!("{:016b}", w.imm16()), "0000000000001000");
    assert_eq!(w.0, 0x8C41_0008);
}

#[test]
fn sw_uses_store_opcode() {
    let w = enc("sw $7, -8($29)").unwrap();
    assert_eq!(w.opcode(), OPCODE_SW);
    assert_eq!((w.rs(), w.rt()), (29, 7));
    assert_eq!(w.imm16(), 0xFFF8);
}

#[test]
fn beq_negative_offset_round_trips() {
    let w = enc("beq $1, $2, -4").unwrap();
    assert_eq!(w.opcode(), OPCODE_BEQ);
    assert_eq!((w.rs(), w.rt()), (1, 2));
    assert_eq!(w.to_string(), "00010000001000101111111111111100");
    let back = MipsDecoder::new().decode_word(w).unwrap();
    assert!(matches!(back, Instruction::Branch { offset: -4, .. }));
}

#[test]
fn mnemonic_case_folded_registers_not() {
    assert_eq!(enc("ADD $1, $2, $3").unwrap(), enc("add $1, $2, $3").unwrap());
    assert_eq!(enc("Lw $1, 8($2)").unwrap(), enc("lw $1, 8($2)").unwrap());
    assert!(matches!(enc("add R1, $2, $3"), Err(EncodeError::MalformedLine { .. })));
}

#[test]
fn unknown_and_malformed() {
    assert_eq!(
        enc("xor $1, $2, $3"),
        Err(EncodeError::UnknownMnemonic { mnemonic: "xor".into() })
    );
    assert!(matches!(enc("lw $1, 8"), Err(EncodeError::MalformedLine { .. })));
    assert!(matches!(enc("beq $1, $2"), Err(EncodeError::MalformedLine { .. })));
    assert!(matches!(enc("lw $1, 40000($2)"), Err(EncodeError::FieldRange { .. })));
    assert!(matches!(enc("add $1, $2, $40"), Err(EncodeError::FieldRange { .. })));
}

#[test]
fn disassembly_reassembles_to_same_word() {
    let dec = MipsDecoder::new();
    for line in [
        "add $1, $2, $3",
        "sub $31, $0, $15",
        "and $8, $9, $10",
        "or $11, $12, $13",
        "slt $14, $15, $16",
        "lw $1, 8($2)",
        "sw $3, -12($4)",
        "beq $5, $6, 32767",
    ] {
        let w = enc(line).unwrap();
        let inst = dec.decode_word(w).unwrap();
        assert_eq!(inst.to_string(), line);
        assert_eq!(enc(&inst.to_string()).unwrap(), w);
    }
}

#[test]
fn memory_variant_keeps_op() {
    let inst = Instruction::parse("sw", &["$1", "0", "$2"]).unwrap();
    assert!(matches!(inst, Instruction::Memory { op: MemOp::Sw, .. }));
}
