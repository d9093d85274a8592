use mips_asm::{assemble_str, AsmError, Assembler, EncodeError, MemoryImage, Word, WordStore};
use pretty_assertions::assert_eq;

#[test]
fn comments_and_blanks_leave_baseline() {
    let src = "# header\n\n   \n\t# indented comment\n";
    let mut img = MemoryImage::zeroed(256);
    let summary = assemble_str(src, &mut img).unwrap();
    assert_eq!(img, MemoryImage::zeroed(256));
    assert_eq!((summary.words, summary.lines, summary.skipped), (0, 4, 4));
}

#[test]
fn two_instructions_fill_two_slots() {
    let src = "add $1, $2, $3\nsw $1, 0($2)\n";
    let mut img = MemoryImage::zeroed(256);
    let summary = assemble_str(src, &mut img).unwrap();
    assert_eq!(summary.words, 2);
    assert_eq!(img.read_word(0).unwrap(), Word(0x0043_0820));
    assert_eq!(img.read_word(1).unwrap(), Word(0xAC41_0000));
    assert!(img.words()[2..].iter().all(|w| w.0 == 0));
}

#[test]
fn skipped_lines_do_not_advance_cursor() {
    let src = "# prologue\nadd $1, $2, $3\n\n# gap\nbeq $1, $2, -4\n";
    let mut img = MemoryImage::zeroed(8);
    let mut asm = Assembler::new(&mut img);
    asm.assemble(src.as_bytes()).unwrap();
    assert_eq!(asm.cursor(), 2);
    assert_eq!(img.used().len(), 2);
    assert_eq!(img.read_word(1).unwrap().opcode(), 0b000100);
}

#[test]
fn unknown_mnemonic_stops_assembly() {
    let src = "add $1, $2, $3\nxor $1,$2,$3\nsub $4, $5, $6\n";
    let mut img = MemoryImage::zeroed(16);
    let err = assemble_str(src, &mut img).unwrap_err();
    match &err {
        AsmError::Line { line_no, line, source } => {
            assert_eq!(*line_no, 2);
            assert_eq!(line, "xor $1,$2,$3");
            assert_eq!(source, &EncodeError::UnknownMnemonic { mnemonic: "xor".into() });
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Only the prefix before the bad line was written.
    assert_eq!(img.used().len(), 1);
    assert_eq!(img.read_word(1).unwrap(), Word(0));
}

#[test]
fn malformed_line_reports_position() {
    let mut img = MemoryImage::zeroed(4);
    let err = assemble_str("\n\nlw $1\n", &mut img).unwrap_err();
    assert!(matches!(
        err.encode_error(),
        Some(EncodeError::MalformedLine { .. })
    ));
    assert!(err.to_string().starts_with("line 3: malformed line"));
}

#[test]
fn inline_comment_is_not_supported() {
    let mut img = MemoryImage::zeroed(4);
    let err = assemble_str("add $1, $2, $3 # sum\n", &mut img).unwrap_err();
    assert!(matches!(err.encode_error(), Some(EncodeError::MalformedLine { .. })));
}

#[test]
fn program_larger_than_image_overflows() {
    let src = "add $1, $2, $3\n".repeat(3);
    let mut img = MemoryImage::zeroed(2);
    let err = assemble_str(&src, &mut img).unwrap_err();
    assert!(matches!(err, AsmError::ImageOverflow { line_no: 3, capacity: 2 }));
    assert_eq!(img.used().len(), 2);
}

#[test]
fn assemble_line_returns_word() {
    let mut img = MemoryImage::zeroed(4);
    let mut asm = Assembler::new(&mut img);
    assert_eq!(asm.assemble_line(1, "   # c").unwrap(), None);
    assert_eq!(asm.assemble_line(2, "  lw $1, 8($2)  ").unwrap(), Some(Word(0x8C41_0008)));
    assert_eq!(asm.summary().words, 1);
}

#[test]
fn unreadable_line_reports_position() {
    let src: &[u8] = b"add $1, $2, $3\nsub $4, \xff$5, $6\n";
    let mut img = MemoryImage::zeroed(4);
    let err = Assembler::new(&mut img).assemble(src).unwrap_err();
    assert!(matches!(err, AsmError::SourceRead { line_no: 2, .. }), "{err:?}");
    assert!(err.to_string().starts_with("line 2: cannot read source"));
    assert_eq!(img.used().len(), 1);
}
