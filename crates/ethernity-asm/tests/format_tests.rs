use ethernity_asm::{
    decode_input, disassemble, disassemble_hex, disassemble_records, disassemble_with,
    format_instruction, to_json, write_disassembled, write_disassembled_with, DecodeError,
    DisasmError, DisassemblyConfig, Instruction, InstructionRecord,
};
use ethernity_core::{evm_table, OpcodeInfo, OpcodeTable};

#[test]
fn listing_matches_reference_layout() {
    let lines = disassemble(&[0x60, 0xff, 0x01, 0x00]).unwrap();
    assert_eq!(lines, vec!["000000: PUSH1 0xff\n", "000002: ADD\n", "000003: STOP\n"]);
}

#[test]
fn zero_width_push_prints_no_argument() {
    let lines = disassemble(&[0x5f]).unwrap();
    assert_eq!(lines, vec!["000000: PUSH0\n"]);
}

#[test]
fn undefined_opcodes_are_named() {
    let lines = disassemble(&[0x0c]).unwrap();
    assert_eq!(lines, vec!["000000: opcode 0xc not defined\n"]);
}

#[test]
fn config_controls_layout() {
    let config = DisassemblyConfig {
        offset_width: 4,
        trailing_newline: false,
        uppercase_hex: true,
        ..Default::default()
    };
    let ins = Instruction { pc: 7, opcode: 0x61, argument: Some(&[0xab, 0xcd]) };
    assert_eq!(format_instruction(&ins, evm_table(), &config), "0007: PUSH2 0xABCD");
}

#[test]
fn offsets_wider_than_padding_are_kept() {
    let config = DisassemblyConfig { offset_width: 2, trailing_newline: false, ..Default::default() };
    let ins = Instruction { pc: 1234, opcode: 0x00, argument: None };
    assert_eq!(format_instruction(&ins, evm_table(), &config), "1234: STOP");
}

#[test]
fn batch_is_fail_fast() {
    let err = disassemble(&[0x01, 0x02, 0x62, 0x00]).unwrap_err();
    assert_eq!(err, DecodeError::TruncatedImmediate { offset: 2 });
}

#[test]
fn custom_table_names_are_used() {
    let table = OpcodeTable::empty().with(0x01, OpcodeInfo::push("LIT1", 1));
    let config = DisassemblyConfig { trailing_newline: false, ..Default::default() };
    let lines = disassemble_with(&[0x01, 0x09, 0x02], &table, &config).unwrap();
    assert_eq!(lines, vec!["000000: LIT1 0x09", "000002: opcode 0x2 not defined"]);
}

#[test]
fn hex_input_with_and_without_prefix() {
    let config = DisassemblyConfig::default();
    let a = disassemble_hex("0x6001", &config).unwrap();
    let b = disassemble_hex("6001", &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, vec!["000000: PUSH1 0x01\n"]);
}

#[test]
fn strict_hex_rejects_prefix() {
    let config = DisassemblyConfig { allow_hex_prefix: false, ..Default::default() };
    assert!(matches!(disassemble_hex("0x6001", &config), Err(DisasmError::InvalidHex(_))));
    assert!(disassemble_hex("6001", &config).is_ok());
}

#[test]
fn hex_errors_and_decode_errors_are_distinct() {
    let config = DisassemblyConfig::default();
    assert!(matches!(disassemble_hex("60f", &config), Err(DisasmError::InvalidHex(_))));
    match disassemble_hex("0161", &config) {
        Err(DisasmError::Decode(err)) => assert_eq!(err.offset(), 1),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn writer_emits_lines_before_failure() {
    let mut out = Vec::new();
    let err = write_disassembled(&mut out, "600101610a", &DisassemblyConfig::default()).unwrap_err();
    assert!(matches!(err, DisasmError::Decode(DecodeError::TruncatedImmediate { offset: 3 })));
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "000000: PUSH1 0x01\n000002: ADD\n");
}

#[test]
fn writer_keeps_line_breaks_without_trailing_newline() {
    let mut out = Vec::new();
    let config = DisassemblyConfig { trailing_newline: false, ..Default::default() };
    write_disassembled(&mut out, "0001", &config).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "000000: STOP\n000001: ADD\n");
}

#[test]
fn records_serialize_to_json() {
    let records = disassemble_records(&[0x60, 0x2a, 0x00], evm_table()).unwrap();
    assert_eq!(
        records,
        vec![
            InstructionRecord { pc: 0, opcode: 0x60, mnemonic: "PUSH1".into(), argument: Some("0x2a".into()) },
            InstructionRecord { pc: 2, opcode: 0x00, mnemonic: "STOP".into(), argument: None },
        ]
    );
    let json = to_json(&records).unwrap();
    let parsed: Vec<InstructionRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, records);
}

#[test]
fn records_fail_fast() {
    let err = disassemble_records(&[0x00, 0x7f, 0x01], evm_table()).unwrap_err();
    assert_eq!(err.offset(), 1);
}

#[test]
fn writer_uses_injected_table() {
    let table = OpcodeTable::empty()
        .with(0x01, OpcodeInfo::plain("NOP"))
        .with(0x02, OpcodeInfo::push("LIT2", 2));
    let mut out = Vec::new();
    // 0x60 is a plain byte in this table, so the trailing 0x60 does not truncate
    write_disassembled_with(&mut out, "0x010201ff60", &table, &DisassemblyConfig::default()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "000000: NOP\n000001: LIT2 0x01ff\n000004: opcode 0x60 not defined\n"
    );
}

#[test]
fn writer_with_custom_table_stops_on_truncation() {
    let table = OpcodeTable::empty().with(0x02, OpcodeInfo::push("LIT2", 2));
    let mut out = Vec::new();
    let err = write_disassembled_with(&mut out, "02aa", &table, &DisassemblyConfig::default())
        .unwrap_err();
    assert!(matches!(err, DisasmError::Decode(DecodeError::TruncatedImmediate { offset: 0 })));
    assert!(out.is_empty());
}

#[test]
fn invalid_config_is_rejected_before_decoding() {
    let config = DisassemblyConfig { offset_width: 0, ..Default::default() };
    assert!(matches!(
        disassemble_hex("00", &config),
        Err(DisasmError::Core(ethernity_core::Error::ValidationError(_)))
    ));

    let mut out = Vec::new();
    let err = write_disassembled(&mut out, "00", &config).unwrap_err();
    assert!(matches!(err, DisasmError::Core(ethernity_core::Error::ValidationError(_))));
    assert!(out.is_empty());
}

#[test]
fn input_decoding_follows_prefix_policy() {
    let lenient = DisassemblyConfig::default();
    assert_eq!(decode_input(" 0x60ff\n", &lenient).unwrap(), vec![0x60, 0xff]);

    let strict = DisassemblyConfig { allow_hex_prefix: false, ..Default::default() };
    assert!(matches!(decode_input("0x60ff", &strict), Err(DisasmError::InvalidHex(_))));
    assert_eq!(decode_input("60ff", &strict).unwrap(), vec![0x60, 0xff]);
}
