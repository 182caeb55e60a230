use std::io::{self, Write};

use ethernity_core::{evm_table, utils, OpcodeClassifier};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::DisassemblyConfig,
    decoder::{Instruction, InstructionIterator},
    error::{DecodeError, DisasmError},
};

/// Serializable form of a decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRecord {
    pub pc: usize,
    pub opcode: u8,
    pub mnemonic: String,
    /// `0x`-prefixed immediate, absent when the instruction carries no bytes.
    pub argument: Option<String>,
}

impl InstructionRecord {
    pub fn new<C: OpcodeClassifier + ?Sized>(ins: &Instruction<'_>, classifier: &C) -> Self {
        let arg = ins.argument();
        Self {
            pc: ins.pc,
            opcode: ins.opcode,
            mnemonic: classifier.mnemonic(ins.opcode).into_owned(),
            argument: (!arg.is_empty()).then(|| utils::encode_hex_prefixed(arg)),
        }
    }
}

/// Renders one instruction as `offset: MNEMONIC [0xARG]`.
pub fn format_instruction<C: OpcodeClassifier + ?Sized>(
    ins: &Instruction<'_>,
    classifier: &C,
    config: &DisassemblyConfig,
) -> String {
    let mut line = format!(
        "{:0width$}: {}",
        ins.pc,
        classifier.mnemonic(ins.opcode),
        width = config.offset_width
    );
    let arg = ins.argument();
    if !arg.is_empty() {
        line.push_str(" 0x");
        if config.uppercase_hex {
            line.push_str(&hex::encode_upper(arg));
        } else {
            line.push_str(&hex::encode(arg));
        }
    }
    if config.trailing_newline {
        line.push('\n');
    }
    line
}

/// Disassembles `code` with the EVM table and the default layout.
pub fn disassemble(code: &[u8]) -> Result<Vec<String>, DecodeError> {
    disassemble_with(code, evm_table(), &DisassemblyConfig::default())
}

/// Collects every rendered line, or the first decode error.
/// Lines produced before the error are discarded.
pub fn disassemble_with<C: OpcodeClassifier>(
    code: &[u8],
    classifier: C,
    config: &DisassemblyConfig,
) -> Result<Vec<String>, DecodeError> {
    let mut it = InstructionIterator::with_classifier(code, classifier);
    let mut lines = Vec::new();
    while it.advance() {
        if let Some(ins) = it.current() {
            lines.push(format_instruction(&ins, it.classifier(), config));
        }
    }
    if let Some(err) = it.error() {
        debug!(decoded = lines.len(), %err, "disassembly aborted");
        return Err(*err);
    }
    debug!(count = lines.len(), "disassembly finished");
    Ok(lines)
}

/// Hex-decodes `input` and disassembles it with the EVM table.
pub fn disassemble_hex(input: &str, config: &DisassemblyConfig) -> Result<Vec<String>, DisasmError> {
    config.validate()?;
    let code = decode_input(input, config)?;
    Ok(disassemble_with(&code, evm_table(), config)?)
}

/// Decodes a code buffer into serializable records, failing on the first error.
pub fn disassemble_records<C: OpcodeClassifier>(
    code: &[u8],
    classifier: C,
) -> Result<Vec<InstructionRecord>, DecodeError> {
    let mut it = InstructionIterator::with_classifier(code, classifier);
    let mut records = Vec::new();
    while let Some(next) = it.next() {
        let ins = next?;
        records.push(InstructionRecord::new(&ins, it.classifier()));
    }
    Ok(records)
}

pub fn to_json(records: &[InstructionRecord]) -> Result<String, DisasmError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the listing of a hex-encoded buffer with the EVM table.
pub fn write_disassembled<W: Write>(
    writer: &mut W,
    input: &str,
    config: &DisassemblyConfig,
) -> Result<(), DisasmError> {
    write_disassembled_with(writer, input, evm_table(), config)
}

/// Writes the listing line by line. Instructions decoded before a failure
/// are still written; the failure is returned afterwards.
pub fn write_disassembled_with<W: Write, C: OpcodeClassifier>(
    writer: &mut W,
    input: &str,
    classifier: C,
    config: &DisassemblyConfig,
) -> Result<(), DisasmError> {
    config.validate()?;
    let code = decode_input(input, config)?;
    let line_config = DisassemblyConfig { trailing_newline: false, ..config.clone() };

    let mut it = InstructionIterator::with_classifier(&code, classifier);
    while it.advance() {
        if let Some(ins) = it.current() {
            writeln!(writer, "{}", format_instruction(&ins, it.classifier(), &line_config))?;
        }
    }
    match it.error() {
        Some(err) => Err(DisasmError::Decode(*err)),
        None => Ok(()),
    }
}

/// Prints the listing of a hex-encoded buffer to stdout.
pub fn print_disassembled(input: &str) -> Result<(), DisasmError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_disassembled(&mut handle, input, &DisassemblyConfig::default())
}

/// Hex-decodes `input`, honouring `allow_hex_prefix`.
pub fn decode_input(input: &str, config: &DisassemblyConfig) -> Result<Vec<u8>, DisasmError> {
    let code = if config.allow_hex_prefix {
        utils::decode_hex(input)?
    } else {
        hex::decode(input)?
    };
    Ok(code)
}
