//! Ethernity Asm
//!
//! Single-pass decoding of EVM bytecode into `(pc, opcode, immediate)`
//! instructions, plus the listing and batch helpers built on top of it.

pub mod config;
pub mod decoder;
pub mod error;
pub mod format;

pub use config::DisassemblyConfig;
pub use decoder::{DecoderState, Instruction, InstructionIterator};
pub use error::{DecodeError, DisasmError};
pub use format::{
    decode_input, disassemble, disassemble_hex, disassemble_records, disassemble_with,
    format_instruction, print_disassembled, to_json, write_disassembled, write_disassembled_with,
    InstructionRecord,
};
