use std::iter::FusedIterator;

use ethereum_types::U256;
use ethernity_core::{evm_table, OpcodeClassifier, OpcodeTable};
use tracing::{debug, trace};

use crate::error::DecodeError;

/// Decoded instruction borrowed from the code buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub pc: usize,
    pub opcode: u8,
    /// Immediate bytes following the opcode. `None` for non-push opcodes.
    pub argument: Option<&'a [u8]>,
}

impl<'a> Instruction<'a> {
    /// Immediate bytes, empty when the opcode carries none.
    pub fn argument(&self) -> &'a [u8] {
        self.argument.unwrap_or(&[])
    }

    /// Offset of the instruction that follows this one.
    pub fn next_pc(&self) -> usize {
        self.pc + 1 + self.argument().len()
    }

    /// Big-endian value pushed by this instruction.
    pub fn push_value(&self) -> Option<U256> {
        match self.argument {
            Some(arg) if arg.len() <= 32 => Some(U256::from_big_endian(arg)),
            _ => None,
        }
    }
}

/// Lifecycle of an [`InstructionIterator`]. Transitions only move forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderState {
    NotStarted,
    Iterating,
    Exhausted,
    Failed(DecodeError),
}

/// Cursor over EVM bytecode.
///
/// Call [`advance`](Self::advance) until it returns `false`, reading the
/// current instruction through the accessors in between. A `false` result
/// means either a clean end or a truncated push; [`error`](Self::error)
/// tells them apart. The iterator also implements [`Iterator`], yielding
/// `Err` once when the buffer ends mid-immediate.
#[derive(Debug, Clone)]
pub struct InstructionIterator<'a, C = &'static OpcodeTable> {
    code: &'a [u8],
    classifier: C,
    pc: usize,
    opcode: u8,
    argument: Option<&'a [u8]>,
    state: DecoderState,
    error_yielded: bool,
}

impl<'a> InstructionIterator<'a> {
    /// Creates a decoder using the EVM opcode table.
    pub fn new(code: &'a [u8]) -> Self {
        Self::with_classifier(code, evm_table())
    }
}

impl<'a, C: OpcodeClassifier> InstructionIterator<'a, C> {
    pub fn with_classifier(code: &'a [u8], classifier: C) -> Self {
        Self {
            code,
            classifier,
            pc: 0,
            opcode: 0,
            argument: None,
            state: DecoderState::NotStarted,
            error_yielded: false,
        }
    }

    /// Moves to the next instruction. Returns `false` at the end of the
    /// buffer or on the first truncated push, and keeps returning `false`.
    pub fn advance(&mut self) -> bool {
        let code = self.code;
        let pc = match self.state {
            DecoderState::Exhausted | DecoderState::Failed(_) => return false,
            DecoderState::NotStarted => 0,
            DecoderState::Iterating => self.pc + 1 + self.argument.map_or(0, <[u8]>::len),
        };

        if pc >= code.len() {
            debug!(len = code.len(), "bytecode exhausted");
            self.state = DecoderState::Exhausted;
            return false;
        }

        let opcode = code[pc];
        self.pc = pc;
        self.opcode = opcode;

        if self.classifier.is_immediate_push(opcode) {
            let width = self.classifier.immediate_width(opcode);
            let end = width
                .checked_add(1)
                .and_then(|n| pc.checked_add(n))
                .filter(|&end| end <= code.len());
            match end {
                Some(end) => self.argument = Some(&code[pc + 1..end]),
                None => {
                    debug!(pc, opcode, width, "incomplete push instruction");
                    self.argument = None;
                    self.state = DecoderState::Failed(DecodeError::TruncatedImmediate { offset: pc });
                    return false;
                }
            }
        } else {
            self.argument = None;
        }

        trace!(pc, opcode, "decoded instruction");
        self.state = DecoderState::Iterating;
        true
    }

    /// Offset of the current instruction.
    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Immediate bytes of the current instruction, borrowed from the buffer.
    pub fn argument(&self) -> &'a [u8] {
        self.argument.unwrap_or(&[])
    }

    /// Whether the current instruction is a push (zero-width pushes included).
    pub fn has_argument(&self) -> bool {
        self.argument.is_some()
    }

    /// The decode failure, if iteration stopped on one.
    pub fn error(&self) -> Option<&DecodeError> {
        match &self.state {
            DecoderState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Snapshot of the current instruction while iterating.
    pub fn current(&self) -> Option<Instruction<'a>> {
        match self.state {
            DecoderState::Iterating => Some(Instruction {
                pc: self.pc,
                opcode: self.opcode,
                argument: self.argument,
            }),
            _ => None,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

impl<'a, C: OpcodeClassifier> Iterator for InstructionIterator<'a, C> {
    type Item = Result<Instruction<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            return self.current().map(Ok);
        }
        match self.state {
            DecoderState::Failed(err) if !self.error_yielded => {
                self.error_yielded = true;
                Some(Err(err))
            }
            _ => None,
        }
    }
}

impl<'a, C: OpcodeClassifier> FusedIterator for InstructionIterator<'a, C> {}
