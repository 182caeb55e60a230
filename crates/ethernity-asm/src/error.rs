use thiserror::Error;

/// Failure raised while walking a code buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A push opcode declares more immediate bytes than the buffer has left.
    #[error("incomplete push instruction at offset {offset}")]
    TruncatedImmediate { offset: usize },
}

impl DecodeError {
    /// Offset of the instruction that failed to decode.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::TruncatedImmediate { offset } => *offset,
        }
    }
}

/// Errors surfaced by the listing and batch helpers.
#[derive(Debug, Error)]
pub enum DisasmError {
    #[error("invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to write listing: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode listing: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] ethernity_core::Error),
}

impl From<DisasmError> for ethernity_core::Error {
    fn from(err: DisasmError) -> Self {
        match err {
            DisasmError::Core(inner) => inner,
            DisasmError::InvalidHex(_) | DisasmError::Decode(_) => {
                ethernity_core::Error::DecodeError(err.to_string())
            }
            other => ethernity_core::Error::Other(other.to_string()),
        }
    }
}
