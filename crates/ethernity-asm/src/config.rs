use ethernity_core::{Error, Result};
use serde::{Deserialize, Serialize};

const MAX_OFFSET_WIDTH: usize = 20;

/// Layout and input options for instruction listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisassemblyConfig {
    /// Minimum width of the decimal offset, zero-padded.
    pub offset_width: usize,
    /// Append `\n` to every rendered line.
    pub trailing_newline: bool,
    /// Render argument digits in upper case.
    pub uppercase_hex: bool,
    /// Accept hex input with a leading `0x`.
    pub allow_hex_prefix: bool,
}

impl Default for DisassemblyConfig {
    fn default() -> Self {
        Self {
            offset_width: 6,
            trailing_newline: true,
            uppercase_hex: false,
            allow_hex_prefix: true,
        }
    }
}

impl DisassemblyConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::DecodeError(format!("invalid disassembly config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.offset_width == 0 || self.offset_width > MAX_OFFSET_WIDTH {
            return Err(Error::ValidationError(format!(
                "offset_width must be between 1 and {MAX_OFFSET_WIDTH}, got {}",
                self.offset_width
            )));
        }
        Ok(())
    }
}
