/*!
 * Ethernity Utils
 * 
 * Utilitários comuns usados em toda a workspace Ethernity
 */

/// Remove um prefixo `0x`/`0X` da string hexadecimal
pub fn strip_hex_prefix(hex: &str) -> &str {
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Converte uma string hexadecimal (com ou sem `0x`) para bytes
pub fn decode_hex(hex: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let bytes = hex::decode(strip_hex_prefix(hex.trim()))?;
    tracing::trace!(len = bytes.len(), "hex decodificado");
    Ok(bytes)
}

/// Formata bytes como hexadecimal com prefixo `0x`
pub fn encode_hex_prefixed(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}
