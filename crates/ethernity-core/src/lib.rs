/*!
 * Ethernity Core
 * 
 * Tipos e utilitários compartilhados para a workspace Ethernity:
 * tabela de opcodes da EVM, classificação de opcodes e helpers de hex.
 */

pub mod opcodes;
pub mod traits;
pub mod utils;
pub mod error;

// Re-exportações públicas
pub use error::{Error, Result};
pub use opcodes::{evm_table, OpcodeInfo, OpcodeTable};
pub use traits::OpcodeClassifier;
