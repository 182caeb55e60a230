/*!
 * Ethernity Opcodes
 *
 * Tabela de opcodes da EVM usada para decodificar e exibir bytecode
 */

use once_cell::sync::Lazy;
use serde::Serialize;

// 0x00 - aritmética
pub const STOP: u8 = 0x00;
pub const ADD: u8 = 0x01;
pub const MUL: u8 = 0x02;
pub const SUB: u8 = 0x03;
pub const DIV: u8 = 0x04;

// 0x10 - comparação e bitwise
pub const LT: u8 = 0x10;
pub const GT: u8 = 0x11;
pub const EQ: u8 = 0x14;
pub const ISZERO: u8 = 0x15;

pub const KECCAK256: u8 = 0x20;

pub const CALLVALUE: u8 = 0x34;
pub const CALLDATALOAD: u8 = 0x35;

// 0x50 - pilha, memória, storage e fluxo
pub const POP: u8 = 0x50;
pub const MSTORE: u8 = 0x52;
pub const SLOAD: u8 = 0x54;
pub const SSTORE: u8 = 0x55;
pub const JUMP: u8 = 0x56;
pub const JUMPI: u8 = 0x57;
pub const JUMPDEST: u8 = 0x5b;
pub const PUSH0: u8 = 0x5f;

// 0x60..=0x7f - PUSH1..PUSH32
pub const PUSH1: u8 = 0x60;
pub const PUSH2: u8 = 0x61;
pub const PUSH4: u8 = 0x63;
pub const PUSH20: u8 = 0x73;
pub const PUSH32: u8 = 0x7f;

pub const DUP1: u8 = 0x80;
pub const SWAP1: u8 = 0x90;
pub const LOG0: u8 = 0xa0;

// 0xf0 - sistema
pub const CREATE: u8 = 0xf0;
pub const CALL: u8 = 0xf1;
pub const RETURN: u8 = 0xf3;
pub const REVERT: u8 = 0xfd;
pub const INVALID: u8 = 0xfe;
pub const SELFDESTRUCT: u8 = 0xff;

const PUSH_NAMES: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8",
    "PUSH9", "PUSH10", "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16",
    "PUSH17", "PUSH18", "PUSH19", "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24",
    "PUSH25", "PUSH26", "PUSH27", "PUSH28", "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_NAMES: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8",
    "DUP9", "DUP10", "DUP11", "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_NAMES: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8",
    "SWAP9", "SWAP10", "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

const LOG_NAMES: [&str; 5] = ["LOG0", "LOG1", "LOG2", "LOG3", "LOG4"];

/// Opcodes sem imediato, agrupados pelo byte
const PLAIN_OPCODES: &[(u8, &str)] = &[
    (0x00, "STOP"),
    (0x01, "ADD"),
    (0x02, "MUL"),
    (0x03, "SUB"),
    (0x04, "DIV"),
    (0x05, "SDIV"),
    (0x06, "MOD"),
    (0x07, "SMOD"),
    (0x08, "ADDMOD"),
    (0x09, "MULMOD"),
    (0x0a, "EXP"),
    (0x0b, "SIGNEXTEND"),
    (0x10, "LT"),
    (0x11, "GT"),
    (0x12, "SLT"),
    (0x13, "SGT"),
    (0x14, "EQ"),
    (0x15, "ISZERO"),
    (0x16, "AND"),
    (0x17, "OR"),
    (0x18, "XOR"),
    (0x19, "NOT"),
    (0x1a, "BYTE"),
    (0x1b, "SHL"),
    (0x1c, "SHR"),
    (0x1d, "SAR"),
    (0x20, "KECCAK256"),
    (0x30, "ADDRESS"),
    (0x31, "BALANCE"),
    (0x32, "ORIGIN"),
    (0x33, "CALLER"),
    (0x34, "CALLVALUE"),
    (0x35, "CALLDATALOAD"),
    (0x36, "CALLDATASIZE"),
    (0x37, "CALLDATACOPY"),
    (0x38, "CODESIZE"),
    (0x39, "CODECOPY"),
    (0x3a, "GASPRICE"),
    (0x3b, "EXTCODESIZE"),
    (0x3c, "EXTCODECOPY"),
    (0x3d, "RETURNDATASIZE"),
    (0x3e, "RETURNDATACOPY"),
    (0x3f, "EXTCODEHASH"),
    (0x40, "BLOCKHASH"),
    (0x41, "COINBASE"),
    (0x42, "TIMESTAMP"),
    (0x43, "NUMBER"),
    (0x44, "DIFFICULTY"),
    (0x45, "GASLIMIT"),
    (0x46, "CHAINID"),
    (0x47, "SELFBALANCE"),
    (0x48, "BASEFEE"),
    (0x49, "BLOBHASH"),
    (0x4a, "BLOBBASEFEE"),
    (0x50, "POP"),
    (0x51, "MLOAD"),
    (0x52, "MSTORE"),
    (0x53, "MSTORE8"),
    (0x54, "SLOAD"),
    (0x55, "SSTORE"),
    (0x56, "JUMP"),
    (0x57, "JUMPI"),
    (0x58, "PC"),
    (0x59, "MSIZE"),
    (0x5a, "GAS"),
    (0x5b, "JUMPDEST"),
    (0x5c, "TLOAD"),
    (0x5d, "TSTORE"),
    (0x5e, "MCOPY"),
    (0xf0, "CREATE"),
    (0xf1, "CALL"),
    (0xf2, "CALLCODE"),
    (0xf3, "RETURN"),
    (0xf4, "DELEGATECALL"),
    (0xf5, "CREATE2"),
    (0xfa, "STATICCALL"),
    (0xfd, "REVERT"),
    (0xfe, "INVALID"),
    (0xff, "SELFDESTRUCT"),
];

/// Informações de um opcode definido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpcodeInfo {
    /// Mnemônico exibido na desmontagem
    pub name: &'static str,
    /// Quantidade de bytes imediatos após o opcode
    pub immediate: u8,
    /// Indica se o opcode é um push com imediato (inclui PUSH0)
    pub push: bool,
}

impl OpcodeInfo {
    /// Opcode sem dados imediatos
    pub const fn plain(name: &'static str) -> Self {
        Self { name, immediate: 0, push: false }
    }

    /// Opcode de push seguido de `immediate` bytes
    pub const fn push(name: &'static str, immediate: u8) -> Self {
        Self { name, immediate, push: true }
    }
}

/// Tabela de 256 posições indexada pelo byte do opcode
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    entries: [Option<OpcodeInfo>; 256],
}

impl OpcodeTable {
    /// Tabela sem nenhum opcode definido
    pub fn empty() -> Self {
        Self { entries: [None; 256] }
    }

    /// Tabela completa da EVM (até Cancun)
    pub fn evm() -> Self {
        let mut table = Self::empty();
        for &(opcode, name) in PLAIN_OPCODES {
            table.entries[opcode as usize] = Some(OpcodeInfo::plain(name));
        }
        table.entries[PUSH0 as usize] = Some(OpcodeInfo::push("PUSH0", 0));
        for (i, name) in PUSH_NAMES.iter().enumerate() {
            table.entries[PUSH1 as usize + i] = Some(OpcodeInfo::push(name, i as u8 + 1));
        }
        for (i, name) in DUP_NAMES.iter().enumerate() {
            table.entries[DUP1 as usize + i] = Some(OpcodeInfo::plain(name));
        }
        for (i, name) in SWAP_NAMES.iter().enumerate() {
            table.entries[SWAP1 as usize + i] = Some(OpcodeInfo::plain(name));
        }
        for (i, name) in LOG_NAMES.iter().enumerate() {
            table.entries[LOG0 as usize + i] = Some(OpcodeInfo::plain(name));
        }
        table
    }

    /// Define (ou substitui) um opcode
    pub fn with(mut self, opcode: u8, info: OpcodeInfo) -> Self {
        self.entries[opcode as usize] = Some(info);
        self
    }

    /// Remove um opcode da tabela
    pub fn without(mut self, opcode: u8) -> Self {
        self.entries[opcode as usize] = None;
        self
    }

    pub fn lookup(&self, opcode: u8) -> Option<&OpcodeInfo> {
        self.entries[opcode as usize].as_ref()
    }

    /// Quantidade de opcodes definidos
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OpcodeTable {
    fn default() -> Self {
        Self::evm()
    }
}

static EVM_TABLE: Lazy<OpcodeTable> = Lazy::new(OpcodeTable::evm);

/// Instância compartilhada da tabela da EVM
pub fn evm_table() -> &'static OpcodeTable {
    &EVM_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evm_push_widths() {
        let table = OpcodeTable::evm();
        for op in PUSH1..=PUSH32 {
            let info = table.lookup(op).unwrap();
            assert!(info.push);
            assert_eq!(info.immediate as usize, (op - PUSH1) as usize + 1);
        }
        assert_eq!(table.lookup(PUSH0).unwrap().immediate, 0);
        assert_eq!(table.lookup(PUSH32).unwrap().name, "PUSH32");
    }

    #[test]
    fn evm_gaps_are_undefined() {
        let table = evm_table();
        for op in [0x0c_u8, 0x1e, 0x21, 0x4b, 0xa5, 0xef, 0xf6, 0xfb] {
            assert!(table.lookup(op).is_none(), "0x{op:02x} should be undefined");
        }
        assert_eq!(table.lookup(0x80).unwrap().name, "DUP1");
        assert_eq!(table.lookup(0x9f).unwrap().name, "SWAP16");
        assert_eq!(table.lookup(0xa4).unwrap().name, "LOG4");
    }

    #[test]
    fn shared_table_is_built_once() {
        let a = evm_table();
        let b = evm_table();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.len(), OpcodeTable::evm().len());
        assert_eq!(a.lookup(PUSH1), OpcodeTable::evm().lookup(PUSH1));
    }

    #[test]
    fn builder_overrides_entries() {
        let table = OpcodeTable::empty()
            .with(0x01, OpcodeInfo::plain("NOP"))
            .with(0x02, OpcodeInfo::push("LIT2", 2));
        assert_eq!(table.len(), 2);
        let table = table.without(0x01);
        assert_eq!(table.len(), 1);
        assert!(table.lookup(0x01).is_none());
        assert!(!OpcodeTable::evm().is_empty());
    }

    #[test]
    fn info_serializes() {
        let json = serde_json::to_string(&OpcodeInfo::push("PUSH1", 1)).unwrap();
        assert_eq!(json, r#"{"name":"PUSH1","immediate":1,"push":true}"#);
    }
}
