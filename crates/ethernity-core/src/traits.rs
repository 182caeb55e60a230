/*!
 * Ethernity Traits
 * 
 * Traits comuns usados em toda a workspace Ethernity
 */

use std::borrow::Cow;

use crate::opcodes::OpcodeTable;

/// Classificação de opcodes consultada pelo decodificador de instruções.
///
/// Todo byte é um opcode válido para decodificação; a tabela só informa
/// quais deles carregam dados imediatos e como exibi-los.
pub trait OpcodeClassifier {
    /// Verifica se o opcode é um push seguido de dados imediatos
    fn is_immediate_push(&self, opcode: u8) -> bool;

    /// Quantidade de bytes imediatos consumidos pelo push
    fn immediate_width(&self, opcode: u8) -> usize;

    /// Nome legível do opcode
    fn mnemonic(&self, opcode: u8) -> Cow<'static, str> {
        Cow::Owned(undefined_mnemonic(opcode))
    }
}

/// Nome usado para bytes sem opcode definido
pub fn undefined_mnemonic(opcode: u8) -> String {
    format!("opcode {:#x} not defined", opcode)
}

impl OpcodeClassifier for OpcodeTable {
    fn is_immediate_push(&self, opcode: u8) -> bool {
        self.lookup(opcode).map_or(false, |info| info.push)
    }

    fn immediate_width(&self, opcode: u8) -> usize {
        self.lookup(opcode).map_or(0, |info| info.immediate as usize)
    }

    fn mnemonic(&self, opcode: u8) -> Cow<'static, str> {
        match self.lookup(opcode) {
            Some(info) => Cow::Borrowed(info.name),
            None => Cow::Owned(undefined_mnemonic(opcode)),
        }
    }
}

impl<T: OpcodeClassifier + ?Sized> OpcodeClassifier for &T {
    fn is_immediate_push(&self, opcode: u8) -> bool {
        (**self).is_immediate_push(opcode)
    }

    fn immediate_width(&self, opcode: u8) -> usize {
        (**self).immediate_width(opcode)
    }

    fn mnemonic(&self, opcode: u8) -> Cow<'static, str> {
        (**self).mnemonic(opcode)
    }
}
