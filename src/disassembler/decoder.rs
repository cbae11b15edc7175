//! Instruction decoder for the SM83 disassembler

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::instructions::cb;
use crate::opcodes::{cb_cycles, OPCODE_TABLE};

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// `Some(Instruction)` for a defined opcode with all of its operand bytes
/// present, `None` for undefined opcodes and truncated input.
///
/// A 0xCB prefix decodes to the CB-table instruction it selects: the mnemonic
/// and cycle count are those of the second byte.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let opcode = *bytes.first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];

    if !metadata.defined {
        return None;
    }

    let size = metadata.size_bytes as usize;
    let operand_bytes = bytes.get(1..size)?.to_vec();

    let (mnemonic, base_cycles) = match metadata.addressing_mode {
        AddressingMode::Prefix => (cb::family(operand_bytes[0]), cb_cycles(operand_bytes[0])),
        _ => (metadata.mnemonic, metadata.base_cycles),
    };

    Some(Instruction {
        address,
        opcode,
        mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
        base_cycles,
    })
}
