//! # Stack Operations
//!
//! This module implements PUSH and POP for BC, DE, HL and AF.
//!
//! The stack grows downward through the full 16-bit address space. A word is
//! stored little endian: after a push the low byte is at SP and the high byte
//! at SP+1.
//!
//! For AF the "low byte" is the packed flag byte. On POP AF only bits 7-4 of
//! that byte are kept, so the low nibble always reads back as zero.

use crate::registers::StackPair;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Executes PUSH rr (0xC5, 0xD5, 0xE5, 0xF5).
///
/// Stack operation:
/// 1. Decrement SP, write the high byte
/// 2. Decrement SP, write the low byte
///
/// Flags affected: None
pub(crate) fn execute_push<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let value = cpu.regs.get_stack_pair(StackPair::from_bits(opcode >> 4));
    cpu.push_word(value);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes POP rr (0xC1, 0xD1, 0xE1, 0xF1).
///
/// Stack operation:
/// 1. Read the low byte at SP, the high byte at SP+1
/// 2. Increment SP by two
///
/// Flags affected: None, except POP AF which loads all four.
pub(crate) fn execute_pop<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let value = cpu.pop_word();
    cpu.regs.set_stack_pair(StackPair::from_bits(opcode >> 4), value);

    OPCODE_TABLE[opcode as usize].base_cycles
}
