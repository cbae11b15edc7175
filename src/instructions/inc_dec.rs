//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC r / DEC r, including (HL): Z, N and H updated, C untouched
//! - INC rr / DEC rr: wrap modulo 65536, no flags affected

use crate::alu;
use crate::registers::{Reg16, Reg8};
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Executes INC r (0x04, 0x0C, ..., 0x3C). The target is selected by bits 5-3.
pub(crate) fn execute_inc8<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = Reg8::from_bits(opcode >> 3);

    let value = cpu.read_r8(target);
    let (result, flags) = alu::inc8(value, cpu.regs.flag_c());

    cpu.write_r8(target, result);
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes DEC r (0x05, 0x0D, ..., 0x3D). The target is selected by bits 5-3.
pub(crate) fn execute_dec8<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = Reg8::from_bits(opcode >> 3);

    let value = cpu.read_r8(target);
    let (result, flags) = alu::dec8(value, cpu.regs.flag_c());

    cpu.write_r8(target, result);
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes INC rr (0x03, 0x13, 0x23, 0x33).
pub(crate) fn execute_inc16<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let pair = Reg16::from_bits(opcode >> 4);
    let value = cpu.regs.get16(pair).wrapping_add(1);
    cpu.regs.set16(pair, value);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes DEC rr (0x0B, 0x1B, 0x2B, 0x3B).
pub(crate) fn execute_dec16<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let pair = Reg16::from_bits(opcode >> 4);
    let value = cpu.regs.get16(pair).wrapping_sub(1);
    cpu.regs.set16(pair, value);

    OPCODE_TABLE[opcode as usize].base_cycles
}
