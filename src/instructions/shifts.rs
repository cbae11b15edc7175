//! # Accumulator Rotate Instructions
//!
//! This module implements the one-byte rotates of A:
//! - RLCA, RRCA: circular
//! - RLA, RRA: through carry
//!
//! Unlike their CB-prefixed counterparts these always clear Z.

use crate::alu;
use crate::registers::Flags;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

fn rotate_a<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, rotate: fn(u8, bool) -> (u8, Flags)) -> u8 {
    let (result, flags) = rotate(cpu.regs.a(), cpu.regs.flag_c());
    cpu.regs.set_a(result);
    cpu.regs.set_flags(Flags { z: false, ..flags });

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes RLCA (0x07).
pub(crate) fn execute_rlca<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    rotate_a(cpu, opcode, |a, _| alu::rlc(a))
}

/// Executes RRCA (0x0F).
pub(crate) fn execute_rrca<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    rotate_a(cpu, opcode, |a, _| alu::rrc(a))
}

/// Executes RLA (0x17).
pub(crate) fn execute_rla<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    rotate_a(cpu, opcode, alu::rl)
}

/// Executes RRA (0x1F).
pub(crate) fn execute_rra<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    rotate_a(cpu, opcode, alu::rr)
}
