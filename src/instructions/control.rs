//! # CPU Control Instructions
//!
//! This module implements instructions that change CPU control state rather
//! than data:
//! - NOP
//! - HALT, STOP
//! - DI, EI

use log::debug;

use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Executes NOP (0x00). Nothing changes besides the PC advance done by the
/// fetch loop.
pub(crate) fn execute_nop<M: MemoryBus>(_cpu: &mut CPU<M>, opcode: u8) -> u8 {
    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes HALT (0x76).
///
/// The CPU idles until the host calls `service_interrupt` or `wake`.
pub(crate) fn execute_halt<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    debug!("HALT at 0x{:04X}", cpu.regs.pc().wrapping_sub(1));
    cpu.halted = true;

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes STOP (0x10).
///
/// STOP is followed by one padding byte, which is consumed. The CPU stays
/// stopped until the host calls `wake`.
pub(crate) fn execute_stop<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    debug!("STOP at 0x{:04X}", cpu.regs.pc().wrapping_sub(1));
    cpu.fetch_byte();
    cpu.stopped = true;

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes DI (0xF3). Takes effect immediately and cancels a pending EI.
pub(crate) fn execute_di<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    cpu.ime = false;
    cpu.ime_delay = 0;

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes EI (0xFB).
///
/// IME is set after the instruction following EI has executed. The delay is
/// counted by `CPU::step`.
pub(crate) fn execute_ei<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    if !cpu.ime {
        cpu.ime_delay = 2;
    }

    OPCODE_TABLE[opcode as usize].base_cycles
}
