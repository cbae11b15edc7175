//! # Control Flow Instructions
//!
//! This module implements jumps, calls and returns:
//! - JP a16 / JP cc,a16 / JP HL
//! - JR e8 / JR cc,e8
//! - CALL a16 / CALL cc,a16
//! - RET / RET cc / RETI
//! - RST n
//!
//! Conditional forms report `taken_cycles` from the opcode table when the
//! condition holds and `base_cycles` otherwise. Operand bytes are always
//! consumed, even when the branch is not taken. No flags are affected.

use crate::registers::Condition;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Condition encoded in bits 4-3 of a conditional opcode.
fn condition<M: MemoryBus>(cpu: &CPU<M>, opcode: u8) -> bool {
    Condition::from_bits(opcode >> 3).holds(cpu.regs.flags())
}

fn cycles(opcode: u8, taken: bool) -> u8 {
    let metadata = &OPCODE_TABLE[opcode as usize];
    if taken {
        metadata.taken_cycles
    } else {
        metadata.base_cycles
    }
}

/// Executes JP a16 (0xC3).
pub(crate) fn execute_jp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = cpu.fetch_word();
    cpu.regs.set_pc(target);

    cycles(opcode, true)
}

/// Executes JP cc,a16 (0xC2, 0xCA, 0xD2, 0xDA).
pub(crate) fn execute_jp_cc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = cpu.fetch_word();
    let taken = condition(cpu, opcode);
    if taken {
        cpu.regs.set_pc(target);
    }

    cycles(opcode, taken)
}

/// Executes JP HL (0xE9). Jumps to HL itself, not to the byte at HL.
pub(crate) fn execute_jp_hl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    cpu.regs.set_pc(cpu.regs.hl());

    cycles(opcode, true)
}

/// Reads the signed offset and returns the branch target.
///
/// The offset is relative to the address after the operand byte.
fn relative_target<M: MemoryBus>(cpu: &mut CPU<M>) -> u16 {
    let offset = cpu.fetch_byte() as i8;
    cpu.regs.pc().wrapping_add_signed(offset as i16)
}

/// Executes JR e8 (0x18).
///
/// # Examples
///
/// ```
/// use libsm83::{CPU, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x0100, 0x18); // JR -2: jump to itself
/// mem.write(0x0101, 0xFE);
///
/// let mut cpu = CPU::new(mem);
/// assert_eq!(cpu.step(), Ok(12));
/// assert_eq!(cpu.pc(), 0x0100);
/// ```
pub(crate) fn execute_jr<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = relative_target(cpu);
    cpu.regs.set_pc(target);

    cycles(opcode, true)
}

/// Executes JR cc,e8 (0x20, 0x28, 0x30, 0x38).
pub(crate) fn execute_jr_cc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = relative_target(cpu);
    let taken = condition(cpu, opcode);
    if taken {
        cpu.regs.set_pc(target);
    }

    cycles(opcode, taken)
}

/// Executes CALL a16 (0xCD).
///
/// Pushes the address of the next instruction, then jumps.
pub(crate) fn execute_call<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = cpu.fetch_word();
    let return_addr = cpu.regs.pc();
    cpu.push_word(return_addr);
    cpu.regs.set_pc(target);

    cycles(opcode, true)
}

/// Executes CALL cc,a16 (0xC4, 0xCC, 0xD4, 0xDC).
pub(crate) fn execute_call_cc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = cpu.fetch_word();
    let taken = condition(cpu, opcode);
    if taken {
        let return_addr = cpu.regs.pc();
        cpu.push_word(return_addr);
        cpu.regs.set_pc(target);
    }

    cycles(opcode, taken)
}

/// Executes RET (0xC9).
pub(crate) fn execute_ret<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = cpu.pop_word();
    cpu.regs.set_pc(target);

    cycles(opcode, true)
}

/// Executes RET cc (0xC0, 0xC8, 0xD0, 0xD8).
pub(crate) fn execute_ret_cc<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let taken = condition(cpu, opcode);
    if taken {
        let target = cpu.pop_word();
        cpu.regs.set_pc(target);
    }

    cycles(opcode, taken)
}

/// Executes RETI (0xD9): RET and set IME immediately (no EI delay).
pub(crate) fn execute_reti<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let target = cpu.pop_word();
    cpu.regs.set_pc(target);
    cpu.ime = true;
    cpu.ime_delay = 0;

    cycles(opcode, true)
}

/// Executes RST n (0xC7, 0xCF, ..., 0xFF).
///
/// Calls the fixed vector encoded in bits 5-3 (0x00, 0x08, ..., 0x38).
pub(crate) fn execute_rst<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let return_addr = cpu.regs.pc();
    cpu.push_word(return_addr);
    cpu.regs.set_pc((opcode & 0x38) as u16);

    cycles(opcode, true)
}
