//! # Load and Store Instructions
//!
//! This module implements the SM83 data movement instructions:
//! - LD r,r' / LD r,n8 (including the `(HL)` forms)
//! - LD (BC)/(DE),A and LD A,(BC)/(DE)
//! - LD (HL+)/(HL-),A and LD A,(HL+)/(HL-)
//! - LDH between A and the 0xFF00 page
//! - LD (a16),A / LD A,(a16)
//! - LD rr,n16, LD (a16),SP, LD SP,HL, LD HL,SP+e8
//!
//! None of these touch the flags except LD HL,SP+e8.

use crate::alu;
use crate::registers::{Reg16, Reg8};
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Base of the high page addressed by LDH.
const HIGH_PAGE: u16 = 0xFF00;

fn cycles(opcode: u8) -> u8 {
    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes LD r,r' (0x40-0x7F except 0x76).
///
/// Copies the source operand (bits 2-0) into the destination (bits 5-3).
/// Self-loads such as LD A,A change nothing.
pub(crate) fn execute_ld_r_r<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let dst = Reg8::from_bits(opcode >> 3);
    let src = Reg8::from_bits(opcode);

    let value = cpu.read_r8(src);
    cpu.write_r8(dst, value);

    cycles(opcode)
}

/// Executes LD r,n8 (0x06, 0x0E, ..., 0x3E).
///
/// Reads one operand byte at PC into the destination named by bits 5-3.
pub(crate) fn execute_ld_r_n8<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let dst = Reg8::from_bits(opcode >> 3);
    let value = cpu.fetch_byte();
    cpu.write_r8(dst, value);

    cycles(opcode)
}

/// Executes LD (BC),A (0x02) and LD (DE),A (0x12).
pub(crate) fn execute_ld_pair_a<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let addr = cpu.regs.get16(Reg16::from_bits(opcode >> 4));
    cpu.memory.write(addr, cpu.regs.a());

    cycles(opcode)
}

/// Executes LD A,(BC) (0x0A) and LD A,(DE) (0x1A).
pub(crate) fn execute_ld_a_pair<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let addr = cpu.regs.get16(Reg16::from_bits(opcode >> 4));
    let value = cpu.memory.read(addr);
    cpu.regs.set_a(value);

    cycles(opcode)
}

/// HL adjustment after LD (HL+)/(HL-): bit 4 of the opcode selects decrement.
fn step_hl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let hl = cpu.regs.hl();
    let hl = if opcode & 0x10 == 0 {
        hl.wrapping_add(1)
    } else {
        hl.wrapping_sub(1)
    };
    cpu.regs.set_hl(hl);
}

/// Executes LD (HL+),A (0x22) and LD (HL-),A (0x32).
///
/// Stores A at HL, then increments or decrements HL (wrapping, no flags).
pub(crate) fn execute_ld_hli_a<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    cpu.memory.write(cpu.regs.hl(), cpu.regs.a());
    step_hl(cpu, opcode);

    cycles(opcode)
}

/// Executes LD A,(HL+) (0x2A) and LD A,(HL-) (0x3A).
pub(crate) fn execute_ld_a_hli<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let value = cpu.memory.read(cpu.regs.hl());
    cpu.regs.set_a(value);
    step_hl(cpu, opcode);

    cycles(opcode)
}

/// Executes LDH (a8),A (0xE0): stores A at 0xFF00 + n8.
pub(crate) fn execute_ldh_a8_a<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let offset = cpu.fetch_byte();
    cpu.memory.write(HIGH_PAGE | offset as u16, cpu.regs.a());

    cycles(opcode)
}

/// Executes LDH A,(a8) (0xF0): loads A from 0xFF00 + n8.
pub(crate) fn execute_ldh_a_a8<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let offset = cpu.fetch_byte();
    let value = cpu.memory.read(HIGH_PAGE | offset as u16);
    cpu.regs.set_a(value);

    cycles(opcode)
}

/// Executes LDH (C),A (0xE2): stores A at 0xFF00 + C.
pub(crate) fn execute_ldh_c_a<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    cpu.memory.write(HIGH_PAGE | cpu.regs.c() as u16, cpu.regs.a());

    cycles(opcode)
}

/// Executes LDH A,(C) (0xF2): loads A from 0xFF00 + C.
pub(crate) fn execute_ldh_a_c<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let value = cpu.memory.read(HIGH_PAGE | cpu.regs.c() as u16);
    cpu.regs.set_a(value);

    cycles(opcode)
}

/// Executes LD (a16),A (0xEA).
pub(crate) fn execute_ld_a16_a<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let addr = cpu.fetch_word();
    cpu.memory.write(addr, cpu.regs.a());

    cycles(opcode)
}

/// Executes LD A,(a16) (0xFA).
pub(crate) fn execute_ld_a_a16<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let addr = cpu.fetch_word();
    let value = cpu.memory.read(addr);
    cpu.regs.set_a(value);

    cycles(opcode)
}

/// Executes LD rr,n16 (0x01, 0x11, 0x21, 0x31).
///
/// Operand bytes are little endian: the first goes into the low half of the
/// pair, the second into the high half.
pub(crate) fn execute_ld_rr_n16<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let value = cpu.fetch_word();
    cpu.regs.set16(Reg16::from_bits(opcode >> 4), value);

    cycles(opcode)
}

/// Executes LD (a16),SP (0x08).
///
/// Writes the low byte of SP at a16 and the high byte at a16+1.
pub(crate) fn execute_ld_a16_sp<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let addr = cpu.fetch_word();
    let sp = cpu.regs.sp();
    cpu.memory.write_word(addr, sp);

    cycles(opcode)
}

/// Executes LD SP,HL (0xF9).
pub(crate) fn execute_ld_sp_hl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    cpu.regs.set_sp(cpu.regs.hl());

    cycles(opcode)
}

/// Executes LD HL,SP+e8 (0xF8).
///
/// Flags are set as for ADD SP,e8: Z and N cleared, H and C from the
/// unsigned add of the offset byte to the low byte of SP.
pub(crate) fn execute_ld_hl_sp_e8<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let offset = cpu.fetch_byte() as i8;
    let (result, flags) = alu::add_sp_offset(cpu.regs.sp(), offset);
    cpu.regs.set_hl(result);
    cpu.regs.set_flags(flags);

    cycles(opcode)
}
