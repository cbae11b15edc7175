//! # SM83 Instruction Implementations
//!
//! This module contains the implementations of all SM83 instructions, organized by category.
//! Each handler takes a mutable reference to the CPU and the opcode byte, reads whatever
//! operand bytes it needs through PC, and returns the T-cycles it took.
//!
//! ## Categories
//!
//! - **load_store**: 8-bit and 16-bit loads (LD, LDH)
//! - **arithmetic**: 8-bit ALU ops, ADD HL/SP, DAA, CPL, SCF, CCF
//! - **inc_dec**: INC and DEC on registers, (HL) and register pairs
//! - **shifts**: Accumulator rotates (RLCA, RRCA, RLA, RRA)
//! - **stack**: PUSH and POP
//! - **branches**: JP, JR, CALL, RET, RETI, RST
//! - **control**: NOP, HALT, STOP, DI, EI
//! - **cb**: The CB-prefixed table (rotates, shifts, SWAP, BIT, RES, SET)
//!
//! `execute` is the opcode dispatch table. It is a `match` without a wildcard
//! arm, so the compiler rejects it if any of the 256 opcode values is missing.

pub mod arithmetic;
pub mod branches;
pub mod cb;
pub mod control;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;

use crate::{ExecutionError, MemoryBus, CPU};

/// Executes `opcode`, assuming PC already points past it.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> Result<u8, ExecutionError> {
    let cycles = match opcode {
        0x00 => control::execute_nop(cpu, opcode),
        0x10 => control::execute_stop(cpu, opcode),
        0x76 => control::execute_halt(cpu, opcode),
        0xF3 => control::execute_di(cpu, opcode),
        0xFB => control::execute_ei(cpu, opcode),

        // 8-bit loads
        0x40..=0x75 | 0x77..=0x7F => load_store::execute_ld_r_r(cpu, opcode),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            load_store::execute_ld_r_n8(cpu, opcode)
        }
        0x02 | 0x12 => load_store::execute_ld_pair_a(cpu, opcode),
        0x0A | 0x1A => load_store::execute_ld_a_pair(cpu, opcode),
        0x22 | 0x32 => load_store::execute_ld_hli_a(cpu, opcode),
        0x2A | 0x3A => load_store::execute_ld_a_hli(cpu, opcode),
        0xE0 => load_store::execute_ldh_a8_a(cpu, opcode),
        0xF0 => load_store::execute_ldh_a_a8(cpu, opcode),
        0xE2 => load_store::execute_ldh_c_a(cpu, opcode),
        0xF2 => load_store::execute_ldh_a_c(cpu, opcode),
        0xEA => load_store::execute_ld_a16_a(cpu, opcode),
        0xFA => load_store::execute_ld_a_a16(cpu, opcode),

        // 16-bit loads
        0x01 | 0x11 | 0x21 | 0x31 => load_store::execute_ld_rr_n16(cpu, opcode),
        0x08 => load_store::execute_ld_a16_sp(cpu, opcode),
        0xF8 => load_store::execute_ld_hl_sp_e8(cpu, opcode),
        0xF9 => load_store::execute_ld_sp_hl(cpu, opcode),

        // INC / DEC
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => inc_dec::execute_inc8(cpu, opcode),
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => inc_dec::execute_dec8(cpu, opcode),
        0x03 | 0x13 | 0x23 | 0x33 => inc_dec::execute_inc16(cpu, opcode),
        0x0B | 0x1B | 0x2B | 0x3B => inc_dec::execute_dec16(cpu, opcode),

        // ALU
        0x80..=0xBF => arithmetic::execute_alu_r(cpu, opcode),
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
            arithmetic::execute_alu_n8(cpu, opcode)
        }
        0x09 | 0x19 | 0x29 | 0x39 => arithmetic::execute_add_hl(cpu, opcode),
        0xE8 => arithmetic::execute_add_sp_e8(cpu, opcode),
        0x27 => arithmetic::execute_daa(cpu, opcode),
        0x2F => arithmetic::execute_cpl(cpu, opcode),
        0x37 => arithmetic::execute_scf(cpu, opcode),
        0x3F => arithmetic::execute_ccf(cpu, opcode),

        // Accumulator rotates
        0x07 => shifts::execute_rlca(cpu, opcode),
        0x0F => shifts::execute_rrca(cpu, opcode),
        0x17 => shifts::execute_rla(cpu, opcode),
        0x1F => shifts::execute_rra(cpu, opcode),

        // Stack
        0xC5 | 0xD5 | 0xE5 | 0xF5 => stack::execute_push(cpu, opcode),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => stack::execute_pop(cpu, opcode),

        // Control flow
        0x18 => branches::execute_jr(cpu, opcode),
        0x20 | 0x28 | 0x30 | 0x38 => branches::execute_jr_cc(cpu, opcode),
        0xC3 => branches::execute_jp(cpu, opcode),
        0xC2 | 0xCA | 0xD2 | 0xDA => branches::execute_jp_cc(cpu, opcode),
        0xE9 => branches::execute_jp_hl(cpu, opcode),
        0xCD => branches::execute_call(cpu, opcode),
        0xC4 | 0xCC | 0xD4 | 0xDC => branches::execute_call_cc(cpu, opcode),
        0xC9 => branches::execute_ret(cpu, opcode),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => branches::execute_ret_cc(cpu, opcode),
        0xD9 => branches::execute_reti(cpu, opcode),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => branches::execute_rst(cpu, opcode),

        // CB-prefixed table
        0xCB => cb::execute_prefixed(cpu, opcode),

        0xD3 | 0xDB | 0xDD | 0xE3 | 0xE4 | 0xEB | 0xEC | 0xED | 0xF4 | 0xFC | 0xFD => {
            return Err(ExecutionError::UndefinedOpcode {
                opcode,
                address: cpu.regs.pc().wrapping_sub(1),
            });
        }
    };

    Ok(cycles)
}
