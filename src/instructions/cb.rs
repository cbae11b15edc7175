//! # CB-Prefixed Instructions
//!
//! The byte after 0xCB selects one of 256 bit-manipulation instructions:
//!
//! | range     | instruction                               |
//! |-----------|-------------------------------------------|
//! | 0x00-0x3F | RLC, RRC, RL, RR, SLA, SRA, SWAP, SRL r   |
//! | 0x40-0x7F | BIT b,r                                   |
//! | 0x80-0xBF | RES b,r                                   |
//! | 0xC0-0xFF | SET b,r                                   |
//!
//! Bits 2-0 select the operand (B, C, D, E, H, L, (HL), A), bits 5-3 select the
//! shift kind or the bit index.

use crate::alu;
use crate::opcodes::cb_cycles;
use crate::registers::Reg8;
use crate::{MemoryBus, CPU};

/// Mnemonics of the 0x00-0x3F group, in bit 5-3 order.
pub(crate) const SHIFT_MNEMONICS: [&str; 8] =
    ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

/// Mnemonic of a CB-table instruction, e.g. `"BIT"` for 0x7C.
pub(crate) fn family(cb_opcode: u8) -> &'static str {
    match cb_opcode >> 6 {
        0 => SHIFT_MNEMONICS[((cb_opcode >> 3) & 0x07) as usize],
        1 => "BIT",
        2 => "RES",
        _ => "SET",
    }
}

/// Operand text of a CB-table instruction, e.g. `"7,H"` for 0x7C.
pub(crate) fn operands(cb_opcode: u8) -> String {
    let operand = Reg8::from_bits(cb_opcode).name();

    if cb_opcode < 0x40 {
        operand.to_string()
    } else {
        format!("{},{}", (cb_opcode >> 3) & 0x07, operand)
    }
}

/// Executes the 0xCB prefix: fetches the second byte and runs it.
pub(crate) fn execute_prefixed<M: MemoryBus>(cpu: &mut CPU<M>, _opcode: u8) -> u8 {
    let cb_opcode = cpu.fetch_byte();
    execute_cb(cpu, cb_opcode)
}

/// Executes one CB-table instruction.
pub(crate) fn execute_cb<M: MemoryBus>(cpu: &mut CPU<M>, cb_opcode: u8) -> u8 {
    let target = Reg8::from_bits(cb_opcode);
    let index = (cb_opcode >> 3) & 0x07;
    let value = cpu.read_r8(target);

    match cb_opcode >> 6 {
        0 => {
            let carry = cpu.regs.flag_c();
            let (result, flags) = match index {
                0 => alu::rlc(value),
                1 => alu::rrc(value),
                2 => alu::rl(value, carry),
                3 => alu::rr(value, carry),
                4 => alu::sla(value),
                5 => alu::sra(value),
                6 => alu::swap(value),
                _ => alu::srl(value),
            };
            cpu.write_r8(target, result);
            cpu.regs.set_flags(flags);
        }
        1 => {
            let flags = alu::bit(index, value, cpu.regs.flag_c());
            cpu.regs.set_flags(flags);
        }
        2 => cpu.write_r8(target, value & !(1 << index)),
        _ => cpu.write_r8(target, value | (1 << index)),
    }

    cb_cycles(cb_opcode)
}
