//! # Arithmetic and Logic Instructions
//!
//! This module implements the accumulator ALU group and the other
//! flag-producing arithmetic:
//! - ADD, ADC, SUB, SBC, AND, XOR, OR, CP with a register, (HL) or n8
//! - ADD HL,rr (Z preserved)
//! - ADD SP,e8
//! - DAA, CPL, SCF, CCF
//!
//! Flag computation lives in [`crate::alu`]; handlers only route operands.

use crate::alu;
use crate::registers::{Reg16, Reg8};
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// The eight accumulator operations, in opcode bit order (bits 5-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// Applies `op` to A and `value`, storing the result (except for CP) and the flags.
fn apply<M: MemoryBus>(cpu: &mut CPU<M>, op: AluOp, value: u8) {
    let a = cpu.regs.a();
    let carry = cpu.regs.flag_c();

    let (result, flags) = match op {
        AluOp::Add => alu::add8(a, value, false),
        AluOp::Adc => alu::add8(a, value, carry),
        AluOp::Sub | AluOp::Cp => alu::sub8(a, value, false),
        AluOp::Sbc => alu::sub8(a, value, carry),
        AluOp::And => alu::and8(a, value),
        AluOp::Xor => alu::xor8(a, value),
        AluOp::Or => alu::or8(a, value),
    };

    if op != AluOp::Cp {
        cpu.regs.set_a(result);
    }
    cpu.regs.set_flags(flags);
}

/// Executes an ALU operation with a register or (HL) operand (0x80-0xBF).
///
/// The operation is selected by bits 5-3, the operand by bits 2-0. The
/// operand is only read.
pub(crate) fn execute_alu_r<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let value = cpu.read_r8(Reg8::from_bits(opcode));
    apply(cpu, AluOp::from_bits(opcode >> 3), value);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes an ALU operation with an immediate operand (0xC6, 0xCE, ..., 0xFE).
pub(crate) fn execute_alu_n8<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let value = cpu.fetch_byte();
    apply(cpu, AluOp::from_bits(opcode >> 3), value);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes ADD HL,rr (0x09, 0x19, 0x29, 0x39).
///
/// H is the carry out of bit 11, C the carry out of bit 15, N is cleared
/// and Z keeps its previous value.
pub(crate) fn execute_add_hl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let operand = cpu.regs.get16(Reg16::from_bits(opcode >> 4));
    let (result, flags) = alu::add16(cpu.regs.hl(), operand, cpu.regs.flag_z());

    cpu.regs.set_hl(result);
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes ADD SP,e8 (0xE8).
pub(crate) fn execute_add_sp_e8<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let offset = cpu.fetch_byte() as i8;
    let (result, flags) = alu::add_sp_offset(cpu.regs.sp(), offset);

    cpu.regs.set_sp(result);
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes DAA (0x27): BCD-corrects A after an addition or subtraction.
pub(crate) fn execute_daa<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let (result, flags) = alu::daa(cpu.regs.a(), cpu.regs.flags());
    cpu.regs.set_a(result);
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes CPL (0x2F).
pub(crate) fn execute_cpl<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let (result, flags) = alu::cpl(cpu.regs.a(), cpu.regs.flags());
    cpu.regs.set_a(result);
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes SCF (0x37).
pub(crate) fn execute_scf<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let flags = alu::scf(cpu.regs.flags());
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}

/// Executes CCF (0x3F).
pub(crate) fn execute_ccf<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) -> u8 {
    let flags = alu::ccf(cpu.regs.flags());
    cpu.regs.set_flags(flags);

    OPCODE_TABLE[opcode as usize].base_cycles
}
