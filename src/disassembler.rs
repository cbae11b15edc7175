//! SM83 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly text. Used by the
//! CPU's trace logging and by host-side debuggers.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::MemoryBus;

pub use formatter::format_instruction;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LD", "JR", "BIT"); ".byte" for data
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost (condition false for conditional instructions)
    pub base_cycles: u8,
}

impl Instruction {
    /// A one-byte `.byte` directive for data that does not decode.
    pub(crate) fn data_byte(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            mnemonic: ".byte",
            addressing_mode: AddressingMode::Implied,
            operand_bytes: vec![byte],
            size_bytes: 1,
            base_cycles: 0,
        }
    }
}

/// Disassemble a byte slice into a vector of instructions
///
/// # Arguments
///
/// * `bytes` - The machine code to disassemble
/// * `start_address` - Address of `bytes[0]`, used for jump targets
///
/// # Returns
///
/// A vector of `Instruction` structs, one for each decoded instruction.
/// Undefined opcodes and a trailing truncated instruction become `.byte`
/// entries.
///
/// # Examples
///
/// ```
/// use libsm83::{disassemble, disassembler::format_instruction};
///
/// // LD A,$42; JR -4; undefined
/// let listing = disassemble(&[0x3E, 0x42, 0x18, 0xFC, 0xD3], 0x0150);
/// let text: Vec<String> = listing.iter().map(format_instruction).collect();
///
/// assert_eq!(text, ["LD A,$42", "JR $0150", ".byte $D3"]);
/// ```
pub fn disassemble(bytes: &[u8], start_address: u16) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = start_address;

    while pc < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[pc..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[pc]));

        pc += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

/// Disassemble the instruction stored at `address` on a memory bus.
///
/// Operand bytes are read with address wraparound, so this never fails; an
/// undefined opcode comes back as a `.byte` entry.
///
/// # Examples
///
/// ```
/// use libsm83::{disassemble_at, disassembler::format_instruction, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xC000, 0xCB);
/// memory.write(0xC001, 0x7C);
///
/// let instr = disassemble_at(&memory, 0xC000);
/// assert_eq!(format_instruction(&instr), "BIT 7,H");
/// assert_eq!(instr.size_bytes, 2);
/// ```
pub fn disassemble_at<M: MemoryBus + ?Sized>(memory: &M, address: u16) -> Instruction {
    let bytes = [
        memory.read(address),
        memory.read(address.wrapping_add(1)),
        memory.read(address.wrapping_add(2)),
    ];

    decoder::decode_instruction(&bytes, address)
        .unwrap_or_else(|| Instruction::data_byte(address, bytes[0]))
}
