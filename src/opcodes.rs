//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that serves as the
//! single source of truth for SM83 instruction sizes and timings.
//!
//! The table covers:
//! - **245 defined opcodes**, including the 0xCB prefix
//! - **11 undefined opcodes** (0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED,
//!   0xF4, 0xFC, 0xFD) - marked with "???" mnemonic and `defined: false`
//!
//! Cycle counts are T-cycles (4 per machine cycle). Conditional control flow has
//! two counts: `base_cycles` when the condition fails and `taken_cycles` when it
//! holds. For everything else both fields are equal.

use crate::addressing::AddressingMode;
use crate::addressing::AddressingMode::*;

/// Metadata for a single SM83 opcode.
///
/// # Fields
///
/// - `mnemonic`: Instruction name (e.g., "LD", "ADD", "???")
/// - `operands`: Operand template used by the disassembler. Placeholders in
///   braces (`{n8}`, `{n16}`, `{a8}`, `{a16}`, `{e8}`) are replaced by operand bytes.
/// - `addressing_mode`: How the operand bytes are interpreted
/// - `base_cycles`: Cycle cost (condition false, for conditional instructions)
/// - `taken_cycles`: Cycle cost when a conditional branch is taken
/// - `size_bytes`: Total instruction size including opcode (1-3 bytes)
/// - `defined`: False for the 11 opcode values with no instruction
///
/// # Examples
///
/// ```
/// use libsm83::{OPCODE_TABLE, AddressingMode};
///
/// // LD BC,n16
/// let ld_bc = &OPCODE_TABLE[0x01];
/// assert_eq!(ld_bc.mnemonic, "LD");
/// assert_eq!(ld_bc.addressing_mode, AddressingMode::Immediate16);
/// assert_eq!(ld_bc.base_cycles, 12);
/// assert_eq!(ld_bc.size_bytes, 3);
///
/// // JR NZ,e8
/// let jr_nz = &OPCODE_TABLE[0x20];
/// assert_eq!((jr_nz.base_cycles, jr_nz.taken_cycles), (8, 12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic ("???" for undefined opcodes).
    pub mnemonic: &'static str,

    /// Operand template, e.g. `"BC,{n16}"`. Empty for operand-less instructions.
    pub operands: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Cycle cost when no conditional branch is taken.
    ///
    /// For 0xCB this is the register-operand cost; see [`cb_cycles`].
    pub base_cycles: u8,

    /// Cycle cost when a conditional branch is taken.
    pub taken_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Whether the opcode names an instruction.
    pub defined: bool,
}

impl OpcodeMetadata {
    /// True for instructions whose cycle count depends on a condition.
    pub const fn is_conditional(&self) -> bool {
        self.base_cycles != self.taken_cycles
    }
}

const fn op(
    mnemonic: &'static str,
    operands: &'static str,
    addressing_mode: AddressingMode,
    cycles: u8,
) -> OpcodeMetadata {
    branch(mnemonic, operands, addressing_mode, cycles, cycles)
}

const fn branch(
    mnemonic: &'static str,
    operands: &'static str,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    taken_cycles: u8,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        operands,
        addressing_mode,
        base_cycles,
        taken_cycles,
        size_bytes: 1 + addressing_mode.operand_bytes(),
        defined: true,
    }
}

const fn undefined() -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: "???",
        operands: "",
        addressing_mode: Implied,
        base_cycles: 0,
        taken_cycles: 0,
        size_bytes: 1,
        defined: false,
    }
}

/// Cycle cost of a CB-prefixed instruction, prefix fetch included.
///
/// Register forms take 8 cycles, `(HL)` forms 16, except `BIT b,(HL)` which
/// only reads memory and takes 12.
///
/// # Examples
///
/// ```
/// use libsm83::cb_cycles;
///
/// assert_eq!(cb_cycles(0x37), 8);  // SWAP A
/// assert_eq!(cb_cycles(0x46), 12); // BIT 0,(HL)
/// assert_eq!(cb_cycles(0xC6), 16); // SET 0,(HL)
/// ```
pub const fn cb_cycles(cb_opcode: u8) -> u8 {
    if cb_opcode & 0x07 != 6 {
        8
    } else if cb_opcode & 0xC0 == 0x40 {
        12
    } else {
        16
    }
}

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use libsm83::OPCODE_TABLE;
///
/// let push_af = &OPCODE_TABLE[0xF5];
/// assert_eq!(push_af.mnemonic, "PUSH");
/// assert_eq!(push_af.operands, "AF");
/// assert_eq!(push_af.base_cycles, 16);
///
/// let undefined = &OPCODE_TABLE[0xD3];
/// assert_eq!(undefined.mnemonic, "???");
/// assert!(!undefined.defined);
/// ```
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    /* 0x00 */ op("NOP", "", Implied, 4),
    /* 0x01 */ op("LD", "BC,{n16}", Immediate16, 12),
    /* 0x02 */ op("LD", "(BC),A", Implied, 8),
    /* 0x03 */ op("INC", "BC", Implied, 8),
    /* 0x04 */ op("INC", "B", Implied, 4),
    /* 0x05 */ op("DEC", "B", Implied, 4),
    /* 0x06 */ op("LD", "B,{n8}", Immediate8, 8),
    /* 0x07 */ op("RLCA", "", Implied, 4),
    /* 0x08 */ op("LD", "({a16}),SP", Absolute, 20),
    /* 0x09 */ op("ADD", "HL,BC", Implied, 8),
    /* 0x0A */ op("LD", "A,(BC)", Implied, 8),
    /* 0x0B */ op("DEC", "BC", Implied, 8),
    /* 0x0C */ op("INC", "C", Implied, 4),
    /* 0x0D */ op("DEC", "C", Implied, 4),
    /* 0x0E */ op("LD", "C,{n8}", Immediate8, 8),
    /* 0x0F */ op("RRCA", "", Implied, 4),
    /* 0x10 */ op("STOP", "", Immediate8, 4),
    /* 0x11 */ op("LD", "DE,{n16}", Immediate16, 12),
    /* 0x12 */ op("LD", "(DE),A", Implied, 8),
    /* 0x13 */ op("INC", "DE", Implied, 8),
    /* 0x14 */ op("INC", "D", Implied, 4),
    /* 0x15 */ op("DEC", "D", Implied, 4),
    /* 0x16 */ op("LD", "D,{n8}", Immediate8, 8),
    /* 0x17 */ op("RLA", "", Implied, 4),
    /* 0x18 */ op("JR", "{e8}", Relative, 12),
    /* 0x19 */ op("ADD", "HL,DE", Implied, 8),
    /* 0x1A */ op("LD", "A,(DE)", Implied, 8),
    /* 0x1B */ op("DEC", "DE", Implied, 8),
    /* 0x1C */ op("INC", "E", Implied, 4),
    /* 0x1D */ op("DEC", "E", Implied, 4),
    /* 0x1E */ op("LD", "E,{n8}", Immediate8, 8),
    /* 0x1F */ op("RRA", "", Implied, 4),
    /* 0x20 */ branch("JR", "NZ,{e8}", Relative, 8, 12),
    /* 0x21 */ op("LD", "HL,{n16}", Immediate16, 12),
    /* 0x22 */ op("LD", "(HL+),A", Implied, 8),
    /* 0x23 */ op("INC", "HL", Implied, 8),
    /* 0x24 */ op("INC", "H", Implied, 4),
    /* 0x25 */ op("DEC", "H", Implied, 4),
    /* 0x26 */ op("LD", "H,{n8}", Immediate8, 8),
    /* 0x27 */ op("DAA", "", Implied, 4),
    /* 0x28 */ branch("JR", "Z,{e8}", Relative, 8, 12),
    /* 0x29 */ op("ADD", "HL,HL", Implied, 8),
    /* 0x2A */ op("LD", "A,(HL+)", Implied, 8),
    /* 0x2B */ op("DEC", "HL", Implied, 8),
    /* 0x2C */ op("INC", "L", Implied, 4),
    /* 0x2D */ op("DEC", "L", Implied, 4),
    /* 0x2E */ op("LD", "L,{n8}", Immediate8, 8),
    /* 0x2F */ op("CPL", "", Implied, 4),
    /* 0x30 */ branch("JR", "NC,{e8}", Relative, 8, 12),
    /* 0x31 */ op("LD", "SP,{n16}", Immediate16, 12),
    /* 0x32 */ op("LD", "(HL-),A", Implied, 8),
    /* 0x33 */ op("INC", "SP", Implied, 8),
    /* 0x34 */ op("INC", "(HL)", Implied, 12),
    /* 0x35 */ op("DEC", "(HL)", Implied, 12),
    /* 0x36 */ op("LD", "(HL),{n8}", Immediate8, 12),
    /* 0x37 */ op("SCF", "", Implied, 4),
    /* 0x38 */ branch("JR", "C,{e8}", Relative, 8, 12),
    /* 0x39 */ op("ADD", "HL,SP", Implied, 8),
    /* 0x3A */ op("LD", "A,(HL-)", Implied, 8),
    /* 0x3B */ op("DEC", "SP", Implied, 8),
    /* 0x3C */ op("INC", "A", Implied, 4),
    /* 0x3D */ op("DEC", "A", Implied, 4),
    /* 0x3E */ op("LD", "A,{n8}", Immediate8, 8),
    /* 0x3F */ op("CCF", "", Implied, 4),
    /* 0x40 */ op("LD", "B,B", Implied, 4),
    /* 0x41 */ op("LD", "B,C", Implied, 4),
    /* 0x42 */ op("LD", "B,D", Implied, 4),
    /* 0x43 */ op("LD", "B,E", Implied, 4),
    /* 0x44 */ op("LD", "B,H", Implied, 4),
    /* 0x45 */ op("LD", "B,L", Implied, 4),
    /* 0x46 */ op("LD", "B,(HL)", Implied, 8),
    /* 0x47 */ op("LD", "B,A", Implied, 4),
    /* 0x48 */ op("LD", "C,B", Implied, 4),
    /* 0x49 */ op("LD", "C,C", Implied, 4),
    /* 0x4A */ op("LD", "C,D", Implied, 4),
    /* 0x4B */ op("LD", "C,E", Implied, 4),
    /* 0x4C */ op("LD", "C,H", Implied, 4),
    /* 0x4D */ op("LD", "C,L", Implied, 4),
    /* 0x4E */ op("LD", "C,(HL)", Implied, 8),
    /* 0x4F */ op("LD", "C,A", Implied, 4),
    /* 0x50 */ op("LD", "D,B", Implied, 4),
    /* 0x51 */ op("LD", "D,C", Implied, 4),
    /* 0x52 */ op("LD", "D,D", Implied, 4),
    /* 0x53 */ op("LD", "D,E", Implied, 4),
    /* 0x54 */ op("LD", "D,H", Implied, 4),
    /* 0x55 */ op("LD", "D,L", Implied, 4),
    /* 0x56 */ op("LD", "D,(HL)", Implied, 8),
    /* 0x57 */ op("LD", "D,A", Implied, 4),
    /* 0x58 */ op("LD", "E,B", Implied, 4),
    /* 0x59 */ op("LD", "E,C", Implied, 4),
    /* 0x5A */ op("LD", "E,D", Implied, 4),
    /* 0x5B */ op("LD", "E,E", Implied, 4),
    /* 0x5C */ op("LD", "E,H", Implied, 4),
    /* 0x5D */ op("LD", "E,L", Implied, 4),
    /* 0x5E */ op("LD", "E,(HL)", Implied, 8),
    /* 0x5F */ op("LD", "E,A", Implied, 4),
    /* 0x60 */ op("LD", "H,B", Implied, 4),
    /* 0x61 */ op("LD", "H,C", Implied, 4),
    /* 0x62 */ op("LD", "H,D", Implied, 4),
    /* 0x63 */ op("LD", "H,E", Implied, 4),
    /* 0x64 */ op("LD", "H,H", Implied, 4),
    /* 0x65 */ op("LD", "H,L", Implied, 4),
    /* 0x66 */ op("LD", "H,(HL)", Implied, 8),
    /* 0x67 */ op("LD", "H,A", Implied, 4),
    /* 0x68 */ op("LD", "L,B", Implied, 4),
    /* 0x69 */ op("LD", "L,C", Implied, 4),
    /* 0x6A */ op("LD", "L,D", Implied, 4),
    /* 0x6B */ op("LD", "L,E", Implied, 4),
    /* 0x6C */ op("LD", "L,H", Implied, 4),
    /* 0x6D */ op("LD", "L,L", Implied, 4),
    /* 0x6E */ op("LD", "L,(HL)", Implied, 8),
    /* 0x6F */ op("LD", "L,A", Implied, 4),
    /* 0x70 */ op("LD", "(HL),B", Implied, 8),
    /* 0x71 */ op("LD", "(HL),C", Implied, 8),
    /* 0x72 */ op("LD", "(HL),D", Implied, 8),
    /* 0x73 */ op("LD", "(HL),E", Implied, 8),
    /* 0x74 */ op("LD", "(HL),H", Implied, 8),
    /* 0x75 */ op("LD", "(HL),L", Implied, 8),
    /* 0x76 */ op("HALT", "", Implied, 4),
    /* 0x77 */ op("LD", "(HL),A", Implied, 8),
    /* 0x78 */ op("LD", "A,B", Implied, 4),
    /* 0x79 */ op("LD", "A,C", Implied, 4),
    /* 0x7A */ op("LD", "A,D", Implied, 4),
    /* 0x7B */ op("LD", "A,E", Implied, 4),
    /* 0x7C */ op("LD", "A,H", Implied, 4),
    /* 0x7D */ op("LD", "A,L", Implied, 4),
    /* 0x7E */ op("LD", "A,(HL)", Implied, 8),
    /* 0x7F */ op("LD", "A,A", Implied, 4),
    /* 0x80 */ op("ADD", "A,B", Implied, 4),
    /* 0x81 */ op("ADD", "A,C", Implied, 4),
    /* 0x82 */ op("ADD", "A,D", Implied, 4),
    /* 0x83 */ op("ADD", "A,E", Implied, 4),
    /* 0x84 */ op("ADD", "A,H", Implied, 4),
    /* 0x85 */ op("ADD", "A,L", Implied, 4),
    /* 0x86 */ op("ADD", "A,(HL)", Implied, 8),
    /* 0x87 */ op("ADD", "A,A", Implied, 4),
    /* 0x88 */ op("ADC", "A,B", Implied, 4),
    /* 0x89 */ op("ADC", "A,C", Implied, 4),
    /* 0x8A */ op("ADC", "A,D", Implied, 4),
    /* 0x8B */ op("ADC", "A,E", Implied, 4),
    /* 0x8C */ op("ADC", "A,H", Implied, 4),
    /* 0x8D */ op("ADC", "A,L", Implied, 4),
    /* 0x8E */ op("ADC", "A,(HL)", Implied, 8),
    /* 0x8F */ op("ADC", "A,A", Implied, 4),
    /* 0x90 */ op("SUB", "B", Implied, 4),
    /* 0x91 */ op("SUB", "C", Implied, 4),
    /* 0x92 */ op("SUB", "D", Implied, 4),
    /* 0x93 */ op("SUB", "E", Implied, 4),
    /* 0x94 */ op("SUB", "H", Implied, 4),
    /* 0x95 */ op("SUB", "L", Implied, 4),
    /* 0x96 */ op("SUB", "(HL)", Implied, 8),
    /* 0x97 */ op("SUB", "A", Implied, 4),
    /* 0x98 */ op("SBC", "A,B", Implied, 4),
    /* 0x99 */ op("SBC", "A,C", Implied, 4),
    /* 0x9A */ op("SBC", "A,D", Implied, 4),
    /* 0x9B */ op("SBC", "A,E", Implied, 4),
    /* 0x9C */ op("SBC", "A,H", Implied, 4),
    /* 0x9D */ op("SBC", "A,L", Implied, 4),
    /* 0x9E */ op("SBC", "A,(HL)", Implied, 8),
    /* 0x9F */ op("SBC", "A,A", Implied, 4),
    /* 0xA0 */ op("AND", "B", Implied, 4),
    /* 0xA1 */ op("AND", "C", Implied, 4),
    /* 0xA2 */ op("AND", "D", Implied, 4),
    /* 0xA3 */ op("AND", "E", Implied, 4),
    /* 0xA4 */ op("AND", "H", Implied, 4),
    /* 0xA5 */ op("AND", "L", Implied, 4),
    /* 0xA6 */ op("AND", "(HL)", Implied, 8),
    /* 0xA7 */ op("AND", "A", Implied, 4),
    /* 0xA8 */ op("XOR", "B", Implied, 4),
    /* 0xA9 */ op("XOR", "C", Implied, 4),
    /* 0xAA */ op("XOR", "D", Implied, 4),
    /* 0xAB */ op("XOR", "E", Implied, 4),
    /* 0xAC */ op("XOR", "H", Implied, 4),
    /* 0xAD */ op("XOR", "L", Implied, 4),
    /* 0xAE */ op("XOR", "(HL)", Implied, 8),
    /* 0xAF */ op("XOR", "A", Implied, 4),
    /* 0xB0 */ op("OR", "B", Implied, 4),
    /* 0xB1 */ op("OR", "C", Implied, 4),
    /* 0xB2 */ op("OR", "D", Implied, 4),
    /* 0xB3 */ op("OR", "E", Implied, 4),
    /* 0xB4 */ op("OR", "H", Implied, 4),
    /* 0xB5 */ op("OR", "L", Implied, 4),
    /* 0xB6 */ op("OR", "(HL)", Implied, 8),
    /* 0xB7 */ op("OR", "A", Implied, 4),
    /* 0xB8 */ op("CP", "B", Implied, 4),
    /* 0xB9 */ op("CP", "C", Implied, 4),
    /* 0xBA */ op("CP", "D", Implied, 4),
    /* 0xBB */ op("CP", "E", Implied, 4),
    /* 0xBC */ op("CP", "H", Implied, 4),
    /* 0xBD */ op("CP", "L", Implied, 4),
    /* 0xBE */ op("CP", "(HL)", Implied, 8),
    /* 0xBF */ op("CP", "A", Implied, 4),
    /* 0xC0 */ branch("RET", "NZ", Implied, 8, 20),
    /* 0xC1 */ op("POP", "BC", Implied, 12),
    /* 0xC2 */ branch("JP", "NZ,{a16}", Absolute, 12, 16),
    /* 0xC3 */ op("JP", "{a16}", Absolute, 16),
    /* 0xC4 */ branch("CALL", "NZ,{a16}", Absolute, 12, 24),
    /* 0xC5 */ op("PUSH", "BC", Implied, 16),
    /* 0xC6 */ op("ADD", "A,{n8}", Immediate8, 8),
    /* 0xC7 */ op("RST", "00h", Implied, 16),
    /* 0xC8 */ branch("RET", "Z", Implied, 8, 20),
    /* 0xC9 */ op("RET", "", Implied, 16),
    /* 0xCA */ branch("JP", "Z,{a16}", Absolute, 12, 16),
    /* 0xCB */ op("PREFIX", "CB", Prefix, 8),
    /* 0xCC */ branch("CALL", "Z,{a16}", Absolute, 12, 24),
    /* 0xCD */ op("CALL", "{a16}", Absolute, 24),
    /* 0xCE */ op("ADC", "A,{n8}", Immediate8, 8),
    /* 0xCF */ op("RST", "08h", Implied, 16),
    /* 0xD0 */ branch("RET", "NC", Implied, 8, 20),
    /* 0xD1 */ op("POP", "DE", Implied, 12),
    /* 0xD2 */ branch("JP", "NC,{a16}", Absolute, 12, 16),
    /* 0xD3 */ undefined(),
    /* 0xD4 */ branch("CALL", "NC,{a16}", Absolute, 12, 24),
    /* 0xD5 */ op("PUSH", "DE", Implied, 16),
    /* 0xD6 */ op("SUB", "{n8}", Immediate8, 8),
    /* 0xD7 */ op("RST", "10h", Implied, 16),
    /* 0xD8 */ branch("RET", "C", Implied, 8, 20),
    /* 0xD9 */ op("RETI", "", Implied, 16),
    /* 0xDA */ branch("JP", "C,{a16}", Absolute, 12, 16),
    /* 0xDB */ undefined(),
    /* 0xDC */ branch("CALL", "C,{a16}", Absolute, 12, 24),
    /* 0xDD */ undefined(),
    /* 0xDE */ op("SBC", "A,{n8}", Immediate8, 8),
    /* 0xDF */ op("RST", "18h", Implied, 16),
    /* 0xE0 */ op("LDH", "({a8}),A", HighPage, 12),
    /* 0xE1 */ op("POP", "HL", Implied, 12),
    /* 0xE2 */ op("LDH", "(C),A", Implied, 8),
    /* 0xE3 */ undefined(),
    /* 0xE4 */ undefined(),
    /* 0xE5 */ op("PUSH", "HL", Implied, 16),
    /* 0xE6 */ op("AND", "{n8}", Immediate8, 8),
    /* 0xE7 */ op("RST", "20h", Implied, 16),
    /* 0xE8 */ op("ADD", "SP,{e8}", SignedImmediate, 16),
    /* 0xE9 */ op("JP", "HL", Implied, 4),
    /* 0xEA */ op("LD", "({a16}),A", Absolute, 16),
    /* 0xEB */ undefined(),
    /* 0xEC */ undefined(),
    /* 0xED */ undefined(),
    /* 0xEE */ op("XOR", "{n8}", Immediate8, 8),
    /* 0xEF */ op("RST", "28h", Implied, 16),
    /* 0xF0 */ op("LDH", "A,({a8})", HighPage, 12),
    /* 0xF1 */ op("POP", "AF", Implied, 12),
    /* 0xF2 */ op("LDH", "A,(C)", Implied, 8),
    /* 0xF3 */ op("DI", "", Implied, 4),
    /* 0xF4 */ undefined(),
    /* 0xF5 */ op("PUSH", "AF", Implied, 16),
    /* 0xF6 */ op("OR", "{n8}", Immediate8, 8),
    /* 0xF7 */ op("RST", "30h", Implied, 16),
    /* 0xF8 */ op("LD", "HL,SP{e8}", SignedImmediate, 12),
    /* 0xF9 */ op("LD", "SP,HL", Implied, 8),
    /* 0xFA */ op("LD", "A,({a16})", Absolute, 16),
    /* 0xFB */ op("EI", "", Implied, 4),
    /* 0xFC */ undefined(),
    /* 0xFD */ undefined(),
    /* 0xFE */ op("CP", "{n8}", Immediate8, 8),
    /* 0xFF */ op("RST", "38h", Implied, 16),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_opcodes() {
        let undefined: Vec<usize> = OPCODE_TABLE
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.defined)
            .map(|(i, _)| i)
            .collect();

        assert_eq!(
            undefined,
            [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
        );
    }

    #[test]
    fn test_sizes_follow_addressing_mode() {
        for metadata in OPCODE_TABLE.iter() {
            assert_eq!(
                metadata.size_bytes,
                1 + metadata.addressing_mode.operand_bytes()
            );
        }
    }

    #[test]
    fn test_conditional_entries() {
        let conditional = OPCODE_TABLE.iter().filter(|m| m.is_conditional()).count();
        // JR cc, JP cc, CALL cc, RET cc (4 conditions each)
        assert_eq!(conditional, 16);
    }

    #[test]
    fn test_cb_cycles() {
        for cb in 0..=0xFFu8 {
            let expected = match (cb & 0x07, cb >> 6) {
                (6, 1) => 12,
                (6, _) => 16,
                _ => 8,
            };
            assert_eq!(cb_cycles(cb), expected, "CB 0x{:02X}", cb);
        }
    }
}
