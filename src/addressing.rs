//! # Addressing Modes
//!
//! Every SM83 opcode is followed by zero, one or two operand bytes. The
//! addressing mode says how many there are and how they are interpreted.
//! Register and register-indirect operands are encoded in the opcode itself
//! and count as [`AddressingMode::Implied`].

/// SM83 operand addressing mode.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied
/// - **1 byte**: Immediate8, Relative, HighPage, SignedImmediate, Prefix
/// - **2 bytes**: Immediate16, Absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand bytes; any registers are named by the opcode.
    ///
    /// Examples: NOP, LD B,C, ADD A,(HL), PUSH BC
    Implied,

    /// 8-bit constant operand.
    ///
    /// Example: LD A,0x42
    Immediate8,

    /// 16-bit little-endian constant operand.
    ///
    /// Example: LD BC,0x1234
    Immediate16,

    /// 16-bit little-endian memory address or jump target.
    ///
    /// Examples: LD (0xC000),A, JP 0x0150, CALL 0x4000
    Absolute,

    /// Signed 8-bit offset relative to the address after the operand.
    ///
    /// Example: JR NZ,-2
    Relative,

    /// 8-bit offset into the 0xFF00 page.
    ///
    /// Example: LDH (0x44),A writes to 0xFF44
    HighPage,

    /// Signed 8-bit displacement added to SP.
    ///
    /// Examples: ADD SP,-8, LD HL,SP+4
    SignedImmediate,

    /// The 0xCB prefix; the operand byte selects an entry in the CB table.
    Prefix,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied => 0,
            AddressingMode::Immediate8
            | AddressingMode::Relative
            | AddressingMode::HighPage
            | AddressingMode::SignedImmediate
            | AddressingMode::Prefix => 1,
            AddressingMode::Immediate16 | AddressingMode::Absolute => 2,
        }
    }
}
