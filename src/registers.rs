//! # Register File
//!
//! This module holds every piece of CPU-visible register state of the SM83:
//!
//! - **8-bit registers**: A, B, C, D, E, H, L
//! - **Flags**: Zero, Subtract, HalfCarry, Carry (see [`Flags`])
//! - **16-bit registers**: stack pointer (SP) and program counter (PC)
//!
//! H and L share a single 16-bit backing field, so the HL view and the two
//! byte halves can never disagree. BC, DE and AF are composed on demand.
//!
//! The power-on values written by the boot ROM of each console model are
//! provided by [`Registers::power_on`].

/// Bit mask of the Zero flag inside the packed flag byte.
pub const FLAG_Z: u8 = 0b1000_0000;
/// Bit mask of the Subtract flag inside the packed flag byte.
pub const FLAG_N: u8 = 0b0100_0000;
/// Bit mask of the HalfCarry flag inside the packed flag byte.
pub const FLAG_H: u8 = 0b0010_0000;
/// Bit mask of the Carry flag inside the packed flag byte.
pub const FLAG_C: u8 = 0b0001_0000;

/// The four SM83 condition flags.
///
/// Stored as independent booleans. The packed byte form (as seen by
/// `PUSH AF` / `POP AF`) only exists at the stack boundary:
///
/// | bit | flag      |
/// |-----|-----------|
/// | 7   | Zero      |
/// | 6   | Subtract  |
/// | 5   | HalfCarry |
/// | 4   | Carry     |
/// | 3-0 | always 0  |
///
/// # Examples
///
/// ```
/// use libsm83::Flags;
///
/// let flags = Flags::from_byte(0xBF);
/// assert!(flags.z && !flags.n && flags.h && flags.c);
///
/// // The low nibble never survives a round trip
/// assert_eq!(flags.to_byte(), 0xB0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// Zero flag (result was zero)
    pub z: bool,

    /// Subtract flag (last ALU operation was a subtraction)
    pub n: bool,

    /// Half-carry flag (carry/borrow across bit 3, or bit 11 for 16-bit adds)
    pub h: bool,

    /// Carry flag (carry/borrow across bit 7, or bit 15 for 16-bit adds)
    pub c: bool,
}

impl Flags {
    /// Builds a flag set from the four individual bits.
    pub const fn new(z: bool, n: bool, h: bool, c: bool) -> Self {
        Self { z, n, h, c }
    }

    /// Unpacks a flag byte. Only bits 7..4 are consulted.
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            z: byte & FLAG_Z != 0,
            n: byte & FLAG_N != 0,
            h: byte & FLAG_H != 0,
            c: byte & FLAG_C != 0,
        }
    }

    /// Packs the flags into a byte with the low nibble cleared.
    pub const fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.z {
            byte |= FLAG_Z;
        }
        if self.n {
            byte |= FLAG_N;
        }
        if self.h {
            byte |= FLAG_H;
        }
        if self.c {
            byte |= FLAG_C;
        }
        byte
    }
}

impl From<u8> for Flags {
    fn from(byte: u8) -> Self {
        Flags::from_byte(byte)
    }
}

impl From<Flags> for u8 {
    fn from(flags: Flags) -> Self {
        flags.to_byte()
    }
}

/// Console model, used to pick the register state left behind by the boot ROM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Model {
    /// Original Game Boy (DMG-01).
    #[default]
    Dmg,

    /// Game Boy Pocket / Light. Identical to DMG except A = 0xFF.
    Mgb,

    /// Game Boy Color running in color mode.
    Cgb,
}

/// 8-bit register operand, in SM83 3-bit encoding order.
///
/// Index 6 does not name a register: it selects the byte in memory at HL.
/// The register file itself cannot resolve [`Reg8::HlIndirect`]; that takes
/// the memory bus and is done by the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg8 {
    B,
    C,
    D,
    E,
    H,
    L,
    HlIndirect,
    A,
}

impl Reg8 {
    /// Decodes the low three bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Reg8::B,
            1 => Reg8::C,
            2 => Reg8::D,
            3 => Reg8::E,
            4 => Reg8::H,
            5 => Reg8::L,
            6 => Reg8::HlIndirect,
            _ => Reg8::A,
        }
    }

    /// Assembly name of the operand (`"(HL)"` for the memory form).
    pub const fn name(self) -> &'static str {
        match self {
            Reg8::B => "B",
            Reg8::C => "C",
            Reg8::D => "D",
            Reg8::E => "E",
            Reg8::H => "H",
            Reg8::L => "L",
            Reg8::HlIndirect => "(HL)",
            Reg8::A => "A",
        }
    }
}

/// 16-bit register pair operand used by loads, INC/DEC and ADD HL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
}

impl Reg16 {
    /// Decodes the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Reg16::BC,
            1 => Reg16::DE,
            2 => Reg16::HL,
            _ => Reg16::SP,
        }
    }
}

/// 16-bit register pair operand used by PUSH and POP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackPair {
    BC,
    DE,
    HL,
    AF,
}

impl StackPair {
    /// Decodes the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => StackPair::BC,
            1 => StackPair::DE,
            2 => StackPair::HL,
            _ => StackPair::AF,
        }
    }
}

/// Branch condition for JR/JP/CALL/RET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    /// Decodes the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NotCarry,
            _ => Condition::Carry,
        }
    }

    /// Returns true if the condition holds for the given flags.
    pub const fn holds(self, flags: Flags) -> bool {
        match self {
            Condition::NotZero => !flags.z,
            Condition::Zero => flags.z,
            Condition::NotCarry => !flags.c,
            Condition::Carry => flags.c,
        }
    }
}

/// The SM83 register file.
///
/// # Examples
///
/// ```
/// use libsm83::Registers;
///
/// let mut regs = Registers::default();
/// regs.set_hl(0xBEEF);
/// assert_eq!(regs.h(), 0xBE);
/// assert_eq!(regs.l(), 0xEF);
///
/// regs.set_l(0x00);
/// assert_eq!(regs.hl(), 0xBE00);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Registers {
    a: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,

    /// H in the high byte, L in the low byte
    hl: u16,

    sp: u16,
    pc: u16,
    flags: Flags,
}

impl Registers {
    /// Returns the register state the boot ROM of `model` hands over to the
    /// cartridge at 0x0100.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{Model, Registers};
    ///
    /// let regs = Registers::power_on(Model::Dmg);
    /// assert_eq!(regs.a(), 0x01);
    /// assert_eq!(regs.af(), 0x01B0);
    /// assert_eq!(regs.bc(), 0x0013);
    /// assert_eq!(regs.de(), 0x00D8);
    /// assert_eq!(regs.hl(), 0x014D);
    /// assert_eq!(regs.sp(), 0xFFFE);
    /// assert_eq!(regs.pc(), 0x0100);
    /// ```
    pub fn power_on(model: Model) -> Self {
        let mut regs = Registers {
            sp: 0xFFFE,
            pc: 0x0100,
            ..Registers::default()
        };

        match model {
            Model::Dmg | Model::Mgb => {
                regs.set_af(0x01B0);
                regs.set_bc(0x0013);
                regs.set_de(0x00D8);
                regs.set_hl(0x014D);
                if model == Model::Mgb {
                    regs.a = 0xFF;
                }
            }
            Model::Cgb => {
                regs.set_af(0x1180);
                regs.set_bc(0x0000);
                regs.set_de(0xFF56);
                regs.set_hl(0x000D);
            }
        }

        regs
    }

    // ========== 8-bit Registers ==========

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn set_b(&mut self, value: u8) {
        self.b = value;
    }

    pub fn c(&self) -> u8 {
        self.c
    }

    pub fn set_c(&mut self, value: u8) {
        self.c = value;
    }

    pub fn d(&self) -> u8 {
        self.d
    }

    pub fn set_d(&mut self, value: u8) {
        self.d = value;
    }

    pub fn e(&self) -> u8 {
        self.e
    }

    pub fn set_e(&mut self, value: u8) {
        self.e = value;
    }

    /// High byte of HL.
    pub fn h(&self) -> u8 {
        (self.hl >> 8) as u8
    }

    /// Replaces the high byte of HL, leaving L untouched.
    pub fn set_h(&mut self, value: u8) {
        self.hl = (self.hl & 0x00FF) | ((value as u16) << 8);
    }

    /// Low byte of HL.
    pub fn l(&self) -> u8 {
        self.hl as u8
    }

    /// Replaces the low byte of HL, leaving H untouched.
    pub fn set_l(&mut self, value: u8) {
        self.hl = (self.hl & 0xFF00) | value as u16;
    }

    // ========== 16-bit Views ==========

    pub fn hl(&self) -> u16 {
        self.hl
    }

    pub fn set_hl(&mut self, value: u16) {
        self.hl = value;
    }

    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    /// A in the high byte, packed flags in the low byte (low nibble zero).
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags.to_byte()])
    }

    /// Sets A from the high byte and the flags from bits 7..4 of the low byte.
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.flags = Flags::from_byte(f);
    }

    pub fn sp(&self) -> u16 {
        self.sp
    }

    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Reads a 16-bit pair by operand encoding.
    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.bc(),
            Reg16::DE => self.de(),
            Reg16::HL => self.hl,
            Reg16::SP => self.sp,
        }
    }

    /// Writes a 16-bit pair by operand encoding.
    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.set_bc(value),
            Reg16::DE => self.set_de(value),
            Reg16::HL => self.hl = value,
            Reg16::SP => self.sp = value,
        }
    }

    /// Reads a PUSH/POP pair by operand encoding.
    pub fn get_stack_pair(&self, pair: StackPair) -> u16 {
        match pair {
            StackPair::BC => self.bc(),
            StackPair::DE => self.de(),
            StackPair::HL => self.hl,
            StackPair::AF => self.af(),
        }
    }

    /// Writes a PUSH/POP pair by operand encoding.
    pub fn set_stack_pair(&mut self, pair: StackPair, value: u16) {
        match pair {
            StackPair::BC => self.set_bc(value),
            StackPair::DE => self.set_de(value),
            StackPair::HL => self.hl = value,
            StackPair::AF => self.set_af(value),
        }
    }

    /// Reads an 8-bit register.
    ///
    /// Returns `None` for [`Reg8::HlIndirect`], which lives in memory.
    pub fn get8(&self, reg: Reg8) -> Option<u8> {
        match reg {
            Reg8::B => Some(self.b),
            Reg8::C => Some(self.c),
            Reg8::D => Some(self.d),
            Reg8::E => Some(self.e),
            Reg8::H => Some(self.h()),
            Reg8::L => Some(self.l()),
            Reg8::HlIndirect => None,
            Reg8::A => Some(self.a),
        }
    }

    /// Writes an 8-bit register. Writes to [`Reg8::HlIndirect`] are ignored
    /// here; the CPU routes them to memory before reaching this point.
    pub fn set8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.set_h(value),
            Reg8::L => self.set_l(value),
            Reg8::HlIndirect => {}
            Reg8::A => self.a = value,
        }
    }

    // ========== Flags ==========

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    pub fn flag_z(&self) -> bool {
        self.flags.z
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flags.z = value;
    }

    pub fn flag_n(&self) -> bool {
        self.flags.n
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flags.n = value;
    }

    pub fn flag_h(&self) -> bool {
        self.flags.h
    }

    pub fn set_flag_h(&mut self, value: bool) {
        self.flags.h = value;
    }

    pub fn flag_c(&self) -> bool {
        self.flags.c
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flags.c = value;
    }
}
