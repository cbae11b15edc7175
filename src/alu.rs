//! # ALU and Flag Logic
//!
//! Pure functions computing the result and flag outcome of every SM83
//! arithmetic, logic, rotate and bit operation. Nothing here touches CPU state;
//! callers pass in operands (and the incoming carry or previous flags when an
//! operation depends on them) and store what comes back.
//!
//! ## Flag rules
//!
//! - **8-bit add/sub**: H = carry/borrow across bit 3, C = across bit 7
//! - **INC/DEC**: as 8-bit add/sub, but C is passed through unchanged
//! - **ADD HL,rr**: H = carry across bit 11, C = across bit 15, Z preserved
//! - **ADD SP,e8 / LD HL,SP+e8**: H and C from the unsigned low-byte add, Z = 0
//!
//! Overflow is never an error: results wrap.

use crate::registers::Flags;

/// 8-bit addition with optional carry-in (ADD when `carry_in` is false, ADC otherwise).
///
/// # Examples
///
/// ```
/// use libsm83::alu;
///
/// let (result, flags) = alu::add8(0x7F, 0x7F, false);
/// assert_eq!(result, 0xFE);
/// assert!(flags.h && !flags.c && !flags.z);
///
/// let (result, flags) = alu::add8(0x80, 0x80, false);
/// assert_eq!(result, 0x00);
/// assert!(flags.z && flags.c && !flags.h);
/// ```
pub fn add8(a: u8, b: u8, carry_in: bool) -> (u8, Flags) {
    let carry = carry_in as u8;
    let wide = a as u16 + b as u16 + carry as u16;
    let result = wide as u8;

    let flags = Flags {
        z: result == 0,
        n: false,
        h: (a & 0x0F) + (b & 0x0F) + carry > 0x0F,
        c: wide > 0xFF,
    };

    (result, flags)
}

/// 8-bit subtraction with optional borrow-in (SUB/CP when `borrow_in` is false, SBC otherwise).
///
/// # Examples
///
/// ```
/// use libsm83::alu;
///
/// let (result, flags) = alu::sub8(0x10, 0x01, false);
/// assert_eq!(result, 0x0F);
/// assert!(flags.n && flags.h && !flags.c);
/// ```
pub fn sub8(a: u8, b: u8, borrow_in: bool) -> (u8, Flags) {
    let borrow = borrow_in as u8;
    let result = a.wrapping_sub(b).wrapping_sub(borrow);

    let flags = Flags {
        z: result == 0,
        n: true,
        h: (a & 0x0F) < (b & 0x0F) + borrow,
        c: (a as u16) < b as u16 + borrow as u16,
    };

    (result, flags)
}

/// 8-bit increment. Carry is carried over from `carry`.
pub fn inc8(value: u8, carry: bool) -> (u8, Flags) {
    let result = value.wrapping_add(1);

    let flags = Flags {
        z: result == 0,
        n: false,
        h: value & 0x0F == 0x0F,
        c: carry,
    };

    (result, flags)
}

/// 8-bit decrement. Carry is carried over from `carry`.
///
/// # Examples
///
/// ```
/// use libsm83::alu;
///
/// let (result, flags) = alu::dec8(0x00, false);
/// assert_eq!(result, 0xFF);
/// assert!(flags.h && flags.n && !flags.z);
///
/// let (result, flags) = alu::dec8(0x01, false);
/// assert_eq!(result, 0x00);
/// assert!(flags.z && !flags.h);
/// ```
pub fn dec8(value: u8, carry: bool) -> (u8, Flags) {
    let result = value.wrapping_sub(1);

    let flags = Flags {
        z: result == 0,
        n: true,
        h: value & 0x0F == 0x00,
        c: carry,
    };

    (result, flags)
}

pub fn and8(a: u8, b: u8) -> (u8, Flags) {
    let result = a & b;
    (result, Flags::new(result == 0, false, true, false))
}

pub fn xor8(a: u8, b: u8) -> (u8, Flags) {
    let result = a ^ b;
    (result, Flags::new(result == 0, false, false, false))
}

pub fn or8(a: u8, b: u8) -> (u8, Flags) {
    let result = a | b;
    (result, Flags::new(result == 0, false, false, false))
}

/// 16-bit register-pair addition (ADD HL,rr).
///
/// The Zero flag is not computed: `zero` is the caller's current Z and is
/// returned as is.
///
/// # Examples
///
/// ```
/// use libsm83::alu;
///
/// let (result, flags) = alu::add16(0x0FFF, 0x0001, true);
/// assert_eq!(result, 0x1000);
/// assert!(flags.h && !flags.c && !flags.n);
/// assert!(flags.z); // preserved
/// ```
pub fn add16(a: u16, b: u16, zero: bool) -> (u16, Flags) {
    let wide = a as u32 + b as u32;

    let flags = Flags {
        z: zero,
        n: false,
        h: (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF,
        c: wide > 0xFFFF,
    };

    (wide as u16, flags)
}

/// SP plus a signed 8-bit displacement (ADD SP,e8 and LD HL,SP+e8).
///
/// H and C come from adding the displacement's raw byte to the low byte of SP
/// as unsigned values; Z and N are always cleared.
pub fn add_sp_offset(sp: u16, offset: i8) -> (u16, Flags) {
    let byte = offset as u8;
    let result = sp.wrapping_add(offset as i16 as u16);

    let flags = Flags {
        z: false,
        n: false,
        h: (sp & 0x000F) + (byte as u16 & 0x000F) > 0x000F,
        c: (sp & 0x00FF) + byte as u16 > 0x00FF,
    };

    (result, flags)
}

// ========== Rotates and Shifts ==========

/// Rotate left circular; bit 7 goes to both bit 0 and Carry.
pub fn rlc(value: u8) -> (u8, Flags) {
    let result = value.rotate_left(1);
    (result, shift_flags(result, value & 0x80 != 0))
}

/// Rotate right circular; bit 0 goes to both bit 7 and Carry.
pub fn rrc(value: u8) -> (u8, Flags) {
    let result = value.rotate_right(1);
    (result, shift_flags(result, value & 0x01 != 0))
}

/// Rotate left through carry.
pub fn rl(value: u8, carry: bool) -> (u8, Flags) {
    let result = (value << 1) | carry as u8;
    (result, shift_flags(result, value & 0x80 != 0))
}

/// Rotate right through carry.
pub fn rr(value: u8, carry: bool) -> (u8, Flags) {
    let result = (value >> 1) | ((carry as u8) << 7);
    (result, shift_flags(result, value & 0x01 != 0))
}

/// Arithmetic shift left (bit 0 cleared).
pub fn sla(value: u8) -> (u8, Flags) {
    let result = value << 1;
    (result, shift_flags(result, value & 0x80 != 0))
}

/// Arithmetic shift right (bit 7 kept).
pub fn sra(value: u8) -> (u8, Flags) {
    let result = (value >> 1) | (value & 0x80);
    (result, shift_flags(result, value & 0x01 != 0))
}

/// Logical shift right (bit 7 cleared).
pub fn srl(value: u8) -> (u8, Flags) {
    let result = value >> 1;
    (result, shift_flags(result, value & 0x01 != 0))
}

/// Swap the two nibbles.
pub fn swap(value: u8) -> (u8, Flags) {
    let result = value.rotate_left(4);
    (result, shift_flags(result, false))
}

fn shift_flags(result: u8, carry: bool) -> Flags {
    Flags::new(result == 0, false, false, carry)
}

/// BIT b,r: Z is set when the tested bit is clear. Carry passes through.
pub fn bit(index: u8, value: u8, carry: bool) -> Flags {
    Flags::new(value & (1 << (index & 0x07)) == 0, false, true, carry)
}

// ========== Accumulator Adjustments ==========

/// Decimal adjust after a BCD addition or subtraction.
///
/// Uses N, H and C of the preceding operation to decide the correction.
///
/// # Examples
///
/// ```
/// use libsm83::{alu, Flags};
///
/// // 0x45 + 0x38 = 0x7D in binary, 83 in BCD
/// let (sum, flags) = alu::add8(0x45, 0x38, false);
/// let (adjusted, flags) = alu::daa(sum, flags);
/// assert_eq!(adjusted, 0x83);
/// assert!(!flags.c);
/// ```
pub fn daa(a: u8, flags: Flags) -> (u8, Flags) {
    let mut result = a;
    let mut carry = flags.c;

    if !flags.n {
        if flags.c || result > 0x99 {
            result = result.wrapping_add(0x60);
            carry = true;
        }
        if flags.h || result & 0x0F > 0x09 {
            result = result.wrapping_add(0x06);
        }
    } else {
        if flags.c {
            result = result.wrapping_sub(0x60);
        }
        if flags.h {
            result = result.wrapping_sub(0x06);
        }
    }

    (result, Flags::new(result == 0, flags.n, false, carry))
}

/// Complement A. Sets N and H, keeps Z and C.
pub fn cpl(a: u8, flags: Flags) -> (u8, Flags) {
    (!a, Flags::new(flags.z, true, true, flags.c))
}

/// Set carry flag. Keeps Z.
pub fn scf(flags: Flags) -> Flags {
    Flags::new(flags.z, false, false, true)
}

/// Complement carry flag. Keeps Z.
pub fn ccf(flags: Flags) -> Flags {
    Flags::new(flags.z, false, false, !flags.c)
}
