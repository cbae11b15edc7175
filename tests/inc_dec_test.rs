//! Tests for INC and DEC.
//!
//! Tests cover:
//! - 8-bit INC/DEC flag rules (Z, N, H; C untouched)
//! - (HL) operands
//! - 16-bit INC/DEC wraparound with no flag changes

use libsm83::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU at the cartridge entry point (0x0100)
fn setup_cpu() -> CPU<FlatMemory> {
    CPU::new(FlatMemory::new())
}

// ========== 8-bit INC ==========

#[test]
fn test_inc_b_basic() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x04); // INC B
    cpu.registers_mut().set_b(0x41);

    assert_eq!(cpu.step(), Ok(4));

    assert_eq!(cpu.registers().b(), 0x42);
    assert!(!cpu.registers().flag_z());
    assert!(!cpu.registers().flag_n());
    assert!(!cpu.registers().flag_h());
}

#[test]
fn test_inc_wraps_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x3C); // INC A
    cpu.registers_mut().set_a(0xFF);
    cpu.registers_mut().set_flag_c(false);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x00);
    assert!(cpu.registers().flag_z());
    assert!(cpu.registers().flag_h());
    assert!(!cpu.registers().flag_c());
}

#[test]
fn test_inc_half_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x0C); // INC C
    cpu.registers_mut().set_c(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().c(), 0x10);
    assert!(cpu.registers().flag_h());
}

#[test]
fn test_inc_preserves_carry() {
    for carry in [false, true] {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x0100, 0x14); // INC D
        cpu.registers_mut().set_d(0xFF);
        cpu.registers_mut().set_flag_c(carry);

        cpu.step().unwrap();

        assert_eq!(cpu.registers().flag_c(), carry);
    }
}

#[test]
fn test_inc_hl_indirect() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x34); // INC (HL)
    cpu.registers_mut().set_hl(0xC000);
    cpu.memory_mut().write(0xC000, 0x7F);

    assert_eq!(cpu.step(), Ok(12));

    assert_eq!(cpu.memory().read(0xC000), 0x80);
    assert_eq!(cpu.registers().hl(), 0xC000);
    assert!(cpu.registers().flag_h());
}

#[test]
fn test_inc_h_updates_hl() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x24); // INC H
    cpu.registers_mut().set_hl(0x12FF);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().hl(), 0x13FF);
}

// ========== 8-bit DEC ==========

#[test]
fn test_dec_from_zero_underflows() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x05); // DEC B
    cpu.registers_mut().set_b(0x00);

    assert_eq!(cpu.step(), Ok(4));

    assert_eq!(cpu.registers().b(), 0xFF);
    assert!(!cpu.registers().flag_z());
    assert!(cpu.registers().flag_n());
    assert!(cpu.registers().flag_h());
}

#[test]
fn test_dec_from_one_sets_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x1D); // DEC E
    cpu.registers_mut().set_e(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().e(), 0x00);
    assert!(cpu.registers().flag_z());
    assert!(cpu.registers().flag_n());
    assert!(!cpu.registers().flag_h());
}

#[test]
fn test_dec_preserves_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x2D); // DEC L
    cpu.registers_mut().set_l(0x00);
    cpu.registers_mut().set_flag_c(true);

    cpu.step().unwrap();

    assert!(cpu.registers().flag_c());
}

#[test]
fn test_dec_hl_indirect() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x35); // DEC (HL)
    cpu.registers_mut().set_hl(0xC000);
    cpu.memory_mut().write(0xC000, 0x10);

    assert_eq!(cpu.step(), Ok(12));

    assert_eq!(cpu.memory().read(0xC000), 0x0F);
    assert!(cpu.registers().flag_h());
}

// ========== 16-bit INC/DEC ==========

#[test]
fn test_inc_bc_wraps_without_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x03); // INC BC
    cpu.registers_mut().set_bc(0xFFFF);
    let flags = cpu.registers().flags();

    assert_eq!(cpu.step(), Ok(8));

    assert_eq!(cpu.registers().bc(), 0x0000);
    assert_eq!(cpu.registers().flags(), flags);
}

#[test]
fn test_dec_sp_wraps_without_flags() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x3B); // DEC SP
    cpu.registers_mut().set_sp(0x0000);
    let flags = cpu.registers().flags();

    assert_eq!(cpu.step(), Ok(8));

    assert_eq!(cpu.sp(), 0xFFFF);
    assert_eq!(cpu.registers().flags(), flags);
}

#[test]
fn test_inc_dec_register_pairs() {
    let mut cpu = setup_cpu();
    // INC DE; INC HL; DEC DE; DEC HL
    cpu.memory_mut().load(0x0100, &[0x13, 0x23, 0x1B, 0x2B]);
    cpu.registers_mut().set_de(0x00FF);
    cpu.registers_mut().set_hl(0x12FF);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.registers().de(), 0x0100);
    assert_eq!(cpu.registers().hl(), 0x1300);
    assert_eq!(cpu.registers().h(), 0x13);
    assert_eq!(cpu.registers().l(), 0x00);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.registers().de(), 0x00FF);
    assert_eq!(cpu.registers().hl(), 0x12FF);
}
