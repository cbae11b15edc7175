//! Tests for the 8-bit ALU group and the other flag-producing arithmetic.
//!
//! Tests cover:
//! - ADD/ADC/SUB/SBC/AND/XOR/OR/CP with registers, (HL) and immediates
//! - The documented 8-bit add edge cases
//! - ADD HL,rr (Z preserved) and ADD SP,e8
//! - DAA, CPL, SCF, CCF
//! - Accumulator rotates (RLCA, RRCA, RLA, RRA)

use libsm83::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU at the cartridge entry point (0x0100)
fn setup_cpu() -> CPU<FlatMemory> {
    CPU::new(FlatMemory::new())
}

/// Runs ADD A,B with the given operands and returns the CPU.
fn add_a_b(a: u8, b: u8) -> CPU<FlatMemory> {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x80); // ADD A,B
    cpu.registers_mut().set_a(a);
    cpu.registers_mut().set_b(b);
    assert_eq!(cpu.step(), Ok(4));
    cpu
}

// ========== ADD Edge Cases ==========

#[test]
fn test_add_zero_plus_zero() {
    let cpu = add_a_b(0x00, 0x00);
    let regs = cpu.registers();

    assert_eq!(regs.a(), 0x00);
    assert!(regs.flag_z());
    assert!(!regs.flag_n());
    assert!(!regs.flag_h());
    assert!(!regs.flag_c());
}

#[test]
fn test_add_half_carry_without_carry() {
    let cpu = add_a_b(0x7F, 0x7F);
    let regs = cpu.registers();

    assert_eq!(regs.a(), 0xFE);
    assert!(!regs.flag_z());
    assert!(regs.flag_h());
    assert!(!regs.flag_c());
}

#[test]
fn test_add_carry_to_zero() {
    let cpu = add_a_b(0x80, 0x80);
    let regs = cpu.registers();

    assert_eq!(regs.a(), 0x00);
    assert!(regs.flag_z());
    assert!(!regs.flag_h());
    assert!(regs.flag_c());
}

#[test]
fn test_add_a_a_matches_add_a_b() {
    for value in [0x00u8, 0x08, 0x0F, 0x7F, 0x80, 0x88, 0xFF] {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x0100, 0x87); // ADD A,A
        cpu.registers_mut().set_a(value);
        cpu.step().unwrap();

        let reference = add_a_b(value, value);
        assert_eq!(cpu.registers().af(), reference.registers().af());
    }
}

#[test]
fn test_add_hl_indirect_and_immediate() {
    let mut cpu = setup_cpu();
    // ADD A,(HL); ADD A,$10
    cpu.memory_mut().load(0x0100, &[0x86, 0xC6, 0x10]);
    cpu.registers_mut().set_hl(0xC000);
    cpu.memory_mut().write(0xC000, 0x05);
    cpu.registers_mut().set_a(0x01);

    assert_eq!(cpu.step(), Ok(8));
    assert_eq!(cpu.registers().a(), 0x06);

    assert_eq!(cpu.step(), Ok(8));
    assert_eq!(cpu.registers().a(), 0x16);
    assert_eq!(cpu.pc(), 0x0103);
}

// ========== ADC / SUB / SBC / CP ==========

#[test]
fn test_adc_uses_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x89); // ADC A,C
    cpu.registers_mut().set_a(0x0E);
    cpu.registers_mut().set_c(0x01);
    cpu.registers_mut().set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x10);
    assert!(cpu.registers().flag_h());
    assert!(!cpu.registers().flag_c());
}

#[test]
fn test_sub_to_zero() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x90); // SUB B
    cpu.registers_mut().set_a(0x3E);
    cpu.registers_mut().set_b(0x3E);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x00);
    assert!(cpu.registers().flag_z());
    assert!(cpu.registers().flag_n());
    assert!(!cpu.registers().flag_h());
    assert!(!cpu.registers().flag_c());
}

#[test]
fn test_sub_borrow() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0100, &[0xD6, 0x01]); // SUB $01
    cpu.registers_mut().set_a(0x00);

    assert_eq!(cpu.step(), Ok(8));

    assert_eq!(cpu.registers().a(), 0xFF);
    assert!(cpu.registers().flag_h());
    assert!(cpu.registers().flag_c());
}

#[test]
fn test_sbc_uses_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x9A); // SBC A,D
    cpu.registers_mut().set_a(0x10);
    cpu.registers_mut().set_d(0x0F);
    cpu.registers_mut().set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x00);
    assert!(cpu.registers().flag_z());
    assert!(cpu.registers().flag_h());
    assert!(!cpu.registers().flag_c());
}

#[test]
fn test_cp_leaves_a() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0100, &[0xFE, 0x90]); // CP $90
    cpu.registers_mut().set_a(0x3C);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x3C);
    assert!(!cpu.registers().flag_z());
    assert!(cpu.registers().flag_n());
    assert!(cpu.registers().flag_c());
}

// ========== Logic ==========

#[test]
fn test_and_sets_half_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0xA0); // AND B
    cpu.registers_mut().set_a(0xF0);
    cpu.registers_mut().set_b(0x0F);
    cpu.registers_mut().set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x00);
    assert!(cpu.registers().flag_z());
    assert!(cpu.registers().flag_h());
    assert!(!cpu.registers().flag_n());
    assert!(!cpu.registers().flag_c());
}

#[test]
fn test_xor_a_clears_a() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0xAF); // XOR A
    cpu.registers_mut().set_a(0x5A);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().af(), 0x0080);
}

#[test]
fn test_or_immediate() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0100, &[0xF6, 0x0F]); // OR $0F
    cpu.registers_mut().set_a(0xA0);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0xAF);
    assert_eq!(cpu.registers().flags().to_byte(), 0x00);
}

// ========== 16-bit Arithmetic ==========

#[test]
fn test_add_hl_bc_half_carry_preserves_zero() {
    for zero in [false, true] {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x0100, 0x09); // ADD HL,BC
        cpu.registers_mut().set_hl(0x0FFF);
        cpu.registers_mut().set_bc(0x0001);
        cpu.registers_mut().set_flag_z(zero);
        cpu.registers_mut().set_flag_n(true);

        assert_eq!(cpu.step(), Ok(8));

        assert_eq!(cpu.registers().hl(), 0x1000);
        assert!(cpu.registers().flag_h());
        assert!(!cpu.registers().flag_c());
        assert!(!cpu.registers().flag_n());
        assert_eq!(cpu.registers().flag_z(), zero);
    }
}

#[test]
fn test_add_hl_hl_carry() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x29); // ADD HL,HL
    cpu.registers_mut().set_hl(0x8000);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().hl(), 0x0000);
    assert!(cpu.registers().flag_c());
    assert!(!cpu.registers().flag_h());
}

#[test]
fn test_add_sp_offset() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x0100, &[0xE8, 0xFF]); // ADD SP,-1
    cpu.registers_mut().set_sp(0xD001);
    cpu.registers_mut().set_flag_z(true);

    assert_eq!(cpu.step(), Ok(16));

    assert_eq!(cpu.sp(), 0xD000);
    // 0x01 + 0xFF carries out of both the nibble and the byte
    assert!(cpu.registers().flag_h());
    assert!(cpu.registers().flag_c());
    assert!(!cpu.registers().flag_z());
}

// ========== DAA / CPL / SCF / CCF ==========

#[test]
fn test_daa_after_add() {
    let mut cpu = setup_cpu();
    // ADD A,$27; DAA
    cpu.memory_mut().load(0x0100, &[0xC6, 0x27, 0x27]);
    cpu.registers_mut().set_a(0x15);

    cpu.step().unwrap();
    assert_eq!(cpu.step(), Ok(4));

    assert_eq!(cpu.registers().a(), 0x42);
    assert!(!cpu.registers().flag_c());
}

#[test]
fn test_daa_after_sub() {
    let mut cpu = setup_cpu();
    // SUB $09; DAA
    cpu.memory_mut().load(0x0100, &[0xD6, 0x09, 0x27]);
    cpu.registers_mut().set_a(0x10);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x01);
    assert!(cpu.registers().flag_n());
}

#[test]
fn test_daa_decimal_carry() {
    let mut cpu = setup_cpu();
    // ADD A,$01; DAA
    cpu.memory_mut().load(0x0100, &[0xC6, 0x01, 0x27]);
    cpu.registers_mut().set_a(0x99);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x00);
    assert!(cpu.registers().flag_z());
    assert!(cpu.registers().flag_c());
}

#[test]
fn test_cpl() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x2F); // CPL
    cpu.registers_mut().set_a(0x35);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0xCA);
    assert!(cpu.registers().flag_n());
    assert!(cpu.registers().flag_h());
}

#[test]
fn test_scf_ccf() {
    let mut cpu = setup_cpu();
    // SCF; CCF
    cpu.memory_mut().load(0x0100, &[0x37, 0x3F]);
    cpu.registers_mut().set_flag_n(true);
    cpu.registers_mut().set_flag_h(true);
    cpu.registers_mut().set_flag_z(true);

    cpu.step().unwrap();
    assert!(cpu.registers().flag_c());
    assert!(!cpu.registers().flag_n());
    assert!(!cpu.registers().flag_h());
    assert!(cpu.registers().flag_z());

    cpu.step().unwrap();
    assert!(!cpu.registers().flag_c());
    assert!(cpu.registers().flag_z());
}

// ========== Accumulator Rotates ==========

#[test]
fn test_rlca() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x07); // RLCA
    cpu.registers_mut().set_a(0x85);

    assert_eq!(cpu.step(), Ok(4));

    assert_eq!(cpu.registers().a(), 0x0B);
    assert!(cpu.registers().flag_c());
}

#[test]
fn test_rla_zero_result_clears_z() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0x17); // RLA
    cpu.registers_mut().set_a(0x80);
    cpu.registers_mut().set_flag_c(false);
    cpu.registers_mut().set_flag_z(true);

    cpu.step().unwrap();

    assert_eq!(cpu.registers().a(), 0x00);
    assert!(!cpu.registers().flag_z());
    assert!(cpu.registers().flag_c());
}

#[test]
fn test_rrca_and_rra() {
    let mut cpu = setup_cpu();
    // RRCA; RRA
    cpu.memory_mut().load(0x0100, &[0x0F, 0x1F]);
    cpu.registers_mut().set_a(0x01);

    cpu.step().unwrap();
    assert_eq!(cpu.registers().a(), 0x80);
    assert!(cpu.registers().flag_c());

    // Carry rotates into bit 7, bit 0 into carry
    cpu.step().unwrap();
    assert_eq!(cpu.registers().a(), 0xC0);
    assert!(!cpu.registers().flag_c());
}
