//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary register states and memory contents,
//! then executes a few instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use libsm83::{ExecutionError, FlatMemory, MemoryBus, Registers, CPU, OPCODE_TABLE};
use libfuzzer_sys::fuzz_target;

/// Arbitrary register state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    af: u16,
    bc: u16,
    de: u16,
    hl: u16,
    sp: u16,
    pc: u16,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Bytes at the PC location (instructions + operands)
    program: [u8; 16],
    /// Contents of the page HL points into
    hl_page: [u8; 256],
    /// Contents of the page below SP
    stack_page: [u8; 256],
    /// Number of instructions to execute
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let state = &input.cpu_state;
    let mut memory = FlatMemory::new();

    memory.load(state.hl & 0xFF00, &input.hl_page);
    memory.load(state.sp.wrapping_sub(0x100), &input.stack_page);
    memory.load(state.pc, &input.program);

    let mut regs = Registers::default();
    regs.set_af(state.af);
    regs.set_bc(state.bc);
    regs.set_de(state.de);
    regs.set_hl(state.hl);
    regs.set_sp(state.sp);
    regs.set_pc(state.pc);

    let mut cpu = CPU::with_registers(memory, regs);

    for _ in 0..input.steps % 16 {
        let pc = cpu.pc();
        let opcode = cpu.memory().read(pc);
        let cycles_before = cpu.cycles();

        match cpu.step() {
            Ok(cycles) => {
                // Every instruction costs whole machine cycles
                assert!(cycles > 0 && cycles % 4 == 0);
                assert_eq!(cpu.cycles(), cycles_before + cycles as u64);
            }
            Err(ExecutionError::UndefinedOpcode { opcode: bad, address }) => {
                // Only the 11 undefined opcodes may fail
                assert!(!OPCODE_TABLE[opcode as usize].defined);
                assert_eq!((bad, address), (opcode, pc));
                assert_eq!(cpu.pc(), pc);
                break;
            }
        }

        // The low nibble of F never reads back as set
        assert_eq!(cpu.registers().af() & 0x000F, 0);
        assert_eq!(
            cpu.registers().hl(),
            (cpu.registers().h() as u16) << 8 | cpu.registers().l() as u16
        );
    }
});
