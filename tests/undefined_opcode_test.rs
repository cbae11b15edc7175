//! Tests for the 11 opcode values with no instruction.

use libsm83::{ExecutionError, FlatMemory, MemoryBus, Model, Registers, CPU};

const UNDEFINED: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

/// Helper function to create a CPU at the cartridge entry point (0x0100)
fn setup_cpu() -> CPU<FlatMemory> {
    CPU::new(FlatMemory::new())
}

#[test]
fn test_step_reports_undefined_opcode() {
    for opcode in UNDEFINED {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x0100, opcode);
        let regs = *cpu.registers();

        assert_eq!(
            cpu.step(),
            Err(ExecutionError::UndefinedOpcode {
                opcode,
                address: 0x0100
            })
        );

        // Nothing changes, not even PC or the cycle count
        assert_eq!(*cpu.registers(), regs);
        assert_eq!(cpu.cycles(), 0);
        assert!(cpu.is_locked());
    }
}

#[test]
fn test_locked_cpu_stays_locked() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0xDD);

    let err = cpu.step().unwrap_err();

    // Fixing memory does not unlock the CPU
    cpu.memory_mut().write(0x0100, 0x00);
    assert_eq!(cpu.step(), Err(err));
    assert_eq!(cpu.run_for_cycles(100), Err(err));
    assert_eq!(cpu.service_interrupt(0x0040), None);
}

#[test]
fn test_set_registers_unlocks() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0xEB);
    cpu.step().unwrap_err();

    let mut regs = Registers::power_on(Model::Dmg);
    regs.set_pc(0x0101);
    cpu.set_registers(regs);

    assert!(!cpu.is_locked());
    assert_eq!(cpu.step(), Ok(4));
}

#[test]
fn test_execute_opcode_reports_undefined() {
    let mut cpu = setup_cpu();
    // As if 0xFC had just been fetched from 0x01FF
    cpu.registers_mut().set_pc(0x0200);

    assert_eq!(
        cpu.execute_opcode(0xFC),
        Err(ExecutionError::UndefinedOpcode {
            opcode: 0xFC,
            address: 0x01FF
        })
    );
    assert_eq!(cpu.pc(), 0x01FF);
}

#[test]
fn test_execute_opcode_on_locked_cpu() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().write(0x0100, 0xDD);
    let err = cpu.step().unwrap_err();
    let regs = *cpu.registers();

    // INC A is not dispatched while locked
    assert_eq!(cpu.execute_opcode(0x3C), Err(err));
    assert_eq!(*cpu.registers(), regs);
    assert_eq!(cpu.cycles(), 0);

    cpu.reset(Model::Dmg);
    assert_eq!(cpu.execute_opcode(0x3C), Ok(4));
}

#[test]
fn test_error_message() {
    let err = ExecutionError::UndefinedOpcode {
        opcode: 0xD3,
        address: 0x0150,
    };
    assert_eq!(err.to_string(), "undefined opcode 0xD3 at 0x0150");
}
