//! # SM83 CPU Emulator Core
//!
//! An instruction-exact emulator of the Sharp SM83, the 8-bit CPU of the
//! Nintendo Game Boy (also sold as the LR35902 SoC).
//!
//! This crate provides the register file, the flag/ALU logic, the complete
//! 256-entry opcode dispatch (plus the CB-prefixed table), and a trait-based
//! memory bus the CPU talks through. Video, audio, timers, input, cartridge
//! mappers and interrupt arbitration are left to the host.
//!
//! ## Quick Start
//!
//! ```rust
//! use libsm83::{CPU, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // LD A,0x42 at the cartridge entry point
//! memory.write(0x0100, 0x3E);
//! memory.write(0x0101, 0x42);
//!
//! // CPU starts from the DMG post-boot state: PC = 0x0100, SP = 0xFFFE
//! let mut cpu = CPU::new(memory);
//!
//! let cycles = cpu.step().unwrap();
//! assert_eq!(cycles, 8);
//! assert_eq!(cpu.registers().a(), 0x42);
//! assert_eq!(cpu.pc(), 0x0102);
//! ```
//!
//! ## Architecture
//!
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **No globals**: every `CPU` owns its registers and its bus
//! - **Cycle counting**: every instruction reports its T-cycle cost
//! - **Table-driven metadata**: sizes and timings live in `OPCODE_TABLE`
//! - **Exhaustive dispatch**: the decoder is a `match` with no wildcard arm
//!
//! ## Modules
//!
//! - `registers` - Register file, flags and operand encodings
//! - `alu` - Pure flag/ALU computations
//! - `cpu` - CPU state and the reference fetch-execute loop
//! - `memory` - MemoryBus trait and FlatMemory
//! - `devices` - Memory-mapped devices and the DMG memory map
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Operand addressing modes
//! - `disassembler` - Instruction decoding to text

pub mod addressing;
pub mod alu;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::CPU;
pub use devices::{dmg_memory_map, Device, DeviceError, MappedMemory, RamDevice, RomDevice};
pub use disassembler::{disassemble, disassemble_at, Instruction};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{cb_cycles, OpcodeMetadata, OPCODE_TABLE};
pub use registers::{Condition, Flags, Model, Reg16, Reg8, Registers, StackPair};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The opcode byte has no instruction.
    ///
    /// This is fatal for the session: real hardware locks up. The CPU keeps
    /// returning this error from [`CPU::step`] until its registers are replaced.
    #[error("undefined opcode 0x{opcode:02X} at 0x{address:04X}")]
    UndefinedOpcode {
        /// The opcode byte value
        opcode: u8,
        /// Address the opcode was fetched from
        address: u16,
    },
}
