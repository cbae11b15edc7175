//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the SM83 processor state and
//! a reference fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: the full [`Registers`] file (A, F, B, C, D, E, H, L, SP, PC)
//! - **Interrupt master enable** (IME) and the one-instruction EI delay
//! - **Low-power state**: HALT and STOP
//! - **Lock state**: set when an undefined opcode is executed
//! - **Cycle counter**: u64 monotonically increasing T-cycle count
//!
//! ## Execution Model
//!
//! - `step()`: Fetch the opcode at PC, advance PC by one, execute it
//! - `run_for_cycles()`: Step until a cycle budget is exhausted
//! - `execute_opcode()`: Execute one opcode directly, operands read at PC
//! - `service_interrupt()`: Enter an interrupt vector chosen by the host

use log::{debug, log_enabled, trace, warn, Level};

use crate::disassembler::{disassemble_at, format_instruction};
use crate::instructions;
use crate::registers::{Model, Reg8, Registers};
use crate::{ExecutionError, MemoryBus};

/// T-cycles spent per step while halted or stopped.
const IDLE_CYCLES: u8 = 4;

/// T-cycles taken to enter an interrupt handler.
const INTERRUPT_CYCLES: u8 = 20;

/// SM83 CPU state and execution context.
///
/// Generic over the memory implementation via the [`MemoryBus`] trait. Each
/// instance owns its registers and its bus; there is no shared state between
/// instances.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use libsm83::{CPU, FlatMemory, MemoryBus};
///
/// let cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x0100);
/// assert_eq!(cpu.sp(), 0xFFFE);
/// assert_eq!(cpu.registers().a(), 0x01);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Register file
    pub(crate) regs: Registers,

    /// Interrupt master enable
    pub(crate) ime: bool,

    /// Steps left until a pending EI takes effect (0 = nothing pending)
    pub(crate) ime_delay: u8,

    /// Set by HALT, cleared by `wake` or `service_interrupt`
    pub(crate) halted: bool,

    /// Set by STOP, cleared by `wake`
    pub(crate) stopped: bool,

    /// Set once an undefined opcode has been executed
    pub(crate) locked: Option<ExecutionError>,

    /// Total T-cycles executed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU in the DMG post-boot state.
    ///
    /// Equivalent to `CPU::with_model(memory, Model::Dmg)`.
    pub fn new(memory: M) -> Self {
        Self::with_model(memory, Model::Dmg)
    }

    /// Creates a CPU in the post-boot state of the given console model.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{CPU, FlatMemory, Model};
    ///
    /// let cpu = CPU::with_model(FlatMemory::new(), Model::Cgb);
    /// assert_eq!(cpu.registers().a(), 0x11);
    /// ```
    pub fn with_model(memory: M, model: Model) -> Self {
        Self::with_registers(memory, Registers::power_on(model))
    }

    /// Creates a CPU with an explicit register state.
    ///
    /// IME starts cleared, the CPU is running (not halted or stopped) and the
    /// cycle counter is zero.
    pub fn with_registers(memory: M, regs: Registers) -> Self {
        Self {
            regs,
            ime: false,
            ime_delay: 0,
            halted: false,
            stopped: false,
            locked: None,
            cycles: 0,
            memory,
        }
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Return the lock error if an undefined opcode was hit earlier
    /// 2. Idle for 4 cycles if halted or stopped
    /// 3. Fetch opcode byte at PC and advance PC by one
    /// 4. Dispatch the opcode; the handler reads its own operands
    /// 5. Apply a pending EI and add the cycle cost to the counter
    ///
    /// # Returns
    ///
    /// - `Ok(cycles)` with the T-cycles the instruction took
    /// - `Err(ExecutionError::UndefinedOpcode { .. })` if the opcode has no instruction
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{CPU, FlatMemory, MemoryBus, ExecutionError};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x0100, 0x00); // NOP
    /// mem.write(0x0101, 0xD3); // undefined
    ///
    /// let mut cpu = CPU::new(mem);
    ///
    /// assert_eq!(cpu.step(), Ok(4));
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::UndefinedOpcode { opcode: 0xD3, address: 0x0101 })
    /// );
    /// assert!(cpu.is_locked());
    /// ```
    pub fn step(&mut self) -> Result<u8, ExecutionError> {
        if let Some(err) = self.locked {
            return Err(err);
        }

        if self.halted || self.stopped {
            self.cycles += IDLE_CYCLES as u64;
            return Ok(IDLE_CYCLES);
        }

        let address = self.regs.pc();
        let opcode = self.memory.read(address);

        if log_enabled!(Level::Trace) {
            let instruction = disassemble_at(&self.memory, address);
            trace!(
                "{:04X}: {:<16} {:?}",
                address,
                format_instruction(&instruction),
                self.regs
            );
        }

        self.regs.set_pc(address.wrapping_add(1));

        let cycles = self.execute_opcode(opcode)?;

        if self.ime_delay > 0 {
            self.ime_delay -= 1;
            if self.ime_delay == 0 {
                self.ime = true;
            }
        }

        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an error occurs.
    /// Returns the actual number of cycles consumed (may be slightly more than budget
    /// due to instruction granularity).
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{CPU, FlatMemory};
    ///
    /// // FlatMemory is all zeroes: a sea of NOPs
    /// let mut cpu = CPU::new(FlatMemory::new());
    ///
    /// // One DMG frame is 70224 T-cycles
    /// assert_eq!(cpu.run_for_cycles(70224), Ok(70224));
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Executes a single opcode in isolation.
    ///
    /// The opcode is not fetched: PC is assumed to already point past it, so
    /// operand bytes are read starting at the current PC. The cycle counter is
    /// left alone and a pending EI is not applied; both belong to the loop
    /// (see [`step`](Self::step)).
    ///
    /// Executing an undefined opcode locks the CPU and moves PC back onto the
    /// opcode. A locked CPU dispatches nothing and returns the locking error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.registers_mut().set_pc(0xC000);
    /// cpu.memory_mut().write(0xC000, 0x34); // low byte
    /// cpu.memory_mut().write(0xC001, 0x12); // high byte
    ///
    /// // LD BC,n16
    /// assert_eq!(cpu.execute_opcode(0x01), Ok(12));
    /// assert_eq!(cpu.registers().bc(), 0x1234);
    /// assert_eq!(cpu.pc(), 0xC002);
    /// ```
    pub fn execute_opcode(&mut self, opcode: u8) -> Result<u8, ExecutionError> {
        if let Some(err) = self.locked {
            return Err(err);
        }

        match instructions::execute(self, opcode) {
            Ok(cycles) => Ok(cycles),
            Err(err) => {
                let ExecutionError::UndefinedOpcode { address, .. } = err;
                warn!("CPU locked: {}", err);
                self.regs.set_pc(address);
                self.locked = Some(err);
                Err(err)
            }
        }
    }

    /// Enters an interrupt handler chosen by the host's interrupt controller.
    ///
    /// A pending interrupt always ends HALT. If IME is set, IME is cleared, PC
    /// is pushed and execution continues at `vector`; the call returns the 20
    /// cycles this takes. If IME is clear (or the CPU is locked) nothing else
    /// happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x0100, 0xFB); // EI
    /// mem.write(0x0101, 0x00); // NOP
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.step().unwrap();
    /// cpu.step().unwrap();
    /// assert!(cpu.ime());
    ///
    /// // V-blank
    /// assert_eq!(cpu.service_interrupt(0x0040), Some(20));
    /// assert_eq!(cpu.pc(), 0x0040);
    /// assert!(!cpu.ime());
    /// ```
    pub fn service_interrupt(&mut self, vector: u16) -> Option<u8> {
        if self.locked.is_some() {
            return None;
        }

        self.halted = false;

        if !self.ime {
            return None;
        }

        debug!(
            "interrupt: vector 0x{:04X}, return to 0x{:04X}",
            vector,
            self.regs.pc()
        );

        self.ime = false;
        self.ime_delay = 0;
        let pc = self.regs.pc();
        self.push_word(pc);
        self.regs.set_pc(vector);

        self.cycles += INTERRUPT_CYCLES as u64;
        Some(INTERRUPT_CYCLES)
    }

    /// Leaves HALT or STOP without servicing an interrupt.
    pub fn wake(&mut self) {
        self.halted = false;
        self.stopped = false;
    }

    /// Replaces the register file and clears all control state.
    ///
    /// This also releases a lock caused by an undefined opcode.
    pub fn set_registers(&mut self, regs: Registers) {
        self.regs = regs;
        self.ime = false;
        self.ime_delay = 0;
        self.halted = false;
        self.stopped = false;
        self.locked = None;
    }

    /// Resets to the post-boot state of `model`. Memory and cycle count are kept.
    pub fn reset(&mut self, model: Model) {
        self.set_registers(Registers::power_on(model));
    }

    // ========== Accessors ==========

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc()
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u16 {
        self.regs.sp()
    }

    /// Returns the total number of T-cycles executed by `step` and
    /// `service_interrupt`.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the interrupt master enable flag.
    pub fn ime(&self) -> bool {
        self.ime
    }

    /// True between an EI and the end of the instruction after it.
    pub fn ime_pending(&self) -> bool {
        self.ime_delay > 0
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// True once an undefined opcode has been executed.
    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Handler Helpers ==========

    /// Reads the byte at PC and advances PC by one.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let pc = self.regs.pc();
        let byte = self.memory.read(pc);
        self.regs.set_pc(pc.wrapping_add(1));
        byte
    }

    /// Reads a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let low = self.fetch_byte();
        let high = self.fetch_byte();
        u16::from_le_bytes([low, high])
    }

    /// Reads an 8-bit operand, going to memory for `(HL)`.
    pub(crate) fn read_r8(&self, reg: Reg8) -> u8 {
        match self.regs.get8(reg) {
            Some(value) => value,
            None => self.memory.read(self.regs.hl()),
        }
    }

    /// Writes an 8-bit operand, going to memory for `(HL)`.
    pub(crate) fn write_r8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::HlIndirect => self.memory.write(self.regs.hl(), value),
            _ => self.regs.set8(reg, value),
        }
    }

    /// Pushes a word: high byte at SP-1, low byte at SP-2.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        let mut sp = self.regs.sp().wrapping_sub(1);
        self.memory.write(sp, high);
        sp = sp.wrapping_sub(1);
        self.memory.write(sp, low);
        self.regs.set_sp(sp);
    }

    /// Pops a word: low byte from SP, high byte from SP+1.
    pub(crate) fn pop_word(&mut self) -> u16 {
        let sp = self.regs.sp();
        let low = self.memory.read(sp);
        let high = self.memory.read(sp.wrapping_add(1));
        self.regs.set_sp(sp.wrapping_add(2));
        u16::from_le_bytes([low, high])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_cpu_initialization() {
        let cpu = CPU::new(FlatMemory::new());

        assert_eq!(cpu.pc(), 0x0100);
        assert_eq!(cpu.sp(), 0xFFFE);
        assert_eq!(cpu.registers().af(), 0x01B0);
        assert_eq!(cpu.registers().bc(), 0x0013);
        assert_eq!(cpu.registers().de(), 0x00D8);
        assert_eq!(cpu.registers().hl(), 0x014D);
        assert_eq!(cpu.cycles(), 0);
        assert!(!cpu.ime());
        assert!(!cpu.is_halted());
        assert!(!cpu.is_locked());
    }

    #[test]
    fn test_step_advances_pc_and_cycles() {
        let mut mem = FlatMemory::new();
        mem.write(0x0100, 0x00); // NOP

        let mut cpu = CPU::new(mem);
        assert_eq!(cpu.step(), Ok(4));
        assert_eq!(cpu.pc(), 0x0101);
        assert_eq!(cpu.cycles(), 4);
    }

    #[test]
    fn test_locked_cpu_keeps_failing() {
        let mut mem = FlatMemory::new();
        mem.write(0x0100, 0xFD);

        let mut cpu = CPU::new(mem);
        let err = cpu.step().unwrap_err();
        assert_eq!(
            err,
            ExecutionError::UndefinedOpcode {
                opcode: 0xFD,
                address: 0x0100
            }
        );

        // PC stays on the undefined opcode, no cycles consumed
        assert_eq!(cpu.pc(), 0x0100);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.step(), Err(err));

        // Replacing the registers releases the lock
        cpu.reset(Model::Dmg);
        assert!(!cpu.is_locked());
    }

    #[test]
    fn test_halted_cpu_idles() {
        let mut mem = FlatMemory::new();
        mem.write(0x0100, 0x76); // HALT

        let mut cpu = CPU::new(mem);
        cpu.step().unwrap();
        assert!(cpu.is_halted());
        assert_eq!(cpu.pc(), 0x0101);

        assert_eq!(cpu.step(), Ok(4));
        assert_eq!(cpu.pc(), 0x0101);

        cpu.wake();
        assert!(!cpu.is_halted());
    }

    #[test]
    fn test_interrupt_ignored_without_ime() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.halted = true;

        assert_eq!(cpu.service_interrupt(0x0050), None);
        assert!(!cpu.is_halted());
        assert_eq!(cpu.pc(), 0x0100);
    }

    #[test]
    fn test_interrupt_pushes_pc() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.ime = true;
        cpu.regs.set_pc(0x1234);
        cpu.regs.set_sp(0xD000);

        assert_eq!(cpu.service_interrupt(0x0048), Some(20));
        assert_eq!(cpu.pc(), 0x0048);
        assert_eq!(cpu.sp(), 0xCFFE);
        assert_eq!(cpu.memory().read(0xCFFE), 0x34);
        assert_eq!(cpu.memory().read(0xCFFF), 0x12);
        assert_eq!(cpu.cycles(), 20);
    }

    #[test]
    fn test_push_pop_helpers() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.regs.set_sp(0x0001);

        // SP wraps below zero
        cpu.push_word(0xABCD);
        assert_eq!(cpu.sp(), 0xFFFF);
        assert_eq!(cpu.memory().read(0xFFFF), 0xCD);
        assert_eq!(cpu.memory().read(0x0000), 0xAB);

        assert_eq!(cpu.pop_word(), 0xABCD);
        assert_eq!(cpu.sp(), 0x0001);
    }

    #[test]
    fn test_run_for_cycles_stops_on_error() {
        let mut mem = FlatMemory::new();
        mem.write(0x0102, 0xE4); // undefined, after two NOPs

        let mut cpu = CPU::new(mem);
        assert!(cpu.run_for_cycles(100).is_err());
        assert_eq!(cpu.cycles(), 8);
    }
}
