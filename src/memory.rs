//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from the
//! console's memory map. The CPU performs every access through it, so region
//! policies live entirely in the implementation:
//!
//! - Flat 64KB RAM (`FlatMemory`, provided here)
//! - Read-only cartridge ROM
//! - Echo RAM mirroring work RAM
//! - I/O registers with side effects
//! - Bank-switched cartridge regions
//!
//! ## Design Principles
//!
//! The MemoryBus trait follows SM83 bus behavior:
//! - No bus errors - reads/writes always succeed
//! - Writes to ROM/unusable regions are ignored, never rejected
//! - The same address always resolves the same way

/// Memory bus trait for CPU to read/write bytes.
///
/// # Design
///
/// - `read(&self)`: Immutable reference allows shared reads
/// - `write(&mut self)`: Mutable reference makes side effects explicit
/// - No error types: the SM83 bus has no error mechanism
///
/// # Examples
///
/// ```
/// use libsm83::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
///
/// mem.write(0xC000, 0x42);
/// assert_eq!(mem.read(0xC000), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use libsm83::MemoryBus;
///
/// struct CartridgeAndRam {
///     rom: Vec<u8>,         // 0x0000-0x7FFF
///     ram: [u8; 0x8000],    // 0x8000-0xFFFF
/// }
///
/// impl MemoryBus for CartridgeAndRam {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.rom.get(addr as usize).copied().unwrap_or(0xFF)
///         } else {
///             self.ram[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr >= 0x8000 {
///             self.ram[(addr - 0x8000) as usize] = value;
///         }
///         // Writes to ROM are silently ignored
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic and must be deterministic for a given
    /// address and bus state.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. Writes to read-only or unusable regions
    /// are ignored.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word: low byte at `addr`, high byte at `addr + 1`.
    ///
    /// The high byte address wraps from 0xFFFF to 0x0000.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{MemoryBus, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xC000, 0x34);
    /// mem.write(0xC001, 0x12);
    /// assert_eq!(mem.read_word(0xC000), 0x1234);
    /// ```
    fn read_word(&self, addr: u16) -> u16 {
        let low = self.read(addr);
        let high = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Writes a little-endian word: low byte at `addr`, high byte at `addr + 1`.
    fn write_word(&mut self, addr: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write(addr, low);
        self.write(addr.wrapping_add(1), high);
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM initialized to 0x00. There is no
/// ROM protection and no echo region; use
/// [`dmg_memory_map`](crate::devices::dmg_memory_map) for those.
///
/// # Examples
///
/// ```
/// use libsm83::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0100, 0x00); // NOP at the cartridge entry point
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x0100);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping past 0xFFFF.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsm83::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0x0100, &[0x3E, 0x42]); // LD A,0x42
    /// assert_eq!(mem.read(0x0101), 0x42);
    /// ```
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
