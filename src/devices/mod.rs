//! Memory-mapped device support.
//!
//! This module provides a memory mapping architecture that lets the host assemble
//! the console's address space from independent devices, each with its own write
//! policy, and hand the result to the CPU as a [`MemoryBus`].
//!
//! # Architecture
//!
//! - **Device trait**: Abstract interface for memory-mapped hardware components
//! - **MappedMemory**: Routes read/write operations to registered devices based on address ranges
//! - **Mirrors**: Address ranges that alias another range (echo RAM)
//! - **Device implementations**: RAM and ROM
//! - **dmg_memory_map**: The standard DMG layout built from the pieces above
//!
//! # Example
//!
//! ```rust
//! use libsm83::{CPU, MappedMemory, MemoryBus, RamDevice, RomDevice};
//!
//! let mut memory = MappedMemory::new();
//!
//! // 32KB cartridge ROM at 0x0000-0x7FFF
//! memory.add_device(0x0000, Box::new(RomDevice::new(vec![0x00; 0x8000]))).unwrap();
//!
//! // 8KB work RAM at 0xC000-0xDFFF, echoed at 0xE000-0xFDFF
//! memory.add_device(0xC000, Box::new(RamDevice::new(0x2000))).unwrap();
//! memory.add_mirror(0xE000, 0x1E00, 0xC000).unwrap();
//!
//! memory.write(0xC123, 0x42);
//! assert_eq!(memory.read(0xE123), 0x42);
//!
//! let cpu = CPU::new(memory);
//! ```

use log::debug;

use crate::MemoryBus;

pub mod ram;
pub mod rom;

pub use ram::RamDevice;
pub use rom::RomDevice;

/// Abstract interface for memory-mapped hardware devices.
///
/// Devices implement this trait to provide read/write access to their internal
/// storage or registers. The memory mapper calls these methods with offset-based
/// addressing (0 to size-1) so a device does not need to know where it is mapped.
///
/// # Design
///
/// - **Offset-based**: Device receives offset (0 to size-1), not absolute address
/// - **No panics**: All operations must succeed or be ignored
/// - **Immutable read**: Allows shared read access
/// - **Mutable write**: Explicit side effects (register updates, bank switches)
///
/// # Examples
///
/// ```rust
/// use libsm83::Device;
///
/// /// Reads back the last value written, at every offset.
/// struct Latch {
///     value: u8,
/// }
///
/// impl Device for Latch {
///     fn read(&self, _offset: u16) -> u8 {
///         self.value
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.value = value;
///     }
///
///     fn size(&self) -> u16 {
///         1
///     }
/// }
/// ```
pub trait Device {
    /// Read byte from device at offset relative to device base address.
    fn read(&self, offset: u16) -> u8;

    /// Write byte to device at offset relative to device base address.
    fn write(&mut self, offset: u16, value: u8);

    /// Return size of device's address space in bytes.
    fn size(&self) -> u16;
}

/// Error returned when device or mirror registration fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Address range overlaps with an existing mapping.
    #[error(
        "mapping at 0x{new_base:04X} (size 0x{new_size:04X}) overlaps existing mapping at 0x{existing_base:04X} (size 0x{existing_size:04X})"
    )]
    Overlap {
        /// Base address of the new mapping
        new_base: u16,
        /// Size of the new mapping
        new_size: u16,
        /// Base address of the conflicting existing mapping
        existing_base: u16,
        /// Size of the conflicting existing mapping
        existing_size: u16,
    },
}

/// What an address range resolves to.
enum Target {
    Device(Box<dyn Device>),

    /// Alias of the range starting at this address
    Mirror(u16),
}

/// Internal mapping of an address range to a target.
struct Mapping {
    base_addr: u16,
    size: u16,
    target: Target,
}

impl Mapping {
    fn contains(&self, addr: u16) -> bool {
        let end = self.base_addr as u32 + self.size as u32;
        addr >= self.base_addr && (addr as u32) < end
    }

    fn overlaps(&self, base_addr: u16, size: u16) -> bool {
        let start = base_addr as u32;
        let end = start + size as u32;
        let existing_start = self.base_addr as u32;
        let existing_end = existing_start + self.size as u32;
        start < existing_end && end > existing_start
    }
}

/// Memory mapper that routes read/write operations to registered devices.
///
/// `MappedMemory` implements the `MemoryBus` trait and dispatches memory accesses
/// to the appropriate device based on address ranges. Unmapped addresses read as
/// a fixed open-bus value (0xFF by default) and ignore writes.
///
/// # Address Routing
///
/// 1. Find the mapping whose range contains the address
/// 2. If it is a mirror, translate the address and look up the device there
/// 3. Call the device's read/write with offset (addr - base_addr)
/// 4. If nothing matches, return the unmapped value (reads) or ignore (writes)
///
/// Mirrors resolve one level only: a mirror of a mirror reads as unmapped.
pub struct MappedMemory {
    mappings: Vec<Mapping>,
    unmapped_value: u8,
}

impl MappedMemory {
    /// Create a new empty memory mapper. Unmapped reads return 0xFF.
    pub fn new() -> Self {
        Self::with_unmapped_value(0xFF)
    }

    /// Create a new empty memory mapper with a custom open-bus value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use libsm83::{MappedMemory, MemoryBus};
    ///
    /// let memory = MappedMemory::with_unmapped_value(0x00);
    /// assert_eq!(memory.read(0x1234), 0x00);
    /// ```
    pub fn with_unmapped_value(unmapped_value: u8) -> Self {
        Self {
            mappings: Vec::new(),
            unmapped_value,
        }
    }

    /// Register a device at the specified base address.
    ///
    /// The device will occupy addresses from `base_addr` to `base_addr + device.size() - 1`.
    /// Registration fails if the range overlaps any existing device or mirror.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use libsm83::{MappedMemory, RamDevice};
    ///
    /// let mut memory = MappedMemory::new();
    ///
    /// // 8KB work RAM at 0xC000-0xDFFF
    /// memory.add_device(0xC000, Box::new(RamDevice::new(0x2000))).unwrap();
    ///
    /// // This will fail (overlap)
    /// let result = memory.add_device(0xD000, Box::new(RamDevice::new(0x100)));
    /// assert!(result.is_err());
    /// ```
    pub fn add_device(
        &mut self,
        base_addr: u16,
        device: Box<dyn Device>,
    ) -> Result<(), DeviceError> {
        let size = device.size();
        self.insert(base_addr, size, Target::Device(device))
    }

    /// Register a mirror: `size` addresses from `base_addr` alias the range
    /// starting at `target`.
    ///
    /// Reads and writes through the mirror reach the same device bytes as the
    /// original addresses.
    pub fn add_mirror(
        &mut self,
        base_addr: u16,
        size: u16,
        target: u16,
    ) -> Result<(), DeviceError> {
        self.insert(base_addr, size, Target::Mirror(target))
    }

    fn insert(&mut self, base_addr: u16, size: u16, target: Target) -> Result<(), DeviceError> {
        if let Some(existing) = self.mappings.iter().find(|m| m.overlaps(base_addr, size)) {
            return Err(DeviceError::Overlap {
                new_base: base_addr,
                new_size: size,
                existing_base: existing.base_addr,
                existing_size: existing.size,
            });
        }

        debug!(
            "mapped 0x{:04X}-0x{:04X} ({})",
            base_addr,
            (base_addr as u32 + size as u32).saturating_sub(1),
            match &target {
                Target::Device(_) => "device",
                Target::Mirror(_) => "mirror",
            }
        );

        self.mappings.push(Mapping {
            base_addr,
            size,
            target,
        });
        Ok(())
    }

    /// Resolve an address to the index of a device mapping and the offset into it.
    fn resolve(&self, addr: u16) -> Option<(usize, u16)> {
        let index = self.mappings.iter().position(|m| m.contains(addr))?;
        let mapping = &self.mappings[index];

        match mapping.target {
            Target::Device(_) => Some((index, addr - mapping.base_addr)),
            Target::Mirror(target) => {
                let aliased = target.wrapping_add(addr - mapping.base_addr);
                let index = self.mappings.iter().position(|m| m.contains(aliased))?;
                let mapping = &self.mappings[index];
                match mapping.target {
                    Target::Device(_) => Some((index, aliased - mapping.base_addr)),
                    Target::Mirror(_) => None,
                }
            }
        }
    }
}

impl Default for MappedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for MappedMemory {
    fn read(&self, addr: u16) -> u8 {
        if let Some((index, offset)) = self.resolve(addr) {
            if let Target::Device(device) = &self.mappings[index].target {
                return device.read(offset);
            }
        }
        self.unmapped_value
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some((index, offset)) = self.resolve(addr) {
            if let Target::Device(device) = &mut self.mappings[index].target {
                device.write(offset, value);
            }
        }
        // Unmapped writes are silently ignored
    }
}

// ========== DMG Memory Map ==========

/// Cartridge ROM (banks 0 and 1), read-only.
pub const ROM_START: u16 = 0x0000;
pub const ROM_SIZE: u16 = 0x8000;
/// Video RAM.
pub const VRAM_START: u16 = 0x8000;
pub const VRAM_SIZE: u16 = 0x2000;
/// Cartridge external RAM.
pub const EXTERNAL_RAM_START: u16 = 0xA000;
pub const EXTERNAL_RAM_SIZE: u16 = 0x2000;
/// Work RAM.
pub const WRAM_START: u16 = 0xC000;
pub const WRAM_SIZE: u16 = 0x2000;
/// Echo of 0xC000-0xDDFF.
pub const ECHO_START: u16 = 0xE000;
pub const ECHO_SIZE: u16 = 0x1E00;
/// Sprite attribute table. 0xFEA0-0xFEFF after it is unusable and left unmapped.
pub const OAM_START: u16 = 0xFE00;
pub const OAM_SIZE: u16 = 0x00A0;
/// I/O registers.
pub const IO_START: u16 = 0xFF00;
pub const IO_SIZE: u16 = 0x0080;
/// High RAM.
pub const HRAM_START: u16 = 0xFF80;
pub const HRAM_SIZE: u16 = 0x007F;
/// Interrupt enable register.
pub const IE_ADDR: u16 = 0xFFFF;

/// Builds the standard DMG address space around a cartridge image.
///
/// Only the first 32KB of `rom` are mapped (bank switching belongs to a
/// mapper device); shorter images are padded with 0xFF. Every other region is
/// zeroed RAM, I/O registers included, and echo RAM mirrors work RAM.
///
/// # Examples
///
/// ```rust
/// use libsm83::{dmg_memory_map, MemoryBus};
///
/// let mut memory = dmg_memory_map(&[0x00, 0x01, 0x02]).unwrap();
///
/// // ROM is read-only and padded
/// memory.write(0x0001, 0xFF);
/// assert_eq!(memory.read(0x0001), 0x01);
/// assert_eq!(memory.read(0x0003), 0xFF);
///
/// // Echo RAM
/// memory.write(0xE010, 0x77);
/// assert_eq!(memory.read(0xC010), 0x77);
///
/// // Unusable region
/// memory.write(0xFEA0, 0x12);
/// assert_eq!(memory.read(0xFEA0), 0xFF);
/// ```
pub fn dmg_memory_map(rom: &[u8]) -> Result<MappedMemory, DeviceError> {
    let mut image = vec![0xFF; ROM_SIZE as usize];
    let mapped = rom.len().min(image.len());
    image[..mapped].copy_from_slice(&rom[..mapped]);

    if rom.len() > image.len() {
        debug!(
            "cartridge image is {} bytes; only the first {} are mapped",
            rom.len(),
            image.len()
        );
    }

    let mut memory = MappedMemory::new();
    memory.add_device(ROM_START, Box::new(RomDevice::new(image)))?;
    memory.add_device(VRAM_START, Box::new(RamDevice::new(VRAM_SIZE)))?;
    memory.add_device(EXTERNAL_RAM_START, Box::new(RamDevice::new(EXTERNAL_RAM_SIZE)))?;
    memory.add_device(WRAM_START, Box::new(RamDevice::new(WRAM_SIZE)))?;
    memory.add_mirror(ECHO_START, ECHO_SIZE, WRAM_START)?;
    memory.add_device(OAM_START, Box::new(RamDevice::new(OAM_SIZE)))?;
    memory.add_device(IO_START, Box::new(RamDevice::new(IO_SIZE)))?;
    memory.add_device(HRAM_START, Box::new(RamDevice::new(HRAM_SIZE)))?;
    memory.add_device(IE_ADDR, Box::new(RamDevice::new(1)))?;

    Ok(memory)
}
