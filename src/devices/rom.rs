//! ROM device implementation.
//!
//! Provides read-only memory storage via the Device trait, used for the
//! cartridge ROM area.

use log::debug;

use super::Device;

/// Largest image a device can report through its 16-bit size.
const MAX_ROM_SIZE: usize = u16::MAX as usize;

/// Read-only memory device.
///
/// Writes are silently ignored. On a real cartridge writes to the ROM area
/// program the bank controller; that logic belongs to a mapper device, not
/// to plain ROM.
///
/// # Examples
///
/// ```rust
/// use libsm83::{RomDevice, Device};
///
/// let mut rom = RomDevice::new(vec![0x00, 0xC3, 0x50, 0x01]); // NOP; JP 0x0150
///
/// assert_eq!(rom.read(1), 0xC3);
///
/// rom.write(1, 0xFF);
/// assert_eq!(rom.read(1), 0xC3); // unchanged
/// ```
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    /// Create a new ROM device with the specified data.
    ///
    /// Images longer than 0xFFFF bytes are cut to fit the 16-bit device
    /// size; the dropped tail is logged at debug level.
    pub fn new(mut data: Vec<u8>) -> Self {
        if data.len() > MAX_ROM_SIZE {
            debug!(
                "ROM image is {} bytes; only the first {} are kept",
                data.len(),
                MAX_ROM_SIZE
            );
            data.truncate(MAX_ROM_SIZE);
        }

        Self { data }
    }
}

impl Device for RomDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data[offset as usize]
    }

    fn write(&mut self, _offset: u16, _value: u8) {
        // Writes to ROM are silently ignored (no-op)
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}
