//! RAM device implementation.
//!
//! Provides readable and writable memory storage via the Device trait. Used for
//! video RAM, external and work RAM, the sprite attribute table, I/O registers
//! and high RAM in the DMG memory map.

use super::Device;

/// Simple RAM device with readable and writable storage.
///
/// # Examples
///
/// ```rust
/// use libsm83::{RamDevice, Device};
///
/// let mut wram = RamDevice::new(0x2000); // 8KB work RAM
///
/// wram.write(0x42, 0xAA);
/// assert_eq!(wram.read(0x42), 0xAA);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Create a new RAM device with the specified size.
    ///
    /// All bytes are initialized to zero.
    pub fn new(size: u16) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    /// Load bytes into RAM at the specified offset.
    ///
    /// Bytes that would land past the end of the device are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use libsm83::{RamDevice, Device};
    ///
    /// let mut ram = RamDevice::new(4);
    /// ram.load_bytes(2, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(ram.read(2), 0x01);
    /// assert_eq!(ram.read(3), 0x02);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        let start = (offset as usize).min(self.data.len());
        let end = (start + bytes.len()).min(self.data.len());
        self.data[start..end].copy_from_slice(&bytes[..end - start]);
    }
}

impl Device for RamDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data[offset as usize]
    }

    fn write(&mut self, offset: u16, value: u8) {
        self.data[offset as usize] = value;
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}
