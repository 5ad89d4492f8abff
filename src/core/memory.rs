//! Memory - Target memory access for the dump view
//!
//! The debugger engine owns the real process memory; views read it through
//! `MemorySource`. `MemoryImage` is a flat buffer mapped at a base address,
//! used for raw file dumps and tests.

use std::path::Path;

use thiserror::Error;

/// Memory operation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Failed to read memory at {address:#x}: {reason}")]
    ReadFailed { address: u64, reason: String },

    #[error("Failed to write memory at {address:#x}: {reason}")]
    WriteFailed { address: u64, reason: String },

    #[error("Invalid memory region: {address:#x} (+{size:#x})")]
    InvalidRegion { address: u64, size: usize },

    #[error("No memory image loaded")]
    NoImage,
}

/// Readable (and optionally writable) target memory
pub trait MemorySource {
    /// Read as many bytes as possible starting at `address` into `buffer`.
    /// Returns the number of bytes read; a short read means the rest is not
    /// mapped.
    fn read(&self, address: u64, buffer: &mut [u8]) -> Result<usize, MemoryError>;

    /// Write `data` at `address`
    fn write(&mut self, address: u64, _data: &[u8]) -> Result<usize, MemoryError> {
        Err(MemoryError::WriteFailed {
            address,
            reason: "read-only memory".into(),
        })
    }
}

/// A flat memory image mapped at `base`
#[derive(Debug, Clone, Default)]
pub struct MemoryImage {
    base: u64,
    data: Vec<u8>,
}

impl MemoryImage {
    pub fn new(base: u64, data: Vec<u8>) -> Self {
        Self { base, data }
    }

    /// Map the contents of a file at `base`
    pub fn from_file(path: impl AsRef<Path>, base: u64) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(base, data))
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// One past the last mapped address
    pub fn end(&self) -> u64 {
        self.base.saturating_add(self.data.len() as u64)
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.base && address < self.end()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, address: u64) -> Option<usize> {
        if self.contains(address) {
            Some((address - self.base) as usize)
        } else {
            None
        }
    }

    /// Read exactly `N` bytes
    fn read_exact<const N: usize>(&self, address: u64) -> Result<[u8; N], MemoryError> {
        let mut buffer = [0u8; N];
        let read = self.read(address, &mut buffer)?;
        if read < N {
            return Err(MemoryError::InvalidRegion { address, size: N });
        }
        Ok(buffer)
    }

    /// Read a null-terminated string
    pub fn read_string(&self, address: u64, max_len: usize) -> Result<String, MemoryError> {
        let mut buffer = vec![0u8; max_len];
        let bytes_read = self.read(address, &mut buffer)?;

        // Find null terminator
        let null_pos = buffer[..bytes_read].iter().position(|&b| b == 0).unwrap_or(bytes_read);

        String::from_utf8(buffer[..null_pos].to_vec()).map_err(|e| MemoryError::ReadFailed {
            address,
            reason: format!("Invalid UTF-8: {}", e),
        })
    }

    pub fn read_u64(&self, address: u64) -> Result<u64, MemoryError> {
        Ok(u64::from_le_bytes(self.read_exact(address)?))
    }

    pub fn read_u32(&self, address: u64) -> Result<u32, MemoryError> {
        Ok(u32::from_le_bytes(self.read_exact(address)?))
    }

    pub fn read_u16(&self, address: u64) -> Result<u16, MemoryError> {
        Ok(u16::from_le_bytes(self.read_exact(address)?))
    }

    pub fn read_u8(&self, address: u64) -> Result<u8, MemoryError> {
        let [byte] = self.read_exact::<1>(address)?;
        Ok(byte)
    }
}

impl MemorySource for MemoryImage {
    fn read(&self, address: u64, buffer: &mut [u8]) -> Result<usize, MemoryError> {
        let Some(offset) = self.offset(address) else {
            return Err(MemoryError::ReadFailed {
                address,
                reason: "address not mapped".into(),
            });
        };
        let available = &self.data[offset..];
        let count = available.len().min(buffer.len());
        buffer[..count].copy_from_slice(&available[..count]);
        Ok(count)
    }

    fn write(&mut self, address: u64, data: &[u8]) -> Result<usize, MemoryError> {
        let Some(offset) = self.offset(address) else {
            return Err(MemoryError::WriteFailed {
                address,
                reason: "address not mapped".into(),
            });
        };
        if data.len() > self.data.len() - offset {
            return Err(MemoryError::InvalidRegion {
                address,
                size: data.len(),
            });
        }
        self.data[offset..offset + data.len()].copy_from_slice(data);
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_short_at_end() {
        let image = MemoryImage::new(0x1000, vec![1, 2, 3, 4]);
        let mut buffer = [0u8; 8];
        assert_eq!(image.read(0x1002, &mut buffer), Ok(2));
        assert_eq!(&buffer[..2], &[3, 4]);
        assert!(image.read(0x1004, &mut buffer).is_err());
        assert!(image.read(0x0FFF, &mut buffer).is_err());
    }

    #[test]
    fn test_read_primitives() {
        let image = MemoryImage::new(0, vec![0x78, 0x56, 0x34, 0x12, 0xEF, 0xCD, 0xAB, 0x90]);
        assert_eq!(image.read_u8(0), Ok(0x78));
        assert_eq!(image.read_u16(0), Ok(0x5678));
        assert_eq!(image.read_u32(0), Ok(0x1234_5678));
        assert_eq!(image.read_u64(0), Ok(0x90AB_CDEF_1234_5678));
        assert_eq!(
            image.read_u32(6),
            Err(MemoryError::InvalidRegion { address: 6, size: 4 })
        );
    }

    #[test]
    fn test_read_string() {
        let image = MemoryImage::new(0x10, b"hello\0world".to_vec());
        assert_eq!(image.read_string(0x10, 64).as_deref(), Ok("hello"));
        assert_eq!(image.read_string(0x16, 64).as_deref(), Ok("world"));
    }

    #[test]
    fn test_write() {
        let mut image = MemoryImage::new(0x100, vec![0; 4]);
        assert_eq!(image.write(0x101, &[0xAA, 0xBB]), Ok(2));
        assert_eq!(image.bytes(), &[0, 0xAA, 0xBB, 0]);
        assert!(image.write(0x103, &[1, 2]).is_err());
        assert!(image.write(0x200, &[1]).is_err());
    }

    struct Zeroes;

    impl MemorySource for Zeroes {
        fn read(&self, _address: u64, buffer: &mut [u8]) -> Result<usize, MemoryError> {
            buffer.fill(0);
            Ok(buffer.len())
        }
    }

    #[test]
    fn test_read_only_source_rejects_writes() {
        let mut zeroes = Zeroes;
        match zeroes.write(0x40, &[1, 2, 3]) {
            Err(MemoryError::WriteFailed { address, .. }) => assert_eq!(address, 0x40),
            other => panic!("unexpected write result {:?}", other),
        }
    }
}
