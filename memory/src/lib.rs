use log::debug;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("physical address {address} is outside memory of {capacity} bytes")]
    AddressOutOfRange { address: u64, capacity: usize },
    #[error("frame write of {len} bytes, frame size is {frame_size}")]
    IncorrectFrameSize { len: usize, frame_size: usize },
}

/// Byte-addressed physical memory split into `CAPACITY / FRAME_SIZE` frames.
///
/// Frame `i` occupies `[i * FRAME_SIZE, (i + 1) * FRAME_SIZE)`.
#[derive(Clone)]
pub struct PhysicalMemory<const FRAME_SIZE: usize, const CAPACITY: usize> {
    buffer: Box<[u8]>,
}

impl<const FRAME_SIZE: usize, const CAPACITY: usize> PhysicalMemory<FRAME_SIZE, CAPACITY> {
    pub fn new() -> Self {
        assert!(FRAME_SIZE > 0, "Frame size must be non-zero");
        assert_eq!(
            CAPACITY % FRAME_SIZE,
            0,
            "Capacity must be a multiply of FrameSize"
        );
        Self {
            buffer: vec![0; CAPACITY].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    pub fn frame_count(&self) -> usize {
        CAPACITY / FRAME_SIZE
    }

    pub fn check_address(&self, address: u64) -> Result<(), MemoryError> {
        if address >= CAPACITY as u64 {
            return Err(MemoryError::AddressOutOfRange {
                address,
                capacity: CAPACITY,
            });
        }
        Ok(())
    }

    fn frame_range(&self, frame_number: u32) -> Result<std::ops::Range<usize>, MemoryError> {
        let start = frame_number as u64 * FRAME_SIZE as u64;
        self.check_address(start)?;
        let start = start as usize;
        Ok(start..start + FRAME_SIZE)
    }

    pub fn read_u8(&self, address: u64) -> Result<u8, MemoryError> {
        self.check_address(address)?;
        Ok(self.buffer[address as usize])
    }

    /// Reads the byte at `address` as a two's complement value.
    pub fn read_i8(&self, address: u64) -> Result<i8, MemoryError> {
        Ok(self.read_u8(address)? as i8)
    }

    pub fn write_u8(&mut self, address: u64, byte: u8) -> Result<(), MemoryError> {
        self.check_address(address)?;
        self.buffer[address as usize] = byte;
        Ok(())
    }

    pub fn frame(&self, frame_number: u32) -> Result<&[u8], MemoryError> {
        let range = self.frame_range(frame_number)?;
        Ok(&self.buffer[range])
    }

    pub fn write_frame(&mut self, frame_number: u32, bytes: &[u8]) -> Result<(), MemoryError> {
        if bytes.len() != FRAME_SIZE {
            return Err(MemoryError::IncorrectFrameSize {
                len: bytes.len(),
                frame_size: FRAME_SIZE,
            });
        }
        let range = self.frame_range(frame_number)?;
        debug!("Writing frame[{}] at {:?}", frame_number, range);
        self.buffer[range].copy_from_slice(bytes);
        Ok(())
    }
}

impl<const FRAME_SIZE: usize, const CAPACITY: usize> Default
    for PhysicalMemory<FRAME_SIZE, CAPACITY>
{
    fn default() -> Self {
        Self::new()
    }
}
