/// Bitmap of the `CAPACITY / FRAME_SIZE` physical frames, one bit per frame.
#[derive(Debug, Clone)]
pub struct FrameAllocator<const FRAME_SIZE: usize, const CAPACITY: usize> {
    bitmap: Vec<u8>,
}

impl<const FRAME_SIZE: usize, const CAPACITY: usize> FrameAllocator<FRAME_SIZE, CAPACITY> {
    pub fn frame_count() -> usize {
        CAPACITY / FRAME_SIZE
    }

    /// How many bytes are required to store the bitmap
    pub fn bitmap_size() -> usize {
        Self::frame_count() / 8 + if Self::frame_count() % 8 == 0 { 0 } else { 1 }
    }

    pub fn init() -> Self {
        Self {
            bitmap: vec![0u8; Self::bitmap_size()],
        }
    }

    /// Claims the lowest free frame.
    pub fn allocate_frame(&mut self) -> Option<u32> {
        for frame in 0..Self::frame_count() {
            let (byte, bit) = (frame / 8, frame % 8);
            if self.bitmap[byte] & (1 << bit) == 0 {
                self.bitmap[byte] |= 1 << bit;
                return Some(frame as u32);
            }
        }
        log::debug!("No free frames");
        None
    }

    pub fn deallocate_frame(&mut self, frame: u32) {
        let frame = frame as usize;
        if frame < Self::frame_count() {
            self.bitmap[frame / 8] &= !(1 << (frame % 8));
        }
    }

    pub fn is_allocated(&self, frame: u32) -> bool {
        let frame = frame as usize;
        frame < Self::frame_count() && self.bitmap[frame / 8] & (1 << (frame % 8)) != 0
    }

    pub fn free_count(&self) -> usize {
        (0..Self::frame_count() as u32)
            .filter(|&f| !self.is_allocated(f))
            .count()
    }
}

impl<const FRAME_SIZE: usize, const CAPACITY: usize> Default
    for FrameAllocator<FRAME_SIZE, CAPACITY>
{
    fn default() -> Self {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_bitmap_size() {
        assert_eq!(FrameAllocator::<256, 65536>::frame_count(), 256);
        assert_eq!(FrameAllocator::<256, 65536>::bitmap_size(), 32);
        assert_eq!(FrameAllocator::<256, 1024>::bitmap_size(), 1);
        assert_eq!(FrameAllocator::<256, { 256 * 9 }>::bitmap_size(), 2);
    }

    #[test]
    fn test_allocate_frame() {
        let mut allocator = FrameAllocator::<256, 4096>::init();
        assert_eq!(allocator.allocate_frame(), Some(0));
        assert_eq!(allocator.allocate_frame(), Some(1));
        assert_eq!(allocator.allocate_frame(), Some(2));
        assert_eq!(allocator.free_count(), 13);
    }

    #[test]
    fn test_allocate_frame_full() {
        let mut allocator = FrameAllocator::<256, { 256 * 9 }>::init();
        for i in 0..9 {
            assert_eq!(allocator.allocate_frame(), Some(i));
        }
        assert_eq!(allocator.allocate_frame(), None);
        assert_eq!(allocator.free_count(), 0);
    }

    #[test]
    fn test_deallocate_reuses_lowest() {
        let mut allocator = FrameAllocator::<256, 4096>::init();
        for _ in 0..5 {
            allocator.allocate_frame();
        }
        allocator.deallocate_frame(3);
        allocator.deallocate_frame(1);
        assert!(!allocator.is_allocated(1));
        assert_eq!(allocator.allocate_frame(), Some(1));
        assert_eq!(allocator.allocate_frame(), Some(3));
        assert_eq!(allocator.allocate_frame(), Some(5));
        // Out of range is ignored.
        allocator.deallocate_frame(1000);
        assert!(!allocator.is_allocated(1000));
    }

    #[test]
    fn test_allocate_deallocate_random() {
        let mut allocator = FrameAllocator::<256, 65536>::init();
        let mut rng = rand::thread_rng();
        let mut allocated = Vec::new();
        for _ in 0..rng.gen_range(1..200) {
            allocated.push(allocator.allocate_frame().unwrap());
        }
        let keep = rng.gen_range(0..allocated.len());
        for frame in allocated.drain(keep..) {
            allocator.deallocate_frame(frame);
        }
        assert_eq!(allocator.free_count(), 256 - allocated.len());
        assert_eq!(allocator.allocate_frame(), Some(allocated.len() as u32));
    }
}
