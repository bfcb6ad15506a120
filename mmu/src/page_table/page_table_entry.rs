/// One page ---> frame mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    /// | frame number: u32 | valid: u8 |
    pub(super) entry: [u8; 5],
}

impl PageTableEntry {
    pub const INVALID: PageTableEntry = PageTableEntry { entry: [0; 5] };

    pub(super) fn mapped(frame_number: u32) -> Self {
        let mut entry = Self::INVALID;
        entry.set_frame_number(frame_number);
        entry.entry[4] = 1;
        entry
    }

    pub fn is_valid(&self) -> bool {
        self.entry[4] == 1
    }

    pub fn get_frame_number(&self) -> u32 {
        let mut bytes = [0; 4];
        bytes.copy_from_slice(&self.entry[0..4]);
        u32::from_be_bytes(bytes)
    }

    pub(super) fn set_frame_number(&mut self, frame_number: u32) {
        self.entry[0..4].copy_from_slice(&frame_number.to_be_bytes());
    }

    /// The frame, if the entry is valid.
    pub fn frame(&self) -> Option<u32> {
        self.is_valid().then(|| self.get_frame_number())
    }
}

impl Default for PageTableEntry {
    fn default() -> Self {
        Self::INVALID
    }
}
