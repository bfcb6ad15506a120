pub const PAGE_BITS: u32 = 8;
pub const OFFSET_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
/// Number of distinct pages a logical address can name.
pub const PAGE_SPACE: usize = 1 << PAGE_BITS;

pub const OFFSET_MASK: u16 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u16 = (1 << PAGE_BITS) - 1;

/// Splits a 16-bit logical address into `(page number, offset)`.
#[inline]
pub fn decode(logical: u16) -> (u8, u8) {
    let page = (logical >> OFFSET_BITS) & PAGE_MASK;
    let offset = logical & OFFSET_MASK;
    (page as u8, offset as u8)
}

/// Physical address of `offset` within `frame`.
#[inline]
pub fn compose(frame: u32, offset: u8) -> u64 {
    ((frame as u64) << OFFSET_BITS) | offset as u64
}

/// A logical address together with its decoded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: u16,
    pub page: u8,
    pub offset: u8,
}

impl LogicalAddress {
    pub fn from_raw(raw: u16) -> Self {
        let (page, offset) = decode(raw);
        LogicalAddress { raw, page, offset }
    }

    pub fn physical(&self, frame: u32) -> u64 {
        compose(frame, self.offset)
    }
}

impl From<u16> for LogicalAddress {
    fn from(raw: u16) -> Self {
        Self::from_raw(raw)
    }
}

impl std::fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LA({}) = (p={}, d={})", self.raw, self.page, self.offset)
    }
}
