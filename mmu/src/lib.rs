pub mod address;
pub mod page_table;
pub mod tlb;

pub use address::{LogicalAddress, OFFSET_BITS, PAGE_SIZE};
pub use page_table::{FrameAllocator, PageTable, PageTableEntry, PageTableError};
pub use tlb::{Tlb, TlbEntry};
