mod frame_allocator;
mod page_table_entry;

use log::debug;
use thiserror::Error;

pub use frame_allocator::FrameAllocator;
pub use page_table_entry::PageTableEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageTableError {
    #[error("page {page} is outside the page table of {capacity} entries")]
    IndexOutOfRange { page: u8, capacity: usize },
}

/// Page table indexed by page number, `ENTRIES` slots.
#[derive(Debug, Clone)]
pub struct PageTable<const ENTRIES: usize> {
    entries: [PageTableEntry; ENTRIES],
}

impl<const ENTRIES: usize> PageTable<ENTRIES> {
    pub fn init() -> Self {
        Self {
            entries: [PageTableEntry::INVALID; ENTRIES],
        }
    }

    pub fn capacity(&self) -> usize {
        ENTRIES
    }

    pub fn get_entry(&self, page_number: u8) -> Result<PageTableEntry, PageTableError> {
        self.entries
            .get(page_number as usize)
            .copied()
            .ok_or(PageTableError::IndexOutOfRange {
                page: page_number,
                capacity: ENTRIES,
            })
    }

    pub fn lookup(&self, page_number: u8) -> Result<Option<u32>, PageTableError> {
        Ok(self.get_entry(page_number)?.frame())
    }

    pub fn is_mapped(&self, page_number: u8) -> Result<bool, PageTableError> {
        Ok(self.get_entry(page_number)?.is_valid())
    }

    pub fn update(&mut self, page_number: u8, frame_number: u32) -> Result<(), PageTableError> {
        let slot = self
            .entries
            .get_mut(page_number as usize)
            .ok_or(PageTableError::IndexOutOfRange {
                page: page_number,
                capacity: ENTRIES,
            })?;
        debug!("Mapping page {} to frame {}", page_number, frame_number);
        *slot = PageTableEntry::mapped(frame_number);
        Ok(())
    }

    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_valid()).count()
    }

    /// Valid mappings as `(page, frame)`, in page order.
    pub fn mappings(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(page, e)| e.frame().map(|frame| (page as u8, frame)))
    }
}

impl<const ENTRIES: usize> Default for PageTable<ENTRIES> {
    fn default() -> Self {
        Self::init()
    }
}
