use std::fmt;

use backing_store::BackingStore;
use log::{debug, info, warn};
use memory::PhysicalMemory;
use mmu::{FrameAllocator, LogicalAddress, PageTable, Tlb, PAGE_SIZE};

use crate::config::FaultPolicy;
use crate::error::{Error, Result};
use crate::stats::Stats;

/// Result of translating one logical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: u16,
    pub physical: u64,
    pub value: i8,
    pub tlb_hit: bool,
    pub page_fault: bool,
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Logical Address: {}, Physical Address: {}, Value: {}",
            self.logical, self.physical, self.value
        )
    }
}

#[derive(Debug)]
pub enum Outcome {
    Translated(Translation),
    /// Dropped under [`FaultPolicy::Skip`]; carries the fault error.
    Skipped { logical: u16, error: Error },
}

/// Address translation pipeline: TLB, page table, demand paging from the
/// backing store into physical memory.
pub struct Translator<
    const TLB_ENTRIES: usize,
    const TABLE_ENTRIES: usize,
    const MEMORY_CAPACITY: usize,
> {
    tlb: Tlb<TLB_ENTRIES>,
    page_table: PageTable<TABLE_ENTRIES>,
    frames: FrameAllocator<PAGE_SIZE, MEMORY_CAPACITY>,
    memory: PhysicalMemory<PAGE_SIZE, MEMORY_CAPACITY>,
    store: BackingStore<PAGE_SIZE>,
    policy: FaultPolicy,
    stats: Stats,
}

impl<const TLB_ENTRIES: usize, const TABLE_ENTRIES: usize, const MEMORY_CAPACITY: usize>
    Translator<TLB_ENTRIES, TABLE_ENTRIES, MEMORY_CAPACITY>
{
    pub fn new(store: BackingStore<PAGE_SIZE>, policy: FaultPolicy) -> Self {
        Self {
            tlb: Tlb::init(),
            page_table: PageTable::init(),
            frames: FrameAllocator::init(),
            memory: PhysicalMemory::new(),
            store,
            policy,
            stats: Stats::default(),
        }
    }

    pub fn tlb(&self) -> &Tlb<TLB_ENTRIES> {
        &self.tlb
    }

    pub fn page_table(&self) -> &PageTable<TABLE_ENTRIES> {
        &self.page_table
    }

    pub fn memory(&self) -> &PhysicalMemory<PAGE_SIZE, MEMORY_CAPACITY> {
        &self.memory
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn load_page(&mut self, page: u8, frame: u32) -> Result<()> {
        let bytes = self.store.read_page(page as u32)?;
        self.memory.write_frame(frame, &bytes[..])?;
        self.page_table.update(page, frame)?;
        Ok(())
    }

    /// Loads `page` into the lowest free frame and maps it. The frame is
    /// released again if the load fails.
    fn service_fault(&mut self, page: u8) -> Result<u32> {
        let frame = self.frames.allocate_frame().ok_or(Error::OutOfFrames {
            page,
            frames: self.memory.frame_count(),
        })?;
        info!("Page fault on page {}, loading into frame {}", page, frame);
        if let Err(e) = self.load_page(page, frame) {
            self.frames.deallocate_frame(frame);
            return Err(e);
        }
        Ok(frame)
    }

    /// Translates one address and reads the byte it refers to.
    ///
    /// Every failure is returned as is; the fault policy is applied by
    /// [`Translator::process`].
    pub fn translate(&mut self, raw: u16) -> Result<Translation> {
        let address = LogicalAddress::from_raw(raw);
        self.stats.total_addresses += 1;

        let (frame, tlb_hit, page_fault) = match self.tlb.lookup(address.page) {
            Some(frame) => {
                self.stats.tlb_hits += 1;
                (frame, true, false)
            }
            None => {
                let (frame, page_fault) = match self.page_table.lookup(address.page)? {
                    Some(frame) => (frame, false),
                    None => {
                        let frame = self.service_fault(address.page)?;
                        self.stats.page_faults += 1;
                        (frame, true)
                    }
                };
                self.tlb.upsert(address.page, frame);
                (frame, false, page_fault)
            }
        };

        let physical = address.physical(frame);
        let value = self.memory.read_i8(physical)?;
        debug!("{} -> frame {} -> PA {} = {}", address, frame, physical, value);
        Ok(Translation {
            logical: raw,
            physical,
            value,
            tlb_hit,
            page_fault,
        })
    }

    /// Translates one address under the configured fault policy.
    pub fn process(&mut self, raw: u16) -> Result<Outcome> {
        match self.translate(raw) {
            Ok(translation) => Ok(Outcome::Translated(translation)),
            Err(error) if self.policy == FaultPolicy::Skip && error.is_recoverable() => {
                warn!("Skipping logical address {}: {}", raw, error);
                self.stats.skipped += 1;
                Ok(Outcome::Skipped {
                    logical: raw,
                    error,
                })
            }
            Err(error) => Err(error),
        }
    }

    /// Processes every address in order, handing each outcome to `emit`.
    pub fn run<I, F>(&mut self, addresses: I, mut emit: F) -> Result<Stats>
    where
        I: IntoIterator<Item = u16>,
        F: FnMut(&Outcome),
    {
        for raw in addresses {
            let outcome = self.process(raw)?;
            emit(&outcome);
        }
        Ok(self.stats)
    }
}
