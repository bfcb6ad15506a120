use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page_number: u8,
    pub frame_number: u32,
}

/// Fully associative translation cache with `CAPACITY` slots.
///
/// Slots are filled in order and, once every slot is taken, replaced
/// first-in first-out. Nothing else removes an entry.
#[derive(Debug, Clone)]
pub struct Tlb<const CAPACITY: usize> {
    entries: [Option<TlbEntry>; CAPACITY],
    /// Slot the next insertion goes to; always the oldest entry when full.
    next: usize,
}

impl<const CAPACITY: usize> Tlb<CAPACITY> {
    pub fn init() -> Self {
        Self {
            entries: [None; CAPACITY],
            next: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn position(&self, page_number: u8) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| matches!(e, Some(e) if e.page_number == page_number))
    }

    pub fn lookup(&self, page_number: u8) -> Option<u32> {
        let slot = self.position(page_number)?;
        self.entries[slot].map(|e| e.frame_number)
    }

    pub fn upsert(&mut self, page_number: u8, frame_number: u32) {
        if let Some(slot) = self.position(page_number) {
            self.entries[slot] = Some(TlbEntry {
                page_number,
                frame_number,
            });
            return;
        }
        if CAPACITY == 0 {
            return;
        }
        if let Some(evicted) = self.entries[self.next] {
            debug!(
                "TLB full, evicting page {} (frame {}) for page {}",
                evicted.page_number, evicted.frame_number, page_number
            );
        }
        self.entries[self.next] = Some(TlbEntry {
            page_number,
            frame_number,
        });
        self.next = (self.next + 1) % CAPACITY;
    }

    pub fn iter(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter().flatten()
    }
}

impl<const CAPACITY: usize> Default for Tlb<CAPACITY> {
    fn default() -> Self {
        Self::init()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::Rng;

    use super::Tlb;

    #[test]
    fn empty_lookup_misses() {
        let tlb: Tlb<16> = Tlb::init();
        assert!(tlb.is_empty());
        assert_eq!(tlb.capacity(), 16);
        for page in 0..=255 {
            assert_eq!(tlb.lookup(page), None);
        }
    }

    #[test]
    fn upsert_then_lookup() {
        let mut tlb: Tlb<16> = Tlb::init();
        tlb.upsert(12, 43);
        tlb.upsert(4, 45);
        assert_eq!(tlb.lookup(12), Some(43));
        assert_eq!(tlb.lookup(4), Some(45));
        assert_eq!(tlb.lookup(5), None);
        assert_eq!(tlb.len(), 2);
    }

    #[test]
    fn upsert_overwrites_existing_page() {
        let mut tlb: Tlb<4> = Tlb::init();
        tlb.upsert(12, 43);
        tlb.upsert(12, 49);
        assert_eq!(tlb.lookup(12), Some(49));
        assert_eq!(tlb.len(), 1);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut tlb: Tlb<4> = Tlb::init();
        for page in 0..4 {
            tlb.upsert(page, page as u32 + 100);
        }
        assert_eq!(tlb.len(), 4);

        // Refreshing an entry does not change its age.
        tlb.upsert(0, 200);
        tlb.upsert(4, 104);
        assert_eq!(tlb.lookup(0), None);
        assert_eq!(tlb.lookup(4), Some(104));

        tlb.upsert(5, 105);
        assert_eq!(tlb.lookup(1), None);
        assert_eq!(tlb.lookup(2), Some(102));
        assert_eq!(tlb.lookup(3), Some(103));
        assert_eq!(tlb.lookup(5), Some(105));
        assert_eq!(tlb.len(), 4);
    }

    #[test]
    fn zero_capacity_never_caches() {
        let mut tlb: Tlb<0> = Tlb::init();
        tlb.upsert(1, 1);
        assert_eq!(tlb.lookup(1), None);
        assert!(tlb.is_empty());
    }

    #[test]
    fn random_upserts_keep_pages_unique() {
        let mut rng = rand::thread_rng();
        let mut tlb: Tlb<16> = Tlb::init();
        for _ in 0..10_000 {
            let page: u8 = rng.gen();
            let frame: u32 = rng.gen_range(0..256);
            tlb.upsert(page, frame);
            assert_eq!(tlb.lookup(page), Some(frame));

            let mut seen = HashSet::new();
            for entry in tlb.iter() {
                assert!(seen.insert(entry.page_number), "duplicate page {}", entry.page_number);
            }
            assert!(tlb.len() <= 16);
        }
        assert_eq!(tlb.len(), 16);
    }
}
