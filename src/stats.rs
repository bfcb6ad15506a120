use std::fmt;

/// Running counters of a translation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Addresses taken from the input, including skipped ones.
    pub total_addresses: usize,
    pub tlb_hits: usize,
    pub page_faults: usize,
    pub skipped: usize,
}

impl Stats {
    fn rate(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    /// Addresses that produced a translation.
    pub fn translated(&self) -> usize {
        self.total_addresses - self.skipped
    }

    pub fn page_fault_rate(&self) -> f64 {
        Self::rate(self.page_faults, self.total_addresses)
    }

    pub fn tlb_hit_rate(&self) -> f64 {
        Self::rate(self.tlb_hits, self.total_addresses)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of Translated Addresses = {}", self.translated())?;
        writeln!(f, "Page Faults = {}", self.page_faults)?;
        writeln!(f, "Page Fault Rate = {:.3}", self.page_fault_rate())?;
        writeln!(f, "TLB Hits = {}", self.tlb_hits)?;
        write!(f, "TLB Hit Rate = {:.3}", self.tlb_hit_rate())?;
        if self.skipped > 0 {
            write!(f, "\nSkipped Addresses = {}", self.skipped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Stats;

    #[test]
    fn rates() {
        let stats = Stats {
            total_addresses: 1000,
            tlb_hits: 55,
            page_faults: 244,
            skipped: 0,
        };
        assert!((stats.page_fault_rate() - 0.244).abs() < 1e-12);
        assert!((stats.tlb_hit_rate() - 0.055).abs() < 1e-12);
    }

    #[test]
    fn empty_run_has_zero_rates() {
        let stats = Stats::default();
        assert_eq!(stats.page_fault_rate(), 0.0);
        assert_eq!(stats.tlb_hit_rate(), 0.0);
    }

    #[test]
    fn summary() {
        let stats = Stats {
            total_addresses: 2,
            tlb_hits: 1,
            page_faults: 1,
            skipped: 0,
        };
        assert_eq!(
            stats.to_string(),
            "Number of Translated Addresses = 2\n\
             Page Faults = 1\n\
             Page Fault Rate = 0.500\n\
             TLB Hits = 1\n\
             TLB Hit Rate = 0.500"
        );

        let stats = Stats {
            total_addresses: 5,
            skipped: 3,
            ..stats
        };
        assert_eq!(stats.translated(), 2);
        let summary = stats.to_string();
        assert!(summary.starts_with("Number of Translated Addresses = 2\n"));
        assert!(summary.ends_with("\nSkipped Addresses = 3"));
    }
}
