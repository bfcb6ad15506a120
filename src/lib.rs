pub mod config;
pub mod error;
pub mod input;
pub mod stats;
pub mod translator;

pub use config::{Config, FaultPolicy};
pub use error::{Error, Result};
pub use stats::Stats;
pub use translator::{Outcome, Translation, Translator};

pub use mmu::PAGE_SIZE;

pub const TLB_ENTRIES: usize = 16;
/// One entry for every page an 8-bit page number can name.
pub const PAGE_TABLE_ENTRIES: usize = mmu::address::PAGE_SPACE;
pub const FRAME_COUNT: usize = 256;
pub const MEMORY_CAPACITY: usize = FRAME_COUNT * PAGE_SIZE;

pub type DefaultTranslator = Translator<TLB_ENTRIES, PAGE_TABLE_ENTRIES, MEMORY_CAPACITY>;
