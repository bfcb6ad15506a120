use std::path::PathBuf;
use std::process::ExitCode;

use backing_store::BackingStoreError;
use memory::MemoryError;
use mmu::PageTableError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open input file {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid logical address `{token}` on line {line}: expected an integer in 0..=65535")]
    InvalidAddress { token: String, line: usize },

    #[error(transparent)]
    BackingStore(#[from] BackingStoreError),

    #[error("no free frame to load page {page}: all {frames} frames are in use")]
    OutOfFrames { page: u8, frames: usize },

    #[error(transparent)]
    PageTable(#[from] PageTableError),

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

impl Error {
    /// Exit status of the `vmm` binary for this error. Status 2 is left to
    /// the argument parser's usage errors.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::InputUnavailable { .. } => 1,
            Self::InvalidAddress { .. } => 3,
            Self::BackingStore(BackingStoreError::Unavailable { .. }) => 4,
            Self::BackingStore(_) => 5,
            Self::OutOfFrames { .. } => 6,
            Self::PageTable(_) | Self::Memory(_) => 7,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Whether the skip fault policy may drop the address and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::BackingStore(BackingStoreError::ShortRead { .. } | BackingStoreError::Io { .. })
        )
    }
}
