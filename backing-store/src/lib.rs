use std::{
    fs::File,
    io::{ErrorKind, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use log::info;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackingStoreError {
    #[error("cannot open backing store {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("short read of page {page}: expected {expected} bytes, got {read}")]
    ShortRead {
        page: u32,
        expected: usize,
        read: usize,
    },
    #[error("i/o error while reading page {page}: {source}")]
    Io {
        page: u32,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only store of concatenated `PAGE_SIZE` pages.
///
/// Page `p` lives at byte range `[p * PAGE_SIZE, (p + 1) * PAGE_SIZE)` of the
/// file. There is no header. The file handle is held for the lifetime of the
/// store and closed when it is dropped.
#[derive(Debug)]
pub struct BackingStore<const PAGE_SIZE: usize> {
    path: PathBuf,
    file: File,
    len: u64,
}

impl<const PAGE_SIZE: usize> BackingStore<PAGE_SIZE> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BackingStoreError> {
        assert!(PAGE_SIZE > 0, "Page size must be non-zero");
        let path = path.as_ref().to_path_buf();
        let unavailable = |source| BackingStoreError::Unavailable {
            path: path.clone(),
            source,
        };
        let file = File::options().read(true).open(&path).map_err(unavailable)?;
        let len = file.metadata().map_err(unavailable)?.len();
        info!(
            "Opened backing store {} ({} bytes, {} pages)",
            path.display(),
            len,
            len / PAGE_SIZE as u64
        );
        Ok(Self { path, file, len })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of whole pages in the store.
    pub fn page_count(&self) -> usize {
        (self.len / PAGE_SIZE as u64) as usize
    }

    pub fn read_page(&mut self, page_number: u32) -> Result<Box<[u8; PAGE_SIZE]>, BackingStoreError> {
        info!("Start reading page[{}]", page_number);
        let io = |source| BackingStoreError::Io {
            page: page_number,
            source,
        };
        self.file
            .seek(SeekFrom::Start(page_number as u64 * PAGE_SIZE as u64))
            .map_err(io)?;

        let mut buf = Box::new([0; PAGE_SIZE]);
        let mut read = 0;
        // A single read may legally return less than asked for; stop only on EOF.
        while read < PAGE_SIZE {
            match self.file.read(&mut buf[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(io(e)),
            }
        }
        if read < PAGE_SIZE {
            return Err(BackingStoreError::ShortRead {
                page: page_number,
                expected: PAGE_SIZE,
                read,
            });
        }
        info!("Done reading page[{}]", page_number);
        Ok(buf)
    }
}
