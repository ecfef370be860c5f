//! Storage and delay backed by the standard library, for running the player on a workstation.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorType, Read, Seek, SeekFrom};
use log::debug;

use crate::stream::{Storage, StorageFile};

/// Serves files out of a directory, the way a mounted flash filesystem would.
///
/// Paths are resolved relative to the root; a leading `/` is ignored.
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for DirStorage {
    type File = HostFile;

    fn open(&mut self, path: &str) -> Option<HostFile> {
        let full = self.root.join(path.trim_start_matches('/'));
        match HostFile::open(&full) {
            Ok(file) => Some(file),
            Err(err) => {
                debug!("Could not open {}: {}", full.display(), err);
                None
            }
        }
    }
}

/// A [`File`] with its length captured at open
pub struct HostFile {
    file: File,
    size: u64,
}

impl HostFile {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let meta = file.metadata()?;
        if !meta.is_file() {
            return Err(io::Error::new(io::ErrorKind::Other, "not a regular file"));
        }
        Ok(Self {
            size: meta.len(),
            file,
        })
    }
}

impl ErrorType for HostFile {
    type Error = io::Error;
}

impl Read for HostFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        io::Read::read(&mut self.file, buf)
    }
}

impl Seek for HostFile {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        let pos = match pos {
            SeekFrom::Start(p) => io::SeekFrom::Start(p),
            SeekFrom::End(p) => io::SeekFrom::End(p),
            SeekFrom::Current(p) => io::SeekFrom::Current(p),
        };
        io::Seek::seek(&mut self.file, pos)
    }
}

impl StorageFile for HostFile {
    fn size(&self) -> u64 {
        self.size
    }
}

/// Blocks the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}
