use embedded_io::{ErrorType, Read, Seek, SeekFrom};

/// A file on mounted storage that can be read and seeked by byte offset.
pub trait StorageFile: Read + Seek {
    /// Total length of the file in bytes
    fn size(&self) -> u64;
}

/// Named-file access to mounted storage
pub trait Storage {
    type File: StorageFile;

    /// Opens `path`, or returns `None` if it doesn't resolve to a file.
    fn open(&mut self, path: &str) -> Option<Self::File>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    type File = S::File;

    fn open(&mut self, path: &str) -> Option<Self::File> {
        (**self).open(path)
    }
}

///Random access cursor over one open file, as handed to a decoder
pub struct ByteStream<F> {
    file: F,
    position: u64,
    size: u64,
    tail_guard: bool,
}

impl<F: StorageFile> ByteStream<F> {
    /// Opens `path` on `storage`. `None` means there's nothing to play.
    pub fn open<S>(storage: &mut S, path: &str) -> Option<Self>
    where
        S: Storage<File = F> + ?Sized,
    {
        storage.open(path).map(Self::new)
    }

    pub fn new(file: F) -> Self {
        Self {
            size: file.size(),
            file,
            position: 0,
            tail_guard: true,
        }
    }

    /// Controls whether reads stop one byte short of the end of the file.
    ///
    /// Some flash filesystems stop honoring seeks once a file has been read through its final
    /// byte, so by default reads that would run off the end leave that byte unread.
    pub fn with_tail_guard(mut self, enabled: bool) -> Self {
        self.tail_guard = enabled;
        self
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Reads up to `buf.len()` bytes, returning how many were read.
    ///
    /// Returns `Ok(0)` without touching the file when the tail guard leaves nothing to read.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, F::Error> {
        let mut len = buf.len() as u64;
        let remaining = self.size.saturating_sub(self.position);
        if self.tail_guard && remaining < len {
            len = remaining.saturating_sub(1);
        }
        if len == 0 {
            return Ok(0);
        }

        let read = self.file.read(&mut buf[..len as usize])?;
        self.position = self.file.stream_position()?;
        Ok(read)
    }

    /// Seeks to absolute `position` and returns where the file actually ended up
    pub fn seek_to(&mut self, position: u64) -> Result<u64, F::Error> {
        self.file.seek(SeekFrom::Start(position))?;
        self.position = self.file.stream_position()?;
        Ok(self.position)
    }

    /// Gives the file back. Dropping it closes it.
    pub fn close(self) -> F {
        self.file
    }
}

impl<F: StorageFile> ErrorType for ByteStream<F> {
    type Error = F::Error;
}

impl<F: StorageFile> Read for ByteStream<F> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        ByteStream::read(self, buf)
    }
}

impl<F: StorageFile> Seek for ByteStream<F> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
        self.file.seek(pos)?;
        self.position = self.file.stream_position()?;
        Ok(self.position)
    }

    fn stream_position(&mut self) -> Result<u64, Self::Error> {
        Ok(self.position)
    }
}

#[cfg(feature = "std")]
fn to_std_error<E: embedded_io::Error>(err: E) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", err.kind()))
}

#[cfg(feature = "std")]
impl<F: StorageFile> std::io::Read for ByteStream<F> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        ByteStream::read(self, buf).map_err(to_std_error)
    }
}

#[cfg(feature = "std")]
impl<F: StorageFile> std::io::Seek for ByteStream<F> {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        let pos = match pos {
            std::io::SeekFrom::Start(p) => SeekFrom::Start(p),
            std::io::SeekFrom::End(p) => SeekFrom::End(p),
            std::io::SeekFrom::Current(p) => SeekFrom::Current(p),
        };
        Seek::seek(self, pos).map_err(to_std_error)
    }
}
