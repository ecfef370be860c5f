use core::cell::Cell;
use std::{collections::HashMap, rc::Rc};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use embedded_hal::delay::DelayNs;
use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};

use crate::{
    display::DisplayBus,
    scanline::Palette,
    stream::{Storage, StorageFile},
};

// TODO: use e-g framebuffer when it's added
pub(crate) struct Framebuffer<const WIDTH: usize, const HEIGHT: usize> {
    pixels: [[Rgb565; WIDTH]; HEIGHT],
}

impl<const WIDTH: usize, const HEIGHT: usize> Framebuffer<WIDTH, HEIGHT> {
    pub fn new() -> Self {
        let color = Rgb565::BLACK;

        Self {
            pixels: [[color; WIDTH]; HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb565 {
        self.pixels[y][x]
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> DrawTarget for Framebuffer<WIDTH, HEIGHT> {
    type Error = core::convert::Infallible;
    type Color = Rgb565;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Rgb565>>,
    {
        for Pixel(p, c) in pixels {
            if (0..WIDTH as i32).contains(&p.x) && (0..HEIGHT as i32).contains(&p.y) {
                self.pixels[p.y as usize][p.x as usize] = c;
            }
        }

        Ok(())
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> OriginDimensions for Framebuffer<WIDTH, HEIGHT> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

/// Every index maps to a distinct color
pub(crate) fn palette() -> Palette {
    let mut pal = [Rgb565::BLACK; 256];
    for (i, slot) in pal.iter_mut().enumerate() {
        *slot = Rgb565::new((i % 32) as u8, (i / 4) as u8 % 64, (i / 8) as u8 % 32);
    }
    pal
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BusOp {
    Start,
    Window(Rectangle),
    Pixels(Vec<Rgb565>),
    End,
}

/// Display bus that remembers everything it was asked to do
#[derive(Default)]
pub(crate) struct RecordingBus {
    pub ops: Vec<BusOp>,
    fail_pixels: bool,
}

impl RecordingBus {
    pub fn failing_pixels() -> Self {
        Self {
            ops: Vec::new(),
            fail_pixels: true,
        }
    }

    /// Windows paired with the pixels streamed into them
    pub fn writes(&self) -> Vec<(Rectangle, Vec<Rgb565>)> {
        let mut window = None;
        let mut writes = Vec::new();
        for op in &self.ops {
            match op {
                BusOp::Window(area) => window = Some(*area),
                BusOp::Pixels(colors) => {
                    writes.push((window.expect("pixels before window"), colors.clone()))
                }
                _ => {}
            }
        }
        writes
    }
}

impl DisplayBus for RecordingBus {
    type Error = ();

    fn start_write(&mut self) -> Result<(), ()> {
        self.ops.push(BusOp::Start);
        Ok(())
    }

    fn set_addr_window(&mut self, area: Rectangle) -> Result<(), ()> {
        self.ops.push(BusOp::Window(area));
        Ok(())
    }

    fn write_pixels(&mut self, pixels: &[Rgb565]) -> Result<(), ()> {
        if self.fail_pixels {
            return Err(());
        }
        self.ops.push(BusOp::Pixels(pixels.to_vec()));
        Ok(())
    }

    fn end_write(&mut self) -> Result<(), ()> {
        self.ops.push(BusOp::End);
        Ok(())
    }
}

/// In-memory file with knobs for misbehaving like real flash storage
pub(crate) struct MemFile {
    data: Vec<u8>,
    pos: u64,
    /// Lengths passed to every `read`
    pub read_lens: Vec<usize>,
    /// Short reads: never hand back more than this
    pub max_read: Option<usize>,
    /// Seeks land on multiples of this
    pub seek_align: u64,
    live: Option<Rc<Cell<usize>>>,
}

impl MemFile {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            read_lens: Vec::new(),
            max_read: None,
            seek_align: 1,
            live: None,
        }
    }

    fn tracked(data: Vec<u8>, live: Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        let mut file = Self::new(data);
        file.live = Some(live);
        file
    }
}

impl Drop for MemFile {
    fn drop(&mut self) {
        if let Some(live) = &self.live {
            live.set(live.get() - 1);
        }
    }
}

impl ErrorType for MemFile {
    type Error = ErrorKind;
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ErrorKind> {
        self.read_lens.push(buf.len());
        let start = self.pos as usize;
        let mut len = buf.len().min(self.data.len() - start);
        if let Some(max) = self.max_read {
            len = len.min(max);
        }
        buf[..len].copy_from_slice(&self.data[start..start + len]);
        self.pos += len as u64;
        Ok(len)
    }
}

impl Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ErrorKind> {
        let len = self.data.len() as i64;
        let target = match pos {
            SeekFrom::Start(p) => p as i64,
            SeekFrom::End(p) => len + p,
            SeekFrom::Current(p) => self.pos as i64 + p,
        };
        if target < 0 {
            return Err(ErrorKind::InvalidInput);
        }
        let target = (target.min(len) as u64 / self.seek_align) * self.seek_align;
        self.pos = target;
        Ok(self.pos)
    }
}

impl StorageFile for MemFile {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Named in-memory files. Counts every open attempt.
#[derive(Default)]
pub(crate) struct MemStorage {
    files: HashMap<String, Vec<u8>>,
    opens: usize,
    live: Option<Rc<Cell<usize>>>,
}

impl MemStorage {
    /// Count files that are open at any moment in `live`
    pub fn tracking(mut self, live: Rc<Cell<usize>>) -> Self {
        self.live = Some(live);
        self
    }

    pub fn insert(&mut self, path: &str, data: Vec<u8>) {
        self.files.insert(path.to_string(), data);
    }

    pub fn opens(&self) -> usize {
        self.opens
    }
}

impl Storage for MemStorage {
    type File = MemFile;

    fn open(&mut self, path: &str) -> Option<MemFile> {
        self.opens += 1;
        let data = self.files.get(path)?.clone();
        Some(match &self.live {
            Some(live) => MemFile::tracked(data, live.clone()),
            None => MemFile::new(data),
        })
    }
}

/// Remembers every wait instead of sleeping
#[derive(Default)]
pub(crate) struct RecordingDelay {
    /// Milliseconds per call
    pub calls: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}
