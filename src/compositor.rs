use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

use crate::{
    common::{BlitError, MAX_SCANLINE_WIDTH},
    display::DisplayBus,
    scanline::{Scanline, ScanlineSink},
};

/// Counters for the writes a [`Compositor`] has issued. Both wrap around on overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlitStats {
    /// Number of windowed writes
    pub writes: u32,
    /// Number of pixels streamed across all writes
    pub pixels: u32,
}


/// Turns decoded scanlines into windowed writes on a [`DisplayBus`].
///
/// Only opaque pixels are written. Each maximal run of opaque pixels becomes exactly one write;
/// transparent pixels are skipped and leave whatever the display already shows. Nothing is
/// clipped, the bus is trusted with out-of-bounds windows.
pub struct Compositor<D> {
    display: D,
    /// Resolved colors for the run being written
    staging: [Rgb565; MAX_SCANLINE_WIDTH],
    /// Where the canvas' top left corner sits on the display
    origin: Point,
    stats: BlitStats,
}

impl<D: DisplayBus> Compositor<D> {
    pub fn new(display: D) -> Self {
        Self {
            display,
            staging: [Rgb565::BLACK; MAX_SCANLINE_WIDTH],
            origin: Point::zero(),
            stats: BlitStats::default(),
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Offset every following write by `origin`, e.g. to center a small canvas
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn stats(&self) -> BlitStats {
        self.stats
    }

    /// Returns the counters accumulated so far and starts over from zero
    pub fn take_stats(&mut self) -> BlitStats {
        core::mem::take(&mut self.stats)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_inner(self) -> D {
        self.display
    }

    /// Push one scanline to the display.
    pub fn blit(&mut self, line: &Scanline<'_>) -> Result<(), BlitError<D::Error>> {
        let width = line.width();
        if width > MAX_SCANLINE_WIDTH {
            return Err(BlitError::ScanlineTooWide {
                width,
                capacity: MAX_SCANLINE_WIDTH,
            });
        }

        let x0 = self.origin.x + line.origin.x;
        let y = self.origin.y + line.y();

        match line.transparent {
            None => {
                for (slot, &idx) in self.staging.iter_mut().zip(line.pixels) {
                    *slot = line.color(idx);
                }
                if width > 0 {
                    self.flush(Point::new(x0, y), width)?;
                }
            }
            Some(key) => {
                let mut x = 0;
                let mut rest = line.pixels;
                while !rest.is_empty() {
                    let opaque = rest.iter().position(|&p| p == key).unwrap_or(rest.len());
                    if opaque > 0 {
                        for (slot, &idx) in self.staging.iter_mut().zip(&rest[..opaque]) {
                            *slot = line.color(idx);
                        }
                        self.flush(Point::new(x0 + x as i32, y), opaque)?;
                        x += opaque;
                        rest = &rest[opaque..];
                    }

                    let clear = rest.iter().position(|&p| p != key).unwrap_or(rest.len());
                    x += clear;
                    rest = &rest[clear..];
                }
            }
        }
        Ok(())
    }

    /// Write the first `len` staged colors as a single row starting at `at`.
    ///
    /// The bus is released even when the window or pixel stream fails; the first error wins.
    fn flush(&mut self, at: Point, len: usize) -> Result<(), BlitError<D::Error>> {
        let window = Rectangle::new(at, Size::new(len as u32, 1));

        self.display.start_write().map_err(BlitError::Display)?;
        let written = self
            .display
            .set_addr_window(window)
            .and_then(|()| self.display.write_pixels(&self.staging[..len]));
        let released = self.display.end_write();
        written.and(released).map_err(BlitError::Display)?;

        self.stats.writes = self.stats.writes.wrapping_add(1);
        self.stats.pixels = self.stats.pixels.wrapping_add(len as u32);
        Ok(())
    }
}

impl<D: DisplayBus> ScanlineSink for Compositor<D> {
    type Error = BlitError<D::Error>;

    fn draw_scanline(&mut self, line: &Scanline<'_>) -> Result<(), Self::Error> {
        self.blit(line)
    }
}
