use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

/// A decoded GIF palette, already converted to the display's color format.
pub type Palette = [Rgb565; 256];

/// One decoded horizontal row of a GIF frame.
///
/// Everything is borrowed from the decoder for the duration of a single
/// [`ScanlineSink::draw_scanline`] call.
#[derive(Debug, Clone, Copy)]
pub struct Scanline<'a> {
    /// Offset of the frame within the canvas
    pub origin: Point,
    /// Row within the frame
    pub row: u16,
    /// Palette indices, one per pixel
    pub pixels: &'a [u8],
    /// Palette active for this frame
    pub palette: &'a Palette,
    /// Palette index that must not be drawn, when transparency is active
    pub transparent: Option<u8>,
}

impl<'a> Scanline<'a> {
    pub fn new(origin: Point, row: u16, pixels: &'a [u8], palette: &'a Palette) -> Self {
        Self {
            origin,
            row,
            pixels,
            palette,
            transparent: None,
        }
    }

    pub fn with_transparency(mut self, key: Option<u8>) -> Self {
        self.transparent = key;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.len()
    }

    /// Canvas row this scanline lands on
    #[inline]
    pub fn y(&self) -> i32 {
        self.origin.y + self.row as i32
    }

    #[inline]
    pub fn color(&self, index: u8) -> Rgb565 {
        self.palette[index as usize]
    }
}

/// Something that consumes decoded scanlines, one at a time.
pub trait ScanlineSink {
    type Error;

    fn draw_scanline(&mut self, line: &Scanline<'_>) -> Result<(), Self::Error>;
}

impl<T: ScanlineSink + ?Sized> ScanlineSink for &mut T {
    type Error = T::Error;

    fn draw_scanline(&mut self, line: &Scanline<'_>) -> Result<(), Self::Error> {
        (**self).draw_scanline(line)
    }
}
