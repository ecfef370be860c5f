//! [`Decoder`] backed by the `gif` crate.
//!
//! The `gif` crate does the LZW work and hands back whole frames of palette indices; this module
//! slices them into scanlines and converts palettes to [`Rgb565`].

use core::fmt;
use std::io;

use embedded_graphics::{
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
};
use fugit::ExtU32;
use log::debug;

use crate::{
    common::{FrameError, MAX_SCANLINE_WIDTH},
    decoder::{Decoder, FrameInfo},
    scanline::{Palette, Scanline, ScanlineSink},
    stream::{ByteStream, StorageFile},
};

/// Errors that emerge when decoding through the `gif` crate
#[derive(Debug)]
pub enum GifError {
    ///Malformed GIF file, or the stream failed underneath
    Decoding(gif::DecodingError),
    ///Canvas is wider than a scanline may be
    CanvasTooWide { width: u16 },
    ///No file is open
    NotOpen,
}

impl fmt::Display for GifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoding(err) => write!(f, "{}", err),
            Self::CanvasTooWide { width } => write!(
                f,
                "canvas is {} pixels wide, at most {} are supported",
                width, MAX_SCANLINE_WIDTH
            ),
            Self::NotOpen => f.write_str("no GIF is open"),
        }
    }
}

impl std::error::Error for GifError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decoding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<gif::DecodingError> for GifError {
    fn from(err: gif::DecodingError) -> Self {
        Self::Decoding(err)
    }
}

pub struct GifDecoder<F: StorageFile> {
    decoder: Option<gif::Decoder<ByteStream<F>>>,
    /// Global color table, converted once per file
    global: Palette,
    /// Table in effect for the frame being drawn
    palette: Palette,
    frames: u32,
}

impl<F: StorageFile> GifDecoder<F> {
    pub fn new() -> Self {
        Self {
            decoder: None,
            global: [Rgb565::BLACK; 256],
            palette: [Rgb565::BLACK; 256],
            frames: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.decoder.is_some()
    }

    pub fn canvas_size(&self) -> Option<Size> {
        self.decoder
            .as_ref()
            .map(|d| Size::new(d.width() as u32, d.height() as u32))
    }
}

impl<F: StorageFile> Default for GifDecoder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StorageFile> Decoder<F> for GifDecoder<F> {
    type Error = GifError;

    fn open(&mut self, stream: ByteStream<F>) -> Result<Size, Self::Error> {
        self.close();

        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let decoder = options.read_info(stream)?;

        if decoder.width() as usize > MAX_SCANLINE_WIDTH {
            return Err(GifError::CanvasTooWide {
                width: decoder.width(),
            });
        }

        load_palette(&mut self.global, decoder.global_palette().unwrap_or(&[]));
        let size = Size::new(decoder.width() as u32, decoder.height() as u32);
        self.decoder = Some(decoder);
        Ok(size)
    }

    fn play_frame<K: ScanlineSink>(
        &mut self,
        sink: &mut K,
    ) -> Result<Option<FrameInfo>, FrameError<Self::Error, K::Error>> {
        let Self {
            decoder,
            global,
            palette,
            frames,
        } = self;
        let decoder = decoder
            .as_mut()
            .ok_or(FrameError::Decode(GifError::NotOpen))?;

        let frame = match decoder.read_next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(None),
            // With the tail guard on, the trailer byte is never read
            Err(gif::DecodingError::Io(err))
                if err.kind() == io::ErrorKind::UnexpectedEof && *frames > 0 =>
            {
                debug!("GIF ended without a trailer after {} frames", frames);
                return Ok(None);
            }
            Err(err) => return Err(FrameError::Decode(GifError::Decoding(err))),
        };

        match &frame.palette {
            Some(local) => load_palette(palette, local),
            None => *palette = *global,
        }

        let width = frame.width as usize;
        if width > 0 {
            let origin = Point::new(frame.left as i32, frame.top as i32);
            for (row, pixels) in frame.buffer.chunks_exact(width).enumerate() {
                let line = Scanline::new(origin, row as u16, pixels, &*palette)
                    .with_transparency(frame.transparent);
                sink.draw_scanline(&line).map_err(FrameError::Sink)?;
            }
        }

        *frames += 1;
        Ok(Some(FrameInfo {
            delay: (frame.delay as u32 * 10).millis(),
        }))
    }

    fn close(&mut self) {
        self.decoder = None;
        self.frames = 0;
    }
}

/// Converts packed RGB triples into `dst`; entries without a triple become black.
fn load_palette(dst: &mut Palette, rgb: &[u8]) {
    dst.fill(Rgb565::BLACK);
    for (slot, c) in dst.iter_mut().zip(rgb.chunks_exact(3)) {
        *slot = Rgb888::new(c[0], c[1], c[2]).into();
    }
}
