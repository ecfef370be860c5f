use core::fmt;

use embedded_graphics::prelude::Size;

/// Native resolution of the round panel.
pub const DISPLAY_SIZE: Size = Size::new(240, 240);

/// Capacity of the compositor's staging buffer, in pixels.
///
/// Scanlines wider than this are rejected rather than split. It must be at least as large as the
/// widest scanline we expect, since a scanline can be entirely opaque.
pub const MAX_SCANLINE_WIDTH: usize = 320;

/// Where the animation lives on the mounted filesystem.
pub const DEFAULT_GIF_PATH: &str = "/animation.gif";

/// Errors that emerge when pushing a scanline out to the display
#[derive(Debug, PartialEq, Eq)]
pub enum BlitError<E> {
    ///Scanline does not fit in the staging buffer
    ScanlineTooWide { width: usize, capacity: usize },
    ///The display bus reported an error
    Display(E),
}

impl<E: fmt::Debug> fmt::Display for BlitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScanlineTooWide { width, capacity } => write!(
                f,
                "scanline of {} pixels exceeds the {} pixel staging buffer",
                width, capacity
            ),
            Self::Display(err) => write!(f, "display bus error: {:?}", err),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for BlitError<E> {}

/// Errors that emerge while playing a single frame
#[derive(Debug)]
pub enum FrameError<D, S> {
    ///The decoder failed to produce the frame
    Decode(D),
    ///The scanline sink rejected a scanline
    Sink(S),
}

impl<D: fmt::Debug, S: fmt::Debug> fmt::Display for FrameError<D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "decoding failed: {:?}", err),
            Self::Sink(err) => write!(f, "drawing failed: {:?}", err),
        }
    }
}

impl<D: fmt::Debug, S: fmt::Debug> core::error::Error for FrameError<D, S> {}
