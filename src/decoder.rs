use embedded_graphics::prelude::Size;
use fugit::MillisDurationU32;

use crate::{
    common::FrameError,
    scanline::ScanlineSink,
    stream::{ByteStream, StorageFile},
};

/// What a decoder reports about a frame it has just drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// How long the frame wants to stay on screen
    pub delay: MillisDurationU32,
}

/// A GIF decoder that pulls bytes from a [`ByteStream`] and pushes frames out row by row.
pub trait Decoder<F: StorageFile> {
    type Error: core::fmt::Debug;

    /// Takes ownership of `stream` and reads the GIF header, returning the canvas size.
    ///
    /// On failure the stream is dropped.
    fn open(&mut self, stream: ByteStream<F>) -> Result<Size, Self::Error>;

    /// Decodes the next frame, calling [`ScanlineSink::draw_scanline`] once per row.
    ///
    /// Returns `Ok(None)` once the animation is exhausted.
    fn play_frame<K: ScanlineSink>(
        &mut self,
        sink: &mut K,
    ) -> Result<Option<FrameInfo>, FrameError<Self::Error, K::Error>>;

    /// Drops the stream and any per-file state. Does nothing if nothing is open.
    fn close(&mut self);
}
