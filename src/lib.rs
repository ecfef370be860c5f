//! Streams animated GIFs from flash storage onto small RGB565 panels, primarily for embedded,
//! no-std environments but usable anywhere.
//!
//! The heart of the crate is the [`Compositor`]: a GIF decoder hands it one decoded scanline at a
//! time (palette indices, the frame's palette and an optional transparency key) and it turns that
//! into as few windowed writes as possible on a [`DisplayBus`]. Transparent pixels are never
//! written, so whatever the previous frame left behind shows through.
//!
//! Around it sit
//!
//! - [`ByteStream`], the random access cursor a decoder reads the file through,
//! - the [`Decoder`] trait, with a `GifDecoder` built on the `gif` crate behind the `gif` feature,
//! - [`Player`], which opens the file, plays every frame, closes it and starts over, forever.
//!
//! Any [`embedded_graphics`] [`DrawTarget`] can be used as a display through [`DrawTargetBus`].
//!
//! <!-- README-LINKS
//! [`embedded_graphics`]: https://docs.rs/embedded_graphics
//! [`DrawTarget`]: https://docs.rs/embedded-graphics/latest/embedded_graphics/draw_target/trait.DrawTarget.html
//! README-LINKS -->
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

//#![deny(missing_docs)]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod common;
mod compositor;
mod config;
mod decoder;
mod display;
#[cfg(feature = "gif")]
mod gif_decoder;
#[cfg(feature = "std")]
pub mod host;
mod player;
mod scanline;
mod stream;
#[cfg(test)]
mod test_utils;

pub use common::{BlitError, FrameError, DEFAULT_GIF_PATH, DISPLAY_SIZE, MAX_SCANLINE_WIDTH};
pub use compositor::{BlitStats, Compositor};
pub use config::PlayerConfig;
pub use decoder::{Decoder, FrameInfo};
pub use display::{DisplayBus, DrawTargetBus};
#[cfg(feature = "gif")]
pub use gif_decoder::{GifDecoder, GifError};
pub use player::{PlaybackState, Player};
pub use scanline::{Palette, Scanline, ScanlineSink};
pub use stream::{ByteStream, Storage, StorageFile};
