use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use log::{debug, info, trace, warn};

use crate::{
    compositor::Compositor,
    config::PlayerConfig,
    decoder::Decoder,
    display::DisplayBus,
    stream::{ByteStream, Storage},
};

/// Where the [`Player`] is in its open / play / close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Between sessions
    Idle,
    /// About to open the file
    Opening,
    /// Pulling frames out of the decoder
    PlayingFrames,
    /// Releasing the file after a pass
    Closing,
    /// Backing off after a failed open
    RetryCooldown,
}

/// Plays one GIF over and over, forever.
///
/// Every pass opens the file afresh, pulls frames until the decoder runs dry and closes it again.
/// A file that can't be opened is retried after a cooldown, so a missing or corrupt animation never
/// takes the firmware down.
pub struct Player<S, Dec, D, W> {
    storage: S,
    decoder: Dec,
    compositor: Compositor<D>,
    delay: W,
    config: PlayerConfig,
    state: PlaybackState,
    sessions: u32,
    frames: u32,
    open_failures: u32,
}

impl<S, Dec, D, W> Player<S, Dec, D, W>
where
    S: Storage,
    Dec: Decoder<S::File>,
    D: DisplayBus,
    D::Error: core::fmt::Debug,
    W: DelayNs,
{
    pub fn new(storage: S, decoder: Dec, display: D, delay: W, config: PlayerConfig) -> Self {
        Self {
            storage,
            decoder,
            compositor: Compositor::new(display),
            delay,
            config,
            state: PlaybackState::Idle,
            sessions: 0,
            frames: 0,
            open_failures: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of sessions that opened successfully
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Frames drawn in the current (or last) session
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn open_failures(&self) -> u32 {
        self.open_failures
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn compositor(&self) -> &Compositor<D> {
        &self.compositor
    }

    pub fn compositor_mut(&mut self) -> &mut Compositor<D> {
        &mut self.compositor
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn decoder(&self) -> &Dec {
        &self.decoder
    }

    /// Play forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Performs the work of the current state and moves to the next one.
    pub fn step(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Idle => PlaybackState::Opening,
            PlaybackState::Opening => self.open(),
            PlaybackState::PlayingFrames => self.play_frame(),
            PlaybackState::Closing => {
                self.decoder.close();
                debug!("Closed GIF after {} frames", self.frames);
                self.delay.delay_ms(self.config.restart_pause.to_millis());
                PlaybackState::Idle
            }
            PlaybackState::RetryCooldown => {
                self.delay.delay_ms(self.config.retry_cooldown.to_millis());
                PlaybackState::Opening
            }
        };
        self.state
    }

    fn open(&mut self) -> PlaybackState {
        let stream = match ByteStream::open(&mut self.storage, self.config.path) {
            Some(stream) => stream.with_tail_guard(self.config.tail_guard),
            None => {
                self.open_failures += 1;
                warn!(
                    "Failed to open GIF file {}; make sure it is on the filesystem",
                    self.config.path
                );
                return PlaybackState::RetryCooldown;
            }
        };

        match self.decoder.open(stream) {
            Ok(canvas) => {
                info!(
                    "Successfully opened GIF; canvas size = {} x {}",
                    canvas.width, canvas.height
                );
                let origin = if self.config.center_canvas {
                    centered(canvas, self.config.display_size)
                } else {
                    Point::zero()
                };
                self.compositor.set_origin(origin);
                self.compositor.take_stats();
                self.sessions += 1;
                self.frames = 0;
                PlaybackState::PlayingFrames
            }
            Err(err) => {
                self.open_failures += 1;
                warn!("Failed to decode GIF file {}: {:?}", self.config.path, err);
                PlaybackState::RetryCooldown
            }
        }
    }

    fn play_frame(&mut self) -> PlaybackState {
        match self.decoder.play_frame(&mut self.compositor) {
            Ok(Some(frame)) => {
                self.frames += 1;
                let stats = self.compositor.take_stats();
                trace!(
                    "Frame {}: {} writes, {} pixels",
                    self.frames,
                    stats.writes,
                    stats.pixels
                );
                if self.config.sync_frames {
                    self.delay.delay_ms(frame.delay.to_millis());
                }
                PlaybackState::PlayingFrames
            }
            Ok(None) => PlaybackState::Closing,
            Err(err) => {
                warn!("Playback stopped at frame {}: {}", self.frames + 1, err);
                PlaybackState::Closing
            }
        }
    }
}

/// Top left corner that puts `canvas` in the middle of `display`
fn centered(canvas: Size, display: Size) -> Point {
    Point::new(
        (display.width as i32 - canvas.width as i32) / 2,
        (display.height as i32 - canvas.height as i32) / 2,
    )
}
