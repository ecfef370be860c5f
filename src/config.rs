use embedded_graphics::prelude::Size;
use fugit::{ExtU32, MillisDurationU32};

use crate::common::{DEFAULT_GIF_PATH, DISPLAY_SIZE};

/// Knobs for the [`Player`](crate::Player).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// File to play
    pub path: &'static str,
    /// Physical resolution of the panel
    pub display_size: Size,
    /// Wait after a failed open before trying again
    pub retry_cooldown: MillisDurationU32,
    /// Wait after a full pass before starting over
    pub restart_pause: MillisDurationU32,
    /// Center canvases smaller than the display
    pub center_canvas: bool,
    /// Hold each frame for the delay the GIF asks for
    pub sync_frames: bool,
    /// Never read the final byte of the file, see [`ByteStream::with_tail_guard`](crate::ByteStream::with_tail_guard)
    pub tail_guard: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_GIF_PATH,
            display_size: DISPLAY_SIZE,
            retry_cooldown: 5000.millis(),
            restart_pause: 100.millis(),
            center_canvas: false,
            sync_frames: true,
            tail_guard: true,
        }
    }
}

impl PlayerConfig {
    pub fn with_path(mut self, path: &'static str) -> Self {
        self.path = path;
        self
    }

    pub fn with_display_size(mut self, size: Size) -> Self {
        self.display_size = size;
        self
    }

    pub fn with_retry_cooldown(mut self, cooldown: MillisDurationU32) -> Self {
        self.retry_cooldown = cooldown;
        self
    }

    pub fn with_restart_pause(mut self, pause: MillisDurationU32) -> Self {
        self.restart_pause = pause;
        self
    }

    pub fn with_center_canvas(mut self, center: bool) -> Self {
        self.center_canvas = center;
        self
    }

    pub fn with_sync_frames(mut self, sync: bool) -> Self {
        self.sync_frames = sync;
        self
    }

    pub fn with_tail_guard(mut self, enabled: bool) -> Self {
        self.tail_guard = enabled;
        self
    }
}
