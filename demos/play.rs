//! This example plays a GIF from a directory into an in-memory 240x240 framebuffer, the way the
//! firmware plays it from flash onto the panel, and prints how many bus writes every frame took.
//!
//! Basic usage: `cargo run --example play -- --root DIR`
//!
//! More usage and arguments can be listed by running `cargo run --example play -- --help`

use clap::Parser;
use embedded_graphics::{
    pixelcolor::{Rgb565, Rgb888},
    prelude::*,
    primitives::Rectangle,
};
use gifblit::{
    host::{DirStorage, StdDelay},
    DisplayBus, DrawTargetBus, GifDecoder, PlaybackState, Player, PlayerConfig,
    DISPLAY_SIZE,
};
use std::{fs, io::Write, path::PathBuf, process::ExitCode};

#[derive(Parser)]
struct Args {
    /// Directory standing in for the flash filesystem
    #[clap(long, default_value = ".")]
    root: PathBuf,

    /// GIF path on the filesystem
    #[clap(long, default_value = "/animation.gif")]
    path: String,

    /// Number of full passes to play
    #[clap(long, default_value = "1")]
    passes: u32,

    /// Center small canvases on the display
    #[clap(long)]
    center: bool,

    /// Play as fast as possible instead of honoring frame delays
    #[clap(long)]
    no_sync: bool,

    /// Write the last frame to this PPM file
    #[clap(long)]
    out: Option<PathBuf>,
}

struct Framebuffer {
    pixels: Vec<Rgb565>,
    size: Size,
}

impl Framebuffer {
    fn new(size: Size) -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; (size.width * size.height) as usize],
            size,
        }
    }

    fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.size.width, self.size.height).into_bytes();
        for &c in &self.pixels {
            let c = Rgb888::from(c);
            out.extend_from_slice(&[c.r(), c.g(), c.b()]);
        }
        out
    }
}

impl DrawTarget for Framebuffer {
    type Error = std::convert::Infallible;
    type Color = Rgb565;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Rgb565>>,
    {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        for Pixel(p, c) in pixels {
            if (0..w).contains(&p.x) && (0..h).contains(&p.y) {
                self.pixels[(p.y as u32 * self.size.width + p.x as u32) as usize] = c;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}

/// Counts writes on the way through to the framebuffer
struct CountingBus {
    inner: DrawTargetBus<Framebuffer>,
    writes: u32,
    pixels: u32,
}

impl DisplayBus for CountingBus {
    type Error = std::convert::Infallible;

    fn set_addr_window(&mut self, area: Rectangle) -> Result<(), Self::Error> {
        self.inner.set_addr_window(area)
    }

    fn write_pixels(&mut self, pixels: &[Rgb565]) -> Result<(), Self::Error> {
        self.writes += 1;
        self.pixels += pixels.len() as u32;
        self.inner.write_pixels(pixels)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = PlayerConfig::default()
        .with_path(Box::leak(args.path.into_boxed_str()))
        .with_center_canvas(args.center)
        .with_sync_frames(!args.no_sync)
        .with_tail_guard(false);

    let bus = CountingBus {
        inner: DrawTargetBus::new(Framebuffer::new(DISPLAY_SIZE)),
        writes: 0,
        pixels: 0,
    };
    let mut player = Player::new(
        DirStorage::new(&args.root),
        GifDecoder::new(),
        bus,
        StdDelay,
        config,
    );

    loop {
        let before = player.frames();
        let state = player.step();
        match state {
            PlaybackState::RetryCooldown => {
                eprintln!(
                    "Failed to open {} under {}",
                    player.config().path,
                    args.root.display()
                );
                return ExitCode::FAILURE;
            }
            PlaybackState::PlayingFrames if player.frames() > before => {
                let bus = player.compositor_mut().display_mut();
                println!(
                    "frame {:>4}: {:>5} writes, {:>6} pixels",
                    before + 1,
                    bus.writes,
                    bus.pixels
                );
                bus.writes = 0;
                bus.pixels = 0;
            }
            PlaybackState::Idle if player.sessions() >= args.passes => break,
            _ => {}
        }
    }

    if let Some(out) = args.out {
        let ppm = player.compositor().display().inner.target().to_ppm();
        if let Err(err) = fs::File::create(&out).and_then(|mut f| f.write_all(&ppm)) {
            eprintln!("Failed to write {}: {}", out.display(), err);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
