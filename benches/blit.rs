use criterion::{black_box, criterion_group, criterion_main, Criterion};
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use gifblit::{Compositor, DrawTargetBus, Palette, Scanline};

// TODO: use e-g framebuffer when it's added
struct Framebuffer<const WIDTH: usize, const HEIGHT: usize> {
    pixels: [[Rgb565; WIDTH]; HEIGHT],
}

impl<const WIDTH: usize, const HEIGHT: usize> Framebuffer<WIDTH, HEIGHT> {
    pub fn new() -> Self {
        let color = Rgb565::BLACK;

        Self {
            pixels: [[color; WIDTH]; HEIGHT],
        }
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> DrawTarget for Framebuffer<WIDTH, HEIGHT> {
    type Error = std::convert::Infallible;
    type Color = Rgb565;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Rgb565>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(row) = self.pixels.get_mut(p.y as usize) {
                if let Some(px) = row.get_mut(p.x as usize) {
                    *px = c;
                }
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

fn palette() -> Palette {
    let mut pal = [Rgb565::BLACK; 256];
    for (i, slot) in pal.iter_mut().enumerate() {
        *slot = Rgb565::new(i as u8 % 32, i as u8 % 64, (i / 8) as u8);
    }
    pal
}

/// One 240 pixel row of palette indices where every `period`th pixel is the key
fn row(period: usize) -> Vec<u8> {
    (0..240)
        .map(|x| if x % period == 0 { 0 } else { (x % 255) as u8 + 1 })
        .collect()
}

fn blit_benchmarks(c: &mut Criterion) {
    let pal = palette();

    c.bench_function("blit_opaque_frame", |b| {
        let pixels = row(7);
        let mut comp = Compositor::new(DrawTargetBus::new(Framebuffer::<240, 240>::new()));

        b.iter(|| {
            for y in 0..240 {
                let line = Scanline::new(Point::zero(), y, &pixels, &pal);
                comp.blit(black_box(&line)).unwrap();
            }
        })
    });

    c.bench_function("blit_sparse_transparency", |b| {
        let pixels = row(60);
        let mut comp = Compositor::new(DrawTargetBus::new(Framebuffer::<240, 240>::new()));

        b.iter(|| {
            for y in 0..240 {
                let line =
                    Scanline::new(Point::zero(), y, &pixels, &pal).with_transparency(Some(0));
                comp.blit(black_box(&line)).unwrap();
            }
        })
    });

    c.bench_function("blit_dense_transparency", |b| {
        let pixels = row(2);
        let mut comp = Compositor::new(DrawTargetBus::new(Framebuffer::<240, 240>::new()));

        b.iter(|| {
            for y in 0..240 {
                let line =
                    Scanline::new(Point::zero(), y, &pixels, &pal).with_transparency(Some(0));
                comp.blit(black_box(&line)).unwrap();
            }
        })
    });
}

criterion_group!(benches, blit_benchmarks);
criterion_main!(benches);
