use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};

/// A pixel bus that is addressed through a rectangular write window.
///
/// This mirrors how SPI panel controllers are driven: open a transaction, set the window, stream
/// colors into it row-major, close the transaction. Implementations decide what happens to pixels
/// that land outside the panel.
pub trait DisplayBus {
    type Error;

    /// Acquire the bus
    fn start_write(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Address the window that following pixels are streamed into
    fn set_addr_window(&mut self, area: Rectangle) -> Result<(), Self::Error>;

    /// Stream colors into the current window
    fn write_pixels(&mut self, pixels: &[Rgb565]) -> Result<(), Self::Error>;

    /// Release the bus
    fn end_write(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: DisplayBus + ?Sized> DisplayBus for &mut T {
    type Error = T::Error;

    fn start_write(&mut self) -> Result<(), Self::Error> {
        (**self).start_write()
    }

    fn set_addr_window(&mut self, area: Rectangle) -> Result<(), Self::Error> {
        (**self).set_addr_window(area)
    }

    fn write_pixels(&mut self, pixels: &[Rgb565]) -> Result<(), Self::Error> {
        (**self).write_pixels(pixels)
    }

    fn end_write(&mut self) -> Result<(), Self::Error> {
        (**self).end_write()
    }
}

/// Drives any [`DrawTarget`] as a [`DisplayBus`].
///
/// The window is remembered and every pixel stream becomes one `fill_contiguous` call, so drivers
/// that accelerate contiguous fills get the same fast path as a raw bus.
pub struct DrawTargetBus<T> {
    target: T,
    window: Rectangle,
}

impl<T> DrawTargetBus<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: T) -> Self {
        Self {
            target,
            window: Rectangle::new(Point::zero(), Size::zero()),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }
}

impl<T> DisplayBus for DrawTargetBus<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    type Error = T::Error;

    fn set_addr_window(&mut self, area: Rectangle) -> Result<(), Self::Error> {
        self.window = area;
        Ok(())
    }

    fn write_pixels(&mut self, pixels: &[Rgb565]) -> Result<(), Self::Error> {
        self.target
            .fill_contiguous(&self.window, pixels.iter().copied())
    }
}

impl<T> OriginDimensions for DrawTargetBus<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> Size {
        self.target.bounding_box().size
    }
}
