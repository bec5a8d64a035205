//! CPU framebuffer shared by the render workers
//!
//! Pixels are `AtomicU32` so that many workers can blend into the same buffer
//! through a shared reference. Whether those read-modify-writes may lose updates
//! is chosen by [`PixelWrites`].

use std::sync::atomic::{AtomicU32, Ordering};

use crate::blend::{blend, BlueChannel};

/// Concurrency policy for blended pixel writes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelWrites {
    /// Independent load and store. Two workers hitting the same pixel can
    /// overwrite each other's blend, so the final value depends on scheduling.
    #[default]
    Racy,
    /// Compare-exchange loop per pixel. Every blend is applied, in an unspecified order.
    Atomic,
}

/// Borrowed view of a published frame
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub pixels: &'a [u32],
    pub width: u32,
    pub height: u32,
}

pub struct FrameBuffer {
    pixels: Vec<AtomicU32>,
    width: u32,
    height: u32,
    blue: BlueChannel,
    writes: PixelWrites,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            pixels: (0..len).map(|_| AtomicU32::new(0)).collect(),
            width,
            height,
            blue: BlueChannel::default(),
            writes: PixelWrites::default(),
        }
    }

    pub fn with_blue_channel(mut self, blue: BlueChannel) -> Self {
        self.blue = blue;
        self
    }

    pub fn with_pixel_writes(mut self, writes: PixelWrites) -> Self {
        self.writes = writes;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Open the frame's write window.
    ///
    /// Taking `&mut self` keeps presentation reads and frame writes in separate
    /// phases; the guard itself is `Sync` and is shared with the render workers.
    pub fn lock(&mut self) -> LockedFrame<'_> {
        LockedFrame { buffer: self }
    }

    /// The last published frame.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            pixels: self.as_u32_slice(),
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x as i32, y as i32)
            .map(|i| self.pixels[i].load(Ordering::Relaxed))
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn as_u32_slice(&self) -> &[u32] {
        // SAFETY: AtomicU32 has the same size, alignment and bit validity as u32.
        // All writes go through `LockedFrame`, which needs `&mut self`, so no
        // write can be in flight while this shared borrow exists.
        unsafe { std::slice::from_raw_parts(self.pixels.as_ptr().cast::<u32>(), self.pixels.len()) }
    }
}

/// Write access to a [`FrameBuffer`] for the duration of one frame
///
/// Dropping the guard (or calling [`LockedFrame::unlock`]) publishes the frame.
pub struct LockedFrame<'a> {
    buffer: &'a mut FrameBuffer,
}

impl LockedFrame<'_> {
    pub fn fill(&self, color: u32) {
        for pixel in &self.buffer.pixels {
            pixel.store(color, Ordering::Relaxed);
        }
    }

    /// Blend `color` over the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn blend_pixel(&self, x: i32, y: i32, color: u32) {
        let Some(index) = self.buffer.index(x, y) else {
            return;
        };
        let pixel = &self.buffer.pixels[index];
        let blue = self.buffer.blue;

        match self.buffer.writes {
            PixelWrites::Racy => {
                let existing = pixel.load(Ordering::Relaxed);
                pixel.store(blend(existing, color, blue), Ordering::Relaxed);
            }
            PixelWrites::Atomic => {
                // The closure always returns Some, so this cannot fail
                let _ = pixel.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |existing| {
                    Some(blend(existing, color, blue))
                });
            }
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height
    }

    pub fn unlock(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_then_blend_single_pixel() {
        let mut fb = FrameBuffer::new(4, 3);
        {
            let frame = fb.lock();
            frame.fill(0xff00_0000);
            frame.blend_pixel(2, 1, 0xffff_a07a);
            frame.unlock();
        }

        assert_eq!(fb.pixel(2, 1), Some(0xffff_4100));
        assert_eq!(fb.pixel(0, 0), Some(0xff00_0000));
        assert_eq!(fb.view().pixels.len(), 12);
        assert_eq!(fb.view().pixels[6], 0xffff_4100);
    }

    #[test]
    fn repeated_blends_accumulate() {
        let mut fb = FrameBuffer::new(1, 1);
        let frame = fb.lock();
        frame.fill(0xff00_0000);
        frame.blend_pixel(0, 0, 0xff90_9090);
        frame.blend_pixel(0, 0, 0xff90_9090);
        frame.unlock();
        // 0 + 2*144 - 255 = 33, then 33 + 33 = 66
        assert_eq!(fb.pixel(0, 0), Some(0xff42_4200));
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = FrameBuffer::new(2, 2);
        let frame = fb.lock();
        frame.fill(0xff00_0000);
        frame.blend_pixel(-1, 0, 0xffff_ffff);
        frame.blend_pixel(0, 2, 0xffff_ffff);
        frame.blend_pixel(2, 0, 0xffff_ffff);
        frame.unlock();
        assert!(fb.view().pixels.iter().all(|&p| p == 0xff00_0000));
    }

    #[test]
    fn atomic_writes_apply_every_blend() {
        let mut fb = FrameBuffer::new(1, 1).with_pixel_writes(PixelWrites::Atomic);
        let frame = fb.lock();
        frame.fill(0xff00_0000);

        // Each blend of 0x81 adds 2*129 - 255 = 3 to red; 80 of them reach 240
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..20 {
                        frame.blend_pixel(0, 0, 0xff81_0000);
                    }
                });
            }
        });
        frame.unlock();

        assert_eq!(fb.pixel(0, 0).map(|p| (p >> 16) & 0xff), Some(240));
    }
}
