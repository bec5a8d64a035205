//! Channel blend used when drawing particles
//!
//! A "linear light" style operator: bright top channels push the base up, dark
//! ones pull it down, at twice the rate of a plain average. The two branches are
//! asymmetric and meet with a one-unit step at 128.

/// How the top colour's blue channel is read
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlueChannel {
    /// Shift the whole colour right by 255 as a signed 32-bit value.
    ///
    /// The shift amount masks to 31, so this yields the sign bit: `-1` for any
    /// colour with the alpha high bit set and `0` otherwise. Kept for bit-exact
    /// output against the reference renderer.
    #[default]
    Literal,
    /// Read the low byte like the red and green channels.
    Masked,
}

impl BlueChannel {
    #[inline]
    fn extract(self, top: u32) -> i32 {
        match self {
            BlueChannel::Literal => (top as i32) >> (255 & 31),
            BlueChannel::Masked => (top & 0xff) as i32,
        }
    }
}

#[inline]
fn blend_channel(base: i32, top: i32) -> u32 {
    let value = if top < 0x80 {
        base + 2 * (top - 0x80)
    } else {
        base + 2 * top - 0xff
    };
    value.clamp(0, 0xff) as u32
}

/// Blend `top` over `bottom`, both packed ARGB. The result is always opaque.
#[inline]
pub fn blend(bottom: u32, top: u32, blue: BlueChannel) -> u32 {
    let r = ((bottom >> 16) & 0xff) as i32;
    let g = ((bottom >> 8) & 0xff) as i32;
    let b = (bottom & 0xff) as i32;

    let tr = ((top >> 16) & 0xff) as i32;
    let tg = ((top >> 8) & 0xff) as i32;
    let tb = blue.extract(top);

    0xff00_0000 | (blend_channel(r, tr) << 16) | (blend_channel(g, tg) << 8) | blend_channel(b, tb)
}
