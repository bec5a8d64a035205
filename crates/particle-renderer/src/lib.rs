//! # Particle Renderer
//!
//! CPU framebuffer with the particle blend operator, plus presentation of
//! finished frames to a window surface.

pub mod blend;
pub mod error;
pub mod framebuffer;
pub mod presenter;

pub use blend::*;
pub use error::*;
pub use framebuffer::*;
pub use presenter::*;
