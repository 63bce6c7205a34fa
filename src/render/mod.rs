//! Painting pixel lists into a framebuffer.
//!
//! Figures live in centred, y-up logical coordinates. A [`Viewport`] maps them
//! onto the top-left, y-down framebuffer grid, where each logical pixel becomes
//! a `scale × scale` block.

mod canvas;
mod viewport;

pub use canvas::{format_pixel_list, render_pixels, render_state, Drawable};
pub use viewport::Viewport;
