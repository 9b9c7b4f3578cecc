pub mod aspect;
pub mod gemini;
pub mod image;
pub mod theme;

pub use aspect::*;
pub use image::*;
pub use theme::*;
