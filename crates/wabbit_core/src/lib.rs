pub mod color;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod time;

pub use color::Color;
pub use draw::{Canvas, TextureHandle, TextureLoader};
pub use geometry::{overlap, Rect};
pub use glam::Vec2;
