pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod renderer;
pub mod sprite_pipeline;
pub mod texture;

pub use batch::{DrawCall, QuadSpec, SpriteBatch, SpriteVertex, WHITE_TEXTURE_ID};
pub use camera::{Camera2D, CameraUniform};
pub use gpu_context::GpuContext;
pub use renderer::{GpuTextureLoader, SpriteRenderer};
pub use sprite_pipeline::SpritePipeline;
pub use texture::Texture;
