//! GPU textures decoded from image files.

use image::{Rgba, RgbaImage};
use wabbit_core::Color;

pub const PLACEHOLDER_SIZE: u32 = 32;
const PLACEHOLDER_CELL: u32 = 8;

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Decodes encoded image bytes (PNG) and uploads them.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, String> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| format!("Failed to decode image '{label}': {e}"))?
            .to_rgba8();
        Ok(Self::from_rgba(device, queue, &image, label))
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let (width, height) = image.dimensions();
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        if width > 0 && height > 0 {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                },
                image.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * 4),
                    rows_per_image: Some(height),
                },
                size,
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Point sampling keeps scaled-up pixel art crisp.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }
}

/// Magenta/black checkerboard shown in place of textures that failed to load.
pub fn placeholder_image() -> RgbaImage {
    RgbaImage::from_fn(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, |x, y| {
        if ((x / PLACEHOLDER_CELL) + (y / PLACEHOLDER_CELL)) % 2 == 0 {
            texel(Color::MAGENTA)
        } else {
            texel(Color::BLACK)
        }
    })
}

/// Single opaque white texel; tinted quads over it become solid rectangles.
pub fn white_image() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, texel(Color::WHITE))
}

fn texel(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}
