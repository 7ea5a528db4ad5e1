//! Owns every GPU resource needed to draw a [`SpriteBatch`]: the pipeline,
//! the camera uniform, streamed vertex/index buffers and the loaded textures.

use std::collections::HashMap;
use std::path::Path;

use wabbit_core::{TextureHandle, TextureLoader};
use wgpu::util::DeviceExt;

use crate::batch::{SpriteBatch, SpriteVertex, WHITE_TEXTURE_ID};
use crate::camera::Camera2D;
use crate::gpu_context::GpuContext;
use crate::sprite_pipeline::SpritePipeline;
use crate::texture::{placeholder_image, white_image, Texture};

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

pub struct SpriteRenderer {
    pipeline: SpritePipeline,
    pub camera: Camera2D,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    // Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    textures: HashMap<u32, GpuSpriteTexture>,
    next_texture_id: u32,
    batch: SpriteBatch,
}

impl SpriteRenderer {
    /// `logical_size` is the fixed world/screen size the camera projects,
    /// independent of the surface's physical size.
    pub fn new(gpu: &GpuContext, logical_size: (u32, u32)) -> Self {
        let pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);
        let camera = Camera2D::new(logical_size.0, logical_size.1);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let mut renderer = Self {
            pipeline,
            camera,
            camera_buffer,
            camera_bind_group,
            vertex_buffer: create_vertex_buffer(&gpu.device, 1),
            index_buffer: create_index_buffer(&gpu.device, 1),
            vertex_capacity: 1,
            index_capacity: 1,
            textures: HashMap::new(),
            next_texture_id: WHITE_TEXTURE_ID + 1,
            batch: SpriteBatch::new(),
        };

        let white = Texture::from_rgba(&gpu.device, &gpu.queue, &white_image(), "white");
        renderer.insert_texture(gpu, WHITE_TEXTURE_ID, white);
        renderer
    }

    fn insert_texture(&mut self, gpu: &GpuContext, id: u32, texture: Texture) {
        let bind_group = self
            .pipeline
            .create_texture_bind_group(&gpu.device, &texture);
        self.textures.insert(
            id,
            GpuSpriteTexture {
                texture,
                bind_group,
            },
        );
    }

    pub fn load_texture(&mut self, gpu: &GpuContext, path: &Path) -> TextureHandle {
        let label = path.display().to_string();
        let decoded = std::fs::read(path)
            .map_err(|e| format!("Failed to read texture '{label}': {e}"))
            .and_then(|bytes| Texture::from_bytes(&gpu.device, &gpu.queue, &bytes, &label));
        let texture = match decoded {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("{err}. Falling back to placeholder texture.");
                Texture::from_rgba(&gpu.device, &gpu.queue, &placeholder_image(), &label)
            }
        };

        let id = self.next_texture_id;
        self.next_texture_id += 1;
        let handle = TextureHandle::new(id, texture.width, texture.height);
        log::info!(
            "Texture {} loaded: '{}' ({}x{})",
            id,
            label,
            texture.width,
            texture.height
        );
        self.insert_texture(gpu, id, texture);
        handle
    }

    pub fn unload_texture(&mut self, handle: TextureHandle) {
        match self.textures.remove(&handle.id()) {
            Some(entry) => {
                entry.texture.texture.destroy();
                log::info!("Texture {} unloaded", handle.id());
            }
            None => log::warn!("Texture {} was not loaded; nothing to unload", handle.id()),
        }
    }

    /// Borrows the renderer as a [`TextureLoader`] for entity setup/teardown.
    pub fn loader<'a>(&'a mut self, gpu: &'a GpuContext) -> GpuTextureLoader<'a> {
        GpuTextureLoader {
            renderer: self,
            gpu,
        }
    }

    pub fn batch_mut(&mut self) -> &mut SpriteBatch {
        &mut self.batch
    }

    pub fn batch(&self) -> &SpriteBatch {
        &self.batch
    }

    /// Loaded textures, excluding the built-in white texture.
    pub fn texture_count(&self) -> usize {
        self.textures.len().saturating_sub(1)
    }

    /// Streams the recorded batch and camera into GPU buffers.
    pub fn upload(&mut self, gpu: &GpuContext) {
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );

        self.ensure_capacity(
            &gpu.device,
            self.batch.vertices().len(),
            self.batch.indices().len(),
        );
        if !self.batch.is_empty() {
            gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(self.batch.vertices()),
            );
            gpu.queue.write_buffer(
                &self.index_buffer,
                0,
                bytemuck::cast_slice(self.batch.indices()),
            );
        }
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, vertex_count: usize, index_count: usize) {
        let needed_vertices = vertex_count.max(1);
        if needed_vertices > self.vertex_capacity {
            self.vertex_capacity = needed_vertices.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(device, self.vertex_capacity);
        }
        let needed_indices = index_count.max(1);
        if needed_indices > self.index_capacity {
            self.index_capacity = needed_indices.next_power_of_two();
            self.index_buffer = create_index_buffer(device, self.index_capacity);
        }
    }

    /// Issues the batch's draw calls. Call after [`upload`](Self::upload).
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.batch.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        let mut last_bound: Option<u32> = None;
        for draw in self.batch.draw_calls() {
            let Some(texture) = self.textures.get(&draw.texture_id) else {
                log::warn!("Draw call references unknown texture {}", draw.texture_id);
                continue;
            };
            if last_bound != Some(draw.texture_id) {
                render_pass.set_bind_group(1, &texture.bind_group, &[]);
                last_bound = Some(draw.texture_id);
            }
            render_pass.draw_indexed(
                draw.index_start..(draw.index_start + draw.index_count),
                0,
                0..1,
            );
        }
    }
}

pub struct GpuTextureLoader<'a> {
    renderer: &'a mut SpriteRenderer,
    gpu: &'a GpuContext,
}

impl TextureLoader for GpuTextureLoader<'_> {
    fn load_texture(&mut self, path: &Path) -> TextureHandle {
        self.renderer.load_texture(self.gpu, path)
    }

    fn unload_texture(&mut self, handle: TextureHandle) {
        self.renderer.unload_texture(handle);
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<SpriteVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Sprite Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
