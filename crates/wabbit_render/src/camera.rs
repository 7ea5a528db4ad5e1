use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: world units are logical pixels, origin at the
/// top-left corner, y pointing down.
pub struct Camera2D {
    pub viewport: (u32, u32),
}

impl Camera2D {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        let width = self.viewport.0.max(1) as f32;
        let height = self.viewport.1.max(1) as f32;
        Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn to_clip(camera: &Camera2D, x: f32, y: f32) -> Vec4 {
        camera.projection() * Vec4::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn top_left_maps_to_upper_left_clip_corner() {
        let camera = Camera2D::new(1280, 800);
        let clip = to_clip(&camera, 0.0, 0.0);
        assert!((clip.x + 1.0).abs() < 1e-5);
        assert!((clip.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn bottom_right_maps_to_lower_right_clip_corner() {
        let camera = Camera2D::new(1280, 800);
        let clip = to_clip(&camera, 1280.0, 800.0);
        assert!((clip.x - 1.0).abs() < 1e-5);
        assert!((clip.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_viewport_still_yields_a_finite_projection() {
        let camera = Camera2D::new(0, 0);
        let uniform = camera.build_uniform();
        assert!(uniform.view_proj.iter().flatten().all(|v| v.is_finite()));
    }
}
