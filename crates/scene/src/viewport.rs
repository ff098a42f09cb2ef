/// Upper bound on the render pixel ratio; denser displays render at 2x.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Window dimensions and the pixel density the surface renders at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window size in physical pixels.
    width: u32,
    height: u32,
    /// Device pixel ratio reported by the platform.
    scale_factor: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        let mut viewport = Self {
            width: 1,
            height: 1,
            scale_factor: 1.0,
        };
        viewport.resize(width, height, scale_factor);
        viewport
    }

    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Effective pixel ratio: the device ratio, capped at [`MAX_PIXEL_RATIO`].
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(MAX_PIXEL_RATIO)
    }

    /// Window width / height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Size of the render surface: logical window size times the pixel ratio.
    pub fn surface_size(&self) -> (u32, u32) {
        let scale = self.pixel_ratio() / self.scale_factor;
        let w = (self.width as f64 * scale).round().max(1.0) as u32;
        let h = (self.height as f64 * scale).round().max(1.0) as u32;
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height() {
        let vp = Viewport::new(1920, 1080, 1.0);
        assert_eq!(vp.aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn pixel_ratio_clamped_to_two() {
        let vp = Viewport::new(3000, 1500, 3.0);
        assert_eq!(vp.pixel_ratio(), 2.0);
        // 1000x500 logical, rendered at 2x.
        assert_eq!(vp.surface_size(), (2000, 1000));
    }

    #[test]
    fn low_density_renders_at_native_size() {
        let vp = Viewport::new(1280, 720, 1.0);
        assert_eq!(vp.pixel_ratio(), 1.0);
        assert_eq!(vp.surface_size(), (1280, 720));
    }

    #[test]
    fn zero_sized_window_is_promoted() {
        let vp = Viewport::new(0, 0, 0.0);
        assert_eq!(vp.window_size(), (1, 1));
        assert_eq!(vp.aspect(), 1.0);
        assert_eq!(vp.surface_size(), (1, 1));
    }
}
