//! Image-to-point-cloud sampling for the point cloud lesson.

use crate::error::{DemoError, Result};

/// Pixels skipped between samples, in both directions.
pub const SAMPLE_STEP: usize = 3;
pub const POINT_SIZE: f32 = 2.0;
/// Floats per vertex for position, color and size.
pub const STRIDE: [i32; 3] = [3, 4, 1];
/// The time uniform is refreshed once every this many frames.
pub const TIME_REFRESH_INTERVAL: u32 = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub position: Vec<f32>,
    pub color: Vec<f32>,
    pub size: Vec<f32>,
}

impl PointCloud {
    /// Samples an RGBA8 buffer into clip-space points, one every
    /// [`SAMPLE_STEP`] pixels. Row 0 of the image ends up at the top.
    pub fn from_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Self> {
        let (w, h) = (width as usize, height as usize);
        let expected = w * h * 4;
        if pixels.len() != expected {
            return Err(DemoError::InvalidImage {
                width,
                height,
                len: pixels.len(),
                expected,
            });
        }

        let samples = h.div_ceil(SAMPLE_STEP) * w.div_ceil(SAMPLE_STEP);
        let mut cloud = PointCloud {
            position: Vec::with_capacity(samples * 3),
            color: Vec::with_capacity(samples * 4),
            size: Vec::with_capacity(samples),
        };

        for i in (0..h).step_by(SAMPLE_STEP) {
            let y = (i as f32 / h as f32) * 2.0 - 1.0;
            for j in (0..w).step_by(SAMPLE_STEP) {
                let x = (j as f32 / w as f32) * 2.0 - 1.0;
                let index = (i * w + j) * 4;
                let rgb = &pixels[index..index + 3];

                cloud.position.extend_from_slice(&[x, -y, 0.0]);
                cloud.color.extend_from_slice(&[
                    f32::from(rgb[0]) / 255.0,
                    f32::from(rgb[1]) / 255.0,
                    f32::from(rgb[2]) / 255.0,
                    1.0,
                ]);
                cloud.size.push(POINT_SIZE);
            }
        }
        Ok(cloud)
    }

    pub fn vertex_count(&self) -> usize {
        self.position.len() / STRIDE[0] as usize
    }
}

/// Placement `(x, y, side)` of the source image, drawn as a square half the
/// canvas width wide and centred in the canvas.
pub fn centered_square(canvas_width: f64, canvas_height: f64) -> (f64, f64, f64) {
    let side = canvas_width / 2.0;
    ((canvas_width - side) / 2.0, (canvas_height - side) / 2.0, side)
}

/// Maps a page-space pointer position to `[-1, 1]` on both axes, Y up.
pub fn signed_pointer(page_x: f64, page_y: f64, width: f64, height: f64) -> [f32; 2] {
    if width <= 0.0 || height <= 0.0 {
        return [0.0, 0.0];
    }
    let x = page_x / width * 2.0 - 1.0;
    let y = page_y / height * 2.0 - 1.0;
    [x as f32, -y as f32]
}

/// Frame counter feeding the `frame` and `time` uniforms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    frame: u32,
    time: f32,
}

impl FrameClock {
    /// Advances one frame and returns `(time, frame)` for this draw.
    pub fn tick(&mut self, now_ms: f64) -> (f32, u32) {
        if self.frame % TIME_REFRESH_INTERVAL == 0 {
            self.time = now_ms as f32;
        }
        let current = (self.time, self.frame);
        self.frame = self.frame.wrapping_add(1);
        current
    }
}
