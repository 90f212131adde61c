//! Regular-grid plane mesh.

use crate::error::{DemoError, Result};

/// Vertex attributes of a plane, laid out as flat arrays ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaneGeometry {
    pub position: Vec<f32>,
    pub normal: Vec<f32>,
    pub color: Vec<f32>,
    pub tex_coord: Vec<f32>,
    pub index: Vec<u16>,
}

impl PlaneGeometry {
    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.index.len() / 3
    }
}

/// Builds a `width` x `height` plane on the XY plane, centred on the origin,
/// split into `segments_x` x `segments_y` cells of two triangles each.
///
/// Rows run top to bottom and texture `v` follows them, so `(0, 0)` is the
/// top-left corner. Triangles wind counter-clockwise seen from `+Z`.
pub fn plane_geometry(
    width: f32,
    height: f32,
    color: [f32; 4],
    segments_x: u16,
    segments_y: u16,
) -> Result<PlaneGeometry> {
    if segments_x == 0 || segments_y == 0 {
        return Err(DemoError::Geometry(format!(
            "segment counts must be positive, got {segments_x}x{segments_y}"
        )));
    }
    let columns = usize::from(segments_x) + 1;
    let rows = usize::from(segments_y) + 1;
    let vertex_count = columns * rows;
    if vertex_count > usize::from(u16::MAX) + 1 {
        return Err(DemoError::Geometry(format!(
            "{vertex_count} vertices exceed 16-bit indices"
        )));
    }

    let half_w = width / 2.0;
    let half_h = height / 2.0;
    let mut geometry = PlaneGeometry {
        position: Vec::with_capacity(vertex_count * 3),
        normal: Vec::with_capacity(vertex_count * 3),
        color: Vec::with_capacity(vertex_count * 4),
        tex_coord: Vec::with_capacity(vertex_count * 2),
        index: Vec::with_capacity(usize::from(segments_x) * usize::from(segments_y) * 6),
    };

    for i in 0..rows {
        let v = i as f32 / f32::from(segments_y);
        let y = half_h - v * height;
        for j in 0..columns {
            let u = j as f32 / f32::from(segments_x);
            let x = -half_w + u * width;
            geometry.position.extend_from_slice(&[x, y, 0.0]);
            geometry.normal.extend_from_slice(&[0.0, 0.0, 1.0]);
            geometry.color.extend_from_slice(&color);
            geometry.tex_coord.extend_from_slice(&[u, v]);
        }
    }

    let stride = segments_x + 1;
    for i in 0..segments_y {
        let k = i * stride;
        let l = (i + 1) * stride;
        for j in 0..segments_x {
            let (i0, i1, i2, i3) = (k + j, k + j + 1, l + j, l + j + 1);
            geometry.index.extend_from_slice(&[i0, i2, i1]);
            geometry.index.extend_from_slice(&[i1, i2, i3]);
        }
    }

    Ok(geometry)
}
