//! Perspective camera that maps one world unit to one CSS pixel on the
//! `z = 0` plane, so DOM-sized meshes line up with their elements.

use glam::{Mat4, Vec2, Vec3};

pub const FOV_DEGREES: f32 = 60.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 10000.0;

/// Distance at which a viewport of `viewport_height` units exactly fills a
/// vertical field of view of `fov_degrees`.
pub fn viewport_distance(viewport_height: f32, fov_degrees: f32) -> f32 {
    let half_fov = fov_degrees.to_radians() / 2.0;
    (viewport_height / 2.0) / half_fov.tan()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: FOV_DEGREES,
            near: NEAR,
            far: FAR,
            aspect: 1.0,
            distance: 0.0,
        }
    }
}

impl Camera {
    /// Recomputes aspect and distance for a `width` x `height` viewport.
    pub fn fit(&mut self, width: f32, height: f32) {
        self.aspect = if height > 0.0 { width / height } else { 1.0 };
        self.distance = viewport_distance(height, self.fov);
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Projection * view * model. Order matters.
    pub fn mvp(&self, model: Mat4) -> Mat4 {
        self.view_projection() * model
    }
}

/// Model matrix for a unit plane scaled to `size` pixels and moved to
/// `translation`: translate * scale.
pub fn plane_model(size: Vec2, translation: Vec3) -> Mat4 {
    Mat4::from_translation(translation) * Mat4::from_scale(size.extend(1.0))
}

/// World-space centre of a plane that covers a DOM element.
///
/// `offset` is the element's offset from the document's top-left corner and
/// `scroll` the current vertical page scroll; the canvas itself is fixed to
/// the viewport.
pub fn plane_translation(viewport: Vec2, size: Vec2, offset: Vec2, scroll: f32) -> Vec3 {
    let origin_x = -viewport.x / 2.0 + size.x / 2.0;
    let origin_y = viewport.y / 2.0 - size.y / 2.0;
    Vec3::new(origin_x + offset.x, origin_y - offset.y + scroll, 0.0)
}
