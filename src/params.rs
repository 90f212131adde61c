//! User-adjustable shader parameters, their defaults and their ranges.
//!
//! Setters clamp into range.

use crate::error::{DemoError, Result};
use crate::hover::DEFAULT_DURATION_MS;

/// Closed interval a parameter is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps `value`, mapping NaN to `min`.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

// -- point cloud ---------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCloudParams {
    displacement: f32,
}

impl PointCloudParams {
    pub const DISPLACEMENT: Range = Range::new(1.0, 10.0);

    pub fn displacement(&self) -> f32 {
        self.displacement
    }

    /// The displacement slider moves in whole steps.
    pub fn set_displacement(&mut self, value: f32) {
        self.displacement = Self::DISPLACEMENT.clamp(value).round();
    }
}

impl Default for PointCloudParams {
    fn default() -> Self {
        Self { displacement: 1.0 }
    }
}

// -- gallery -------------------------------------------------------------------

/// Post effect applied to a plane while the page scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollEffect {
    None,
    #[default]
    RgbShift,
    GrayScale,
    Luminance,
}

impl ScrollEffect {
    /// Value of the `scrollEffect` uniform.
    pub fn uniform(self) -> f32 {
        match self {
            ScrollEffect::None => 0.0,
            ScrollEffect::RgbShift => 1.0,
            ScrollEffect::GrayScale => 2.0,
            ScrollEffect::Luminance => 3.0,
        }
    }
}

impl TryFrom<u32> for ScrollEffect {
    type Error = DemoError;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(ScrollEffect::None),
            1 => Ok(ScrollEffect::RgbShift),
            2 => Ok(ScrollEffect::GrayScale),
            3 => Ok(ScrollEffect::Luminance),
            other => Err(DemoError::UnknownScrollEffect(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryParams {
    pub scroll_effect: ScrollEffect,
    distortion_strength: f32,
    distortion_frequency: f32,
    distortion_speed: f32,
    pub hover_duration_ms: f64,
}

impl GalleryParams {
    pub const DISTORTION_STRENGTH: Range = Range::new(0.0, 0.5);
    pub const DISTORTION_FREQUENCY: Range = Range::new(1.0, 50.0);
    pub const DISTORTION_SPEED: Range = Range::new(1.0, 10.0);

    pub fn distortion_strength(&self) -> f32 {
        self.distortion_strength
    }

    pub fn distortion_frequency(&self) -> f32 {
        self.distortion_frequency
    }

    pub fn distortion_speed(&self) -> f32 {
        self.distortion_speed
    }

    pub fn set_distortion_strength(&mut self, value: f32) {
        self.distortion_strength = Self::DISTORTION_STRENGTH.clamp(value);
    }

    pub fn set_distortion_frequency(&mut self, value: f32) {
        self.distortion_frequency = Self::DISTORTION_FREQUENCY.clamp(value);
    }

    pub fn set_distortion_speed(&mut self, value: f32) {
        self.distortion_speed = Self::DISTORTION_SPEED.clamp(value);
    }
}

impl Default for GalleryParams {
    fn default() -> Self {
        Self {
            scroll_effect: ScrollEffect::default(),
            distortion_strength: 0.05,
            distortion_frequency: 10.0,
            distortion_speed: 2.0,
            hover_duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

// -- pattern -------------------------------------------------------------------

/// Labels of the four `param` components, in uniform order.
pub const PATTERN_PARAM_NAMES: [&str; 4] = [
    "blue-intensity",
    "wave-height",
    "mosaic-scale",
    "rotation-timescale",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternParams {
    time_scale: f32,
    param: [f32; 4],
}

impl PatternParams {
    pub const TIME_SCALE: Range = Range::new(0.0, 2.0);
    pub const PARAM: Range = Range::new(0.0, 5.0);

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn param(&self) -> [f32; 4] {
        self.param
    }

    pub fn set_time_scale(&mut self, value: f32) {
        self.time_scale = Self::TIME_SCALE.clamp(value);
    }

    /// Sets one component of the `param` vector; out-of-bounds indices are
    /// ignored and reported as `false`.
    pub fn set_param(&mut self, index: usize, value: f32) -> bool {
        match self.param.get_mut(index) {
            Some(slot) => {
                *slot = Self::PARAM.clamp(value);
                true
            }
            None => false,
        }
    }

    /// Index of a component by its label.
    pub fn index_of(name: &str) -> Option<usize> {
        PATTERN_PARAM_NAMES.iter().position(|n| *n == name)
    }
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            param: [0.5; 4],
        }
    }
}
