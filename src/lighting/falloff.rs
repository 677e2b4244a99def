//! Radial Falloff
//!
//! CPU mirror of `shaders/radial_light.frag`. The overlay itself is shaded on
//! the GPU; these functions compute the exact same value for a single pixel so
//! the lighting model can be checked without a graphics context.
//!
//! Model:
//! - Inside `radius * (1 - softness)` the scene is fully visible (alpha 0)
//! - Beyond `radius` the overlay settles at `ambient_darkness`
//! - In between, a Hermite smooth step blends the two

use macroquad::prelude::{Color, Vec2};

/// Smallest radius the host will ever bind
pub const MIN_RADIUS: f32 = 0.001;

/// Uniform values for one draw of the light overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    /// Light center in screen pixels (y down, like the rest of the host)
    pub light_pos: Vec2,
    /// Full illumination radius in pixels
    pub radius: f32,
    /// Fraction of the radius used for the soft edge (0 = hard edge)
    pub softness: f32,
    /// Overlay alpha outside the light (0 = no darkening, 1 = black)
    pub ambient_darkness: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            light_pos: Vec2::ZERO,
            radius: 200.0,
            softness: 0.5,
            ambient_darkness: 0.96,
        }
    }
}

impl LightParams {
    pub fn new(light_pos: Vec2, radius: f32, softness: f32, ambient_darkness: f32) -> Self {
        Self { light_pos, radius, softness, ambient_darkness }
    }

    /// Copy with every field forced into its valid range.
    ///
    /// Non-finite inputs fall back to the defaults so a bad frame never
    /// reaches the GPU as NaN.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let light_pos = if self.light_pos.is_finite() { self.light_pos } else { defaults.light_pos };
        let radius = if self.radius.is_finite() { self.radius.max(MIN_RADIUS) } else { defaults.radius };
        let softness = if self.softness.is_finite() { self.softness.clamp(0.0, 1.0) } else { defaults.softness };
        let ambient_darkness = if self.ambient_darkness.is_finite() {
            self.ambient_darkness.clamp(0.0, 1.0)
        } else {
            defaults.ambient_darkness
        };
        Self { light_pos, radius, softness, ambient_darkness }
    }

    /// Distance at which the falloff starts
    pub fn inner_radius(&self) -> f32 {
        self.radius * (1.0 - self.softness)
    }
}

/// GLSL `smoothstep`, with the empty band (`edge0 >= edge1`) treated as a
/// step at `edge1` instead of being undefined.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 >= edge1 {
        return if x < edge1 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Light intensity at `dist` from the center: 1 in the core, 0 past the radius.
pub fn light_intensity(params: &LightParams, dist: f32) -> f32 {
    1.0 - smoothstep(params.inner_radius(), params.radius, dist)
}

/// Overlay alpha for a pixel.
pub fn overlay_alpha(params: &LightParams, pixel: Vec2) -> f32 {
    let dist = pixel.distance(params.light_pos);
    let intensity = light_intensity(params, dist);
    let ambient = 1.0 - params.ambient_darkness;
    let light = ambient + intensity * (1.0 - ambient);
    (1.0 - light).clamp(0.0, 1.0)
}

/// Full overlay color for a pixel (always black, only alpha varies)
pub fn overlay_color(params: &LightParams, pixel: Vec2) -> Color {
    Color::new(0.0, 0.0, 0.0, overlay_alpha(params, pixel))
}
