//! Light Overlay
//!
//! Owns the compiled light material and draws it as one full-screen quad
//! after the scene. The quad is black with per-pixel alpha from the fragment
//! shader, composited with standard alpha blending.

use macroquad::material::{gl_use_default_material, gl_use_material, load_material, Material, MaterialParams};
use macroquad::miniquad::{BlendFactor, BlendState, BlendValue, Equation, PipelineParams, ShaderSource};
use macroquad::prelude::*;

use super::falloff::{overlay_color, LightParams};
use super::shader::{
    uniform_descs, FRAGMENT_SHADER, U_AMBIENT_DARKNESS, U_LIGHT_POS, U_RADIUS, U_RESOLUTION,
    U_SOFTNESS, VERTEX_SHADER,
};
use super::LightError;

/// Convert a screen position (origin top-left, y down) to the fragment
/// coordinate space the shader sees through `gl_FragCoord` (origin
/// bottom-left, y up).
pub fn to_fragment_space(screen_pos: Vec2, screen_height: f32) -> Vec2 {
    vec2(screen_pos.x, screen_height - screen_pos.y)
}

pub struct LightOverlay {
    material: Material,
}

impl LightOverlay {
    /// Compile the overlay material. Needs a live GL context.
    pub fn new() -> Result<Self, LightError> {
        let pipeline_params = PipelineParams {
            color_blend: Some(BlendState::new(
                Equation::Add,
                BlendFactor::Value(BlendValue::SourceAlpha),
                BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
            )),
            ..Default::default()
        };

        let material = load_material(
            ShaderSource::Glsl {
                vertex: VERTEX_SHADER,
                fragment: FRAGMENT_SHADER,
            },
            MaterialParams {
                pipeline_params,
                uniforms: uniform_descs(),
                ..Default::default()
            },
        )
        .map_err(|e| LightError::Compile(e.to_string()))?;

        Ok(Self { material })
    }

    /// Bind `params` and draw the overlay across a `resolution`-sized screen.
    pub fn draw(&self, params: &LightParams, resolution: Vec2) {
        let params = params.clamped();

        self.material.set_uniform(U_LIGHT_POS, to_fragment_space(params.light_pos, resolution.y));
        self.material.set_uniform(U_RADIUS, params.radius);
        self.material.set_uniform(U_SOFTNESS, params.softness);
        self.material.set_uniform(U_AMBIENT_DARKNESS, params.ambient_darkness);
        self.material.set_uniform(U_RESOLUTION, resolution);

        gl_use_material(&self.material);
        draw_rectangle(0.0, 0.0, resolution.x, resolution.y, WHITE);
        gl_use_default_material();
    }
}

/// Cell size for the CPU fallback overlay (pixels)
const FALLBACK_CELL: f32 = 16.0;

/// Coarse CPU rendition of the overlay, used when the material failed to
/// compile. Each cell takes the falloff value at its center.
pub fn draw_fallback(params: &LightParams, resolution: Vec2) {
    let params = params.clamped();
    let columns = (resolution.x / FALLBACK_CELL).ceil() as i32;
    let rows = (resolution.y / FALLBACK_CELL).ceil() as i32;

    for row in 0..rows {
        for col in 0..columns {
            let x = col as f32 * FALLBACK_CELL;
            let y = row as f32 * FALLBACK_CELL;
            let center = vec2(x, y) + Vec2::splat(FALLBACK_CELL * 0.5);
            draw_rectangle(x, y, FALLBACK_CELL, FALLBACK_CELL, overlay_color(&params, center));
        }
    }
}
