//! Lighting
//!
//! The whole scene is drawn in the dark except for one soft circle of light
//! around the player. That circle is a full-screen black overlay whose alpha
//! is computed per pixel by a GLSL fragment shader:
//! - `shader`: GLSL sources and the uniform table
//! - `falloff`: the same falloff on the CPU, used by tests and the fallback
//! - `overlay`: the macroquad material that binds uniforms and draws
//! - `rig`: per-frame light position and radius

pub mod falloff;
pub mod overlay;
pub mod rig;
pub mod shader;

pub use falloff::LightParams;
pub use overlay::{draw_fallback, LightOverlay};
pub use rig::{LightDrive, LightRig};

/// Error type for the light overlay
#[derive(Debug, Clone, PartialEq)]
pub enum LightError {
    /// The GLSL pair failed to compile or link
    Compile(String),
}

impl std::fmt::Display for LightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LightError::Compile(msg) => write!(f, "light shader compile error: {}", msg),
        }
    }
}

impl std::error::Error for LightError {}
