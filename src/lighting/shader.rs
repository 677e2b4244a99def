//! GLSL sources for the light overlay and the uniform table they share with
//! the host.

use macroquad::miniquad::{UniformDesc, UniformType};

/// Pass-through vertex shader (forwards texcoords as `TexCoord`)
pub const VERTEX_SHADER: &str = include_str!("shaders/light.vert");

/// Radial falloff fragment shader
pub const FRAGMENT_SHADER: &str = include_str!("shaders/radial_light.frag");

pub const U_LIGHT_POS: &str = "lightPos";
pub const U_RADIUS: &str = "radius";
pub const U_SOFTNESS: &str = "softness";
pub const U_AMBIENT_DARKNESS: &str = "ambientDarkness";
/// Bound every frame but not read by the falloff; kept for screen-space work
pub const U_RESOLUTION: &str = "resolution";

/// Every uniform the fragment shader declares, with its GLSL type.
pub const UNIFORMS: [(&str, UniformType); 5] = [
    (U_LIGHT_POS, UniformType::Float2),
    (U_RADIUS, UniformType::Float1),
    (U_SOFTNESS, UniformType::Float1),
    (U_AMBIENT_DARKNESS, UniformType::Float1),
    (U_RESOLUTION, UniformType::Float2),
];

/// Uniform descriptors in the form `load_material` expects
pub fn uniform_descs() -> Vec<UniformDesc> {
    UNIFORMS
        .iter()
        .map(|(name, ty)| UniformDesc::new(name, *ty))
        .collect()
}
