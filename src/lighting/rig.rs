//! Light Rig
//!
//! Decides where the light sits and how large it is each frame. The light
//! follows the player's screen position with a slow wobble and a small
//! flicker, and its radius tracks the player's resource bars:
//! - Before the critical threshold, radius grows from half size to full size
//!   as influence rises
//! - After it, radius shrinks with the remaining energy

use macroquad::prelude::*;

use super::falloff::LightParams;
use crate::config::LightingConfig;

/// Smallest radius the light ever shrinks to (pixels)
const MIN_LIGHT_RADIUS: f32 = 10.0;

/// Pre-threshold radius starts at this fraction of the base radius
const MIN_RADIUS_FRACTION: f32 = 0.5;

/// Curve exponent for influence growth (fast early, slow near the threshold)
const INFLUENCE_CURVE: f32 = 0.7;

/// Wobble frequencies on each axis
const WOBBLE_FREQ_X: f32 = 5.2;
const WOBBLE_FREQ_Y: f32 = 4.7;

/// What the resource bars tell the light this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDrive {
    /// Influence percentage (0-100)
    pub influence: f32,
    /// Energy percentage (0-100)
    pub energy: f32,
    /// Whether the critical influence threshold has been crossed
    pub threshold_reached: bool,
}

impl Default for LightDrive {
    fn default() -> Self {
        Self { influence: 0.0, energy: 100.0, threshold_reached: false }
    }
}

pub struct LightRig {
    config: LightingConfig,
    /// Full-size radius for the current viewport
    base_radius: f32,
    /// Light center in screen pixels
    position: Vec2,
    wobble_time: f32,
    jitter: Vec2,
    /// xorshift state for the flicker
    rng_state: u32,
}

impl LightRig {
    pub fn new(config: LightingConfig, screen_width: f32, screen_height: f32) -> Self {
        let base_radius = screen_width.min(screen_height) * config.radius_fraction;
        Self {
            config,
            base_radius,
            position: vec2(screen_width * 0.5, screen_height * 0.5),
            wobble_time: 0.0,
            jitter: Vec2::ZERO,
            rng_state: 0x9E37_79B9,
        }
    }

    /// Recompute the base radius for a new viewport size
    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.base_radius = screen_width.min(screen_height) * self.config.radius_fraction;
    }

    /// Fast xorshift PRNG in [0, 1]
    fn next_random(&mut self) -> f32 {
        self.rng_state ^= self.rng_state << 13;
        self.rng_state ^= self.rng_state >> 17;
        self.rng_state ^= self.rng_state << 5;
        (self.rng_state as f32) / (u32::MAX as f32)
    }

    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_random() * (max - min)
    }

    /// Move the light to `target` (screen pixels) plus wobble and flicker.
    pub fn update(&mut self, target: Vec2, delta_time: f32) {
        self.wobble_time += delta_time * self.config.wobble_speed;

        let wobble = vec2(
            (self.wobble_time * WOBBLE_FREQ_X).sin(),
            (self.wobble_time * WOBBLE_FREQ_Y).cos(),
        ) * self.config.wobble_amount;

        if self.next_random() < self.config.jitter_chance {
            let amount = self.config.jitter_amount;
            self.jitter = vec2(
                self.random_range(-amount, amount),
                self.random_range(-amount, amount),
            );
        }

        self.position = target + wobble + self.jitter;
    }

    /// Radius for the given resource state.
    pub fn radius_for(&self, drive: &LightDrive) -> f32 {
        let max_radius = self.base_radius;
        let min_radius = max_radius * MIN_RADIUS_FRACTION;

        if drive.threshold_reached {
            let energy_factor = (drive.energy / 100.0).clamp(0.0, 1.0);
            (max_radius * energy_factor).max(MIN_LIGHT_RADIUS)
        } else {
            let critical = self.config.critical_influence.max(f32::EPSILON);
            let influence_factor = (drive.influence / critical).clamp(0.0, 1.0);
            min_radius + (max_radius - min_radius) * influence_factor.powf(INFLUENCE_CURVE)
        }
    }

    /// Uniform values for this frame
    pub fn params(&self, drive: &LightDrive) -> LightParams {
        LightParams::new(
            self.position,
            self.radius_for(drive),
            self.config.softness,
            self.config.ambient_darkness,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> LightRig {
        LightRig::new(LightingConfig::default(), 1000.0, 600.0)
    }

    #[test]
    fn test_base_radius_uses_short_side() {
        let rig = rig();
        assert!((rig.base_radius - 600.0 * 0.35).abs() < 1e-3);
    }

    #[test]
    fn test_influence_curve_endpoints() {
        let rig = rig();
        let base = rig.base_radius;

        let empty = rig.radius_for(&LightDrive { influence: 0.0, energy: 100.0, threshold_reached: false });
        assert!((empty - base * 0.5).abs() < 1e-3);

        let full = rig.radius_for(&LightDrive { influence: 87.0, energy: 100.0, threshold_reached: false });
        assert!((full - base).abs() < 1e-3);

        let over = rig.radius_for(&LightDrive { influence: 100.0, energy: 100.0, threshold_reached: false });
        assert!((over - base).abs() < 1e-3);
    }

    #[test]
    fn test_influence_grows_radius() {
        let rig = rig();
        let mut prev = 0.0;
        for influence in [0.0, 10.0, 30.0, 60.0, 87.0] {
            let r = rig.radius_for(&LightDrive { influence, energy: 100.0, threshold_reached: false });
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn test_energy_shrinks_radius_after_threshold() {
        let rig = rig();
        let base = rig.base_radius;

        let full = rig.radius_for(&LightDrive { influence: 90.0, energy: 100.0, threshold_reached: true });
        assert!((full - base).abs() < 1e-3);

        let half = rig.radius_for(&LightDrive { influence: 90.0, energy: 50.0, threshold_reached: true });
        assert!((half - base * 0.5).abs() < 1e-3);

        let empty = rig.radius_for(&LightDrive { influence: 90.0, energy: 0.0, threshold_reached: true });
        assert_eq!(empty, MIN_LIGHT_RADIUS);
    }

    #[test]
    fn test_follow_stays_near_target() {
        let mut rig = rig();
        let config = LightingConfig::default();
        let bound = config.wobble_amount * 2.0_f32.sqrt() + config.jitter_amount * 2.0_f32.sqrt() + 1e-3;
        let target = vec2(320.0, 240.0);
        for _ in 0..600 {
            rig.update(target, 1.0 / 60.0);
            assert!(rig.position.distance(target) <= bound);
        }
    }

    #[test]
    fn test_resize_updates_radius() {
        let mut rig = rig();
        rig.resize(400.0, 800.0);
        assert!((rig.base_radius - 400.0 * 0.35).abs() < 1e-3);
    }

    #[test]
    fn test_params_carry_config() {
        let mut rig = rig();
        rig.update(vec2(50.0, 60.0), 0.0);
        let params = rig.params(&LightDrive::default());
        let config = LightingConfig::default();
        assert_eq!(params.softness, config.softness);
        assert_eq!(params.ambient_darkness, config.ambient_darkness);
        assert!(params.light_pos.distance(vec2(50.0, 60.0)) < 5.0);
    }
}
