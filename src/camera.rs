//! Follow Camera
//!
//! 2D camera with a dead zone: the player moves freely inside a small
//! centered rectangle, and the camera only starts to follow once they leave
//! it. Following is smoothed with a frame-rate independent lerp.

use macroquad::prelude::*;

/// Default dead zone size as a fraction of the viewport
pub const DEFAULT_DEAD_ZONE: f32 = 0.1;

/// Default follow rate (per second)
pub const DEFAULT_SMOOTHING: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct FollowCamera {
    pub width: f32,
    pub height: f32,
    /// World position of the viewport's top-left corner
    pub offset: Vec2,
    pub smoothing: f32,
    dead_zone_fraction: f32,
    dead_zone: Rect,
}

fn dead_zone_rect(width: f32, height: f32, fraction: f32) -> Rect {
    let w = width * fraction;
    let h = height * fraction;
    Rect::new((width - w) * 0.5, (height - h) * 0.5, w, h)
}

impl FollowCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_dead_zone(width, height, DEFAULT_DEAD_ZONE)
    }

    pub fn with_dead_zone(width: f32, height: f32, dead_zone_fraction: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
            smoothing: DEFAULT_SMOOTHING,
            dead_zone_fraction,
            dead_zone: dead_zone_rect(width, height, dead_zone_fraction),
        }
    }

    /// Dead zone in screen space
    #[cfg(test)]
    pub fn dead_zone(&self) -> Rect {
        self.dead_zone
    }

    /// Ease toward keeping `target` (world space) inside the dead zone.
    pub fn update(&mut self, target: Vec2, delta_time: f32) {
        let screen = target - self.offset;
        let zone = self.dead_zone;
        let mut desired = self.offset;

        if screen.x < zone.left() {
            desired.x = target.x - zone.left();
        } else if screen.x > zone.right() {
            desired.x = target.x - zone.right();
        }

        if screen.y < zone.top() {
            desired.y = target.y - zone.top();
        } else if screen.y > zone.bottom() {
            desired.y = target.y - zone.bottom();
        }

        let t = (self.smoothing * delta_time).min(1.0);
        self.offset = self.offset.lerp(desired, t);
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.offset
    }

    /// World-space rectangle currently on screen
    pub fn visible_world_rect(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.width, self.height)
    }

    /// Snap so `center` (world space) is in the middle of the screen
    pub fn reset(&mut self, center: Vec2) {
        self.offset = center - vec2(self.width * 0.5, self.height * 0.5);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.dead_zone = dead_zone_rect(width, height, self.dead_zone_fraction);
    }
}
