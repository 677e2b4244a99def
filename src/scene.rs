//! Game scene
//!
//! Owns everything that changes frame to frame: the player, the follow
//! camera, the vitals and the light rig. Drawing is split into the world
//! (under the light overlay) and the HUD (over it), so the resource bars
//! stay readable in the dark.

use macroquad::prelude::*;

use crate::camera::FollowCamera;
use crate::config::{GameConfig, DESIGN_WIDTH};
use crate::lighting::{LightParams, LightRig};
use crate::vitals::{Ending, Vitals};

/// Floor tile edge length in world pixels
pub const TILE_SIZE: f32 = 64.0;

/// Player walk speed at design resolution (pixels per second)
pub const PLAYER_SPEED: f32 = 200.0;

/// Influence added per press of the debug key
pub const INFLUENCE_BOOST: f32 = 10.0;

/// Player marker size
const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 64.0);

const FLOOR_DARK: Color = Color::new(0.16, 0.15, 0.18, 1.0);
const FLOOR_LIGHT: Color = Color::new(0.22, 0.21, 0.25, 1.0);
const PILLAR: Color = Color::new(0.42, 0.38, 0.33, 1.0);
const PLAYER_COLOR: Color = Color::new(0.85, 0.82, 0.72, 1.0);

const BAR_BACKGROUND: Color = Color::new(0.1, 0.1, 0.1, 0.8);
const INFLUENCE_DIM: Color = Color::new(0.31, 0.12, 0.47, 1.0);
const INFLUENCE_BRIGHT: Color = Color::new(0.71, 0.47, 1.0, 1.0);
const ENERGY_DIM: Color = Color::new(0.55, 0.4, 0.05, 1.0);
const ENERGY_BRIGHT: Color = Color::new(1.0, 0.84, 0.3, 1.0);

/// Unit direction from WASD-style flags (zero when idle or cancelled out)
pub fn movement_direction(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if up {
        dir.y -= 1.0;
    }
    if down {
        dir.y += 1.0;
    }
    if left {
        dir.x -= 1.0;
    }
    if right {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

/// Floor color for a tile, with the odd pillar scattered by a coordinate hash
pub fn tile_color(tx: i32, ty: i32) -> Color {
    let hash = (tx.wrapping_mul(73_856_093) ^ ty.wrapping_mul(19_349_663)) as u32;
    if hash % 23 == 0 {
        PILLAR
    } else if (tx + ty).rem_euclid(2) == 0 {
        FLOOR_DARK
    } else {
        FLOOR_LIGHT
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

pub struct Scene {
    /// Player center in world pixels
    pub player: Vec2,
    pub speed: f32,
    pub camera: FollowCamera,
    pub vitals: Vitals,
    pub rig: LightRig,
}

impl Scene {
    pub fn new(config: &GameConfig, screen_width: f32, screen_height: f32) -> Self {
        let mut camera = FollowCamera::new(screen_width, screen_height);
        camera.reset(Vec2::ZERO);

        Self {
            player: Vec2::ZERO,
            speed: PLAYER_SPEED * screen_width / DESIGN_WIDTH as f32,
            camera,
            vitals: Vitals::new(config.lighting.critical_influence),
            rig: LightRig::new(config.lighting.clone(), screen_width, screen_height),
        }
    }

    /// Poll WASD for this frame's movement direction
    pub fn read_input() -> Vec2 {
        movement_direction(
            is_key_down(KeyCode::W),
            is_key_down(KeyCode::S),
            is_key_down(KeyCode::A),
            is_key_down(KeyCode::D),
        )
    }

    pub fn update(&mut self, direction: Vec2, delta_time: f32) {
        if !self.vitals.is_over() && !self.vitals.movement_locked {
            self.player += direction * self.speed * delta_time;
        }

        self.camera.update(self.player, delta_time);
        self.vitals.tick(delta_time);

        let player_on_screen = self.camera.world_to_screen(self.player);
        self.rig.update(player_on_screen, delta_time);
    }

    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.camera.resize(screen_width, screen_height);
        self.camera.reset(self.player);
        self.rig.resize(screen_width, screen_height);
        self.speed = PLAYER_SPEED * screen_width / DESIGN_WIDTH as f32;
    }

    /// Debug shortcut for the influence path (threshold, growing light,
    /// second ending) while no conversations ship
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    pub fn boost_influence(&mut self) {
        self.vitals.change_influence(INFLUENCE_BOOST);
    }

    /// Light uniforms for this frame
    pub fn light_params(&self) -> LightParams {
        self.rig.params(&self.vitals.drive())
    }

    pub fn ending(&self) -> Option<Ending> {
        self.vitals.ending()
    }

    /// Floor and player (everything the light overlay darkens)
    pub fn draw_world(&self) {
        let view = self.camera.visible_world_rect();
        let first_x = (view.x / TILE_SIZE).floor() as i32;
        let first_y = (view.y / TILE_SIZE).floor() as i32;
        let last_x = ((view.x + view.w) / TILE_SIZE).ceil() as i32;
        let last_y = ((view.y + view.h) / TILE_SIZE).ceil() as i32;

        for ty in first_y..=last_y {
            for tx in first_x..=last_x {
                let world = vec2(tx as f32 * TILE_SIZE, ty as f32 * TILE_SIZE);
                let screen = self.camera.world_to_screen(world);
                draw_rectangle(screen.x, screen.y, TILE_SIZE, TILE_SIZE, tile_color(tx, ty));
            }
        }

        let player = self.camera.world_to_screen(self.player) - PLAYER_SIZE * 0.5;
        draw_rectangle(player.x, player.y, PLAYER_SIZE.x, PLAYER_SIZE.y, PLAYER_COLOR);
    }

    /// Influence and energy bars, top-left
    pub fn draw_hud(&self, scale: f32) {
        let x = 20.0 * scale;
        let bar_width = 200.0 * scale;
        let bar_height = 16.0 * scale;
        let font_size = 20.0 * scale;
        let gap = 34.0 * scale;

        let influence_y = 20.0 * scale + font_size;
        draw_bar(x, influence_y, bar_width, bar_height, self.vitals.influence, INFLUENCE_DIM, INFLUENCE_BRIGHT);
        draw_text("Influence", x, influence_y - 4.0 * scale, font_size, WHITE);

        let energy_y = influence_y + bar_height + gap;
        draw_bar(x, energy_y, bar_width, bar_height, self.vitals.energy, ENERGY_DIM, ENERGY_BRIGHT);
        draw_text("Energy", x, energy_y - 4.0 * scale, font_size, WHITE);
    }
}

/// Percentage bar with a left-to-right gradient fill
fn draw_bar(x: f32, y: f32, width: f32, height: f32, percent: f32, dim: Color, bright: Color) {
    draw_rectangle(x, y, width, height, BAR_BACKGROUND);

    let fill = (percent / 100.0).clamp(0.0, 1.0) * width;
    let columns = fill.ceil() as i32;
    for i in 0..columns {
        let t = i as f32 / width.max(1.0);
        draw_rectangle(x + i as f32, y, 1.0, height, lerp_color(dim, bright, t));
    }

    draw_rectangle_lines(x, y, width, height, 1.0, WHITE);
    let label = format!("{}%", percent as i32);
    draw_text(&label, x + width + 8.0, y + height - 2.0, height * 1.2, WHITE);
}

/// Full-screen ending card
pub fn draw_ending(ending: Ending, screen_width: f32, screen_height: f32) {
    let (background, text_color) = match ending {
        Ending::Faded => (Color::new(0.05, 0.1, 0.35, 1.0), WHITE),
        Ending::Awakened => (WHITE, BLACK),
    };
    clear_background(background);

    let title = ending.title();
    let size = 48.0;
    let dims = measure_text(title, None, size as u16, 1.0);
    draw_text(
        title,
        (screen_width - dims.width) * 0.5,
        screen_height * 0.5,
        size,
        text_color,
    );

    let hint = "Press Escape to quit";
    let hint_dims = measure_text(hint, None, 20, 1.0);
    draw_text(hint, (screen_width - hint_dims.width) * 0.5, screen_height * 0.5 + 40.0, 20.0, text_color);
}

/// FPS counter, top-right (mirrors the limit setting next to it)
pub fn draw_fps(label: &str, screen_width: f32) {
    let text = format!("FPS: {} ({})", get_fps(), label);
    let dims = measure_text(&text, None, 20, 1.0);
    draw_text(&text, screen_width - dims.width - 10.0, 24.0, 20.0, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_is_normalized() {
        let dir = movement_direction(true, false, false, true);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        assert_eq!(movement_direction(true, true, false, false), Vec2::ZERO);
        assert_eq!(movement_direction(false, false, true, true), Vec2::ZERO);
    }

    #[test]
    fn test_tile_pattern_alternates() {
        let a = tile_color(0, 0);
        let b = tile_color(1, 0);
        if a != PILLAR && b != PILLAR {
            assert_ne!(a, b);
        }
        // Negative coordinates keep the checkerboard
        let c = tile_color(-3, 0);
        if c != PILLAR {
            assert!(c == FLOOR_DARK || c == FLOOR_LIGHT);
        }
    }

    #[test]
    fn test_scene_moves_player_and_light() {
        let config = GameConfig::default();
        let mut scene = Scene::new(&config, 1020.0, 620.0);
        for _ in 0..60 {
            scene.update(vec2(1.0, 0.0), 1.0 / 60.0);
        }
        assert!((scene.player.x - PLAYER_SPEED).abs() < 1e-2);

        let params = scene.light_params();
        let player_on_screen = scene.camera.world_to_screen(scene.player);
        assert!(params.light_pos.distance(player_on_screen) < 5.0);
        assert!(scene.vitals.energy < 100.0);
    }

    #[test]
    fn test_no_movement_after_ending() {
        let config = GameConfig::default();
        let mut scene = Scene::new(&config, 1020.0, 620.0);
        scene.vitals.change_energy(-100.0);
        scene.update(vec2(1.0, 0.0), 1.0);
        assert_eq!(scene.player, Vec2::ZERO);
        assert_eq!(scene.ending(), Some(Ending::Faded));
    }

    #[test]
    fn test_influence_boost_reaches_second_ending() {
        let config = GameConfig::default();
        let mut scene = Scene::new(&config, 1020.0, 620.0);
        let dim = scene.light_params().radius;

        for _ in 0..5 {
            scene.boost_influence();
        }
        assert!(scene.light_params().radius > dim);
        assert!(!scene.vitals.drive().threshold_reached);

        for _ in 0..4 {
            scene.boost_influence();
        }
        assert!(scene.vitals.drive().threshold_reached);

        // Doubled drain empties the remaining energy in 100 seconds
        for _ in 0..101 {
            scene.update(Vec2::ZERO, 1.0);
        }
        assert_eq!(scene.ending(), Some(Ending::Awakened));
    }
}
