//! AWAKING: a five-minute narrative game lit by a single light
//!
//! The world is dark. A soft circle of light follows the player, growing as
//! their influence rises and shrinking once their energy starts to give out.
//! - Radial light overlay drawn by a GLSL fragment shader
//! - Two resource bars (influence, energy) that drive the light
//! - Two endings

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod camera;
mod config;
mod lighting;
mod runtime;
mod scene;
mod vitals;

use macroquad::prelude::*;
use config::{config_path, load_or_default, save_on_exit, window_settings, DESIGN_HEIGHT, DESIGN_WIDTH};
use lighting::{draw_fallback, LightOverlay};
use runtime::limit_frame;
use scene::{draw_ending, draw_fps, Scene};

fn window_conf() -> Conf {
    let window = window_settings(config_path().as_deref());
    Conf {
        window_title: format!("Awaking v{}", VERSION),
        window_width: window.width,
        window_height: window.height,
        window_resizable: true,
        #[cfg(not(target_arch = "wasm32"))]
        fullscreen: window.fullscreen,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let mut config = load_or_default(config_path().as_deref());

    let overlay = match LightOverlay::new() {
        Ok(overlay) => {
            println!("Compiled light overlay shader");
            Some(overlay)
        }
        Err(e) => {
            eprintln!("{}, falling back to flat darkness", e);
            None
        }
    };

    let mut screen_size = vec2(screen_width(), screen_height());
    let mut scene = Scene::new(&config, screen_size.x, screen_size.y);

    println!("=== AWAKING ===");

    // Handle the close button ourselves so the config still gets saved
    prevent_quit();

    loop {
        let frame_start = get_time();

        if is_key_pressed(KeyCode::Escape) || is_quit_requested() {
            break;
        }
        if is_key_pressed(KeyCode::F) {
            config.show_fps = !config.show_fps;
        }
        if is_key_pressed(KeyCode::L) {
            config.fps_limit = config.fps_limit.next();
        }
        #[cfg(debug_assertions)]
        if is_key_pressed(KeyCode::I) {
            scene.boost_influence();
        }

        let current_size = vec2(screen_width(), screen_height());
        if current_size != screen_size {
            screen_size = current_size;
            scene.resize(screen_size.x, screen_size.y);
        }

        let delta = get_frame_time().max(0.001);

        match scene.ending() {
            Some(ending) => draw_ending(ending, screen_size.x, screen_size.y),
            None => {
                scene.update(Scene::read_input(), delta);

                clear_background(BLACK);
                scene.draw_world();

                let params = scene.light_params();
                match &overlay {
                    Some(overlay) => overlay.draw(&params, screen_size),
                    None => draw_fallback(&params, screen_size),
                }

                let scale = (screen_size.x / DESIGN_WIDTH as f32).min(screen_size.y / DESIGN_HEIGHT as f32);
                scene.draw_hud(scale);
            }
        }

        if config.show_fps {
            draw_fps(config.fps_limit.label(), screen_size.x);
        }

        limit_frame(config.fps_limit, frame_start);

        next_frame().await;
    }

    // Keep toggled settings (FPS counter, limit) for the next run
    save_on_exit(&config, config_path().as_deref());
}
