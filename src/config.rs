//! Game configuration
//!
//! Uses RON (Rusty Object Notation) for a human-editable settings file.
//! Missing fields take their defaults, so an empty `()` is a valid config.
//! Natively the file lives at `<config_dir>/awaking/config.ron`; on WASM the
//! defaults are always used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::runtime::FpsLimit;

/// Design resolution the HUD and walk speed are tuned for
pub const DESIGN_WIDTH: i32 = 1020;
pub const DESIGN_HEIGHT: i32 = 620;

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DESIGN_WIDTH,
            height: DESIGN_HEIGHT,
            fullscreen: false,
        }
    }
}

/// Light overlay and light rig settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Full light radius as a fraction of the viewport's short side
    pub radius_fraction: f32,
    /// Fraction of the radius used for the soft edge (0-1)
    pub softness: f32,
    /// Overlay alpha outside the light (0-1)
    pub ambient_darkness: f32,
    /// Wobble amplitude in pixels
    pub wobble_amount: f32,
    /// Wobble clock rate
    pub wobble_speed: f32,
    /// Chance per frame to re-roll the flicker offset (0-1)
    pub jitter_chance: f32,
    /// Max flicker offset in pixels
    pub jitter_amount: f32,
    /// Influence percentage at which the light flips to energy-driven
    pub critical_influence: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            radius_fraction: 0.35,
            softness: 0.5,
            // 10/255 of the scene stays visible outside the light
            ambient_darkness: 245.0 / 255.0,
            wobble_amount: 2.0,
            wobble_speed: 0.05,
            jitter_chance: 0.3,
            jitter_amount: 0.5,
            critical_influence: 87.0,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub lighting: LightingConfig,
    pub show_fps: bool,
    pub fps_limit: FpsLimit,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            lighting: LightingConfig::default(),
            show_fps: true,
            fps_limit: FpsLimit::default(),
        }
    }
}

fn check_unit(name: &str, value: f32) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be within 0..=1, got {}", name, value));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f32) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must be a non-negative number, got {}", name, value));
    }
    Ok(())
}

impl GameConfig {
    /// Reject values the lighting model can't represent
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_inner().map_err(ConfigError::ValidationError)
    }

    fn validate_inner(&self) -> Result<(), String> {
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        let l = &self.lighting;
        if !l.radius_fraction.is_finite() || l.radius_fraction <= 0.0 {
            return Err(format!("radius_fraction must be positive, got {}", l.radius_fraction));
        }
        check_unit("softness", l.softness)?;
        check_unit("ambient_darkness", l.ambient_darkness)?;
        check_unit("jitter_chance", l.jitter_chance)?;
        check_non_negative("wobble_amount", l.wobble_amount)?;
        check_non_negative("wobble_speed", l.wobble_speed)?;
        check_non_negative("jitter_amount", l.jitter_amount)?;
        if !l.critical_influence.is_finite() || l.critical_influence <= 0.0 || l.critical_influence > 100.0 {
            return Err(format!(
                "critical_influence must be within (0, 100], got {}",
                l.critical_influence
            ));
        }
        Ok(())
    }
}

/// Default config file location (native only)
pub fn config_path() -> Option<PathBuf> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        dirs::config_dir().map(|dir| dir.join("awaking").join("config.ron"))
    }
    #[cfg(target_arch = "wasm32")]
    {
        None
    }
}

/// Load config from a RON string
pub fn load_config_from_str(s: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Load config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path.as_ref())?;
    load_config_from_str(&contents)
}

/// Save config to a RON file, creating the parent directory if needed
pub fn save_config<P: AsRef<Path>>(config: &GameConfig, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());
    let ron_string = ron::ser::to_string_pretty(config, pretty)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, ron_string)?;
    Ok(())
}

/// Load the config at `path`, falling back to defaults.
///
/// A missing file is normal on first run; anything else is logged.
pub fn load_or_default(path: Option<&Path>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };

    match load_config(path) {
        Ok(config) => {
            println!("Loaded config from {}", path.display());
            config
        }
        Err(ConfigError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => GameConfig::default(),
        Err(e) => {
            eprintln!("Failed to load config {}: {}, using defaults", path.display(), e);
            GameConfig::default()
        }
    }
}

/// Window settings for window creation, without logging.
///
/// The window is configured before `main` runs, so load problems are left
/// for the `load_or_default` call there to report once.
pub fn window_settings(path: Option<&Path>) -> WindowConfig {
    path.and_then(|path| load_config(path).ok())
        .map(|config| config.window)
        .unwrap_or_default()
}

/// Write the config back to `path`, logging the outcome.
///
/// Called on every way out of the game loop (Escape or the window's close
/// button) so toggled settings survive to the next run.
pub fn save_on_exit(config: &GameConfig, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };

    match save_config(config, path) {
        Ok(()) => println!("Saved config to {}", path.display()),
        Err(e) => eprintln!("Failed to save config {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("()").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = load_config_from_str("(lighting: (softness: 0.0), show_fps: false)").unwrap();
        assert_eq!(config.lighting.softness, 0.0);
        assert_eq!(config.lighting.radius_fraction, 0.35);
        assert!(!config.show_fps);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_darkness() {
        let err = load_config_from_str("(lighting: (ambient_darkness: 1.5))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_bad_window() {
        let err = load_config_from_str("(window: (width: 0))").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = load_config_from_str("(lighting: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ron");

        let mut config = GameConfig::default();
        config.lighting.ambient_darkness = 0.8;
        config.fps_limit = FpsLimit::Fps30;

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.ron");
        assert_eq!(load_or_default(Some(path.as_path())), GameConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(lighting: (softness: -1.0))").unwrap();
        assert_eq!(load_or_default(Some(path.as_path())), GameConfig::default());
    }

    #[test]
    fn test_save_on_exit_keeps_toggles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("awaking").join("config.ron");

        let mut config = GameConfig::default();
        config.show_fps = false;
        config.fps_limit = FpsLimit::Unlocked;
        save_on_exit(&config, Some(path.as_path()));

        assert_eq!(load_or_default(Some(path.as_path())), config);
    }

    #[test]
    fn test_save_on_exit_without_path() {
        // WASM has no config path; nothing to write and nothing to fail
        save_on_exit(&GameConfig::default(), None);
    }

    #[test]
    fn test_save_on_exit_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("config.ron");

        save_on_exit(&GameConfig::default(), Some(path.as_path()));
        assert!(!path.exists());
    }

    #[test]
    fn test_window_settings_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(window: (width: 1280, height: 720, fullscreen: true))").unwrap();

        let window = window_settings(Some(path.as_path()));
        assert_eq!(window.width, 1280);
        assert_eq!(window.height, 720);
        assert!(window.fullscreen);
    }

    #[test]
    fn test_window_settings_fall_back_quietly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(window: (width: -5))").unwrap();

        assert_eq!(window_settings(Some(path.as_path())), WindowConfig::default());
        assert_eq!(window_settings(None), WindowConfig::default());
    }
}
