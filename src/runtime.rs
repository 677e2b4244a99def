//! Frame pacing
//!
//! macroquad drives one frame per `next_frame().await`; vsync alone doesn't
//! pin the rate on every platform, so the loop sleeps off the remainder of
//! the frame budget itself.

use macroquad::prelude::get_time;
use serde::{Deserialize, Serialize};

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    /// 30 FPS
    Fps30,
    /// 60 FPS (what the game was tuned for)
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Cycle to next value
    pub fn next(self) -> Self {
        match self {
            FpsLimit::Fps30 => FpsLimit::Fps60,
            FpsLimit::Fps60 => FpsLimit::Unlocked,
            FpsLimit::Unlocked => FpsLimit::Fps30,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// Block until `limit`'s frame budget has elapsed since `frame_start`.
pub fn limit_frame(limit: FpsLimit, frame_start: f64) {
    let Some(target_frame_time) = limit.frame_time() else {
        return;
    };

    if target_frame_time - (get_time() - frame_start) <= 0.0 {
        return;
    }

    // Native: use sleep for bulk, then spin-wait for precision
    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002; // 2ms
        while get_time() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    // WASM: no thread::sleep available
    #[cfg(target_arch = "wasm32")]
    {
        while get_time() - frame_start < target_frame_time {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time() {
        assert_eq!(FpsLimit::Fps60.frame_time(), Some(1.0 / 60.0));
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let start = FpsLimit::default();
        assert_eq!(start, FpsLimit::Fps60);
        assert_eq!(start.next().next().next(), start);
        assert_eq!(FpsLimit::Unlocked.next().label(), "30");
    }
}
