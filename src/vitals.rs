//! Vitals
//!
//! The two resource bars that drive the story and the light:
//! - Influence grows as people are convinced; crossing the critical threshold
//!   is permanent and turns the game toward its second ending
//! - Energy drains over time and ends the game when it runs out

use crate::lighting::LightDrive;

/// Energy lost per second while the player can move
pub const PASSIVE_ENERGY_DRAIN: f32 = 0.5;

/// Drain multiplier once the threshold has been crossed
pub const THRESHOLD_DRAIN_MULTIPLIER: f32 = 2.0;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Energy ran out before influence ever peaked (blue screen)
    Faded,
    /// The threshold was crossed and the light gave out (white screen)
    Awakened,
}

impl Ending {
    pub fn title(&self) -> &'static str {
        match self {
            Ending::Faded => "The light fades",
            Ending::Awakened => "Awake",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Vitals {
    /// Influence percentage (0-100)
    pub influence: f32,
    /// Energy percentage (0-100)
    pub energy: f32,
    /// Influence at which the threshold latches
    pub critical_influence: f32,
    /// Freezes passive drain (during cutscenes and dialogue)
    pub movement_locked: bool,
    threshold_exceeded: bool,
    ending: Option<Ending>,
}

impl Vitals {
    pub fn new(critical_influence: f32) -> Self {
        Self {
            influence: 0.0,
            energy: 100.0,
            critical_influence,
            movement_locked: false,
            threshold_exceeded: false,
            ending: None,
        }
    }

    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    pub fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    /// Add (or remove) influence, latching the threshold when reached.
    // Conversations will move influence; until then only the debug key does
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    pub fn change_influence(&mut self, amount: f32) {
        if self.is_over() {
            return;
        }
        self.influence = (self.influence + amount).clamp(0.0, 100.0);
        if self.influence >= self.critical_influence {
            self.threshold_exceeded = true;
        }
        self.check_endings();
    }

    /// Add (or remove) energy
    pub fn change_energy(&mut self, amount: f32) {
        if self.is_over() {
            return;
        }
        self.energy = (self.energy + amount).clamp(0.0, 100.0);
        self.check_endings();
    }

    /// Passive drain for one frame
    pub fn tick(&mut self, delta_time: f32) {
        if self.is_over() || self.movement_locked {
            return;
        }
        let mut loss = PASSIVE_ENERGY_DRAIN * delta_time;
        if self.threshold_exceeded {
            loss *= THRESHOLD_DRAIN_MULTIPLIER;
        }
        self.change_energy(-loss);
    }

    fn check_endings(&mut self) {
        if self.energy <= 0.0 {
            self.ending = Some(if self.threshold_exceeded { Ending::Awakened } else { Ending::Faded });
        } else if self.threshold_exceeded && self.influence <= 0.0 {
            self.ending = Some(Ending::Awakened);
        }
    }

    pub fn drive(&self) -> LightDrive {
        LightDrive {
            influence: self.influence,
            energy: self.energy,
            threshold_reached: self.threshold_exceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passive_drain() {
        let mut vitals = Vitals::new(87.0);
        vitals.tick(2.0);
        assert!((vitals.energy - 99.0).abs() < 1e-4);
    }

    #[test]
    fn test_locked_movement_stops_drain() {
        let mut vitals = Vitals::new(87.0);
        vitals.movement_locked = true;
        vitals.tick(10.0);
        assert_eq!(vitals.energy, 100.0);
    }

    #[test]
    fn test_threshold_latches_and_doubles_drain() {
        let mut vitals = Vitals::new(87.0);
        vitals.change_influence(90.0);
        assert!(vitals.threshold_exceeded);

        vitals.change_influence(-10.0);
        assert!(vitals.threshold_exceeded);

        vitals.tick(1.0);
        assert!((vitals.energy - 99.0).abs() < 1e-4);
    }

    #[test]
    fn test_faded_ending() {
        let mut vitals = Vitals::new(87.0);
        vitals.change_energy(-150.0);
        assert_eq!(vitals.energy, 0.0);
        assert_eq!(vitals.ending(), Some(Ending::Faded));
    }

    #[test]
    fn test_awakened_ending_on_energy() {
        let mut vitals = Vitals::new(87.0);
        vitals.change_influence(87.0);
        vitals.change_energy(-100.0);
        assert_eq!(vitals.ending(), Some(Ending::Awakened));
    }

    #[test]
    fn test_awakened_ending_on_influence() {
        let mut vitals = Vitals::new(87.0);
        vitals.change_influence(95.0);
        vitals.change_influence(-95.0);
        assert_eq!(vitals.ending(), Some(Ending::Awakened));
    }

    #[test]
    fn test_frozen_after_ending() {
        let mut vitals = Vitals::new(87.0);
        vitals.change_energy(-100.0);
        vitals.change_energy(50.0);
        vitals.change_influence(10.0);
        assert_eq!(vitals.energy, 0.0);
        assert_eq!(vitals.influence, 0.0);
    }

    #[test]
    fn test_drive_mirrors_state() {
        let mut vitals = Vitals::new(87.0);
        vitals.change_influence(40.0);
        let drive = vitals.drive();
        assert_eq!(drive.influence, 40.0);
        assert_eq!(drive.energy, 100.0);
        assert!(!drive.threshold_reached);
    }
}
