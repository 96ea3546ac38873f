//! Engine tunables.
//!
//! Loaded from JSON the same way the content bundle used to be: every field is
//! optional and falls back to the default below.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

pub const DEFAULT_GRAVITY: f32 = 0.5;
pub const DEFAULT_BOUNCE: f32 = 0.7;
pub const DEFAULT_FRICTION: f32 = 0.99;
pub const DEFAULT_AIR_DRAG: f32 = 0.995;
pub const DEFAULT_MAGNET_STRENGTH: f32 = 50.0;
pub const DEFAULT_MAGNET_SOFTENING: f32 = 0.0;
pub const DEFAULT_ANGULAR_DRAG: f32 = 0.98;
pub const DEFAULT_WALL_SPIN: f32 = -0.5;
pub const DEFAULT_COLLISION_TORQUE: f32 = 0.05;
pub const DEFAULT_SPRING_SPIN: f32 = 0.001;
pub const DEFAULT_SEED: u64 = 12345;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Downward acceleration added to vy every step
    pub gravity: f32,
    /// Restitution for wall and anchored-obstacle contacts (0 = dead, 1 = elastic)
    pub bounce: f32,
    /// Velocity decay applied every step, contact or not; also scales vx on ground contact
    pub friction: f32,
    /// Uniform velocity decay every step
    pub air_drag: f32,
    /// Horizontal acceleration added to vx every step
    pub wind: f32,
    /// Pairwise inverse-square attraction on/off
    pub magnetism: bool,
    pub magnet_strength: f32,
    /// Added to dist² in the attraction denominator; 0 keeps the plain inverse square
    pub magnet_softening: f32,
    pub angular_drag: f32,
    /// Angular velocity factor on any wall clamp
    pub wall_spin: f32,
    /// Spin kick each body receives on contact, random sign
    pub collision_torque: f32,
    /// Angular nudge per unit of spring force
    pub spring_spin: f32,
    /// Seed for the contact spin RNG
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            bounce: DEFAULT_BOUNCE,
            friction: DEFAULT_FRICTION,
            air_drag: DEFAULT_AIR_DRAG,
            wind: 0.0,
            magnetism: false,
            magnet_strength: DEFAULT_MAGNET_STRENGTH,
            magnet_softening: DEFAULT_MAGNET_SOFTENING,
            angular_drag: DEFAULT_ANGULAR_DRAG,
            wall_spin: DEFAULT_WALL_SPIN,
            collision_torque: DEFAULT_COLLISION_TORQUE,
            spring_spin: DEFAULT_SPRING_SPIN,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// No forces at all: bodies keep their velocity until they touch something.
    pub fn frictionless() -> Self {
        Self {
            gravity: 0.0,
            friction: 1.0,
            air_drag: 1.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("gravity", self.gravity),
            ("wind", self.wind),
            ("magnet_strength", self.magnet_strength),
            ("wall_spin", self.wall_spin),
            ("collision_torque", self.collision_torque),
            ("spring_spin", self.spring_spin),
        ];
        for (name, value) in finite {
            require_finite(name, value)?;
        }

        require_unit("bounce", self.bounce)?;
        require_unit("friction", self.friction)?;
        require_unit("air_drag", self.air_drag)?;
        require_unit("angular_drag", self.angular_drag)?;

        if !self.magnet_softening.is_finite() || self.magnet_softening < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "magnet_softening must be finite and >= 0, got {}",
                self.magnet_softening
            )));
        }
        Ok(())
    }
}

pub(crate) fn require_finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{} must be finite, got {}", name, value)))
    }
}

/// Damping factors and restitution live in 0..=1.
pub(crate) fn require_unit(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{} must be within 0..=1, got {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = EngineConfig::default();
        assert_eq!(c.gravity, 0.5);
        assert_eq!(c.bounce, 0.7);
        assert_eq!(c.friction, 0.99);
        assert_eq!(c.air_drag, 0.995);
        assert_eq!(c.wind, 0.0);
        assert!(!c.magnetism);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = EngineConfig::from_json(r#"{ "gravity": 1.5, "magnetism": true }"#).unwrap();
        assert_eq!(c.gravity, 1.5);
        assert!(c.magnetism);
        assert_eq!(c.bounce, DEFAULT_BOUNCE);
        assert_eq!(c.seed, DEFAULT_SEED);
    }

    #[test]
    fn out_of_range_bounce_is_rejected() {
        let err = EngineConfig::from_json(r#"{ "bounce": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("bounce"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            EngineConfig::from_json("{ gravity: }"),
            Err(EngineError::Json(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let c = EngineConfig { wind: -0.25, seed: 7, ..EngineConfig::default() };
        let back = EngineConfig::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back, c);
    }
}
