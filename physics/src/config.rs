use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Vec3;
use crate::settings::{
    DEFAULT_CONTACT_SLOP, DEFAULT_DRAG_COEFFICIENT, DEFAULT_GRAVITY, DEFAULT_MAX_TICKS_PER_UPDATE,
    DEFAULT_TICK_DT,
};

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_gravity() -> [f32; 3] {
    DEFAULT_GRAVITY
}
const fn default_tick_dt() -> f32 {
    DEFAULT_TICK_DT
}
const fn default_max_ticks_per_update() -> u32 {
    DEFAULT_MAX_TICKS_PER_UPDATE
}
const fn default_drag_coefficient() -> f32 {
    DEFAULT_DRAG_COEFFICIENT
}
const fn default_contact_slop() -> f32 {
    DEFAULT_CONTACT_SLOP
}

// ---------------------------------------------------------------------------
// PhysicsConfig
// ---------------------------------------------------------------------------

/// Physics world configuration.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity vector [x, y, z] in m/s^2.
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],

    /// Fixed tick in seconds (default: 1/180).
    #[serde(default = "default_tick_dt")]
    pub tick_dt: f32,

    /// Maximum ticks run per `update` call (default: 8).
    #[serde(default = "default_max_ticks_per_update")]
    pub max_ticks_per_update: u32,

    /// Linear drag coefficient for `Drag` objects (default: 0.5).
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f32,

    /// Resting-contact tolerance in meters (default: 1e-4).
    #[serde(default = "default_contact_slop")]
    pub contact_slop: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            tick_dt: default_tick_dt(),
            max_ticks_per_update: default_max_ticks_per_update(),
            drag_coefficient: default_drag_coefficient(),
            contact_slop: default_contact_slop(),
        }
    }
}

impl PhysicsConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tick_dt.is_finite() || self.tick_dt <= 0.0 {
            return Err(ConfigError::InvalidTickDt(self.tick_dt));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if self.max_ticks_per_update == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_ticks_per_update",
                message: "must be at least 1".into(),
            });
        }
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "drag_coefficient",
                message: format!("{} (must be finite and >= 0)", self.drag_coefficient),
            });
        }
        if !self.contact_slop.is_finite() || self.contact_slop < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "contact_slop",
                message: format!("{} (must be finite and >= 0)", self.contact_slop),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from(self.gravity)
    }

    /// Tick rate in Hz.
    pub fn tick_hz(&self) -> f32 {
        1.0 / self.tick_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_valid() {
        let config = PhysicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gravity, [0.0, -9.81, 0.0]);
        assert_relative_eq!(config.tick_hz(), 180.0, epsilon = 1e-3);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = PhysicsConfig::from_toml_str("").unwrap();
        assert_eq!(config, PhysicsConfig::default());
    }

    #[test]
    fn toml_overrides_fields() {
        let config = PhysicsConfig::from_toml_str(
            r#"
            gravity = [0.0, -10.791, 0.0]
            tick_dt = 0.01
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.gravity_vec().y, -10.791);
        assert_relative_eq!(config.tick_dt, 0.01);
        assert_eq!(config.max_ticks_per_update, DEFAULT_MAX_TICKS_PER_UPDATE);
    }

    #[test]
    fn rejects_non_positive_tick() {
        let err = PhysicsConfig::from_toml_str("tick_dt = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickDt(_)));
    }

    #[test]
    fn rejects_negative_drag_and_zero_tick_budget() {
        let config = PhysicsConfig {
            drag_coefficient: -1.0,
            ..PhysicsConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "drag_coefficient",
                ..
            })
        ));

        let config = PhysicsConfig {
            max_ticks_per_update: 0,
            ..PhysicsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = PhysicsConfig::from_toml_str("gravity = \"down\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
