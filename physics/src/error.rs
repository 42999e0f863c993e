use thiserror::Error;

use crate::entity::EntityId;

/// Top-level error type for the physics crate.
#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("Invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f32),

    #[error("Invalid AABB half extents: [{x}, {y}, {z}] (must be finite and >= 0)")]
    InvalidHalfExtents { x: f32, y: f32, z: f32 },

    #[error("Invalid timestep: {0} (must be finite and >= 0)")]
    InvalidTimestep(f32),

    #[error("Entity {0} has no such component")]
    EntityNotFound(EntityId),

    #[error("Entity {0} already has this component")]
    DuplicateComponent(EntityId),

    #[error("Out of memory while growing a component table")]
    OutOfMemory,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid tick_dt: {0} (must be finite and > 0)")]
    InvalidTickDt(f32),

    #[error("Invalid gravity: {0:?} (components must be finite)")]
    InvalidGravity([f32; 3]),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}
