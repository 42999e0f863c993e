pub mod body;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod flags;
pub mod integrate;
pub mod math;
pub mod settings;
pub mod shape;
pub mod table;
pub mod timestep;
pub mod transform;
pub mod world;

pub use body::PhysicsObject;
pub use collision::{Contact, Penetration};
pub use config::PhysicsConfig;
pub use entity::{EntityId, EntityIdGen};
pub use error::{ConfigError, PhysicsError};
pub use flags::{PhysicsFlag, PhysicsFlags};
pub use math::{Aabb, Axis, Vec3};
pub use shape::AabbShape;
pub use timestep::FixedTimestep;
pub use transform::{Transform, TransformStore, TransformTable};
pub use world::{PhysicsWorld, RunState};
