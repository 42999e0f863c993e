/*!
Physics step defaults and tolerances.

These constants are the defaults behind [`crate::config::PhysicsConfig`]. Keeping them
together makes tuning easier and keeps the step deterministic across platforms.

Notes
- Distances are in meters, time in seconds, mass in kilograms.
- Gravity is the plain `-9.81` variant. The arcade `-9.81 * 1.1` variant is a
  configuration choice, not a code path.
*/

/// Gravity acceleration (m/s^2) applied along -Y.
pub const GRAVITY_MPS2: f32 = 9.81;

/// Default gravity vector.
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -GRAVITY_MPS2, 0.0];

/// Fixed simulation tick (seconds). 180 Hz.
pub const DEFAULT_TICK_DT: f32 = 1.0 / 180.0;

/// Most ticks a single `update` call may run before excess frame time is dropped.
/// Guards against the spiral of death after a long stall.
pub const DEFAULT_MAX_TICKS_PER_UPDATE: u32 = 8;

/// Linear drag coefficient (N per m/s) for objects with the `Drag` flag.
pub const DEFAULT_DRAG_COEFFICIENT: f32 = 0.5;

/// Tolerance band (meters) within which a mover still counts as touching a surface.
/// Too large lets bodies snap down onto ledges; too small makes resting contact flicker.
pub const DEFAULT_CONTACT_SLOP: f32 = 1.0e-4;
