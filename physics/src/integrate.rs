//! Force accumulation and semi-implicit Euler integration.
//!
//! Per tick and per object:
//! - bias: gravity (`gravity * mass`, once per tick, not scaled by `dt`), the object's
//!   constant acceleration (`acceleration * mass`) and linear drag are added to the
//!   force accumulator on top of whatever forces callers or the resolver left there;
//! - integrate: `v += F / m * dt`, then `x += v * dt` (angular likewise into rotation);
//! - reset: both force accumulators go back to zero.

use crate::body::PhysicsObject;
use crate::entity::EntityId;
use crate::flags::PhysicsFlag;
use crate::math::Vec3;
use crate::table::ComponentTable;
use crate::transform::{Transform, TransformStore};

/// World-level inputs to the force bias.
#[derive(Clone, Copy, Debug)]
pub struct ForceBias {
    pub gravity: Vec3,
    pub drag_coefficient: f32,
}

impl ForceBias {
    /// Add this tick's gravity, constant acceleration and drag to `obj`'s accumulator.
    pub fn apply(&self, obj: &mut PhysicsObject) {
        let mass = obj.mass();

        if obj.gravity_enabled() {
            obj.force_linear += self.gravity * mass;
        }

        obj.force_linear += obj.acceleration * mass;

        if obj.has(PhysicsFlag::Drag) {
            obj.force_linear -= obj.velocity_linear * self.drag_coefficient;
        }
    }
}

/// Advance one object by `dt` and consume its forces.
#[inline]
pub fn integrate(obj: &mut PhysicsObject, transform: &mut Transform, dt: f32) {
    let inv_mass = obj.inverse_mass();

    obj.velocity_linear += obj.force_linear * (inv_mass * dt);
    obj.velocity_angular += obj.force_angular * (inv_mass * dt);

    transform.position += obj.velocity_linear * dt;
    transform.rotation += obj.velocity_angular * dt;

    obj.clear_forces();
}

/// Bias and integrate every object in `bodies`.
///
/// Objects without a transform are skipped for this tick (logged, not an error) and keep
/// their accumulated forces. `Static` objects drop their forces and never move.
/// Returns how many objects were integrated.
pub fn integrate_all<S: TransformStore>(
    bodies: &mut ComponentTable<PhysicsObject>,
    transforms: &mut S,
    bias: &ForceBias,
    dt: f32,
) -> usize {
    let mut integrated = 0;

    for (id, obj) in bodies.iter_mut() {
        if obj.has(PhysicsFlag::Static) {
            obj.clear_forces();
            continue;
        }

        let Some(transform) = transforms.transform_mut(id) else {
            warn_missing_transform(id);
            continue;
        };

        bias.apply(obj);
        integrate(obj, transform, dt);
        integrated += 1;
    }

    integrated
}

fn warn_missing_transform(id: EntityId) {
    log::warn!("Physics object {} has no transform, skipping integration", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 180.0;

    fn bias() -> ForceBias {
        ForceBias {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            drag_coefficient: 0.5,
        }
    }

    #[test]
    fn single_tick_of_free_fall() {
        let mut obj = PhysicsObject::new(1.0).unwrap();
        let mut t = Transform::from_position(Vec3::new(0.0, 10.0, 0.0));

        bias().apply(&mut obj);
        integrate(&mut obj, &mut t, DT);

        assert_relative_eq!(obj.velocity_linear.y, -9.81 / 180.0, epsilon = 1e-6);
        assert_relative_eq!(t.position.y, 10.0 - 9.81 / (180.0 * 180.0), epsilon = 1e-5);
        assert_eq!(obj.force_linear, Vec3::zeros());
    }

    #[test]
    fn gravity_is_mass_independent_in_velocity() {
        let mut light = PhysicsObject::new(1.0).unwrap();
        let mut heavy = PhysicsObject::new(50.0).unwrap();
        let mut t1 = Transform::default();
        let mut t2 = Transform::default();

        for (obj, t) in [(&mut light, &mut t1), (&mut heavy, &mut t2)] {
            bias().apply(obj);
            integrate(obj, t, DT);
        }

        assert_relative_eq!(light.velocity_linear.y, heavy.velocity_linear.y, epsilon = 1e-6);
    }

    #[test]
    fn disabled_gravity_leaves_object_at_rest() {
        let mut obj = PhysicsObject::new(2.0)
            .unwrap()
            .with_flags(&[PhysicsFlag::DisableGravity]);
        let mut t = Transform::default();

        bias().apply(&mut obj);
        integrate(&mut obj, &mut t, DT);

        assert_eq!(t.position, Vec3::zeros());
        assert_eq!(obj.velocity_linear, Vec3::zeros());
    }

    #[test]
    fn angular_force_spins_rotation() {
        let mut obj = PhysicsObject::new(2.0)
            .unwrap()
            .with_flags(&[PhysicsFlag::DisableGravity]);
        let mut t = Transform::default();

        obj.add_force(Vec3::zeros(), Vec3::new(0.0, 4.0, 0.0));
        integrate(&mut obj, &mut t, 0.5);

        // v = 4 / 2 * 0.5 = 1, r = 1 * 0.5
        assert_relative_eq!(obj.velocity_angular.y, 1.0);
        assert_relative_eq!(t.rotation.y, 0.5);
        assert_eq!(obj.force_angular, Vec3::zeros());
    }

    #[test]
    fn drag_opposes_velocity() {
        let mut obj = PhysicsObject::new(1.0)
            .unwrap()
            .with_flags(&[PhysicsFlag::DisableGravity, PhysicsFlag::Drag]);
        obj.velocity_linear = Vec3::new(4.0, 0.0, 0.0);

        bias().apply(&mut obj);
        assert_relative_eq!(obj.force_linear.x, -2.0);
    }

    #[test]
    fn constant_acceleration_is_scaled_by_mass() {
        let mut obj = PhysicsObject::new(3.0)
            .unwrap()
            .with_flags(&[PhysicsFlag::DisableGravity]);
        obj.acceleration = Vec3::new(1.0, 0.0, 0.0);

        bias().apply(&mut obj);
        assert_relative_eq!(obj.force_linear.x, 3.0);
    }

    #[test]
    fn integrate_all_skips_missing_transforms_and_statics() {
        use crate::transform::TransformTable;

        let mut bodies = ComponentTable::new();
        let mut store = TransformTable::new();

        let moving = EntityId(1);
        let orphan = EntityId(2);
        let fixed = EntityId(3);

        bodies.insert(moving, PhysicsObject::new(1.0).unwrap()).unwrap();
        bodies.insert(orphan, PhysicsObject::new(1.0).unwrap()).unwrap();
        bodies
            .insert(
                fixed,
                PhysicsObject::new(1.0)
                    .unwrap()
                    .with_flags(&[PhysicsFlag::Static]),
            )
            .unwrap();

        store.set_transform(moving, Transform::default()).unwrap();
        store.set_transform(fixed, Transform::default()).unwrap();

        let count = integrate_all(&mut bodies, &mut store, &bias(), DT);

        assert_eq!(count, 1);
        assert!(store.transform(moving).unwrap().position.y < 0.0);
        assert_eq!(store.transform(fixed).unwrap().position, Vec3::zeros());
        assert_eq!(bodies.get(orphan).unwrap().velocity_linear, Vec3::zeros());
    }
}
