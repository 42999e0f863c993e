use crate::error::PhysicsError;
use crate::flags::{PhysicsFlag, PhysicsFlags};
use crate::math::Vec3;

/// Per-entity dynamics state.
///
/// Forces accumulate between ticks and are consumed (then zeroed) by the integrator.
/// The transform this object moves is found through the shared entity id.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsObject {
    mass: f32,
    pub flags: PhysicsFlags,
    pub force_linear: Vec3,
    pub force_angular: Vec3,
    pub velocity_linear: Vec3,
    pub velocity_angular: Vec3,
    /// Constant acceleration re-applied every tick on top of gravity.
    pub acceleration: Vec3,
}

impl PhysicsObject {
    /// Create an object at rest with no flags set.
    ///
    /// # Errors
    /// [`PhysicsError::InvalidMass`] unless `mass` is finite and strictly positive.
    pub fn new(mass: f32) -> Result<Self, PhysicsError> {
        validate_mass(mass)?;
        Ok(Self {
            mass,
            flags: PhysicsFlags::empty(),
            force_linear: Vec3::zeros(),
            force_angular: Vec3::zeros(),
            velocity_linear: Vec3::zeros(),
            velocity_angular: Vec3::zeros(),
            acceleration: Vec3::zeros(),
        })
    }

    pub fn with_flags(mut self, flags: &[PhysicsFlag]) -> Self {
        for &flag in flags {
            self.flags.insert(flag);
        }
        self
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<(), PhysicsError> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    #[inline]
    pub fn has(&self, flag: PhysicsFlag) -> bool {
        self.flags.contains(flag)
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.has(PhysicsFlag::Grounded)
    }

    #[inline]
    pub fn gravity_enabled(&self) -> bool {
        !self.has(PhysicsFlag::DisableGravity)
    }

    pub fn add_force(&mut self, linear: Vec3, angular: Vec3) {
        self.force_linear += linear;
        self.force_angular += angular;
    }

    pub fn clear_forces(&mut self) {
        self.force_linear = Vec3::zeros();
        self.force_angular = Vec3::zeros();
    }

    /// Back to rest: velocities, forces, acceleration and flags all zeroed. Mass is kept.
    pub fn clear(&mut self) {
        self.clear_forces();
        self.velocity_linear = Vec3::zeros();
        self.velocity_angular = Vec3::zeros();
        self.acceleration = Vec3::zeros();
        self.flags.clear();
    }
}

fn validate_mass(mass: f32) -> Result<(), PhysicsError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_negative_and_nan_mass() {
        for mass in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                PhysicsObject::new(mass),
                Err(PhysicsError::InvalidMass(_))
            ));
        }
    }

    #[test]
    fn set_mass_validates_and_keeps_old_value_on_error() {
        let mut obj = PhysicsObject::new(2.0).unwrap();
        assert!(obj.set_mass(0.0).is_err());
        assert_eq!(obj.mass(), 2.0);

        obj.set_mass(4.0).unwrap();
        assert_eq!(obj.inverse_mass(), 0.25);
    }

    #[test]
    fn forces_accumulate_until_cleared() {
        let mut obj = PhysicsObject::new(1.0).unwrap();
        obj.add_force(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 2.0));
        obj.add_force(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros());

        assert_eq!(obj.force_linear, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(obj.force_angular, Vec3::new(0.0, 0.0, 2.0));

        obj.clear_forces();
        assert_eq!(obj.force_linear, Vec3::zeros());
    }

    #[test]
    fn clear_resets_state_but_not_mass() {
        let mut obj = PhysicsObject::new(3.0)
            .unwrap()
            .with_flags(&[PhysicsFlag::EnableResponse, PhysicsFlag::Grounded]);
        obj.velocity_linear = Vec3::new(1.0, 2.0, 3.0);
        obj.acceleration = Vec3::new(0.0, 1.0, 0.0);

        obj.clear();

        assert_eq!(obj.mass(), 3.0);
        assert!(obj.flags.is_empty());
        assert_eq!(obj.velocity_linear, Vec3::zeros());
        assert_eq!(obj.acceleration, Vec3::zeros());
    }

    #[test]
    fn gravity_flag_helpers() {
        let obj = PhysicsObject::new(1.0).unwrap();
        assert!(obj.gravity_enabled());

        let obj = obj.with_flags(&[PhysicsFlag::DisableGravity]);
        assert!(!obj.gravity_enabled());
        assert!(!obj.is_grounded());
    }
}
