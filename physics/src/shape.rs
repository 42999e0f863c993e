use crate::error::PhysicsError;
use crate::math::{Aabb, Point3, Vec3, is_finite_vec};

/// Axis-aligned box collider centered on its entity's transform position.
///
/// `half_extents` is the distance from the center to each face, so the full box is
/// `2 * half_extents` wide. The cached `bounds` are world space and only valid after
/// the last [`AabbShape::sync`]; a shape whose transform went missing is marked stale
/// and takes no part in collision until it is synced again.
#[derive(Clone, Copy, Debug)]
pub struct AabbShape {
    half_extents: Vec3,
    bounds: Aabb,
    live: bool,
}

impl AabbShape {
    /// # Errors
    /// [`PhysicsError::InvalidHalfExtents`] when any component is negative or not finite.
    pub fn new(half_extents: Vec3) -> Result<Self, PhysicsError> {
        validate_half_extents(&half_extents)?;
        Ok(Self {
            half_extents,
            bounds: aabb_at(&Vec3::zeros(), &half_extents),
            live: false,
        })
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    pub fn set_half_extents(&mut self, half_extents: Vec3) -> Result<(), PhysicsError> {
        validate_half_extents(&half_extents)?;
        let center = self.bounds.center().coords;
        self.half_extents = half_extents;
        self.bounds = aabb_at(&center, &half_extents);
        Ok(())
    }

    /// Re-center the cached bounds on `position`.
    #[inline]
    pub fn sync(&mut self, position: &Vec3) {
        self.bounds = aabb_at(position, &self.half_extents);
        self.live = true;
    }

    #[inline]
    pub fn mark_stale(&mut self) {
        self.live = false;
    }

    /// True once synced from a transform and not marked stale since.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live
    }

    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

/// World-space box `position ± half_extents`.
#[inline]
pub fn aabb_at(position: &Vec3, half_extents: &Vec3) -> Aabb {
    Aabb::new(
        Point3::from(position - half_extents),
        Point3::from(position + half_extents),
    )
}

fn validate_half_extents(half_extents: &Vec3) -> Result<(), PhysicsError> {
    if is_finite_vec(half_extents) && half_extents.iter().all(|&h| h >= 0.0) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidHalfExtents {
            x: half_extents.x,
            y: half_extents.y,
            z: half_extents.z,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_sync() {
        let mut shape = AabbShape::new(Vec3::new(1.0, 2.0, 0.5)).unwrap();
        assert!(!shape.is_live());
        shape.sync(&Vec3::new(10.0, 0.0, -1.0));
        assert!(shape.is_live());

        assert_eq!(shape.bounds().mins, Point3::new(9.0, -2.0, -1.5));
        assert_eq!(shape.bounds().maxs, Point3::new(11.0, 2.0, -0.5));

        shape.mark_stale();
        assert!(!shape.is_live());
    }

    #[test]
    fn resizing_keeps_center() {
        let mut shape = AabbShape::new(Vec3::new(1.0, 1.0, 1.0)).unwrap();
        shape.sync(&Vec3::new(0.0, 5.0, 0.0));
        shape.set_half_extents(Vec3::new(2.0, 2.0, 2.0)).unwrap();

        assert_eq!(shape.bounds().mins, Point3::new(-2.0, 3.0, -2.0));
        assert_eq!(shape.bounds().maxs, Point3::new(2.0, 7.0, 2.0));
    }

    #[test]
    fn rejects_negative_or_nan_extents() {
        assert!(AabbShape::new(Vec3::new(-1.0, 1.0, 1.0)).is_err());
        assert!(AabbShape::new(Vec3::new(1.0, f32::NAN, 1.0)).is_err());

        // A flat box is allowed.
        assert!(AabbShape::new(Vec3::new(5.0, 0.0, 5.0)).is_ok());
    }
}
