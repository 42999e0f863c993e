//! Math aliases shared by the physics modules.

use nalgebra as na;

pub use rapier3d::parry::bounding_volume::Aabb;

pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;

/// World axis, used to report which axis a collision was resolved along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Fixed order used to break ties between equal penetration depths.
    pub const TIE_BREAK_ORDER: [Axis; 3] = [Axis::Y, Axis::X, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis.
    #[inline]
    pub fn unit(self) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = 1.0;
        v
    }
}

#[inline]
pub fn is_finite_vec(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}
