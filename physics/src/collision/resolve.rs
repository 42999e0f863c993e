use crate::body::PhysicsObject;
use crate::entity::EntityId;
use crate::flags::PhysicsFlag;
use crate::math::{Aabb, Axis, Vec3};
use crate::shape::{AabbShape, aabb_at};
use crate::table::ComponentTable;
use crate::transform::TransformStore;

use super::detect::{inflate, overlaps};

/// How far, and which way, a mover must travel along one axis to leave an obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Penetration {
    pub axis: Axis,
    /// `1.0` pushes the mover toward +axis, `-1.0` toward -axis.
    pub side: f32,
    /// Distance to travel along `side`. Slightly negative when the boxes are within the
    /// contact slop but not yet touching, in which case the push closes the gap.
    pub depth: f32,
}

impl Penetration {
    /// Signed displacement to apply to the mover along `axis`.
    #[inline]
    pub fn push(&self) -> f32 {
        self.side * self.depth
    }
}

/// A collision resolved during the last step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// The responding body that was moved.
    pub mover: EntityId,
    /// The box it was pushed out of.
    pub other: EntityId,
    pub penetration: Penetration,
}

impl Contact {
    /// True when the mover was lifted onto `other` (resting on top of it).
    #[inline]
    pub fn is_support(&self) -> bool {
        self.penetration.axis == Axis::Y && self.penetration.side > 0.0
    }
}

/// Smallest push that separates mover `a` from obstacle `b` along a single axis.
///
/// Per axis both exits are measured: up through `b`'s max face (`b.max - a.min`) and down
/// through its min face (`a.max - b.min`); the shorter wins, with ties going to the +
/// side. Across axes the shortest exit wins; equal depths are broken in the fixed
/// order Y, X, Z.
pub fn least_penetration(a: &Aabb, b: &Aabb) -> Penetration {
    let [first, rest @ ..] = Axis::TIE_BREAK_ORDER;

    let mut best = axis_exit(a, b, first);
    for axis in rest {
        let candidate = axis_exit(a, b, axis);
        // Strict: an equal depth never displaces an axis earlier in the order.
        if candidate.depth < best.depth {
            best = candidate;
        }
    }
    best
}

fn axis_exit(a: &Aabb, b: &Aabb, axis: Axis) -> Penetration {
    let i = axis.index();
    let up = b.maxs[i] - a.mins[i];
    let down = a.maxs[i] - b.mins[i];

    if up <= down {
        Penetration {
            axis,
            side: 1.0,
            depth: up,
        }
    } else {
        Penetration {
            axis,
            side: -1.0,
            depth: down,
        }
    }
}

/// Push every responding body out of the boxes it overlaps.
///
/// For each object flagged `EnableResponse` that has both a transform and a live AABB:
/// - `Grounded` is cleared, then re-set if any push this tick lifted it along +Y;
/// - it is tested against every other live AABB, and on overlap moved along the axis
///   of least penetration, with its box re-derived after each push;
/// - velocity along the resolved axis that points into the obstacle is zeroed;
/// - when grounded with gravity enabled, `-gravity * mass` is queued in its force
///   accumulator so next tick's gravity is cancelled. This is a heuristic support
///   force, not a solved contact constraint.
///
/// Movers are tested with their box inflated by `contact_slop`, so a body resting
/// exactly on a surface keeps its contact. Resolved contacts are appended to `contacts`.
pub fn resolve_collisions<S: TransformStore>(
    bodies: &mut ComponentTable<PhysicsObject>,
    shapes: &mut ComponentTable<AabbShape>,
    transforms: &mut S,
    gravity: Vec3,
    contact_slop: f32,
    contacts: &mut Vec<Contact>,
) {
    for (id, obj) in bodies.iter_mut() {
        obj.flags.remove(PhysicsFlag::Grounded);

        if !obj.has(PhysicsFlag::EnableResponse) {
            continue;
        }

        let Some(shape) = shapes.get(id).copied() else {
            continue;
        };
        if !shape.is_live() {
            continue;
        }

        let Some(transform) = transforms.transform_mut(id) else {
            log::warn!("Mover {} has no transform, skipping collision response", id);
            continue;
        };

        let half_extents = shape.half_extents();
        let mut a = aabb_at(&transform.position, &half_extents);
        let mut grounded = false;

        for (other_id, other) in shapes.iter() {
            if other_id == id || !other.is_live() {
                continue;
            }

            let b = other.bounds();
            if !overlaps(&inflate(&a, contact_slop), b) {
                continue;
            }

            let pen = least_penetration(&a, b);
            let i = pen.axis.index();

            transform.position[i] += pen.push();

            // Stop motion into the obstacle; motion away from it is kept.
            if obj.velocity_linear[i] * pen.side < 0.0 {
                obj.velocity_linear[i] = 0.0;
            }

            if pen.axis == Axis::Y && pen.side > 0.0 {
                grounded = true;
            }

            log::trace!(
                "Resolved {} out of {} along {:?} by {}",
                id,
                other_id,
                pen.axis,
                pen.push()
            );

            contacts.push(Contact {
                mover: id,
                other: other_id,
                penetration: pen,
            });

            a = aabb_at(&transform.position, &half_extents);
        }

        if let Some(shape) = shapes.get_mut(id) {
            shape.sync(&transform.position);
        }

        if grounded {
            obj.flags.insert(PhysicsFlag::Grounded);
            if obj.gravity_enabled() {
                obj.force_linear -= gravity * obj.mass();
            }
        }
    }
}
