use crate::entity::EntityId;
use crate::math::{Aabb, Vec3};
use crate::shape::AabbShape;
use crate::table::ComponentTable;
use crate::transform::TransformStore;

/// Closed-interval overlap test on all three axes.
///
/// Touching faces count as overlapping. The test is symmetric:
/// `overlaps(a, b) == overlaps(b, a)`.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    (b.maxs.x >= a.mins.x)
        && (a.maxs.x >= b.mins.x)
        && (b.maxs.y >= a.mins.y)
        && (a.maxs.y >= b.mins.y)
        && (b.maxs.z >= a.mins.z)
        && (a.maxs.z >= b.mins.z)
}

/// Inflate an AABB by `margin` on all sides.
pub(crate) fn inflate(a: &Aabb, margin: f32) -> Aabb {
    if margin <= 0.0 {
        return *a;
    }
    let delta = Vec3::new(margin, margin, margin);
    Aabb {
        mins: a.mins - delta,
        maxs: a.maxs + delta,
    }
}

/// Re-center every shape on its entity's current transform position.
///
/// Shapes whose entity has no transform are marked stale and skipped by collision
/// this tick. Returns how many shapes were synced.
pub fn sync_shapes<S: TransformStore>(
    shapes: &mut ComponentTable<AabbShape>,
    transforms: &S,
) -> usize {
    let mut synced = 0;
    for (id, shape) in shapes.iter_mut() {
        match transforms.transform(id) {
            Some(transform) => {
                shape.sync(&transform.position);
                synced += 1;
            }
            None => {
                log::warn!("AABB of entity {} has no transform, skipping collision", id);
                shape.mark_stale();
            }
        }
    }
    synced
}

/// Every unordered pair of live shapes whose boxes overlap.
///
/// Pairs come out in table order with the earlier slot first.
pub fn find_overlapping_pairs(shapes: &ComponentTable<AabbShape>) -> Vec<(EntityId, EntityId)> {
    let live: Vec<(EntityId, &Aabb)> = shapes
        .iter()
        .filter(|(_, shape)| shape.is_live())
        .map(|(id, shape)| (id, shape.bounds()))
        .collect();

    let mut pairs = Vec::new();
    for (i, (a_id, a)) in live.iter().enumerate() {
        for (b_id, b) in &live[i + 1..] {
            if overlaps(a, b) {
                pairs.push((*a_id, *b_id));
            }
        }
    }
    pairs
}
