/*!
Collision root module.

Brute-force AABB collision for the physics step. The code is split for clarity:

- detect:  live-box sync from transforms, the pairwise overlap test, pair listing
- resolve: least-penetration push-out for movers, grounded flag, support force

Every pair is tested, O(n^2), with no spatial partitioning. That is fine for the small
entity counts this engine targets and is a known scaling limit. There is also no
continuous collision detection, so a body moving more than its own thickness per tick
can tunnel through thin geometry.
*/

pub mod detect;
pub mod resolve;

pub use detect::{find_overlapping_pairs, overlaps, sync_shapes};
pub use resolve::{Contact, Penetration, least_penetration, resolve_collisions};
