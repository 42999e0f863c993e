use std::fmt;

/// Opaque identifier for an entity inside a single world.
///
/// Entities are not objects: an `EntityId` is only a key into the parallel component
/// tables (transform, physics object, AABB shape). Components reference each other by
/// sharing the same id, never by pointer, so each table may reallocate independently.
///
/// # Invariants
/// - Ids are unique within a world and assigned monotonically.
/// - Ids are never reused within a session, so a stale id can only miss, never alias.
/// - Destroying the world invalidates every id handed out for it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl EntityId {
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Monotonic id source for hosts that own entity creation.
///
/// The physics core never allocates ids itself; this exists so the game layer (or a test)
/// has a single place that upholds the "never reused" rule.
#[derive(Debug, Default)]
pub struct EntityIdGen {
    next: u64,
}

impl EntityIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next id. Ids start at 1 so that 0 is never a live entity.
    pub fn next_id(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_never_zero() {
        let mut ids = EntityIdGen::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert_eq!(a, EntityId(1));
        assert!(a < b && b < c);
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(EntityId(42).to_string(), "#42");
    }
}
