use crate::entity::EntityId;
use crate::error::PhysicsError;
use crate::math::Vec3;
use crate::table::ComponentTable;

/// Position, orientation and scale of an entity in world space.
///
/// `rotation` holds Euler angles in radians; the physics step integrates it directly
/// from angular velocity without any wrapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Where the physics step reads and writes entity transforms.
///
/// The store belongs to the scene layer; physics only looks transforms up by id. Lookups
/// for unknown ids return `None` and the step skips that entity rather than failing.
pub trait TransformStore {
    fn transform(&self, id: EntityId) -> Option<&Transform>;

    fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform>;

    /// Insert or overwrite the transform for `id`.
    fn set_transform(&mut self, id: EntityId, transform: Transform) -> Result<(), PhysicsError>;

    fn remove_transform(&mut self, id: EntityId) -> Option<Transform>;
}

/// Table-backed [`TransformStore`], used when the world owns its transforms.
#[derive(Debug, Default)]
pub struct TransformTable {
    table: ComponentTable<Transform>,
}

impl TransformTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Transform)> {
        self.table.iter()
    }
}

impl TransformStore for TransformTable {
    fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.table.get(id)
    }

    fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.table.get_mut(id)
    }

    fn set_transform(&mut self, id: EntityId, transform: Transform) -> Result<(), PhysicsError> {
        match self.table.get_mut(id) {
            Some(existing) => *existing = transform,
            None => {
                self.table.insert(id, transform)?;
            }
        }
        Ok(())
    }

    fn remove_transform(&mut self, id: EntityId) -> Option<Transform> {
        self.table.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_inserts_then_overwrites() {
        let mut store = TransformTable::new();
        let id = EntityId(1);

        store
            .set_transform(id, Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();
        store
            .set_transform(id, Transform::from_position(Vec3::new(4.0, 5.0, 6.0)))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.transform(id).map(|t| t.position),
            Some(Vec3::new(4.0, 5.0, 6.0))
        );
    }

    #[test]
    fn missing_transform_is_none() {
        let mut store = TransformTable::new();
        assert!(store.transform(EntityId(3)).is_none());
        assert!(store.transform_mut(EntityId(3)).is_none());
        assert!(store.remove_transform(EntityId(3)).is_none());
    }

    #[test]
    fn default_scale_is_unit() {
        let t = Transform::default();
        assert_eq!(t.scale, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(t.position, Vec3::zeros());
    }
}
