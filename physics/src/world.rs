//! The physics world and its step driver.
//!
//! A [`PhysicsWorld`] owns the physics-object and AABB tables, the run state and the
//! configuration, plus a [`TransformStore`] it reads and writes through entity ids.
//! Nothing here is global: callers hold the world and pass it where it is needed.

use crate::body::PhysicsObject;
use crate::collision::{Contact, detect, resolve};
use crate::config::PhysicsConfig;
use crate::entity::EntityId;
use crate::error::{ConfigError, PhysicsError};
use crate::flags::PhysicsFlags;
use crate::integrate::{ForceBias, integrate_all};
use crate::math::{Vec3, is_finite_vec};
use crate::shape::AabbShape;
use crate::table::ComponentTable;
use crate::timestep::FixedTimestep;
use crate::transform::{Transform, TransformStore, TransformTable};

/// Whether [`PhysicsWorld::step`] advances the simulation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

pub struct PhysicsWorld<S: TransformStore = TransformTable> {
    config: PhysicsConfig,
    state: RunState,
    transforms: S,
    bodies: ComponentTable<PhysicsObject>,
    shapes: ComponentTable<AabbShape>,
    timestep: FixedTimestep,
    contacts: Vec<Contact>,
    ticks: u64,
}

impl PhysicsWorld<TransformTable> {
    /// A world that owns its transforms in a [`TransformTable`].
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        Self::with_store(config, TransformTable::new())
    }
}

impl<S: TransformStore> PhysicsWorld<S> {
    /// A world over an existing transform store (e.g. the scene graph).
    pub fn with_store(config: PhysicsConfig, transforms: S) -> Result<Self, PhysicsError> {
        config.validate()?;
        let timestep = FixedTimestep::new(config.tick_dt, config.max_ticks_per_update);

        Ok(Self {
            config,
            state: RunState::Running,
            transforms,
            bodies: ComponentTable::new(),
            shapes: ComponentTable::new(),
            timestep,
            contacts: Vec::new(),
            ticks: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    #[inline]
    pub fn transforms(&self) -> &S {
        &self.transforms
    }

    #[inline]
    pub fn transforms_mut(&mut self) -> &mut S {
        &mut self.transforms
    }

    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.transforms.transform(id)
    }

    pub fn set_transform(&mut self, id: EntityId, transform: Transform) -> Result<(), PhysicsError> {
        self.transforms.set_transform(id, transform)
    }

    /// Number of completed (running) steps.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ---------------------------------------------------------------------
    // Run state
    // ---------------------------------------------------------------------

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        let next = if paused {
            RunState::Paused
        } else {
            RunState::Running
        };
        if next != self.state {
            log::debug!("Physics {:?} -> {:?}", self.state, next);
            self.state = next;
            // Time that passed while paused must not be replayed on resume.
            self.timestep.reset();
        }
    }

    // ---------------------------------------------------------------------
    // Physics objects
    // ---------------------------------------------------------------------

    pub fn create_physics_object(
        &mut self,
        id: EntityId,
        mass: f32,
    ) -> Result<&mut PhysicsObject, PhysicsError> {
        let obj = PhysicsObject::new(mass)?;
        log::debug!("Created physics object {} (mass {})", id, mass);
        self.bodies.insert(id, obj)
    }

    pub fn physics_object(&self, id: EntityId) -> Option<&PhysicsObject> {
        self.bodies.get(id)
    }

    pub fn physics_object_mut(&mut self, id: EntityId) -> Option<&mut PhysicsObject> {
        self.bodies.get_mut(id)
    }

    pub fn destroy_physics_object(&mut self, id: EntityId) -> Result<PhysicsObject, PhysicsError> {
        let obj = self
            .bodies
            .remove(id)
            .ok_or(PhysicsError::EntityNotFound(id))?;
        log::debug!("Destroyed physics object {}", id);
        Ok(obj)
    }

    pub fn set_flags(&mut self, id: EntityId, flags: PhysicsFlags) -> Result<(), PhysicsError> {
        self.body_mut(id)?.flags = flags;
        Ok(())
    }

    pub fn set_mass(&mut self, id: EntityId, mass: f32) -> Result<(), PhysicsError> {
        self.body_mut(id)?.set_mass(mass)
    }

    /// Queue forces for the next step. They are consumed by that step's integration.
    pub fn add_force(
        &mut self,
        id: EntityId,
        linear: Vec3,
        angular: Vec3,
    ) -> Result<(), PhysicsError> {
        self.body_mut(id)?.add_force(linear, angular);
        Ok(())
    }

    /// Constant acceleration re-applied every tick alongside gravity.
    pub fn set_acceleration(&mut self, id: EntityId, acceleration: Vec3) -> Result<(), PhysicsError> {
        self.body_mut(id)?.acceleration = acceleration;
        Ok(())
    }

    /// Return an object to rest with no flags; mass is kept.
    pub fn clear_physics_object(&mut self, id: EntityId) -> Result<(), PhysicsError> {
        self.body_mut(id)?.clear();
        Ok(())
    }

    fn body_mut(&mut self, id: EntityId) -> Result<&mut PhysicsObject, PhysicsError> {
        self.bodies
            .get_mut(id)
            .ok_or(PhysicsError::EntityNotFound(id))
    }

    // ---------------------------------------------------------------------
    // AABB shapes
    // ---------------------------------------------------------------------

    /// Attach an AABB with the given half extents. If the entity already has a transform
    /// the box is placed immediately, otherwise on the next sync.
    pub fn create_aabb(
        &mut self,
        id: EntityId,
        half_extents: Vec3,
    ) -> Result<&mut AabbShape, PhysicsError> {
        let mut shape = AabbShape::new(half_extents)?;
        if let Some(transform) = self.transforms.transform(id) {
            shape.sync(&transform.position);
        }
        log::debug!("Created AABB {} (half extents {:?})", id, half_extents);
        self.shapes.insert(id, shape)
    }

    pub fn aabb(&self, id: EntityId) -> Option<&AabbShape> {
        self.shapes.get(id)
    }

    pub fn set_half_extents(&mut self, id: EntityId, half_extents: Vec3) -> Result<(), PhysicsError> {
        self.shapes
            .get_mut(id)
            .ok_or(PhysicsError::EntityNotFound(id))?
            .set_half_extents(half_extents)
    }

    pub fn destroy_aabb(&mut self, id: EntityId) -> Result<AabbShape, PhysicsError> {
        let shape = self
            .shapes
            .remove(id)
            .ok_or(PhysicsError::EntityNotFound(id))?;
        log::debug!("Destroyed AABB {}", id);
        Ok(shape)
    }

    /// Remove every component of `id`, transform included. Returns false when the entity
    /// had none.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        let had_body = self.bodies.remove(id).is_some();
        let had_shape = self.shapes.remove(id).is_some();
        let had_transform = self.transforms.remove_transform(id).is_some();
        had_body || had_shape || had_transform
    }

    // ---------------------------------------------------------------------
    // Queries and direct moves
    // ---------------------------------------------------------------------

    /// Move an entity's transform by `delta` without touching its velocity.
    pub fn translate(&mut self, id: EntityId, delta: Vec3) -> Result<(), PhysicsError> {
        let transform = self
            .transforms
            .transform_mut(id)
            .ok_or(PhysicsError::EntityNotFound(id))?;
        transform.position += delta;

        let position = transform.position;
        if let Some(shape) = self.shapes.get_mut(id) {
            shape.sync(&position);
        }
        Ok(())
    }

    /// Refresh every AABB from the transform store without stepping.
    pub fn sync_shapes(&mut self) -> usize {
        detect::sync_shapes(&mut self.shapes, &self.transforms)
    }

    /// Exact overlap test between two entities' current boxes.
    ///
    /// # Errors
    /// [`PhysicsError::EntityNotFound`] if either entity has no AABB.
    pub fn overlaps(&self, a: EntityId, b: EntityId) -> Result<bool, PhysicsError> {
        let sa = self.shapes.get(a).ok_or(PhysicsError::EntityNotFound(a))?;
        let sb = self.shapes.get(b).ok_or(PhysicsError::EntityNotFound(b))?;
        Ok(sa.is_live() && sb.is_live() && detect::overlaps(sa.bounds(), sb.bounds()))
    }

    /// Every overlapping pair of live boxes, as of the last sync.
    pub fn overlapping_pairs(&self) -> Vec<(EntityId, EntityId)> {
        detect::find_overlapping_pairs(&self.shapes)
    }

    /// Collisions resolved by the last running step.
    #[inline]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    // ---------------------------------------------------------------------
    // Step driver
    // ---------------------------------------------------------------------

    /// Advance the simulation by one tick of `dt` seconds.
    ///
    /// While paused this returns immediately and mutates nothing. Otherwise, in order:
    /// 1. bias forces (gravity, acceleration, drag) and integrate every object, leaving
    ///    force accumulators zeroed;
    /// 2. re-sync every AABB from the transform store;
    /// 3. detect and resolve collisions for responding objects, which may queue a
    ///    support force that the next tick's integration consumes.
    ///
    /// Entities missing a transform are skipped for this tick, never an error.
    ///
    /// # Errors
    /// [`PhysicsError::InvalidTimestep`] if `dt` is negative or not finite.
    pub fn step(&mut self, dt: f32) -> Result<(), PhysicsError> {
        if self.is_paused() {
            return Ok(());
        }
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTimestep(dt));
        }

        let gravity = self.config.gravity_vec();
        let bias = ForceBias {
            gravity,
            drag_coefficient: self.config.drag_coefficient,
        };

        integrate_all(&mut self.bodies, &mut self.transforms, &bias, dt);
        detect::sync_shapes(&mut self.shapes, &self.transforms);

        self.contacts.clear();
        resolve::resolve_collisions(
            &mut self.bodies,
            &mut self.shapes,
            &mut self.transforms,
            gravity,
            self.config.contact_slop,
            &mut self.contacts,
        );

        self.ticks += 1;
        Ok(())
    }

    /// Feed real frame time into the fixed-timestep accumulator and run every tick that
    /// is due at the configured `tick_dt`. Returns the number of ticks run.
    ///
    /// While paused no time accumulates and nothing runs.
    pub fn update(&mut self, frame_seconds: f32) -> Result<u32, PhysicsError> {
        if self.is_paused() {
            return Ok(0);
        }

        let ticks = self.timestep.accumulate(frame_seconds);
        let dt = self.timestep.dt();
        for _ in 0..ticks {
            self.step(dt)?;
        }
        Ok(ticks)
    }

    /// Fraction of a tick pending in the accumulator, for render interpolation.
    #[inline]
    pub fn interpolation_alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    /// Set gravity for subsequent steps.
    pub fn set_gravity(&mut self, gravity: Vec3) -> Result<(), PhysicsError> {
        if !is_finite_vec(&gravity) {
            return Err(ConfigError::InvalidGravity([gravity.x, gravity.y, gravity.z]).into());
        }
        self.config.gravity = [gravity.x, gravity.y, gravity.z];
        Ok(())
    }
}
