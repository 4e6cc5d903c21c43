//! Spatial query capability consumed from the host environment.
//!
//! The core never implements a spatial index or a ray tracer; it consumes
//! both as black boxes. Implementations live with the embedding (game
//! server adapter, simulation world for tests) and may fail transiently —
//! the targeting engine converts every failure into "no candidate" / "no
//! line of sight" rather than propagating it.

use glam::Vec3;

use crate::state::EntityId;

/// Transient failure from the host's spatial primitives.
///
/// Never crosses the targeting boundary; see
/// [`crate::targeting::find_nearest_in_cone_with_line_of_sight`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpatialError {
    #[error("entity proximity query failed")]
    QueryFailed,

    #[error("raycast failed")]
    RaycastFailed,
}

/// Read-only view of the live world: positions, liveness, and ray tracing.
pub trait SpatialOracle {
    /// Living-entity candidates within an axis-aligned cube of the given
    /// half-extent centered on `origin`.
    ///
    /// The pool may over-approximate (cube, not sphere); callers apply
    /// their own distance and direction tests.
    fn entities_near(&self, origin: Vec3, half_extent: f32) -> Result<Vec<EntityId>, SpatialError>;

    /// Foot position of an entity, or `None` if it is gone.
    fn position(&self, entity: EntityId) -> Option<Vec3>;

    /// Eye-level reference point of an entity, or `None` if it is gone.
    /// Line-of-sight rays are cast eye to eye.
    fn eye_position(&self, entity: EntityId) -> Option<Vec3>;

    /// Unit look direction of an entity, or `None` if it is gone.
    fn facing(&self, entity: EntityId) -> Option<Vec3>;

    /// Whether the entity still exists and is not dead.
    fn is_alive(&self, entity: EntityId) -> bool;

    /// First entity hit by a ray from `from` along `direction`, up to
    /// `max_distance`. Pass-through (non-solid) surfaces are ignored;
    /// `target` is the entity the caller hopes to hit, so implementations
    /// backed by a collision filter can include it explicitly.
    ///
    /// `Ok(None)` means the ray hit blocking geometry or nothing at all.
    fn raycast_first_hit(
        &self,
        from: Vec3,
        direction: Vec3,
        max_distance: f32,
        target: EntityId,
    ) -> Result<Option<EntityId>, SpatialError>;
}
