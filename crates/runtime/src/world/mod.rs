//! World capability adapters.
//!
//! [`WorldAdapter`] is the single surface the worker needs from the host
//! environment: the core's read oracles plus the strike-effect action.
//! A real embedding implements it against the game server; [`SimWorld`]
//! is an in-memory implementation for tests and headless simulation.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use glam::Vec3;

use wyrm_core::{AbilityKey, EntityId, LoadoutOracle, SpatialError, SpatialOracle};

/// Everything the worker consumes from the host world: spatial queries,
/// carry checks, and the strike effect (damage plus whatever presentation
/// the host attaches to it).
pub trait WorldAdapter: SpatialOracle + LoadoutOracle + Send + Sync {
    fn apply_strike(&self, caster: EntityId, target: EntityId, damage: f32);
}

// ============================================================================
// Simulation world
// ============================================================================

const ENTITY_RADIUS: f32 = 0.75;

#[derive(Clone, Debug)]
struct SimEntity {
    position: Vec3,
    eye_height: f32,
    facing: Vec3,
    health: f32,
    alive: bool,
}

#[derive(Clone, Copy, Debug)]
struct Obstacle {
    center: Vec3,
    radius: f32,
    passable: bool,
}

#[derive(Default)]
struct SimInner {
    entities: HashMap<EntityId, SimEntity>,
    obstacles: Vec<Obstacle>,
    carrying: HashSet<(EntityId, AbilityKey)>,
    fail_raycasts: bool,
}

/// In-memory world: positions, health, blocking geometry as spheres.
///
/// Interior mutability keeps the oracle methods `&self`, matching how a
/// real adapter would wrap a host world handle.
#[derive(Default)]
pub struct SimWorld {
    inner: Mutex<SimInner>,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity(&self, id: EntityId, position: Vec3, health: f32) {
        self.inner.lock().unwrap().entities.insert(
            id,
            SimEntity {
                position,
                eye_height: 1.6,
                facing: Vec3::X,
                health,
                alive: true,
            },
        );
    }

    pub fn move_entity(&self, id: EntityId, position: Vec3) {
        if let Some(entity) = self.inner.lock().unwrap().entities.get_mut(&id) {
            entity.position = position;
        }
    }

    pub fn set_facing(&self, id: EntityId, facing: Vec3) {
        if let Some(entity) = self.inner.lock().unwrap().entities.get_mut(&id) {
            entity.facing = facing.normalize_or_zero();
        }
    }

    pub fn kill(&self, id: EntityId) {
        if let Some(entity) = self.inner.lock().unwrap().entities.get_mut(&id) {
            entity.alive = false;
            entity.health = 0.0;
        }
    }

    pub fn remove_entity(&self, id: EntityId) {
        self.inner.lock().unwrap().entities.remove(&id);
    }

    pub fn health(&self, id: EntityId) -> Option<f32> {
        self.inner
            .lock()
            .unwrap()
            .entities
            .get(&id)
            .map(|entity| entity.health)
    }

    /// Grants the carry precondition for one ability key.
    pub fn give_item(&self, actor: EntityId, key: AbilityKey) {
        self.inner.lock().unwrap().carrying.insert((actor, key));
    }

    /// Revokes the carry precondition (item dropped or swapped away).
    pub fn take_item(&self, actor: EntityId, key: AbilityKey) {
        self.inner.lock().unwrap().carrying.remove(&(actor, key));
    }

    /// Adds a blocking (or passable) sphere of geometry.
    pub fn add_obstacle(&self, center: Vec3, radius: f32, passable: bool) {
        self.inner.lock().unwrap().obstacles.push(Obstacle {
            center,
            radius,
            passable,
        });
    }

    /// Makes every subsequent raycast fail, for error-path tests.
    pub fn set_fail_raycasts(&self, fail: bool) {
        self.inner.lock().unwrap().fail_raycasts = fail;
    }

    fn eye(entity: &SimEntity) -> Vec3 {
        entity.position + Vec3::new(0.0, entity.eye_height, 0.0)
    }
}

/// First intersection distance of a ray with a sphere, if within range.
fn ray_sphere(from: Vec3, direction: Vec3, center: Vec3, radius: f32, max_distance: f32) -> Option<f32> {
    let to_center = center - from;
    let projection = to_center.dot(direction);
    let closest_sq = to_center.length_squared() - projection * projection;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let t = if projection - half_chord >= 0.0 {
        projection - half_chord
    } else {
        projection + half_chord
    };
    (t >= 0.0 && t <= max_distance).then_some(t)
}

impl SpatialOracle for SimWorld {
    fn entities_near(&self, origin: Vec3, half_extent: f32) -> Result<Vec<EntityId>, SpatialError> {
        let inner = self.inner.lock().unwrap();
        let mut ids: Vec<_> = inner
            .entities
            .iter()
            .filter(|(_, entity)| {
                let d = entity.position - origin;
                d.x.abs() <= half_extent && d.y.abs() <= half_extent && d.z.abs() <= half_extent
            })
            .map(|(&id, _)| id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.inner
            .lock()
            .unwrap()
            .entities
            .get(&entity)
            .map(|e| e.position)
    }

    fn eye_position(&self, entity: EntityId) -> Option<Vec3> {
        self.inner
            .lock()
            .unwrap()
            .entities
            .get(&entity)
            .map(Self::eye)
    }

    fn facing(&self, entity: EntityId) -> Option<Vec3> {
        self.inner
            .lock()
            .unwrap()
            .entities
            .get(&entity)
            .map(|e| e.facing)
    }

    fn is_alive(&self, entity: EntityId) -> bool {
        self.inner
            .lock()
            .unwrap()
            .entities
            .get(&entity)
            .is_some_and(|e| e.alive)
    }

    fn raycast_first_hit(
        &self,
        from: Vec3,
        direction: Vec3,
        max_distance: f32,
        target: EntityId,
    ) -> Result<Option<EntityId>, SpatialError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_raycasts {
            return Err(SpatialError::RaycastFailed);
        }

        // Entity collision is tested against the intended target only;
        // geometry blocks regardless.
        let target_hit = inner
            .entities
            .get(&target)
            .and_then(|entity| {
                ray_sphere(from, direction, Self::eye(entity), ENTITY_RADIUS, max_distance)
            });

        let nearest_block = inner
            .obstacles
            .iter()
            .filter(|obstacle| !obstacle.passable)
            .filter_map(|obstacle| {
                ray_sphere(from, direction, obstacle.center, obstacle.radius, max_distance)
            })
            .min_by(|a, b| a.total_cmp(b));

        match (target_hit, nearest_block) {
            (Some(t), Some(block)) if block < t => Ok(None),
            (Some(_), _) => Ok(Some(target)),
            (None, _) => Ok(None),
        }
    }
}

impl LoadoutOracle for SimWorld {
    fn has_required_item(&self, actor: EntityId, key: AbilityKey) -> bool {
        self.inner.lock().unwrap().carrying.contains(&(actor, key))
    }
}

impl WorldAdapter for SimWorld {
    fn apply_strike(&self, caster: EntityId, target: EntityId, damage: f32) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(entity) = inner.entities.get_mut(&target) {
            if !entity.alive {
                return;
            }
            entity.health = (entity.health - damage).max(0.0);
            if entity.health <= 0.0 {
                entity.alive = false;
            }
            tracing::debug!(
                target: "runtime::world",
                %caster,
                struck = %target,
                health = entity.health,
                "strike applied"
            );
        }
    }
}
