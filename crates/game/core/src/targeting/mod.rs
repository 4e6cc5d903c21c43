//! Cone and line-of-sight target selection.
//!
//! Both searches are pure functions of the supplied spatial oracle: no
//! hidden state, no mutation. Two variants exist deliberately — the
//! multi-strike controller needs cheap cone-only reacquisition on every
//! tick, while initial acquisition additionally validates line of sight so
//! an ability never opens on something behind a wall.
//!
//! Every transient failure of the spatial primitives (proximity query,
//! raycast) is absorbed here and read as "no candidate" / "no line of
//! sight"; nothing propagates.

use glam::Vec3;

use crate::env::SpatialOracle;
use crate::state::EntityId;

/// Sentinel cone threshold that accepts candidates from any direction.
///
/// Used by mid-action reacquisition: the original cone check already
/// happened at invocation, and a replacement target may be anywhere around
/// the caster.
pub const NO_CONE_RESTRICTION: f32 = -1.0;

/// Finds the closest qualifying entity inside a viewing cone.
///
/// The candidate pool is the oracle's axis-aligned cube query of
/// half-extent `max_range`. Candidates are rejected when they are the
/// caster, dead, equal to `excluded`, or fail `filter`. `cone_dot_threshold`
/// is compared against `dot(normalize(facing), normalize(to_candidate))`;
/// pass [`NO_CONE_RESTRICTION`] to skip the direction test entirely.
///
/// Among survivors the minimum Euclidean distance wins; exact-distance
/// ties go to the first candidate found, an accepted nondeterminism since
/// floating-point distances essentially never tie.
pub fn find_nearest_in_cone<F>(
    world: &dyn SpatialOracle,
    caster: EntityId,
    origin: Vec3,
    facing: Vec3,
    max_range: f32,
    cone_dot_threshold: f32,
    filter: F,
    excluded: Option<EntityId>,
) -> Option<EntityId>
where
    F: Fn(EntityId) -> bool,
{
    let candidates = world.entities_near(origin, max_range).unwrap_or_default();
    let look = facing.normalize_or_zero();

    let mut closest = None;
    let mut closest_distance = max_range;

    for entity in candidates {
        if !accept(world, entity, caster, excluded, &filter) {
            continue;
        }
        let Some(position) = world.position(entity) else {
            continue;
        };

        if cone_dot_threshold > NO_CONE_RESTRICTION {
            let to_entity = (position - origin).normalize_or_zero();
            if look.dot(to_entity) < cone_dot_threshold {
                continue;
            }
        }

        let distance = origin.distance(position);
        if distance < closest_distance {
            closest = Some(entity);
            closest_distance = distance;
        }
    }

    closest
}

/// Finds the closest qualifying entity inside an explicit-angle cone with
/// an unobstructed eye-to-eye line of sight.
///
/// The dot product is clamped to `[-1, 1]` before `acos` so floating-point
/// overshoot cannot produce a domain error. A candidate only replaces the
/// current best when its angle beats the best angle seen so far *and* it
/// is strictly closer than the best distance — angle gates acceptance, it
/// is not a secondary sort key.
pub fn find_nearest_in_cone_with_line_of_sight<F>(
    world: &dyn SpatialOracle,
    caster: EntityId,
    origin: Vec3,
    facing: Vec3,
    max_range: f32,
    max_angle_radians: f32,
    filter: F,
    excluded: Option<EntityId>,
) -> Option<EntityId>
where
    F: Fn(EntityId) -> bool,
{
    let candidates = world.entities_near(origin, max_range).unwrap_or_default();
    let look = facing.normalize_or_zero();

    let mut best = None;
    let mut best_distance = max_range;
    let mut best_angle = max_angle_radians;

    for entity in candidates {
        if !accept(world, entity, caster, excluded, &filter) {
            continue;
        }
        let Some(position) = world.position(entity) else {
            continue;
        };

        if !has_line_of_sight(world, origin, entity) {
            continue;
        }

        let to_entity = (position - origin).normalize_or_zero();
        let angle = look.dot(to_entity).clamp(-1.0, 1.0).acos();
        if angle >= best_angle {
            continue;
        }

        let distance = origin.distance(position);
        if distance >= best_distance {
            continue;
        }

        best = Some(entity);
        best_distance = distance;
        best_angle = angle;
    }

    best
}

/// Whether an unobstructed ray runs from `from_eye` to the target's eye
/// point. Raycast failures and null results both read as "no".
pub fn has_line_of_sight(world: &dyn SpatialOracle, from_eye: Vec3, target: EntityId) -> bool {
    let Some(target_eye) = world.eye_position(target) else {
        return false;
    };

    let delta = target_eye - from_eye;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return true;
    }
    let direction = delta / distance;

    match world.raycast_first_hit(from_eye, direction, distance, target) {
        Ok(Some(hit)) => hit == target,
        Ok(None) | Err(_) => false,
    }
}

/// Shared candidate screening: not the caster, alive, not excluded, and
/// passing the caller's filter.
fn accept<F>(
    world: &dyn SpatialOracle,
    entity: EntityId,
    caster: EntityId,
    excluded: Option<EntityId>,
    filter: &F,
) -> bool
where
    F: Fn(EntityId) -> bool,
{
    if entity == caster {
        return false;
    }
    if !world.is_alive(entity) {
        return false;
    }
    if excluded == Some(entity) {
        return false;
    }
    filter(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SpatialError;
    use std::collections::HashMap;

    struct StubWorld {
        entities: HashMap<EntityId, Vec3>,
        dead: Vec<EntityId>,
        /// Per-target override of what the LOS ray reports as first hit.
        ray_hits: HashMap<EntityId, Option<EntityId>>,
        fail_raycasts: bool,
    }

    impl StubWorld {
        fn new(entities: &[(u64, Vec3)]) -> Self {
            Self {
                entities: entities
                    .iter()
                    .map(|&(id, pos)| (EntityId(id), pos))
                    .collect(),
                dead: Vec::new(),
                ray_hits: HashMap::new(),
                fail_raycasts: false,
            }
        }
    }

    impl SpatialOracle for StubWorld {
        fn entities_near(
            &self,
            origin: Vec3,
            half_extent: f32,
        ) -> Result<Vec<EntityId>, SpatialError> {
            let mut ids: Vec<_> = self
                .entities
                .iter()
                .filter(|&(_, &pos)| {
                    let d = pos - origin;
                    d.x.abs() <= half_extent && d.y.abs() <= half_extent && d.z.abs() <= half_extent
                })
                .map(|(&id, _)| id)
                .collect();
            ids.sort();
            Ok(ids)
        }

        fn position(&self, entity: EntityId) -> Option<Vec3> {
            self.entities.get(&entity).copied()
        }

        fn eye_position(&self, entity: EntityId) -> Option<Vec3> {
            self.position(entity).map(|p| p + Vec3::new(0.0, 1.6, 0.0))
        }

        fn facing(&self, _entity: EntityId) -> Option<Vec3> {
            Some(Vec3::X)
        }

        fn is_alive(&self, entity: EntityId) -> bool {
            self.entities.contains_key(&entity) && !self.dead.contains(&entity)
        }

        fn raycast_first_hit(
            &self,
            _from: Vec3,
            _direction: Vec3,
            _max_distance: f32,
            target: EntityId,
        ) -> Result<Option<EntityId>, SpatialError> {
            if self.fail_raycasts {
                return Err(SpatialError::RaycastFailed);
            }
            Ok(self.ray_hits.get(&target).copied().unwrap_or(Some(target)))
        }
    }

    const CASTER: EntityId = EntityId(0);

    #[test]
    fn nearest_in_cone_prefers_closest_survivor() {
        let world = StubWorld::new(&[
            (0, Vec3::ZERO),
            (1, Vec3::new(10.0, 0.0, 0.0)),
            (2, Vec3::new(4.0, 0.0, 0.0)),
        ]);
        let found = find_nearest_in_cone(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            0.9,
            |_| true,
            None,
        );
        assert_eq!(found, Some(EntityId(2)));
    }

    #[test]
    fn cone_threshold_rejects_candidates_behind_the_caster() {
        let world = StubWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(-5.0, 0.0, 0.0))]);
        let found = find_nearest_in_cone(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            0.9,
            |_| true,
            None,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn sentinel_threshold_accepts_any_direction() {
        // Directly behind the caster: dot is -1, which 0.9 rejects and the
        // sentinel must accept.
        let world = StubWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(-5.0, 0.0, 0.0))]);
        let found = find_nearest_in_cone(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            NO_CONE_RESTRICTION,
            |_| true,
            None,
        );
        assert_eq!(found, Some(EntityId(1)));
    }

    #[test]
    fn dead_excluded_and_filtered_candidates_are_skipped() {
        let mut world = StubWorld::new(&[
            (0, Vec3::ZERO),
            (1, Vec3::new(3.0, 0.0, 0.0)),
            (2, Vec3::new(5.0, 0.0, 0.0)),
            (3, Vec3::new(7.0, 0.0, 0.0)),
        ]);
        world.dead.push(EntityId(1));

        let found = find_nearest_in_cone(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            0.9,
            |_| true,
            Some(EntityId(2)),
        );
        assert_eq!(found, Some(EntityId(3)));

        let none = find_nearest_in_cone(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            0.9,
            |_| false,
            None,
        );
        assert_eq!(none, None);
    }

    #[test]
    fn candidates_beyond_max_range_never_match() {
        let world = StubWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(49.0, 30.0, 0.0))]);
        // Inside the cube pool but its Euclidean distance exceeds range.
        let found = find_nearest_in_cone(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            NO_CONE_RESTRICTION,
            |_| true,
            None,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn los_variant_excludes_obstructed_targets_even_when_closest() {
        let mut world = StubWorld::new(&[
            (0, Vec3::ZERO),
            (1, Vec3::new(4.0, 0.0, 0.0)),
            (2, Vec3::new(9.0, 0.0, 0.0)),
        ]);
        // A wall (reported as a different first hit) blocks entity 1.
        world.ray_hits.insert(EntityId(1), None);

        let found = find_nearest_in_cone_with_line_of_sight(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            0.45,
            |_| true,
            None,
        );
        assert_eq!(found, Some(EntityId(2)));
    }

    #[test]
    fn raycast_failure_reads_as_no_line_of_sight() {
        let mut world = StubWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(4.0, 0.0, 0.0))]);
        world.fail_raycasts = true;

        let found = find_nearest_in_cone_with_line_of_sight(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            0.45,
            |_| true,
            None,
        );
        assert_eq!(found, None);
    }

    #[test]
    fn los_variant_rejects_candidates_outside_the_angle() {
        // ~45 degrees off axis with a 0.2 rad cone.
        let world = StubWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(5.0, 5.0, 0.0))]);
        let found = find_nearest_in_cone_with_line_of_sight(
            &world,
            CASTER,
            Vec3::ZERO,
            Vec3::X,
            50.0,
            0.2,
            |_| true,
            None,
        );
        assert_eq!(found, None);
    }
}
