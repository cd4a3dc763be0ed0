//! Ship entities
//!
//! Each ship class carries a hardcoded hull (vertices relative to the ship's
//! pivot) and a simple wandering behavior that picks a random nearby goal
//! and steers toward it.

use collision_engine::foundation::math::Vec2;
use collision_engine::physics::{Body, Collidable, CollisionShape};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Keep wander goals this far from the world edge
const GOAL_MARGIN: f32 = 64.0;

/// Distance at which a goal counts as reached
const GOAL_EPS: f32 = 12.0;

/// Seconds before a fresh goal is picked regardless of progress
const NEW_GOAL_INTERVAL: f32 = 3.0;

/// Ship variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipClass {
    /// Small triangular hull
    Basic,
    /// Large capital ship
    Dreadnaught,
}

impl ShipClass {
    /// Visual size in world units
    pub fn size(self) -> Vec2 {
        match self {
            Self::Basic => Vec2::new(64.0, 64.0),
            Self::Dreadnaught => Vec2::new(460.0, 640.0),
        }
    }

    /// Cruise speed in units per second
    pub const fn speed(self) -> f32 {
        match self {
            Self::Basic => 100.0,
            Self::Dreadnaught => 50.0,
        }
    }

    /// Maximum distance of the next wander goal
    pub const fn wander_radius(self) -> f32 {
        match self {
            Self::Basic => 800.0,
            Self::Dreadnaught => 2000.0,
        }
    }

    /// Collision hull, vertices relative to the ship's center
    pub fn hull(self) -> CollisionShape {
        match self {
            Self::Basic => {
                let size = self.size();
                let (w, h) = (size.x * 0.25, size.y * 0.25);
                CollisionShape::named("basic").with_polygon(vec![
                    Vec2::new(0.0, -h), // nose
                    Vec2::new(w, h),
                    Vec2::new(-w, h),
                ])
            }
            // Traced outline is concave, so SAT only approximates it
            Self::Dreadnaught => CollisionShape::named("dreadnaught").with_polygon(
                [
                    (-76.0, -345.0), (-84.0, -135.0), (-34.0, -107.0), (2.0, -208.0),
                    (34.0, -111.0), (104.0, -152.0), (75.0, -344.0), (168.0, -166.0),
                    (182.0, -30.0), (153.0, 64.0), (211.0, 117.0), (153.0, 105.0),
                    (224.0, 174.0), (185.0, 162.0), (193.0, 223.0), (162.0, 205.0),
                    (148.0, 284.0), (19.0, 268.0), (22.0, 189.0), (2.0, 194.0),
                    (-17.0, 193.0), (-24.0, 263.0), (-141.0, 287.0), (-155.0, 191.0),
                    (-187.0, 224.0), (-183.0, 168.0), (-223.0, 174.0), (-153.0, 107.0),
                    (-212.0, 117.0), (-149.0, 68.0), (-185.0, -105.0), (-76.0, -346.0),
                ]
                .into_iter()
                .map(|(x, y)| Vec2::new(x, y))
                .collect(),
            ),
        }
    }
}

/// A wandering ship
pub struct Ship {
    class: ShipClass,
    body: Body,
    goal: Vec2,
    time_to_new_goal: f32,
    world_extent: Vec2,
    rng: StdRng,
}

impl Ship {
    /// Create a ship of `class` at `position`
    pub fn new(class: ShipClass, position: Vec2, world_extent: Vec2, seed: u64) -> Self {
        let mut ship = Self {
            class,
            body: Body::new(position, class.size(), class.hull()),
            goal: position,
            time_to_new_goal: 0.0,
            world_extent,
            rng: StdRng::seed_from_u64(seed),
        };
        ship.pick_new_goal();
        ship
    }

    /// Ship variant
    pub const fn class(&self) -> ShipClass {
        self.class
    }

    /// Current wander goal
    pub const fn goal(&self) -> Vec2 {
        self.goal
    }

    fn pick_new_goal(&mut self) {
        let radius = self.class.wander_radius();
        let position = self.body.position();
        let candidate = Vec2::new(
            position.x + self.rng.gen_range(-radius..=radius),
            position.y + self.rng.gen_range(-radius..=radius),
        );

        let max = self.world_extent - Vec2::new(GOAL_MARGIN, GOAL_MARGIN);
        self.goal = Vec2::new(
            candidate.x.clamp(GOAL_MARGIN, max.x.max(GOAL_MARGIN)),
            candidate.y.clamp(GOAL_MARGIN, max.y.max(GOAL_MARGIN)),
        );
        self.time_to_new_goal = NEW_GOAL_INTERVAL;
    }
}

impl Collidable for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta_time: f32) {
        self.time_to_new_goal -= delta_time;
        if self.time_to_new_goal <= 0.0 || (self.goal - self.body.position()).norm() < GOAL_EPS {
            self.pick_new_goal();
        }

        let to_goal = self.goal - self.body.position();
        let distance = to_goal.norm();
        if distance > 1e-3 {
            let direction = to_goal / distance;
            let step = (self.class.speed() * delta_time).min(distance);
            // Sprites point up, so nose-forward is heading + 90°
            let heading = direction.y.atan2(direction.x).to_degrees() + 90.0;
            let scale = self.body.scale();
            self.body.set_pose(self.body.position() + direction * step, heading, scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WORLD: Vec2 = Vec2::new(10_000.0, 15_000.0);

    #[test]
    fn test_hulls_are_usable() {
        for class in [ShipClass::Basic, ShipClass::Dreadnaught] {
            let hull = class.hull();
            assert_eq!(hull.polygons().len(), 1);
            assert!(!hull.polygons()[0].is_degenerate());
        }
        assert_eq!(ShipClass::Dreadnaught.hull().polygons()[0].len(), 32);
    }

    #[test]
    fn test_goal_stays_inside_world() {
        for seed in 0..32 {
            let ship = Ship::new(ShipClass::Dreadnaught, Vec2::new(10.0, 10.0), WORLD, seed);
            let goal = ship.goal();
            assert!(goal.x >= GOAL_MARGIN && goal.x <= WORLD.x - GOAL_MARGIN);
            assert!(goal.y >= GOAL_MARGIN && goal.y <= WORLD.y - GOAL_MARGIN);
        }
    }

    #[test]
    fn test_update_moves_toward_goal() {
        let mut ship = Ship::new(ShipClass::Basic, Vec2::new(5000.0, 5000.0), WORLD, 7);
        let start = ship.body().position();
        let goal = ship.goal();

        ship.update(0.5);

        let moved = ship.body().position() - start;
        let expected = (goal - start).norm().min(ShipClass::Basic.speed() * 0.5);
        assert_relative_eq!(moved.norm(), expected, epsilon = 1e-2);
        assert!(moved.dot(&(goal - start)) >= 0.0);
        // Shape follows the pose
        assert_relative_eq!(ship.body().bounds().center(), ship.body().position(), epsilon = 20.0);
    }
}
