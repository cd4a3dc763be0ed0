//! # Collision Engine
//!
//! 2D narrow-phase collision detection over convex polygons using the
//! Separating Axis Theorem, composed with a uniform grid broad phase.
//!
//! ## Features
//!
//! - **Convex Polygons**: Pivot-local vertices cached in world space per pose
//! - **Composite Shapes**: Concave silhouettes as several convex pieces
//! - **SAT + MTV**: Exact overlap test with minimum translation vector
//! - **Uniform Grid**: Fixed-cell broad phase kept in sync every frame
//! - **Resolution Pass**: Sequential positional separation of overlapping entities
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world: CollisionWorld<Body> = CollisionWorld::new(WorldConfig::default())?;
//!
//!     let square = || {
//!         CollisionShape::new().with_polygon(vec![
//!             Vec2::new(-0.5, -0.5),
//!             Vec2::new(0.5, -0.5),
//!             Vec2::new(0.5, 0.5),
//!             Vec2::new(-0.5, 0.5),
//!         ])
//!     };
//!     world.spawn(Body::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 1.0), square()));
//!     world.spawn(Body::new(Vec2::new(100.8, 100.0), Vec2::new(1.0, 1.0), square()));
//!
//!     let contacts = world.step(1.0 / 60.0);
//!     assert_eq!(contacts.len(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod spatial;
pub mod debug;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, WorldConfig},
        foundation::math::{Rect, Vec2},
        physics::{
            check_sat_collision, check_shapes_collide, Body, Collidable, CollisionShape,
            CollisionWorld, Contact, ConvexPolygon, EntityKey,
        },
        spatial::{GridError, UniformGrid},
    };
}
