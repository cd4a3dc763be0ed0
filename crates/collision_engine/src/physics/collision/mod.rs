//! Narrow-phase collision geometry
//!
//! Shapes are stored in pivot-local coordinates and cached in world space
//! after each pose change; the SAT tests only ever read the cached
//! world-space vertices.
//!
//! # Module Organization
//!
//! - [`polygon`] - Convex polygon primitive and its pose transform
//! - [`shape`] - Composite shapes made of several convex polygons
//! - [`sat`] - Separating Axis Theorem tests and MTV computation
//!
//! # Key Types
//!
//! - [`ConvexPolygon`] - Local + world-space vertices of one convex piece
//! - [`CollisionShape`] - An entity's full collidable silhouette

pub mod polygon;
pub mod shape;
pub mod sat;

// Re-export commonly used types
pub use polygon::ConvexPolygon;
pub use shape::CollisionShape;
pub use sat::{check_sat_collision, check_shapes_collide, Projection};
