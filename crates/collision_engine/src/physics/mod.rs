//! Physics module for collision detection and positional resolution
//!
//! Provides exact convex-polygon collision (SAT) composed with a uniform
//! grid broad phase. Response is positional only: overlapping entities are
//! pushed apart along the minimum translation vector.

pub mod body;
pub mod collision;
pub mod collision_system;

#[cfg(test)]
mod tests;

pub use body::{Body, BodyFlags, Collidable};
pub use collision::{
    check_sat_collision,
    check_shapes_collide,
    CollisionShape,
    ConvexPolygon,
};
pub use collision_system::{CollisionWorld, Contact, EntityKey};
