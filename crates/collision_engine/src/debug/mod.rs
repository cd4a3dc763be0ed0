//! Debug module for visualization and debugging tools
//!
//! The collision core does not render. These helpers produce plain line
//! lists that any renderer can draw.

pub mod collision_debug;

pub use collision_debug::{CollisionDebugColors, CollisionDebugVisualizer, DebugLine};
