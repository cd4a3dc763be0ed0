//! Collidable body state
//!
//! [`Body`] is the part of an entity the collision core reads and writes:
//! pose, collision shape, overall bounds and liveness flags. Every pose
//! setter retransforms the shape and recomputes the overall bounds, so the
//! world-space data can never lag behind the pose.

use bitflags::bitflags;

use crate::foundation::math::{Rect, Vec2};
use super::collision::CollisionShape;

bitflags! {
    /// Liveness and participation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BodyFlags: u8 {
        /// Entity has not been destroyed
        const ALIVE = 1 << 0;
        /// Entity takes part in collision resolution
        const COLLIDABLE = 1 << 1;
    }
}

impl Default for BodyFlags {
    fn default() -> Self {
        Self::ALIVE | Self::COLLIDABLE
    }
}

/// Pose, shape and bounds of a collidable entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vec2,
    rotation: f32,
    scale: f32,
    size: Vec2,
    shape: CollisionShape,
    bounds: Rect,
    flags: BodyFlags,
}

impl Body {
    /// Create a live, collidable body at `position`
    ///
    /// `size` is the visual extent, used for bounds only when the shape has
    /// no vertices.
    pub fn new(position: Vec2, size: Vec2, shape: CollisionShape) -> Self {
        let mut body = Self {
            position,
            rotation: 0.0,
            scale: 1.0,
            size,
            shape,
            bounds: Rect::default(),
            flags: BodyFlags::default(),
        };
        body.refresh();
        body
    }

    /// Builder: initial rotation in degrees
    #[must_use]
    pub fn with_rotation(mut self, rotation_degrees: f32) -> Self {
        self.set_rotation(rotation_degrees);
        self
    }

    /// Builder: initial uniform scale
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    /// World position of the pivot
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Rotation in degrees, counter-clockwise positive
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Uniform scale factor
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Visual size (unscaled)
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Collision shape in its current world-space pose
    pub const fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    /// Overall axis-aligned bounds for the current pose
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Current flags
    pub const fn flags(&self) -> BodyFlags {
        self.flags
    }

    /// Move the pivot to `position`
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh();
    }

    /// Move the pivot by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    /// Set rotation in degrees
    pub fn set_rotation(&mut self, rotation_degrees: f32) {
        self.rotation = rotation_degrees;
        self.refresh();
    }

    /// Set uniform scale
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.refresh();
    }

    /// Set position, rotation and scale with a single retransform
    pub fn set_pose(&mut self, position: Vec2, rotation_degrees: f32, scale: f32) {
        self.position = position;
        self.rotation = rotation_degrees;
        self.scale = scale;
        self.refresh();
    }

    /// Set the visual size used by the shapeless bounds fallback
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
        self.refresh();
    }

    /// Replace the collision shape and transform it to the current pose
    pub fn set_shape(&mut self, shape: CollisionShape) {
        self.shape = shape;
        self.refresh();
    }

    /// True until [`kill`](Self::kill) is called
    pub const fn is_alive(&self) -> bool {
        self.flags.contains(BodyFlags::ALIVE)
    }

    /// True if the body takes part in collision resolution
    pub const fn is_collidable(&self) -> bool {
        self.flags.contains(BodyFlags::COLLIDABLE)
    }

    /// Alive and collidable
    pub const fn is_active(&self) -> bool {
        self.flags.contains(BodyFlags::ALIVE.union(BodyFlags::COLLIDABLE))
    }

    /// Mark the body as destroyed
    pub fn kill(&mut self) {
        self.flags.remove(BodyFlags::ALIVE);
    }

    /// Enable or disable collision participation
    pub fn set_collidable(&mut self, collidable: bool) {
        self.flags.set(BodyFlags::COLLIDABLE, collidable);
    }

    fn refresh(&mut self) {
        self.shape.update_world_vertices(self.position, self.rotation, self.scale);
        self.bounds = self
            .shape
            .world_bounds()
            .unwrap_or_else(|| Rect::from_center_size(self.position, self.size * self.scale));
    }
}

/// Capability contract between an entity and the collision world
///
/// Entity variants expose their [`Body`] and advance their own behavior in
/// [`update`](Self::update). Pose changes made through the body keep the
/// shape in sync automatically.
pub trait Collidable {
    /// Collision state (read)
    fn body(&self) -> &Body;

    /// Collision state (write)
    fn body_mut(&mut self) -> &mut Body;

    /// Advance behavior by `delta_time` seconds
    fn update(&mut self, _delta_time: f32) {}
}

impl Collidable for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle_shape() -> CollisionShape {
        CollisionShape::new().with_polygon(vec![
            Vec2::new(0.0, -2.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ])
    }

    #[test]
    fn test_new_body_is_transformed() {
        let body = Body::new(Vec2::new(10.0, 20.0), Vec2::new(8.0, 8.0), triangle_shape());

        assert!(body.is_alive() && body.is_collidable() && body.is_active());
        let bounds = body.bounds();
        assert_relative_eq!(bounds.x, 9.0);
        assert_relative_eq!(bounds.y, 18.0);
        assert_relative_eq!(bounds.width, 2.0);
        assert_relative_eq!(bounds.height, 3.0);
    }

    #[test]
    fn test_setters_retransform_shape() {
        let mut body = Body::new(Vec2::zeros(), Vec2::new(8.0, 8.0), triangle_shape());

        body.translate(Vec2::new(5.0, 0.0));
        assert_relative_eq!(body.shape().polygons()[0].world_vertices()[0], Vec2::new(5.0, -2.0));
        assert_relative_eq!(body.bounds().x, 4.0);

        body.set_rotation(180.0);
        assert_relative_eq!(
            body.shape().polygons()[0].world_vertices()[0],
            Vec2::new(5.0, 2.0),
            epsilon = 1e-5
        );

        body.set_scale(2.0);
        assert_relative_eq!(body.bounds().height, 6.0, epsilon = 1e-5);

        body.set_pose(Vec2::new(1.0, 1.0), 0.0, 1.0);
        assert_relative_eq!(body.bounds().y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_shapeless_body_uses_scaled_size() {
        let mut body = Body::new(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0), CollisionShape::new())
            .with_scale(2.0);
        assert_eq!(body.bounds(), Rect::new(80.0, 40.0, 40.0, 20.0));

        body.set_size(Vec2::new(4.0, 4.0));
        assert_eq!(body.bounds(), Rect::new(96.0, 46.0, 8.0, 8.0));

        body.set_shape(triangle_shape());
        assert_relative_eq!(body.bounds().width, 4.0);
    }

    #[test]
    fn test_flags() {
        let mut body = Body::new(Vec2::zeros(), Vec2::new(1.0, 1.0), CollisionShape::new());
        body.set_collidable(false);
        assert!(body.is_alive());
        assert!(!body.is_active());

        body.set_collidable(true);
        body.kill();
        assert!(!body.is_alive());
        assert!(!body.is_active());
        assert_eq!(body.flags(), BodyFlags::COLLIDABLE);
    }
}
