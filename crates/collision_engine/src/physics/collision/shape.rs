//! Composite collision shapes
//!
//! A [`CollisionShape`] is an ordered list of convex pieces that together
//! form one entity's collidable silhouette. Concave hulls are expressed as
//! several convex polygons; no decomposition happens here.

use crate::foundation::math::{Rect, Vec2};
use super::polygon::ConvexPolygon;

/// Ordered collection of convex polygons owned by a single entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionShape {
    name: Option<String>,
    polygons: Vec<ConvexPolygon>,
}

impl CollisionShape {
    /// Creates an empty shape
    ///
    /// An empty shape is legal: its owner falls back to a size-based
    /// rectangle for overall bounds and never collides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shape with a debugging label
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            polygons: Vec::new(),
        }
    }

    /// Builder form of [`add_polygon`](Self::add_polygon)
    #[must_use]
    pub fn with_polygon(mut self, local_vertices: Vec<Vec2>) -> Self {
        self.add_polygon(local_vertices);
        self
    }

    /// Adds a convex polygon whose vertices are already relative to the pivot
    pub fn add_polygon(&mut self, local_vertices: Vec<Vec2>) {
        self.polygons.push(ConvexPolygon::new(local_vertices));
    }

    /// Debugging label, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Constituent polygons in insertion order
    pub fn polygons(&self) -> &[ConvexPolygon] {
        &self.polygons
    }

    /// True if the shape holds no polygons
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Transform every polygon with the same pose
    ///
    /// Pass `1.0` for `scale` when the owner is unscaled.
    pub fn update_world_vertices(&mut self, position: Vec2, rotation_degrees: f32, scale: f32) {
        for polygon in &mut self.polygons {
            polygon.transform(position, rotation_degrees, scale);
        }
    }

    /// Bounds of every world-space vertex, `None` if the shape has no vertices
    pub fn world_bounds(&self) -> Option<Rect> {
        Rect::enclosing(self.polygons.iter().flat_map(|p| p.world_vertices()))
    }
}

impl FromIterator<ConvexPolygon> for CollisionShape {
    fn from_iter<I: IntoIterator<Item = ConvexPolygon>>(iter: I) -> Self {
        Self {
            name: None,
            polygons: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_update_transforms_every_polygon() {
        let mut shape = CollisionShape::named("twin")
            .with_polygon(vec![Vec2::new(-1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(-2.0, 1.0)])
            .with_polygon(vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0), Vec2::new(0.0, 1.0)]);

        shape.update_world_vertices(Vec2::new(10.0, 0.0), 0.0, 1.0);

        assert_eq!(shape.name(), Some("twin"));
        assert_relative_eq!(shape.polygons()[0].world_vertices()[0], Vec2::new(9.0, 0.0));
        assert_relative_eq!(shape.polygons()[1].world_vertices()[1], Vec2::new(12.0, 1.0));
    }

    #[test]
    fn test_world_bounds_cover_all_polygons() {
        let mut shape = CollisionShape::new()
            .with_polygon(vec![Vec2::new(-3.0, -1.0), Vec2::new(-2.0, -1.0), Vec2::new(-2.0, 0.0)])
            .with_polygon(vec![Vec2::new(1.0, 2.0), Vec2::new(4.0, 2.0), Vec2::new(4.0, 5.0)]);
        shape.update_world_vertices(Vec2::new(100.0, 100.0), 0.0, 2.0);

        let bounds = shape.world_bounds().unwrap();
        assert_relative_eq!(bounds.x, 94.0);
        assert_relative_eq!(bounds.y, 98.0);
        assert_relative_eq!(bounds.width, 14.0);
        assert_relative_eq!(bounds.height, 12.0);
    }

    #[test]
    fn test_empty_shape_has_no_bounds() {
        let mut shape = CollisionShape::new();
        shape.update_world_vertices(Vec2::new(5.0, 5.0), 10.0, 1.0);
        assert!(shape.is_empty());
        assert!(shape.world_bounds().is_none());

        let hollow: CollisionShape = std::iter::once(ConvexPolygon::new(Vec::new())).collect();
        assert!(!hollow.is_empty());
        assert!(hollow.world_bounds().is_none());
    }
}
