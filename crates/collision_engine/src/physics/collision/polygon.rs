//! Convex polygon primitive
//!
//! Vertices are stored relative to the owning entity's pivot and transformed
//! to world space on every pose change. The world-space buffer is allocated
//! once at construction and reused by every [`ConvexPolygon::transform`].

use crate::foundation::math::{Rect, Rotation2, Vec2};

/// A single convex polygon with cached world-space vertices
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    local_vertices: Vec<Vec2>,
    world_vertices: Vec<Vec2>,
    local_center: Vec2,
    world_center: Vec2,
}

impl ConvexPolygon {
    /// Create a polygon from vertices local to the entity pivot
    ///
    /// Winding order is free but must be consistent. Until the first
    /// [`transform`](Self::transform) the world vertices equal the local ones
    /// (identity pose).
    pub fn new(local_vertices: Vec<Vec2>) -> Self {
        let local_center = centroid(&local_vertices);
        Self {
            world_vertices: local_vertices.clone(),
            world_center: local_center,
            local_vertices,
            local_center,
        }
    }

    /// Vertices relative to the pivot
    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local_vertices
    }

    /// Vertices after the last transform
    pub fn world_vertices(&self) -> &[Vec2] {
        &self.world_vertices
    }

    /// Arithmetic mean of the local vertices
    pub const fn local_center(&self) -> Vec2 {
        self.local_center
    }

    /// Local center after the last transform
    pub const fn world_center(&self) -> Vec2 {
        self.world_center
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.local_vertices.len()
    }

    /// True if the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.local_vertices.is_empty()
    }

    /// True if the polygon cannot take part in collision tests (fewer than 2 vertices)
    pub fn is_degenerate(&self) -> bool {
        self.local_vertices.len() < 2
    }

    /// Recompute world vertices and center from a pose
    ///
    /// Each vertex is scaled uniformly about the pivot, rotated
    /// counter-clockwise by `rotation_degrees` about the pivot, then
    /// translated by `position`.
    pub fn transform(&mut self, position: Vec2, rotation_degrees: f32, scale: f32) {
        if self.local_vertices.is_empty() {
            return;
        }

        let rotation = Rotation2::new(rotation_degrees.to_radians());
        let to_world = |local: &Vec2| position + rotation * (local * scale);

        for (world, local) in self.world_vertices.iter_mut().zip(&self.local_vertices) {
            *world = to_world(local);
        }
        self.world_center = to_world(&self.local_center);
    }

    /// Axis-aligned bounds of the world vertices (zero rect when empty)
    pub fn aabb(&self) -> Rect {
        Rect::enclosing(&self.world_vertices).unwrap_or_default()
    }

    /// World-space edges as `(start, end)` pairs, closing back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let count = self.world_vertices.len();
        let edge_count = if count < 2 { 0 } else { count };
        (0..edge_count).map(move |i| (self.world_vertices[i], self.world_vertices[(i + 1) % count]))
    }
}

impl From<Vec<Vec2>> for ConvexPolygon {
    fn from(vertices: Vec<Vec2>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Vec2> for ConvexPolygon {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn centroid(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::zeros();
    }
    vertices.iter().sum::<Vec2>() / vertices.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn square(half: f32) -> ConvexPolygon {
        ConvexPolygon::new(vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ])
    }

    #[test]
    fn test_centroid_is_vertex_mean() {
        let triangle = ConvexPolygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(0.0, 3.0),
        ]);
        assert_relative_eq!(triangle.local_center(), Vec2::new(1.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_about_pivot() {
        let h = 2.0;
        let mut polygon = ConvexPolygon::new(vec![Vec2::new(h, 0.0), Vec2::new(0.0, h)]);
        polygon.transform(Vec2::zeros(), 90.0, 1.0);

        assert_relative_eq!(polygon.world_vertices()[0], Vec2::new(0.0, h), epsilon = EPSILON);
        assert_relative_eq!(polygon.world_vertices()[1], Vec2::new(-h, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_rotate_translate_order() {
        let mut polygon = square(1.0);
        polygon.transform(Vec2::new(10.0, 5.0), 90.0, 2.0);

        // (1, -1) * 2 = (2, -2), rotated 90° = (2, 2), translated = (12, 7)
        assert_relative_eq!(polygon.world_vertices()[1], Vec2::new(12.0, 7.0), epsilon = EPSILON);
        assert_relative_eq!(polygon.world_center(), Vec2::new(10.0, 5.0), epsilon = EPSILON);
        assert_eq!(polygon.world_vertices().len(), polygon.local_vertices().len());
    }

    #[test]
    fn test_transform_is_repeatable() {
        let mut polygon = square(0.5);
        polygon.transform(Vec2::new(3.0, 4.0), 33.0, 1.5);
        let first = polygon.world_vertices().to_vec();

        polygon.transform(Vec2::new(-8.0, 1.0), 270.0, 0.5);
        polygon.transform(Vec2::new(3.0, 4.0), 33.0, 1.5);
        assert_eq!(polygon.world_vertices(), first.as_slice());
    }

    #[test]
    fn test_empty_polygon_transform_is_noop() {
        let mut polygon = ConvexPolygon::new(Vec::new());
        polygon.transform(Vec2::new(1.0, 1.0), 45.0, 2.0);

        assert!(polygon.is_empty());
        assert!(polygon.is_degenerate());
        assert_eq!(polygon.world_center(), Vec2::zeros());
        assert_eq!(polygon.aabb(), Rect::default());
        assert_eq!(polygon.edges().count(), 0);
    }

    #[test]
    fn test_aabb_tracks_world_vertices() {
        let mut polygon = square(1.0);
        polygon.transform(Vec2::new(5.0, 5.0), 45.0, 1.0);

        let aabb = polygon.aabb();
        let diagonal = 2.0_f32.sqrt();
        assert_relative_eq!(aabb.x, 5.0 - diagonal, epsilon = EPSILON);
        assert_relative_eq!(aabb.width, 2.0 * diagonal, epsilon = EPSILON);
        assert_eq!(polygon.edges().count(), 4);
    }
}
