//! Collision-specific debug visualization
//!
//! Collects world-space outline segments for collision shapes, overall
//! bounds, occupied grid cells and resolved contacts.

use std::collections::HashSet;

use crate::foundation::math::{Rect, Vec2, Vec4};
use crate::physics::{CollisionShape, CollisionWorld, Collidable, EntityKey};

/// Line segment in world space with an RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    /// Segment start
    pub start: Vec2,
    /// Segment end
    pub end: Vec2,
    /// RGBA color
    pub color: Vec4,
}

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Overall bounds of each entity
    pub bounds: Vec4,

    /// Collision shapes (not colliding)
    pub shape_default: Vec4,

    /// Collision shapes resolved this step
    pub shape_colliding: Vec4,

    /// Occupied grid cells
    pub grid_cell: Vec4,

    /// MTV arrows
    pub contact: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            bounds: Vec4::new(0.0, 0.0, 1.0, 1.0),          // Blue
            shape_default: Vec4::new(0.0, 1.0, 0.0, 1.0),   // Green
            shape_colliding: Vec4::new(1.0, 0.0, 0.0, 1.0), // Red
            grid_cell: Vec4::new(0.8, 0.8, 0.8, 0.3),       // Light gray, transparent
            contact: Vec4::new(1.0, 1.0, 0.0, 1.0),         // Yellow
        }
    }
}

/// Collision-specific debug line collector
pub struct CollisionDebugVisualizer {
    colors: CollisionDebugColors,
    lines: Vec<DebugLine>,

    /// Show overall bounds
    pub show_bounds: bool,

    /// Show collision shapes
    pub show_shapes: bool,

    /// Show grid cells holding at least one entity
    pub show_grid: bool,

    /// Show MTVs of resolved contacts
    pub show_contacts: bool,
}

impl CollisionDebugVisualizer {
    /// Create a visualizer with the default colors and shapes + bounds enabled
    pub fn new() -> Self {
        Self::with_colors(CollisionDebugColors::default())
    }

    /// Create a visualizer with custom colors
    pub fn with_colors(colors: CollisionDebugColors) -> Self {
        Self {
            colors,
            lines: Vec::new(),
            show_bounds: true,
            show_shapes: true,
            show_grid: false,
            show_contacts: false,
        }
    }

    /// Lines collected since the last [`clear`](Self::clear)
    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    /// Drop collected lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Add the outline of a rectangle
    pub fn add_rect(&mut self, rect: &Rect, color: Vec4) {
        let min = rect.min();
        let max = rect.max();
        let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
        for i in 0..corners.len() {
            self.push_line(corners[i], corners[(i + 1) % corners.len()], color);
        }
    }

    /// Add the world-space outline of every polygon in a shape
    pub fn add_shape(&mut self, shape: &CollisionShape, colliding: bool) {
        let color = if colliding {
            self.colors.shape_colliding
        } else {
            self.colors.shape_default
        };
        for polygon in shape.polygons() {
            for (start, end) in polygon.edges() {
                self.push_line(start, end, color);
            }
        }
    }

    /// Collect lines for a whole collision world according to the enabled layers
    pub fn add_world<E: Collidable>(&mut self, world: &CollisionWorld<E>) {
        let colliding: HashSet<EntityKey> = world
            .contacts()
            .iter()
            .flat_map(|c| [c.entity_a, c.entity_b])
            .collect();

        if self.show_grid {
            let grid = world.grid();
            for row in 0..grid.rows() {
                for col in 0..grid.cols() {
                    if !grid.bucket(col, row).is_empty() {
                        self.add_rect(&grid.cell_rect(col, row), self.colors.grid_cell);
                    }
                }
            }
        }

        for (key, entity) in world.iter() {
            let body = entity.body();
            if !body.is_alive() {
                continue;
            }
            if self.show_bounds {
                self.add_rect(&body.bounds(), self.colors.bounds);
            }
            if self.show_shapes {
                self.add_shape(body.shape(), colliding.contains(&key));
            }
        }

        if self.show_contacts {
            for contact in world.contacts() {
                if let Some(entity) = world.get(contact.entity_a) {
                    let origin = entity.body().position();
                    self.push_line(origin, origin + contact.mtv, self.colors.contact);
                }
            }
        }
    }

    fn push_line(&mut self, start: Vec2, end: Vec2, color: Vec4) {
        self.lines.push(DebugLine { start, end, color });
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::physics::Body;

    fn triangle(position: Vec2) -> Body {
        let shape = CollisionShape::new().with_polygon(vec![
            Vec2::new(0.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
        ]);
        Body::new(position, Vec2::new(20.0, 20.0), shape)
    }

    #[test]
    fn test_rect_outline() {
        let mut debug = CollisionDebugVisualizer::new();
        debug.add_rect(&Rect::new(0.0, 0.0, 2.0, 1.0), Vec4::zeros());

        assert_eq!(debug.lines().len(), 4);
        assert_eq!(debug.lines()[1].start, Vec2::new(2.0, 0.0));
        assert_eq!(debug.lines()[3].end, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_world_lines_mark_colliding_shapes() {
        let colors = CollisionDebugColors::default();
        let mut world = CollisionWorld::new(WorldConfig {
            world_width: 500.0,
            world_height: 500.0,
            cell_size: 50.0,
        })
        .unwrap();
        world.spawn(triangle(Vec2::new(100.0, 100.0)));
        world.spawn(triangle(Vec2::new(105.0, 100.0)));
        world.spawn(triangle(Vec2::new(400.0, 400.0)));
        world.step(0.0);

        let mut debug = CollisionDebugVisualizer::new();
        debug.show_contacts = true;
        debug.add_world(&world);

        let count = |color: Vec4| debug.lines().iter().filter(|l| l.color == color).count();
        assert_eq!(count(colors.bounds), 12);
        assert_eq!(count(colors.shape_colliding), 6);
        assert_eq!(count(colors.shape_default), 3);
        assert_eq!(count(colors.contact), 1);

        debug.clear();
        assert!(debug.lines().is_empty());
    }
}
