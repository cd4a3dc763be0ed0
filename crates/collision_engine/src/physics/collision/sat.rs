//! Separating Axis Theorem narrow phase
//!
//! Two convex polygons are disjoint iff some axis exists onto which their
//! projections do not overlap. For 2D polygons the only candidate axes are
//! the edge normals of both polygons. When no separating axis exists, the
//! axis with the smallest overlap gives the minimum translation vector (MTV).
//!
//! All functions operate on world-space vertices, so shapes must be
//! transformed for the current pose before testing. Projections are taken
//! relative to the first polygon's center.

use std::cmp::Ordering;

use crate::foundation::math::Vec2;
use super::polygon::ConvexPolygon;
use super::shape::CollisionShape;

/// Normals whose absolute dot product exceeds this are treated as the same axis
pub const PARALLEL_AXIS_THRESHOLD: f32 = 0.999;

/// Smallest penetration that counts as a collision
///
/// Far from the origin the tolerance grows with the coordinates to cover
/// f32 rounding of the world vertices.
pub const SEPARATION_TOLERANCE: f32 = 1e-3;

/// Rounding slack, in units of `f32::EPSILON` times the largest coordinate
const ROUNDING_ULPS: f32 = 4.0;

/// Overlaps within this fraction of the tolerance of the smallest one are ties
const TIE_FRACTION: f32 = 0.1;

/// Axis components closer than this compare as equal
const AXIS_EPSILON: f32 = 1e-5;

/// Center offsets along the MTV axis below this leave the direction undecided
const DIRECTION_EPSILON: f32 = 1e-6;

/// Interval covered by a polygon projected onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Smallest projected value
    pub min: f32,
    /// Largest projected value
    pub max: f32,
}

impl Projection {
    /// Length of the shared part of two intervals, `0.0` when disjoint
    pub fn overlap(&self, other: &Self) -> f32 {
        (self.max.min(other.max) - self.min.max(other.min)).max(0.0)
    }

    /// True if the intervals penetrate by no more than `tolerance`
    pub fn is_separated_from(&self, other: &Self, tolerance: f32) -> bool {
        self.max <= other.min + tolerance || other.max <= self.min + tolerance
    }
}

/// Project vertices onto an axis (`[0, 0]` for an empty slice)
pub fn project_polygon(axis: &Vec2, vertices: &[Vec2]) -> Projection {
    project_polygon_about(axis, vertices, &Vec2::zeros())
}

/// Project vertices onto an axis through `origin`
pub fn project_polygon_about(axis: &Vec2, vertices: &[Vec2], origin: &Vec2) -> Projection {
    let Some((first, rest)) = vertices.split_first() else {
        return Projection { min: 0.0, max: 0.0 };
    };

    let start = (first - origin).dot(axis);
    rest.iter().fold(Projection { min: start, max: start }, |proj, v| {
        let p = (v - origin).dot(axis);
        Projection {
            min: proj.min.min(p),
            max: proj.max.max(p),
        }
    })
}

/// Append the edge normals of a polygon to `axes`, skipping near-parallel duplicates
///
/// Axes are undirected: a normal and its negation are the same axis, and
/// every stored axis is flipped into the half-plane `x > 0` (or `x == 0,
/// y > 0`). Zero-length edges contribute nothing.
pub fn collect_unique_axes(vertices: &[Vec2], axes: &mut Vec<Vec2>) {
    let count = vertices.len();
    if count < 2 {
        return;
    }

    for i in 0..count {
        let edge = vertices[(i + 1) % count] - vertices[i];
        let Some(normal) = Vec2::new(-edge.y, edge.x).try_normalize(f32::EPSILON) else {
            continue;
        };
        let normal = canonical_axis(normal);

        let duplicate = axes
            .iter()
            .any(|existing| normal.dot(existing).abs() > PARALLEL_AXIS_THRESHOLD);
        if !duplicate {
            axes.push(normal);
        }
    }
}

/// Unique edge normals of a single polygon
pub fn unique_axes(vertices: &[Vec2]) -> Vec<Vec2> {
    let mut axes = Vec::with_capacity(vertices.len());
    collect_unique_axes(vertices, &mut axes);
    axes
}

/// SAT test between two world-space convex polygons
///
/// Returns the MTV when the polygons overlap. The MTV points from `a`
/// toward `b`: moving `a` by `-mtv` (or `b` by `+mtv`) separates them.
/// Polygons with fewer than two vertices never collide.
///
/// Swapping the arguments negates the result. Among axes with (nearly) the
/// same overlap the one first in `(x, y)` order wins, and when the centers
/// give no direction along it the vertex lists decide. Two identical
/// polygons at the same pose are the one case this cannot tell apart.
pub fn check_sat_collision(a: &ConvexPolygon, b: &ConvexPolygon) -> Option<Vec2> {
    if a.is_degenerate() || b.is_degenerate() {
        return None;
    }

    let verts_a = a.world_vertices();
    let verts_b = b.world_vertices();

    let mut axes = Vec::with_capacity(verts_a.len() + verts_b.len());
    collect_unique_axes(verts_a, &mut axes);
    collect_unique_axes(verts_b, &mut axes);

    let origin = a.world_center();
    let tolerance = separation_tolerance(a, b);
    let mut overlaps = Vec::with_capacity(axes.len());

    for axis in axes {
        let proj_a = project_polygon_about(&axis, verts_a, &origin);
        let proj_b = project_polygon_about(&axis, verts_b, &origin);

        if proj_a.is_separated_from(&proj_b, tolerance) {
            return None;
        }
        overlaps.push((axis, proj_a.overlap(&proj_b)));
    }

    let smallest = overlaps.iter().map(|(_, overlap)| *overlap).fold(f32::INFINITY, f32::min);
    let tie_limit = smallest + tolerance * TIE_FRACTION;
    let (axis, overlap) = overlaps
        .into_iter()
        .filter(|(_, overlap)| *overlap <= tie_limit)
        .reduce(|best, candidate| {
            if axis_precedes(&candidate.0, &best.0) {
                candidate
            } else {
                best
            }
        })?;

    Some(orient_from_a_to_b(a, b, axis) * overlap)
}

/// All-pairs SAT test between two composite shapes
///
/// Iterates `a`'s polygons in the outer loop and `b`'s in the inner loop and
/// returns the MTV of the first colliding pair. Deeper penetrations in later
/// pairs are not considered.
pub fn check_shapes_collide(a: &CollisionShape, b: &CollisionShape) -> Option<Vec2> {
    a.polygons().iter().find_map(|poly_a| {
        b.polygons()
            .iter()
            .find_map(|poly_b| check_sat_collision(poly_a, poly_b))
    })
}

/// Penetration tolerance for a pair, widened by the rounding at its coordinates
fn separation_tolerance(a: &ConvexPolygon, b: &ConvexPolygon) -> f32 {
    let magnitude = a.world_center().amax().max(b.world_center().amax());
    SEPARATION_TOLERANCE.max(magnitude * ROUNDING_ULPS * f32::EPSILON)
}

/// Flip an undirected axis into the half-plane `x > 0`
fn canonical_axis(axis: Vec2) -> Vec2 {
    if axis.x < -AXIS_EPSILON || (axis.x.abs() <= AXIS_EPSILON && axis.y < 0.0) {
        -axis
    } else {
        axis
    }
}

/// Order of canonical axes: by `x`, then by `y`
fn axis_precedes(lhs: &Vec2, rhs: &Vec2) -> bool {
    if (lhs.x - rhs.x).abs() > AXIS_EPSILON {
        lhs.x < rhs.x
    } else {
        lhs.y < rhs.y
    }
}

/// Sign an axis so it points from `a` toward `b`
fn orient_from_a_to_b(a: &ConvexPolygon, b: &ConvexPolygon, axis: Vec2) -> Vec2 {
    let along = (b.world_center() - a.world_center()).dot(&axis);
    let flip = if along.abs() > DIRECTION_EPSILON {
        along < 0.0
    } else {
        vertex_order(a.world_vertices(), b.world_vertices()) == Ordering::Greater
    };

    if flip {
        -axis
    } else {
        axis
    }
}

/// Lexicographic order of two vertex lists
fn vertex_order(a: &[Vec2], b: &[Vec2]) -> Ordering {
    a.iter()
        .zip(b)
        .flat_map(|(va, vb)| [va.x.total_cmp(&vb.x), va.y.total_cmp(&vb.y)])
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}
