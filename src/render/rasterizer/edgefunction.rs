//! Edge function scan conversion.
//!
//! For an edge from point A to point B, the edge function at point P is the 2D
//! cross product `(B - A) x (P - A)`. With screen Y growing downward, a
//! triangle whose corners run clockwise on screen has a positive signed area,
//! and a pixel is inside when all three edge functions are non-negative.
//!
//! # Top-left rule
//!
//! Pixels exactly on an edge belong to the triangle only if that edge is a
//! "top" edge (horizontal, pointing in +X) or a "left" edge (pointing in -Y).
//! Every other edge gets a bias of -1, which moves its zero line just inside.
//! Two triangles sharing an edge therefore never both claim the same pixel.
//!
//! # Barycentric weights
//!
//! The weight of a vertex is the edge function of the edge *opposite* it,
//! divided by the total area:
//!
//! ```text
//! w(v0) = E(v1, v2) / area
//! w(v1) = E(v2, v0) / area
//! w(v2) = E(v0, v1) / area
//! ```
//!
//! Weights are computed from the unbiased edge values; the bias only decides
//! coverage.

use crate::math::vec2::Vec2;
use crate::projection::Viewport;

/// Screen coordinates are clamped to +/- 2^24 pixels before snapping.
///
/// Only vertices right next to the eye plane project this far out; the clamp
/// keeps every edge-function product well inside `i64`.
const GUARD_BAND: f32 = 16_777_216.0;

/// An integer pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Snaps a screen-space position to the pixel grid.
    pub fn from_screen(v: Vec2) -> Self {
        let snap = |c: f32| c.clamp(-GUARD_BAND, GUARD_BAND).floor() as i64;
        Self::new(snap(v.x), snap(v.y))
    }
}

/// 2D cross product of `ab` and `ap`: twice the signed area of triangle (a, b, p).
#[inline]
pub fn edge_cross(a: Point, b: Point, p: Point) -> i64 {
    let ab = (b.x - a.x, b.y - a.y);
    let ap = (p.x - a.x, p.y - a.y);
    ab.0 * ap.1 - ab.1 * ap.0
}

/// True for edges that own the pixels lying exactly on them.
#[inline]
pub fn is_top_or_left(start: Point, end: Point) -> bool {
    let edge = (end.x - start.x, end.y - start.y);

    let is_top = edge.1 == 0 && edge.0 > 0;
    let is_left = edge.1 < 0;

    is_top || is_left
}

#[inline]
fn fill_bias(start: Point, end: Point) -> i64 {
    if is_top_or_left(start, end) {
        0
    } else {
        -1
    }
}

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// Axis-aligned bounds of the triangle, clamped to the viewport.
///
/// Returns `None` if the triangle lies entirely off screen.
pub fn bounding_box(points: [Point; 3], viewport: Viewport) -> Option<BoundingBox> {
    if viewport.width == 0 || viewport.height == 0 {
        return None;
    }

    let xs = points.map(|p| p.x);
    let ys = points.map(|p| p.y);
    let min_x = xs.iter().copied().min()?.max(0);
    let min_y = ys.iter().copied().min()?.max(0);
    let max_x = xs.iter().copied().max()?.min(viewport.width as i64 - 1);
    let max_y = ys.iter().copied().max()?.min(viewport.height as i64 - 1);

    if min_x > max_x || min_y > max_y {
        return None;
    }

    Some(BoundingBox {
        min_x: min_x as u32,
        min_y: min_y as u32,
        max_x: max_x as u32,
        max_y: max_y as u32,
    })
}

/// Calls `visit(x, y, weights)` for every pixel covered by the triangle.
///
/// Returns false, without visiting anything, when the snapped triangle has
/// zero area.
pub fn scan_triangle<F>(points: [Vec2; 3], viewport: Viewport, mut visit: F) -> bool
where
    F: FnMut(u32, u32, [f32; 3]),
{
    let [v0, v1, v2] = points.map(Point::from_screen);

    let area = edge_cross(v0, v1, v2);
    if area == 0 {
        return false;
    }

    let Some(bounds) = bounding_box([v0, v1, v2], viewport) else {
        return true;
    };

    let bias01 = fill_bias(v0, v1);
    let bias12 = fill_bias(v1, v2);
    let bias20 = fill_bias(v2, v0);
    let inv_area = 1.0 / area as f32;

    for y in bounds.min_y..=bounds.max_y {
        for x in bounds.min_x..=bounds.max_x {
            let p = Point::new(x as i64, y as i64);

            let e01 = edge_cross(v0, v1, p);
            let e12 = edge_cross(v1, v2, p);
            let e20 = edge_cross(v2, v0, p);

            let inside = e01 + bias01 >= 0 && e12 + bias12 >= 0 && e20 + bias20 >= 0;
            if !inside {
                continue;
            }

            let weights = [
                e12 as f32 * inv_area,
                e20 as f32 * inv_area,
                e01 as f32 * inv_area,
            ];
            visit(x, y, weights);
        }
    }

    true
}
