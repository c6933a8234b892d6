//! Stroke tessellation: polyline to ribbon.
//!
//! A ribbon holds two offset points per path point, left then right with respect to the
//! direction of travel. Consecutive pairs form the quads drawn by the renderer, so the ribbon
//! of a path always has exactly `2 * points.len()` entries and degenerate input (coincident
//! points, hairpin turns) is resolved by substitution, never by producing NaN.

use crate::geom::{EPSILON, Point, Vector, perp, unit, vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI, SQRT_2};

/// Below this, `sin(half-angle)` of a miter is treated as a hairpin and the join is skipped.
const MIN_MITER_SIN: f64 = 1e-6;

/// Longest allowed miter, as a multiple of the half-width (SVG's default `stroke-miterlimit`).
/// Sharper corners get a square join across the incoming segment instead.
pub const MITER_LIMIT: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStyle {
    /// Constant-width miter joins. The canonical strategy.
    #[default]
    Miter,
    /// Cheaper approximation: angle-averaged joins and fixed 45° end caps.
    ///
    /// Cap corners stick out diagonally past the path endpoints.
    Bevel,
}

/// Converts a path into a [`StrokeRibbon`].
pub trait Tessellator {
    fn tessellate(&self, points: &[Point], width: f64) -> StrokeRibbon;
}

impl Tessellator for JoinStyle {
    fn tessellate(&self, points: &[Point], width: f64) -> StrokeRibbon {
        match self {
            JoinStyle::Miter => miter_ribbon(points, width),
            JoinStyle::Bevel => bevel_ribbon(points, width),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeRibbon {
    points: Vec<Point>,
}

impl StrokeRibbon {
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Left boundary at path point `i`.
    pub fn left(&self, i: usize) -> Option<Point> {
        self.points.get(2 * i).copied()
    }

    /// Right boundary at path point `i`.
    pub fn right(&self, i: usize) -> Option<Point> {
        self.points.get(2 * i + 1).copied()
    }

    /// `(left, right)` per path point.
    pub fn pairs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.chunks_exact(2).map(|c| (c[0], c[1]))
    }

    fn push_pair(&mut self, left: Point, right: Point) {
        self.points.push(left);
        self.points.push(right);
    }

    /// Repeats the last pair. Only called after at least one pair was pushed.
    fn repeat_last_pair(&mut self) {
        if let [.., left, right] = self.points[..] {
            self.push_pair(left, right);
        }
    }
}

/// Direction of the end segment at `points[i]` (`i` is the first or last index).
///
/// Coincident neighbors are skipped until a non-zero segment is found; a path whose points
/// all coincide points along +x.
fn end_direction(points: &[Point], i: usize) -> Vector {
    let p = points[i];
    let found = if i == 0 {
        points[1..].iter().find_map(|q| unit(*q - p))
    } else {
        points[..i].iter().rev().find_map(|q| unit(p - *q))
    };
    found.unwrap_or_else(|| vector(1.0, 0.0))
}

/// Left/right miter points at `p`, or `None` for a degenerate join.
fn miter_join(prev: Point, p: Point, next: Point, half: f64) -> Option<(Point, Point)> {
    let to_prev = unit(prev - p)?;
    let to_next = unit(next - p)?;
    let travel = -to_prev;

    let Some(miter) = unit(to_prev + to_next) else {
        // Neighbors on opposite sides: the path runs straight through `p`.
        let normal = perp(travel) * half;
        return Some((p + normal, p - normal));
    };

    // The miter bisects the corner, so its angle to either segment is the half-angle.
    let sin_half = to_prev.cross(miter).abs();
    if sin_half < MIN_MITER_SIN {
        return None;
    }
    if sin_half * MITER_LIMIT < 1.0 {
        tracing::trace!(sin_half, "miter limit exceeded, squaring the join");
        let normal = perp(travel) * half;
        return Some((p + normal, p - normal));
    }
    let offset = miter * (half / sin_half);
    if travel.cross(miter) > 0.0 {
        Some((p + offset, p - offset))
    } else {
        Some((p - offset, p + offset))
    }
}

/// Ribbon with constant-width miter joins.
///
/// End points are offset by `width / 2` along the normal of their segment. Interior joins are
/// pushed along the corner bisector by `width / (2 sin(half-angle))`, up to [`MITER_LIMIT`]
/// half-widths. A zero-length neighbor segment or a hairpin turn repeats the previous pair
/// instead.
pub fn miter_ribbon(points: &[Point], width: f64) -> StrokeRibbon {
    let n = points.len();
    let half = width / 2.0;
    let mut ribbon = StrokeRibbon {
        points: Vec::with_capacity(2 * n),
    };

    for (i, &p) in points.iter().enumerate() {
        if i == 0 || i + 1 == n {
            let normal = perp(end_direction(points, i)) * half;
            ribbon.push_pair(p + normal, p - normal);
            continue;
        }
        match miter_join(points[i - 1], p, points[i + 1], half) {
            Some((left, right)) => ribbon.push_pair(left, right),
            None => {
                tracing::trace!(index = i, "degenerate miter join, repeating previous pair");
                ribbon.repeat_last_pair();
            }
        }
    }
    ribbon
}

fn polar(p: Point, r: f64, theta: f64) -> Point {
    p + vector(r * theta.cos(), r * theta.sin())
}

fn heading(d: Vector) -> f64 {
    d.y.atan2(d.x)
}

/// Ribbon with angle-averaged joins and square-ish caps rotated ±45° off the end segment.
pub fn bevel_ribbon(points: &[Point], width: f64) -> StrokeRibbon {
    let n = points.len();
    let cap = width / SQRT_2;
    let mut ribbon = StrokeRibbon {
        points: Vec::with_capacity(2 * n),
    };

    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            let theta = heading(end_direction(points, i));
            ribbon.push_pair(
                polar(p, cap, theta + 3.0 * FRAC_PI_4),
                polar(p, cap, theta - 3.0 * FRAC_PI_4),
            );
            continue;
        }
        if i + 1 == n {
            let theta = heading(end_direction(points, i));
            ribbon.push_pair(
                polar(p, cap, theta + FRAC_PI_4),
                polar(p, cap, theta - FRAC_PI_4),
            );
            continue;
        }

        let d_in = p - points[i - 1];
        let d_out = points[i + 1] - p;
        let theta1 = heading(d_in);
        let theta2 = heading(d_out);
        let c = ((theta1 - theta2) / 2.0).cos();
        if d_in.length() <= EPSILON || d_out.length() <= EPSILON || c.abs() < MIN_MITER_SIN {
            tracing::trace!(index = i, "degenerate bevel join, repeating previous pair");
            ribbon.repeat_last_pair();
            continue;
        }
        let len = width / c / 2.0;
        ribbon.push_pair(
            polar(p, len, (theta1 + theta2 + PI) / 2.0),
            polar(p, len, (theta1 + theta2 - PI) / 2.0),
        );
    }
    ribbon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9
    }

    fn all_finite(ribbon: &StrokeRibbon) -> bool {
        ribbon
            .as_slice()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Signed distance of `q` from the infinite line through `a` and `b`, positive on the left.
    fn side_distance(a: Point, b: Point, q: Point) -> f64 {
        let d = (b - a).normalize();
        d.cross(q - a)
    }

    #[test]
    fn ribbon_has_two_points_per_path_point() {
        let path: Vec<Point> = (0..7)
            .map(|i| point(i as f64 * 10.0, ((i * 37) % 11) as f64))
            .collect();
        for style in [JoinStyle::Miter, JoinStyle::Bevel] {
            let ribbon = style.tessellate(&path, 3.0);
            assert_eq!(ribbon.len(), 14, "{style:?}");
            assert!(all_finite(&ribbon), "{style:?}");
        }
    }

    #[test]
    fn straight_path_gives_parallel_rails_one_width_apart() {
        let path = [point(0.0, 0.0), point(5.0, 5.0), point(10.0, 10.0)];
        let ribbon = miter_ribbon(&path, 4.0);
        let a = path[0];
        let b = path[2];
        for (left, right) in ribbon.pairs() {
            assert!(approx_eq(side_distance(a, b, left), 2.0));
            assert!(approx_eq(side_distance(a, b, right), -2.0));
            assert!(approx_eq((left - right).length(), 4.0));
        }
    }

    #[test]
    fn right_angle_miter_keeps_constant_width() {
        let path = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
        let ribbon = miter_ribbon(&path, 2.0);
        let left = ribbon.left(1).unwrap();
        let right = ribbon.right(1).unwrap();

        assert!(approx_eq((left - path[1]).length(), SQRT_2));
        for (a, b) in [(path[0], path[1]), (path[1], path[2])] {
            assert!(approx_eq(side_distance(a, b, left), 1.0));
            assert!(approx_eq(side_distance(a, b, right), -1.0));
        }
    }

    #[test]
    fn left_side_does_not_flip_across_an_inflection() {
        let path = [
            point(0.0, 0.0),
            point(10.0, 5.0),
            point(20.0, 0.0),
            point(30.0, -5.0),
            point(40.0, 0.0),
        ];
        let ribbon = miter_ribbon(&path, 2.0);
        for i in 0..path.len() - 1 {
            let (a, b) = (path[i], path[i + 1]);
            assert!(side_distance(a, b, ribbon.left(i).unwrap()) > 0.0, "left {i}");
            assert!(side_distance(a, b, ribbon.right(i).unwrap()) < 0.0, "right {i}");
            assert!(side_distance(a, b, ribbon.left(i + 1).unwrap()) > 0.0, "left {}", i + 1);
        }
    }

    #[test]
    fn coincident_tail_does_not_produce_nan() {
        let path = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 0.0)];
        for style in [JoinStyle::Miter, JoinStyle::Bevel] {
            let ribbon = style.tessellate(&path, 2.0);
            assert_eq!(ribbon.len(), 6);
            assert!(all_finite(&ribbon), "{style:?}: {ribbon:?}");
        }
        let ribbon = miter_ribbon(&path, 2.0);
        assert_eq!(ribbon.left(1), ribbon.left(0));
        assert_eq!(ribbon.left(2), Some(point(10.0, 1.0)));
    }

    #[test]
    fn hairpin_repeats_previous_pair() {
        let path = [point(0.0, 0.0), point(10.0, 0.0), point(0.0, 0.0)];
        let ribbon = miter_ribbon(&path, 2.0);
        assert!(all_finite(&ribbon));
        assert_eq!(ribbon.left(1), ribbon.left(0));
        assert_eq!(ribbon.right(1), ribbon.right(0));
    }

    #[test]
    fn sharp_corners_stay_within_the_miter_limit() {
        let path = [point(0.0, 0.0), point(10.0, 0.0), point(0.0, 1e-4)];
        let ribbon = miter_ribbon(&path, 2.0);
        assert_eq!(ribbon.left(1), Some(point(10.0, 1.0)));
        assert_eq!(ribbon.right(1), Some(point(10.0, -1.0)));

        // Fan of corners from nearly straight to nearly folded back.
        for deg in (5..180).step_by(5) {
            let turn = (deg as f64).to_radians();
            let corner = point(10.0, 0.0);
            let next = corner + vector(10.0 * turn.cos(), 10.0 * turn.sin());
            let ribbon = miter_ribbon(&[point(0.0, 0.0), corner, next], 2.0);
            for q in [ribbon.left(1).unwrap(), ribbon.right(1).unwrap()] {
                assert!((q - corner).length() <= MITER_LIMIT + 1e-9, "{deg}: {q:?}");
            }
        }
    }

    #[test]
    fn fully_collapsed_path_is_finite() {
        let path = [point(3.0, 3.0); 4];
        for style in [JoinStyle::Miter, JoinStyle::Bevel] {
            let ribbon = style.tessellate(&path, 2.0);
            assert_eq!(ribbon.len(), 8);
            assert!(all_finite(&ribbon), "{style:?}");
        }
    }

    #[test]
    fn bevel_rails_on_straight_path_are_one_width_apart() {
        let path = [point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0)];
        let ribbon = bevel_ribbon(&path, 3.0);
        for (left, right) in ribbon.pairs() {
            assert!(approx_eq(left.y, 1.5), "{left:?}");
            assert!(approx_eq(right.y, -1.5), "{right:?}");
        }
        assert!(approx_eq(ribbon.left(0).unwrap().x, -1.5));
        assert!(approx_eq(ribbon.left(2).unwrap().x, 21.5));
    }

    #[test]
    fn empty_and_single_point_paths() {
        assert!(miter_ribbon(&[], 1.0).is_empty());
        let ribbon = miter_ribbon(&[point(1.0, 1.0)], 2.0);
        assert_eq!(ribbon.as_slice(), &[point(1.0, 2.0), point(1.0, 0.0)]);
    }
}
