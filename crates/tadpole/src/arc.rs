//! Closed-form circular arc sampling.

use crate::geom::{Point, point};

pub const DEFAULT_DIVISION: usize = 50;

/// Samples `division + 1` points on the semicircle whose diameter is the chord `u`–`v`.
///
/// The sweep starts at the angle of `u` around the chord midpoint and always advances in the
/// direction of increasing angle, so swapping `u` and `v` mirrors the bend. Coincident
/// endpoints produce `division + 1` copies of that point. A `division` of zero is treated as
/// one. The first and last samples are exactly `u` and `v`.
pub fn arc_points(u: Point, v: Point, division: usize) -> Vec<Point> {
    let division = division.max(1);
    let cx = (u.x + v.x) / 2.0;
    let cy = (u.y + v.y) / 2.0;
    let theta0 = (u.y - cy).atan2(u.x - cx);
    let theta1 = (v.y - cy).atan2(v.x - cx);
    let d_theta = (theta1 - theta0).abs() / division as f64;
    let r = (v - u).length() / 2.0;

    let mut points = Vec::with_capacity(division + 1);
    points.push(u);
    for i in 1..division {
        let theta = d_theta * i as f64 + theta0;
        points.push(point(r * theta.cos() + cx, r * theta.sin() + cy));
    }
    points.push(v);
    points
}
