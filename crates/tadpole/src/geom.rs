pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Box2D = euclid::Box2D<f64, Unit>;

/// Lengths below this are treated as zero by the geometry code.
pub const EPSILON: f64 = 1e-9;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Left-hand normal of `d` (counter-clockwise quarter turn).
pub fn perp(d: Vector) -> Vector {
    vector(-d.y, d.x)
}

/// Unit vector along `d`, or `None` when `d` is (numerically) zero.
pub fn unit(d: Vector) -> Option<Vector> {
    let len = d.length();
    if len.is_finite() && len > EPSILON {
        Some(d / len)
    } else {
        None
    }
}

pub fn coincident(a: Point, b: Point) -> bool {
    a.x == b.x && a.y == b.y
}
