//! Plane geometry on slope/intercept line forms.
//!
//! Angles follow the convention of [`angle_of`]: `atan2(Δx, Δy)`, that is, measured from
//! the positive `y` axis, clockwise. [`rotate_point`] rotates clockwise so that both compose.
//!
//! Every routine producing coordinates quantizes them with an [`Epsilon`], keeping the
//! floating point noise of long bounce chains from piling up.

use arrayvec::ArrayVec;

use crate::{ConfigError, Float, Point};

/// Step to which computed coordinates are rounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Epsilon(Float);

impl Epsilon {
    pub const DEFAULT: Self = Self(1e-4);

    /// Returns an error if `step` isn't finite and strictly positive.
    #[inline]
    pub fn new(step: Float) -> Result<Self, ConfigError> {
        if step.is_finite() && step > 0.0 {
            Ok(Self(step))
        } else {
            Err(ConfigError::InvalidEpsilon(step))
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> Float {
        self.0
    }

    /// Rounds `x` to the nearest multiple of `self`
    #[inline]
    #[must_use]
    pub fn quantize(self, x: Float) -> Float {
        (x / self.0).round() * self.0
    }

    #[inline]
    #[must_use]
    pub fn quantize_point(self, p: Point) -> Point {
        p.map(|c| self.quantize(c))
    }
}

impl Default for Epsilon {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The slope of a line, vertical lines having none.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slope {
    Vertical,
    Finite(Float),
}

/// A line in slope/intercept form.
///
/// `intercept` is the `y` intercept, or, for [`Slope::Vertical`] lines, the constant `x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub slope: Slope,
    pub intercept: Float,
}

impl Line {
    #[inline]
    #[must_use]
    pub fn new(slope: Slope, point: &Point) -> Self {
        Self {
            slope,
            intercept: intercept_of(slope, point),
        }
    }

    /// The line through `p1` and `p2`. Vertical if both share the same `x`, including `p1 == p2`.
    #[inline]
    #[must_use]
    pub fn through(p1: &Point, p2: &Point) -> Self {
        Self::new(slope_of(p1, p2), p1)
    }
}

#[inline]
#[must_use]
pub fn slope_of(p1: &Point, p2: &Point) -> Slope {
    let dx = p2.x - p1.x;
    if dx == 0.0 {
        Slope::Vertical
    } else {
        Slope::Finite((p2.y - p1.y) / dx)
    }
}

#[inline]
#[must_use]
pub fn intercept_of(slope: Slope, point: &Point) -> Float {
    match slope {
        Slope::Vertical => point.x,
        Slope::Finite(m) => point.y - m * point.x,
    }
}

#[inline]
#[must_use]
pub fn perpendicular_slope(slope: Slope) -> Slope {
    match slope {
        Slope::Vertical => Slope::Finite(0.0),
        Slope::Finite(m) if m == 0.0 => Slope::Vertical,
        Slope::Finite(m) => Slope::Finite(-m.recip()),
    }
}

/// The unique intersection point of two lines.
///
/// Returns `None` if both are vertical or share the same slope (parallel or coincident).
#[must_use]
pub fn line_intersection(l1: &Line, l2: &Line, eps: Epsilon) -> Option<Point> {
    let (x, y) = match (l1.slope, l2.slope) {
        (Slope::Vertical, Slope::Vertical) => return None,
        (Slope::Vertical, Slope::Finite(m)) => (l1.intercept, m.mul_add(l1.intercept, l2.intercept)),
        (Slope::Finite(m), Slope::Vertical) => (l2.intercept, m.mul_add(l2.intercept, l1.intercept)),
        (Slope::Finite(m1), Slope::Finite(m2)) => {
            if m1 - m2 == 0.0 {
                return None;
            }
            let x = (l1.intercept - l2.intercept) / (m2 - m1);
            (x, m1.mul_add(x, l1.intercept))
        }
    };

    Some(eps.quantize_point(Point::new(x, y)))
}

/// The points where `line` crosses the circle of radius `radius` centered at `center`.
///
/// Empty if they don't meet, a single point if `line` is exactly tangent.
#[must_use]
pub fn circle_intersections(
    center: &Point,
    radius: Float,
    line: &Line,
    eps: Epsilon,
) -> ArrayVec<Point, 2> {
    let (h, k) = (center.x, center.y);
    let b = line.intercept;
    let mut points = ArrayVec::new();

    match line.slope {
        Slope::Vertical => {
            let dx = b - h;
            let delta = radius.mul_add(radius, -dx * dx);

            if delta == 0.0 {
                points.push(Point::new(b, k));
            } else if delta > 0.0 {
                let root = delta.sqrt();
                points.push(Point::new(b, k + root));
                points.push(Point::new(b, k - root));
            }
        }
        Slope::Finite(m) => {
            // substituting `y = m * x + b` in `(x - h)^2 + (y - k)^2 = r^2`
            let qa = m.mul_add(m, 1.0);
            let qb = 2.0 * m * (b - k) - 2.0 * h;
            let qc = h * h + (b - k) * (b - k) - radius * radius;

            let delta = qb.mul_add(qb, -4.0 * qa * qc);

            if delta == 0.0 {
                let x = -qb / (2.0 * qa);
                points.push(Point::new(x, m.mul_add(x, b)));
            } else if delta > 0.0 {
                let root = delta.sqrt();
                for x in [(-qb + root) / (2.0 * qa), (-qb - root) / (2.0 * qa)] {
                    points.push(Point::new(x, m.mul_add(x, b)));
                }
            }
        }
    }

    for p in &mut points {
        *p = eps.quantize_point(*p);
    }

    points
}

/// Rotates `point` clockwise around `pivot` by `angle` radians.
#[must_use]
pub fn rotate_point(point: &Point, angle: Float, pivot: &Point, eps: Epsilon) -> Point {
    let (sin, cos) = angle.sin_cos();
    let v = point - pivot;

    let rotated = Point::new(v.x * cos + v.y * sin, -v.x * sin + v.y * cos);

    eps.quantize_point(rotated + pivot)
}

/// `atan2(Δx, Δy)`: the clockwise angle, in radians, from the positive `y` axis
/// to the vector going from `p1` to `p2`.
#[inline]
#[must_use]
pub fn angle_of(p1: &Point, p2: &Point) -> Float {
    (p2.x - p1.x).atan2(p2.y - p1.y)
}

/// Maps an angle returned by [`angle_of`] to degrees in `[0, 360)`, measured
/// counter-clockwise from the positive `x` axis.
#[inline]
#[must_use]
pub fn bearing_degrees(angle: Float) -> Float {
    (90.0 - angle.to_degrees()).rem_euclid(360.0)
}

#[inline]
#[must_use]
pub fn distance(p1: &Point, p2: &Point, eps: Epsilon) -> Float {
    eps.quantize((p1 - p2).norm())
}

#[inline]
#[must_use]
pub fn midpoint(p1: &Point, p2: &Point) -> Point {
    (p1 + p2) / 2.0
}

/// Whether `p` lies in the axis aligned box spanned by `a` and `b`, padded by `eps`.
#[inline]
#[must_use]
pub fn within_box(p: &Point, a: &Point, b: &Point, eps: Epsilon) -> bool {
    let e = eps.get();

    a.x.min(b.x) - e <= p.x
        && p.x <= a.x.max(b.x) + e
        && a.y.min(b.y) - e <= p.y
        && p.y <= a.y.max(b.y) + e
}

/// Whether `p` is not behind a ray starting at `origin` and aimed at `aim`.
///
/// `p` is behind if, on either axis, `origin` lies strictly between it and `aim`.
#[inline]
#[must_use]
pub fn is_ahead(origin: &Point, aim: &Point, p: &Point) -> bool {
    let behind = |p: Float, o: Float, a: Float| (p < o && o < a) || (p > o && o > a);

    !(behind(p.x, origin.x, aim.x) || behind(p.y, origin.y, aim.y))
}

/// The center of the circle through `p1`, `p2` and `p3`.
///
/// Returns `None` if the three points are collinear.
#[must_use]
pub fn center_of_curvature(p1: &Point, p2: &Point, p3: &Point, eps: Epsilon) -> Option<Point> {
    let bisector = |a: &Point| Line::new(perpendicular_slope(slope_of(a, p3)), &midpoint(a, p3));

    line_intersection(&bisector(p1), &bisector(p2), eps)
}

/// An axis aligned rectangle delimiting the scene, rays leaving it are no longer traced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Returns an error if a coordinate isn't finite, or `min` exceeds `max` on some axis.
    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> Result<Self, ConfigError> {
        let (min, max) = (min.into(), max.into());

        let valid = min.iter().chain(max.iter()).all(|c| c.is_finite())
            && min.x <= max.x
            && min.y <= max.y;

        if valid {
            Ok(Self { min, max })
        } else {
            Err(ConfigError::InvalidBounds {
                min_x: min.x,
                min_y: min.y,
                max_x: max.x,
                max_y: max.y,
            })
        }
    }

    /// A `width` by `height` rectangle centered on the origin.
    #[inline]
    pub fn centered(width: Float, height: Float) -> Result<Self, ConfigError> {
        let half = Point::new(width, height) / 2.0;
        Self::new(-half, half)
    }

    #[inline]
    #[must_use]
    pub const fn min(&self) -> &Point {
        &self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> &Point {
        &self.max
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    /// The point where the ray starting at `origin`, aimed at `aim`, leaves `self`.
    ///
    /// Returns `origin` if `aim == origin` or if the ray is outside and moving away.
    #[must_use]
    pub fn exit_point(&self, origin: &Point, aim: &Point, eps: Epsilon) -> Point {
        let dir = aim - origin;

        let edge_distance = |d: Float, o: Float, lo: Float, hi: Float| {
            if d > 0.0 {
                Some((hi - o) / d)
            } else if d < 0.0 {
                Some((lo - o) / d)
            } else {
                None
            }
        };

        let t = [
            edge_distance(dir.x, origin.x, self.min.x, self.max.x),
            edge_distance(dir.y, origin.y, self.min.y, self.max.y),
        ]
        .into_iter()
        .flatten()
        .reduce(Float::min);

        match t {
            Some(t) => eps.quantize_point(origin + dir * t.max(0.0)),
            None => *origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    const EPS: Epsilon = Epsilon::DEFAULT;

    fn pt(x: Float, y: Float) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn quantize_rounds_to_step() {
        assert_relative_eq!(EPS.quantize(1.234_56), 1.2346, epsilon = 1e-12);
        assert_relative_eq!(EPS.quantize(-0.000_04), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn epsilon_rejects_invalid_steps() {
        assert!(Epsilon::new(1e-3).is_ok());
        assert_eq!(Epsilon::new(0.0), Err(ConfigError::InvalidEpsilon(0.0)));
        assert!(Epsilon::new(-1.0).is_err());
        assert!(Epsilon::new(Float::NAN).is_err());
    }

    #[test]
    fn slope_of_equal_x_is_vertical() {
        assert_eq!(slope_of(&pt(3.0, 1.0), &pt(3.0, -7.0)), Slope::Vertical);
        assert_eq!(slope_of(&pt(0.0, 0.0), &pt(2.0, 1.0)), Slope::Finite(0.5));
    }

    #[test]
    fn intercept_of_vertical_is_constant_x() {
        assert_eq!(intercept_of(Slope::Vertical, &pt(4.0, 9.0)), 4.0);
        assert_eq!(intercept_of(Slope::Finite(2.0), &pt(1.0, 5.0)), 3.0);
    }

    #[test]
    fn perpendicular_slope_swaps_horizontal_and_vertical() {
        assert_eq!(perpendicular_slope(Slope::Vertical), Slope::Finite(0.0));
        assert_eq!(perpendicular_slope(Slope::Finite(0.0)), Slope::Vertical);
        assert_eq!(perpendicular_slope(Slope::Finite(2.0)), Slope::Finite(-0.5));
    }

    #[test]
    fn line_intersection_handles_vertical_lines() {
        let vertical = Line::through(&pt(2.0, -5.0), &pt(2.0, 5.0));
        let diagonal = Line::through(&pt(0.0, 0.0), &pt(1.0, 1.0));

        let p = line_intersection(&vertical, &diagonal, EPS).unwrap();
        assert_abs_diff_eq!(p, pt(2.0, 2.0), epsilon = 1e-9);

        let q = line_intersection(&diagonal, &vertical, EPS).unwrap();
        assert_abs_diff_eq!(q, p);
        assert_eq!(line_intersection(&vertical, &vertical, EPS), None);
    }

    #[test]
    fn line_intersection_rejects_parallel_lines() {
        let a = Line::through(&pt(0.0, 0.0), &pt(1.0, 1.0));
        let b = Line::through(&pt(0.0, 3.0), &pt(1.0, 4.0));

        assert_eq!(line_intersection(&a, &b, EPS), None);
        assert_eq!(line_intersection(&a, &a, EPS), None);
    }

    #[test]
    fn line_intersection_solves_general_case() {
        let a = Line::through(&pt(0.0, 1.0), &pt(1.0, 3.0));
        let b = Line::through(&pt(0.0, 4.0), &pt(1.0, 3.0));

        let p = line_intersection(&a, &b, EPS).unwrap();
        assert_abs_diff_eq!(p, pt(1.0, 3.0), epsilon = 1e-9);
    }

    #[test]
    fn circle_intersections_with_vertical_line() {
        let line = Line::through(&pt(3.0, 0.0), &pt(3.0, 1.0));
        let points = circle_intersections(&pt(0.0, 0.0), 5.0, &line, EPS);

        assert_eq!(points.len(), 2);
        assert_abs_diff_eq!(points[0], pt(3.0, 4.0), epsilon = 1e-9);
        assert_abs_diff_eq!(points[1], pt(3.0, -4.0), epsilon = 1e-9);
    }

    #[test]
    fn circle_intersections_tangent_and_miss() {
        let tangent = Line::new(Slope::Finite(0.0), &pt(0.0, 2.0));
        let points = circle_intersections(&pt(0.0, 0.0), 2.0, &tangent, EPS);
        assert_eq!(points.len(), 1);
        assert_abs_diff_eq!(points[0], pt(0.0, 2.0), epsilon = 1e-9);

        let miss = Line::new(Slope::Finite(0.0), &pt(0.0, 3.0));
        assert!(circle_intersections(&pt(0.0, 0.0), 2.0, &miss, EPS).is_empty());

        let vertical_miss = Line::new(Slope::Vertical, &pt(10.0, 0.0));
        assert!(circle_intersections(&pt(0.0, 0.0), 2.0, &vertical_miss, EPS).is_empty());
    }

    #[test]
    fn circle_intersections_lie_on_circle() {
        let center = pt(-41.8421, 12.5);
        let radius = 331.842;

        for (a, b) in [
            (pt(-300.0, 0.0), pt(-200.0, 7.0)),
            (pt(10.0, -400.0), pt(12.0, 400.0)),
            (pt(-500.0, 500.0), pt(500.0, -480.0)),
        ] {
            let points = circle_intersections(&center, radius, &Line::through(&a, &b), EPS);
            assert_eq!(points.len(), 2);

            for p in points {
                assert_abs_diff_eq!((p - center).norm(), radius, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn rotate_point_is_clockwise() {
        let p = rotate_point(&pt(1.0, 0.0), FRAC_PI_2, &pt(0.0, 0.0), EPS);
        assert_abs_diff_eq!(p, pt(0.0, -1.0), epsilon = 1e-9);

        let p = rotate_point(&pt(3.0, 2.0), PI, &pt(2.0, 2.0), EPS);
        assert_abs_diff_eq!(p, pt(1.0, 2.0), epsilon = 1e-9);
    }

    #[test]
    fn angle_of_is_measured_from_y_axis() {
        let o = pt(0.0, 0.0);

        assert_relative_eq!(angle_of(&o, &pt(0.0, 1.0)), 0.0, epsilon = 1e-12);
        assert_relative_eq!(angle_of(&o, &pt(1.0, 0.0)), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(angle_of(&o, &pt(-1.0, 0.0)), -FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn rotating_by_an_angle_difference_composes() {
        let pivot = pt(5.0, -2.0);
        let from = pt(8.0, 2.0);
        let to = pt(1.0, -5.0);

        let rotated = rotate_point(&from, angle_of(&pivot, &to) - angle_of(&pivot, &from), &pivot, EPS);

        assert_abs_diff_eq!(rotated, to, epsilon = 1e-3);
    }

    #[test]
    fn bearings_are_counter_clockwise_from_x_axis() {
        let o = pt(0.0, 0.0);

        let bearing = |x, y| bearing_degrees(angle_of(&o, &pt(x, y)));

        assert_abs_diff_eq!(bearing(1.0, 0.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(0.0, 1.0), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(-1.0, 0.0), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bearing(0.0, -1.0), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn within_box_is_inclusive_and_padded() {
        let (a, b) = (pt(0.0, 100.0), pt(0.0, -100.0));

        assert!(within_box(&pt(0.0, 100.0), &a, &b, EPS));
        assert!(within_box(&pt(0.000_05, 0.0), &a, &b, EPS));
        assert!(!within_box(&pt(0.0, 100.1), &a, &b, EPS));
    }

    #[test]
    fn is_ahead_rejects_points_behind_origin() {
        let (o, aim) = (pt(0.0, 0.0), pt(1.0, 0.0));

        assert!(is_ahead(&o, &aim, &pt(10.0, 0.0)));
        assert!(!is_ahead(&o, &aim, &pt(-10.0, 0.0)));
        assert!(!is_ahead(&o, &pt(1.0, 1.0), &pt(5.0, -5.0)));
    }

    #[test]
    fn center_of_curvature_of_three_points() {
        let center =
            center_of_curvature(&pt(0.0, 1.0), &pt(0.0, -1.0), &pt(1.0, 0.0), EPS).unwrap();
        assert_abs_diff_eq!(center, pt(0.0, 0.0), epsilon = 1e-9);

        let collinear = center_of_curvature(&pt(0.0, 1.0), &pt(0.0, -1.0), &pt(0.0, 0.0), EPS);
        assert_eq!(collinear, None);
    }

    #[test]
    fn bounds_validation() {
        assert!(Bounds::centered(800.0, 600.0).is_ok());
        assert!(Bounds::new([1.0, 0.0], [0.0, 1.0]).is_err());
        assert!(Bounds::centered(Float::INFINITY, 1.0).is_err());
    }

    #[test]
    fn exit_point_hits_first_edge() {
        let bounds = Bounds::centered(800.0, 600.0).unwrap();

        let right = bounds.exit_point(&pt(0.0, 0.0), &pt(1.0, 0.0), EPS);
        assert_abs_diff_eq!(right, pt(400.0, 0.0), epsilon = 1e-9);

        let up = bounds.exit_point(&pt(10.0, 0.0), &pt(10.0, 1.0), EPS);
        assert_abs_diff_eq!(up, pt(10.0, 300.0), epsilon = 1e-9);

        let diagonal = bounds.exit_point(&pt(0.0, 0.0), &pt(-1.0, -1.0), EPS);
        assert_abs_diff_eq!(diagonal, pt(-300.0, -300.0), epsilon = 1e-9);

        let still = bounds.exit_point(&pt(3.0, 3.0), &pt(3.0, 3.0), EPS);
        assert_eq!(still, pt(3.0, 3.0));
    }
}
