use core::cmp::Ordering;

use log::debug;

use super::*;

/// Which way an arc turns, going from its start bearing to its end bearing.
///
/// An arc is [`ArcSide::Left`] if, going clockwise from its start, one meets
/// the arc's control point before its end, and [`ArcSide::Right`] otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArcSide {
    Left,
    Right,
}

impl ArcSide {
    /// Classifies `probe` against the (start, end) pair of bearings, in degrees.
    ///
    /// Returns `None` if two of the three bearings are equal.
    #[must_use]
    pub fn classify(start: Float, end: Float, probe: Float) -> Option<Self> {
        let (s, e, p) = (start, end, probe);

        if s == e || s == p || e == p {
            return None;
        }

        Some(
            if (s > e && e > p) || (e > p && p > s) || (p > s && s > e) {
                Self::Right
            } else {
                Self::Left
            },
        )
    }
}

/// A circular arc, bearings are in degrees, see [`geometry::bearing_degrees`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    center: Point,
    radius: Float,
    start: Float,
    end: Float,
    side: ArcSide,
}

impl Arc {
    #[inline]
    #[must_use]
    pub const fn center(&self) -> &Point {
        &self.center
    }

    #[inline]
    #[must_use]
    pub const fn radius(&self) -> Float {
        self.radius
    }

    /// Bearing of the first endpoint, seen from the center.
    #[inline]
    #[must_use]
    pub const fn start_bearing(&self) -> Float {
        self.start
    }

    /// Bearing of the second endpoint, seen from the center.
    #[inline]
    #[must_use]
    pub const fn end_bearing(&self) -> Float {
        self.end
    }

    #[inline]
    #[must_use]
    pub const fn side(&self) -> ArcSide {
        self.side
    }

    /// Whether the point of the circle at bearing `bearing` is on the arc, endpoints included.
    #[inline]
    #[must_use]
    pub fn contains_bearing(&self, bearing: Float) -> bool {
        match ArcSide::classify(self.start, self.end, bearing) {
            Some(side) => side == self.side,
            None => bearing == self.start || bearing == self.end,
        }
    }

    /// Bearings `(from, to)` such that the arc goes counterclockwise from `from` to `to`.
    #[inline]
    #[must_use]
    pub const fn sweep(&self) -> (Float, Float) {
        match self.side {
            ArcSide::Right => (self.start, self.end),
            ArcSide::Left => (self.end, self.start),
        }
    }
}

/// The shape a [`CurvedMirror`]'s defining points resolve to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurvedShape {
    Arc(Arc),
    /// Collinear points, the control point between the endpoints: the segment between them.
    Flat,
    /// Collinear points, the control point outside the endpoints: two half-lines,
    /// each starting at an endpoint and heading away from the other.
    Open,
}

/// A mirror shaped like the arc of the circle going through three points.
///
/// The arc goes from `point1` to `point2`, passing through `control`.
/// The resolved [`CurvedShape`] is recomputed by every method changing these points.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvedMirror {
    /// `[point1, point2, control]`
    points: [Point; 3],
    eps: Epsilon,
    shape: CurvedShape,
    pub appearance: Appearance,
}

impl CurvedMirror {
    #[must_use]
    pub fn new(
        point1: impl Into<Point>,
        point2: impl Into<Point>,
        control: impl Into<Point>,
    ) -> Self {
        let points = [point1.into(), point2.into(), control.into()];
        let eps = Epsilon::DEFAULT;

        Self {
            points,
            eps,
            shape: Self::resolve(&points, eps),
            appearance: Appearance::MIRROR,
        }
    }

    /// Sets the step used to quantize the center and radius.
    #[must_use]
    pub fn with_epsilon(mut self, eps: Epsilon) -> Self {
        self.eps = eps;
        self.update();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn point1(&self) -> &Point {
        &self.points[0]
    }

    #[inline]
    #[must_use]
    pub const fn point2(&self) -> &Point {
        &self.points[1]
    }

    #[inline]
    #[must_use]
    pub const fn control(&self) -> &Point {
        &self.points[2]
    }

    /// `[point1, point2, control]`
    #[inline]
    #[must_use]
    pub const fn points(&self) -> &[Point; 3] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> &CurvedShape {
        &self.shape
    }

    #[inline]
    pub fn set_point1(&mut self, p: impl Into<Point>) {
        self.edit(|[p1, _, _]| *p1 = p.into());
    }

    #[inline]
    pub fn set_point2(&mut self, p: impl Into<Point>) {
        self.edit(|[_, p2, _]| *p2 = p.into());
    }

    #[inline]
    pub fn set_control(&mut self, p: impl Into<Point>) {
        self.edit(|[_, _, c]| *c = p.into());
    }

    #[inline]
    pub fn set_points(&mut self, points: [Point; 3]) {
        self.edit(|p| *p = points);
    }

    /// Gives mutable access to `[point1, point2, control]`, then recomputes the shape.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut [Point; 3]) -> R) -> R {
        let ret = f(&mut self.points);
        self.update();
        ret
    }

    fn update(&mut self) {
        let shape = Self::resolve(&self.points, self.eps);

        if core::mem::discriminant(&shape) != core::mem::discriminant(&self.shape) {
            debug!("curved mirror {:?} changed shape to {shape:?}", self.points);
        }

        self.shape = shape;
    }

    fn resolve(points: &[Point; 3], eps: Epsilon) -> CurvedShape {
        let [p1, p2, control] = points;

        let Some(center) = geometry::center_of_curvature(p1, p2, control, eps) else {
            return if geometry::within_box(control, p1, p2, eps) {
                CurvedShape::Flat
            } else {
                CurvedShape::Open
            };
        };

        let bearing = |p: &Point| geometry::bearing_degrees(geometry::angle_of(&center, p));
        let (start, end) = (bearing(p1), bearing(p2));

        CurvedShape::Arc(Arc {
            center,
            radius: geometry::distance(&center, p1, eps),
            start,
            end,
            // equal bearings only happen with coinciding points, any side will do
            side: ArcSide::classify(start, end, bearing(control)).unwrap_or(ArcSide::Left),
        })
    }

    fn reflect_on_arc(arc: &Arc, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        let eps = ctx.eps();
        let center = arc.center();

        let hits = geometry::circle_intersections(center, arc.radius(), &ray.line(), eps);

        let travel = |p: &Point| {
            let d = ctx.distance(&ray.origin, p);
            if d < ctx.min_travel() {
                Float::INFINITY
            } else {
                d
            }
        };

        let point = hits
            .into_iter()
            .filter(|p| {
                arc.contains_bearing(geometry::bearing_degrees(geometry::angle_of(center, p)))
                    && ray.is_ahead(p)
            })
            .reduce(|closest, p| match travel(&p).partial_cmp(&travel(&closest)) {
                Some(Ordering::Less) => p,
                _ => closest,
            })
            .filter(|p| !ctx.is_self_hit(ray, p))?;

        let angle =
            2.0 * (geometry::angle_of(&point, center) - geometry::angle_of(&point, &ray.origin));

        Some(Reflection::new(
            point,
            geometry::rotate_point(&ray.origin, angle, &point, eps),
        ))
    }

    fn reflect_on_halflines(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        let [p1, p2, _] = &self.points;
        let bounds = ctx.bounds();
        let eps = ctx.eps();

        let half_line = |from: &Point, away: &Point| {
            PlaneMirror::new(*from, bounds.exit_point(from, &(from * 2.0 - away), eps))
        };

        half_line(p1, p2)
            .reflect(ray, ctx)
            .or_else(|| half_line(p2, p1).reflect(ray, ctx))
    }
}

impl Mirror for CurvedMirror {
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        match &self.shape {
            CurvedShape::Arc(arc) => Self::reflect_on_arc(arc, ray, ctx),
            CurvedShape::Flat => PlaneMirror::new(self.points[0], self.points[1]).reflect(ray, ctx),
            CurvedShape::Open => self.reflect_on_halflines(ray, ctx),
        }
    }
}

impl Random for CurvedMirror {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self::new(
            rand_vect(rng, MAX_COORD_MAG),
            rand_vect(rng, MAX_COORD_MAG),
            rand_vect(rng, MAX_COORD_MAG),
        )
    }
}
