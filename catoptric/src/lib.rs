//! Light rays bouncing off mirrors in the plane.
//!
//! Mirror shapes implement [`Mirror`], light sources ([`LightRay`], [`ParallelBeam`])
//! are traced against them with [`simulate`], or all at once through a [`Scene`].
//! Results are plain plane-coordinate [`Path`]s, drawing them is left to the caller.

pub mod error;
pub mod geometry;
mod light;
mod scene;
mod sim;

pub use error::ConfigError;
pub use geometry::{Bounds, Epsilon, Line, Slope};
pub use light::*;
pub use scene::*;
pub use sim::*;

pub use nalgebra;

use core::ops::Deref;
use std::{rc::Rc, sync::Arc};

use nalgebra::SVector;

pub type Float = f64;

/// A point (or vector) of the plane.
pub type Point = SVector<Float, 2>;

/// A half-line, starting at `origin` and passing through `aim`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub aim: Point,
}

impl Ray {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Point>, aim: impl Into<Point>) -> Self {
        Self {
            origin: origin.into(),
            aim: aim.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Point {
        self.aim - self.origin
    }

    /// The (infinite) line carrying this ray.
    #[inline]
    #[must_use]
    pub fn line(&self) -> Line {
        Line::through(&self.origin, &self.aim)
    }

    /// See [`geometry::is_ahead`].
    #[inline]
    #[must_use]
    pub fn is_ahead(&self, p: &Point) -> bool {
        geometry::is_ahead(&self.origin, &self.aim, p)
    }
}

/// Where a ray hits a mirror, and the ray it bounces off as.
///
/// `outgoing.origin` is always `point`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reflection {
    pub point: Point,
    pub outgoing: Ray,
}

impl Reflection {
    #[inline]
    #[must_use]
    pub fn new(point: Point, outgoing_aim: Point) -> Self {
        Self {
            point,
            outgoing: Ray::new(point, outgoing_aim),
        }
    }
}

/// Numerical settings shared by every query of a simulation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationCtx {
    eps: Epsilon,
    /// Hits closer than this, on both axes, to a ray's origin are ignored
    min_travel: Float,
    bounds: Bounds,
}

impl SimulationCtx {
    pub const DEFAULT_MIN_TRAVEL: Float = 1.0;

    #[inline]
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            eps: Epsilon::DEFAULT,
            min_travel: Self::DEFAULT_MIN_TRAVEL,
            bounds,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_epsilon(self, eps: Epsilon) -> Self {
        Self { eps, ..self }
    }

    /// Sets the minimum distance a ray must travel before it can be reflected again.
    ///
    /// It is possible that a reflection point lands slightly "beyond" the mirror, due to
    /// roundoff errors, making the reflected ray bump into that same mirror right away.
    /// Intersections closer than `min_travel` to the ray's origin are discarded to avoid this.
    ///
    /// Returns an error if `min_travel` is negative or not finite.
    #[inline]
    pub fn with_min_travel(self, min_travel: Float) -> Result<Self, ConfigError> {
        if min_travel.is_finite() && min_travel >= 0.0 {
            Ok(Self { min_travel, ..self })
        } else {
            Err(ConfigError::InvalidMinTravel(min_travel))
        }
    }

    #[inline]
    #[must_use]
    pub fn with_bounds(self, bounds: Bounds) -> Self {
        Self { bounds, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn eps(&self) -> Epsilon {
        self.eps
    }

    #[inline]
    #[must_use]
    pub const fn min_travel(&self) -> Float {
        self.min_travel
    }

    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    #[must_use]
    pub fn distance(&self, p1: &Point, p2: &Point) -> Float {
        geometry::distance(p1, p2, self.eps)
    }

    /// Whether `p` is too close to `ray`'s origin to count as a new hit.
    #[inline]
    #[must_use]
    pub fn is_self_hit(&self, ray: &Ray, p: &Point) -> bool {
        let d = (p - ray.origin).abs();
        d.x < self.min_travel && d.y < self.min_travel
    }

    /// Returns whichever of `current` and `candidate` lies closest to `ray`'s origin,
    /// `current` winning ties.
    #[inline]
    #[must_use]
    pub fn nearest(
        &self,
        ray: &Ray,
        current: Option<Reflection>,
        candidate: Option<Reflection>,
    ) -> Option<Reflection> {
        match (current, candidate) {
            (Some(c), Some(n)) => Some(
                if self.distance(&ray.origin, &n.point) < self.distance(&ray.origin, &c.point) {
                    n
                } else {
                    c
                },
            ),
            (c, n) => c.or(n),
        }
    }
}

/// The core trait of this library.
///
/// This is the first trait to implement when creating a new mirror shape,
/// as it defines the behavior of that mirror, as a reflective curve.
pub trait Mirror {
    /// Returns the point where `ray` first hits this mirror, along with the reflected ray.
    ///
    /// Returns `None` if `ray` misses it, if the only intersections lie behind `ray`'s origin,
    /// or if they are too close to `ray`'s origin (see [`SimulationCtx::is_self_hit`]).
    ///
    /// This method is expected to be deterministic with respect to the ray, i. e. for every
    /// `ray`, calling it any number of times (without modifying `self` in between) returns
    /// the exact same result.
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection>;
}

use impl_trait_for_tuples::impl_for_tuples;

#[impl_for_tuples(1, 16)]
impl Mirror for T {
    for_tuples!( where #( T: Mirror )* );

    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        let mut closest = None;
        for_tuples!( #( closest = ctx.nearest(ray, closest, T.reflect(ray, ctx)); )* );
        closest
    }
}

/// Queries every mirror, the one hit closest to the ray wins, the first one in case of a tie.
impl<T: Mirror> Mirror for [T] {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        self.iter().fold(None, |closest, mirror| {
            ctx.nearest(ray, closest, mirror.reflect(ray, ctx))
        })
    }
}

impl<const N: usize, T: Mirror> Mirror for [T; N] {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        self.as_slice().reflect(ray, ctx)
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all types implementing `Deref`
// makes it impossible to implement it for new types downstream.

impl<T: Mirror + ?Sized> Mirror for Box<T> {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        self.deref().reflect(ray, ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for Arc<T> {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        self.deref().reflect(ray, ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for Rc<T> {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        self.deref().reflect(ray, ctx)
    }
}

impl<T: Mirror> Mirror for Vec<T> {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        self.as_slice().reflect(ray, ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for &T {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        (*self).reflect(ray, ctx)
    }
}

impl<T: Mirror + ?Sized> Mirror for &mut T {
    #[inline]
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        self.deref().reflect(ray, ctx)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    /// An infinite vertical mirror, reflecting horizontally.
    pub(crate) struct Wall(pub Float);

    impl Mirror for Wall {
        fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
            let wall = Line::new(Slope::Vertical, &Point::new(self.0, 0.0));
            let point = geometry::line_intersection(&ray.line(), &wall, ctx.eps())?;

            (ray.is_ahead(&point) && !ctx.is_self_hit(ray, &point)).then(|| {
                let mirrored = Point::new(2.0 * self.0 - ray.origin.x, ray.origin.y);
                Reflection::new(point, point + (point - mirrored))
            })
        }
    }

    pub(crate) fn ctx() -> SimulationCtx {
        SimulationCtx::new(Bounds::centered(1000.0, 1000.0).unwrap())
    }

    #[test]
    fn min_travel_validation() {
        assert!(ctx().with_min_travel(0.0).is_ok());
        assert_eq!(
            ctx().with_min_travel(-1.0),
            Err(ConfigError::InvalidMinTravel(-1.0))
        );
    }

    #[test]
    fn self_hits_are_detected_per_axis() {
        let ctx = ctx();
        let ray = Ray::new([0.0, 0.0], [1.0, 0.0]);

        assert!(ctx.is_self_hit(&ray, &Point::new(0.5, -0.5)));
        assert!(!ctx.is_self_hit(&ray, &Point::new(0.5, 1.5)));
    }

    #[test]
    fn slice_picks_closest_hit() {
        let ctx = ctx();
        let ray = Ray::new([0.0, 0.0], [1.0, 0.0]);

        let hit = [Wall(300.0), Wall(100.0), Wall(-50.0)].reflect(&ray, &ctx).unwrap();
        assert_abs_diff_eq!(hit.point, Point::new(100.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn ties_keep_first_mirror() {
        struct Tagged(Float, Float);

        impl Mirror for Tagged {
            fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
                Wall(self.0)
                    .reflect(ray, ctx)
                    .map(|r| Reflection::new(r.point, Point::new(self.1, self.1)))
            }
        }

        let ctx = ctx();
        let ray = Ray::new([0.0, 0.0], [1.0, 0.0]);

        let hit = vec![Tagged(100.0, 1.0), Tagged(100.0, 2.0)]
            .reflect(&ray, &ctx)
            .unwrap();
        assert_eq!(hit.outgoing.aim, Point::new(1.0, 1.0));
    }

    #[test]
    fn tuples_and_pointers_compose() {
        let ctx = ctx();
        let ray = Ray::new([0.0, 0.0], [-1.0, 0.0]);

        let mirrors = (Wall(200.0), Box::new(Wall(-120.0)), Rc::new([Wall(-80.0)]));
        let hit = mirrors.reflect(&ray, &ctx).unwrap();

        assert_abs_diff_eq!(hit.point, Point::new(-80.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(hit.outgoing.aim, Point::new(-80.0 + 80.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn nothing_to_hit() {
        let ctx = ctx();
        let ray = Ray::new([0.0, 0.0], [1.0, 0.0]);

        assert_eq!([Wall(-10.0)].reflect(&ray, &ctx), None);
        assert_eq!(Vec::<Wall>::new().reflect(&ray, &ctx), None);
    }
}
