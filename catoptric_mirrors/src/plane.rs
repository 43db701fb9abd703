use core::f64::consts::PI;

use super::*;

/// A reflective line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneMirror {
    pub point1: Point,
    pub point2: Point,
    pub appearance: Appearance,
}

impl PlaneMirror {
    #[inline]
    #[must_use]
    pub fn new(point1: impl Into<Point>, point2: impl Into<Point>) -> Self {
        Self {
            point1: point1.into(),
            point2: point2.into(),
            appearance: Appearance::MIRROR,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    #[inline]
    #[must_use]
    pub fn line(&self) -> Line {
        Line::through(&self.point1, &self.point2)
    }
}

impl Mirror for PlaneMirror {
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        let eps = ctx.eps();
        let (p1, p2) = (&self.point1, &self.point2);

        let point = geometry::line_intersection(&ray.line(), &self.line(), eps)?;

        if !geometry::within_box(&point, p1, p2, eps)
            || !ray.is_ahead(&point)
            || ctx.is_self_hit(ray, &point)
        {
            return None;
        }

        // the direction of the mirror as seen from the hit point is undefined
        // if that point is an endpoint, use the other one
        let far = if ctx.distance(&point, p2) > ctx.distance(&point, p1) {
            p2
        } else {
            p1
        };

        let angle = PI
            + 2.0 * (geometry::angle_of(&point, far) - geometry::angle_of(&point, &ray.origin));

        Some(Reflection::new(
            point,
            geometry::rotate_point(&ray.origin, angle, &point, eps),
        ))
    }
}

impl Random for PlaneMirror {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let point1 = rand_vect(rng, MAX_COORD_MAG);

        let point2 = loop {
            let p = rand_vect(rng, MAX_COORD_MAG);
            if (p - point1).norm() > 1.0 {
                break p;
            }
        };

        Self::new(point1, point2)
    }
}
