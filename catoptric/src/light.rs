use crate::{sim, Epsilon, Float, Mirror, Path, Point, Ray, SimulationCtx};

/// How an entity should be drawn. The simulation never looks at it, it is only carried
/// through to the resulting [`Path`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub colour: [u8; 3],
    pub thickness: Float,
    /// In `0.0..=1.0`
    pub opacity: Float,
}

impl Appearance {
    pub const LIGHT_RAY: Self = Self::new([255, 255, 0], 2.0, 0.5);
    pub const MIRROR: Self = Self::new([204, 204, 204], 2.0, 1.0);
    pub const BEAM: Self = Self::new([150, 150, 150], 2.0, 1.0);
    /// Rays emitted by a [`ParallelBeam`].
    pub const BEAM_RAY: Self = Self::new([255, 255, 0], 1.0, 1.0);

    #[inline]
    #[must_use]
    pub const fn new(colour: [u8; 3], thickness: Float, opacity: Float) -> Self {
        Self {
            colour,
            thickness,
            opacity,
        }
    }
}

/// A single ray of light, bouncing at most `max_depth - 1` times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRay {
    pub ray: Ray,
    /// Maximum number of segments of this ray's path.
    pub max_depth: usize,
    pub appearance: Appearance,
}

impl LightRay {
    pub const DEFAULT_MAX_DEPTH: usize = 100;

    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Point>, aim: impl Into<Point>) -> Self {
        Self::from(Ray::new(origin, aim))
    }

    #[inline]
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    #[inline]
    #[must_use]
    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    /// Traces this ray through `mirror`, see [`sim::simulate`].
    #[inline]
    #[must_use]
    pub fn simulate(&self, mirror: &(impl Mirror + ?Sized), ctx: &SimulationCtx) -> Path {
        sim::simulate(self, mirror, ctx)
    }
}

impl From<Ray> for LightRay {
    #[inline]
    fn from(ray: Ray) -> Self {
        Self {
            ray,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            appearance: Appearance::LIGHT_RAY,
        }
    }
}

/// A row of parallel rays, evenly spread along the segment `[point1, point2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallelBeam {
    pub point1: Point,
    pub point2: Point,
    pub num_rays: usize,
    /// Shared by every emitted ray, need not be normalized.
    pub direction: Point,
    /// Applied to every emitted ray.
    pub max_depth: usize,
    pub appearance: Appearance,
    pub ray_appearance: Appearance,
}

impl ParallelBeam {
    pub const DEFAULT_MAX_DEPTH: usize = 10;

    /// A beam of `num_rays` rays heading towards positive x.
    #[inline]
    #[must_use]
    pub fn new(point1: impl Into<Point>, point2: impl Into<Point>, num_rays: usize) -> Self {
        Self {
            point1: point1.into(),
            point2: point2.into(),
            num_rays,
            direction: Point::new(1.0, 0.0),
            max_depth: Self::DEFAULT_MAX_DEPTH,
            appearance: Appearance::BEAM,
            ray_appearance: Appearance::BEAM_RAY,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_direction(self, direction: impl Into<Point>) -> Self {
        Self {
            direction: direction.into(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// The rays emitted by this beam.
    ///
    /// The first one starts at `point1`, the last one at `point2` (if `num_rays > 1`),
    /// the others are evenly spaced in between. Origins are quantized with `eps`.
    pub fn rays(&self, eps: Epsilon) -> impl Iterator<Item = LightRay> + '_ {
        let span = self.point2 - self.point1;
        let steps = self.num_rays.saturating_sub(1).max(1) as Float;

        (0..self.num_rays).map(move |i| {
            let origin = eps.quantize_point(self.point1 + span * (i as Float / steps));

            LightRay {
                ray: Ray::new(origin, origin + self.direction),
                max_depth: self.max_depth,
                appearance: self.ray_appearance,
            }
        })
    }

    /// Traces every ray of this beam independently, in emission order.
    pub fn simulate(&self, mirror: &(impl Mirror + ?Sized), ctx: &SimulationCtx) -> Vec<Path> {
        self.rays(ctx.eps())
            .map(|ray| ray.simulate(mirror, ctx))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ray(LightRay),
    Beam(ParallelBeam),
}

impl Light {
    #[inline]
    #[must_use]
    pub const fn appearance(&self) -> &Appearance {
        match self {
            Self::Ray(ray) => &ray.appearance,
            Self::Beam(beam) => &beam.appearance,
        }
    }

    /// One path per emitted ray.
    pub fn simulate(&self, mirror: &(impl Mirror + ?Sized), ctx: &SimulationCtx) -> Vec<Path> {
        match self {
            Self::Ray(ray) => vec![ray.simulate(mirror, ctx)],
            Self::Beam(beam) => beam.simulate(mirror, ctx),
        }
    }
}

impl From<LightRay> for Light {
    #[inline]
    fn from(ray: LightRay) -> Self {
        Self::Ray(ray)
    }
}

impl From<ParallelBeam> for Light {
    #[inline]
    fn from(beam: ParallelBeam) -> Self {
        Self::Beam(beam)
    }
}
