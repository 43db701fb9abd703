use log::trace;

use crate::{Appearance, LightRay, Mirror, Point, Ray, SimulationCtx};

/// A straight piece of a ray's path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Why a ray stopped being traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathEnd {
    /// The ray hit no mirror and left the scene bounds.
    Exited,
    /// The ray's maximum depth was reached.
    DepthCapped,
}

/// The polyline followed by a light ray, from its origin to where it stopped.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    appearance: Appearance,
    segments: Vec<Segment>,
    end: PathEnd,
}

impl Path {
    #[inline]
    #[must_use]
    pub const fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> PathEnd {
        self.end
    }

    /// The reflection points of the path, in order.
    ///
    /// If the ray exited the scene, the last segment ends on the scene's bounds,
    /// not on a mirror, and isn't included.
    pub fn reflection_points(&self) -> impl Iterator<Item = &Point> {
        let exit = usize::from(self.end == PathEnd::Exited);
        let count = self.segments.len().saturating_sub(exit);

        self.segments[..count].iter().map(|s| &s.end)
    }

    /// The vertices of the polyline, starting with the ray's origin.
    pub fn vertices(&self) -> impl Iterator<Item = &Point> {
        self.segments
            .first()
            .map(|s| &s.start)
            .into_iter()
            .chain(self.segments.iter().map(|s| &s.end))
    }
}

/// An iterator over the segments of a ray's path through a mirror.
///
/// Every call to [`Iterator::next`] queries `mirror` once. The path ends when the ray
/// misses (the last segment then goes to the scene's bounds) or after `max_depth` segments.
#[derive(Debug, Clone)]
pub struct RayPath<'a, M: Mirror + ?Sized> {
    ray: Option<Ray>,
    remaining: usize,
    end: Option<PathEnd>,
    mirror: &'a M,
    ctx: &'a SimulationCtx,
}

impl<'a, M: Mirror + ?Sized> RayPath<'a, M> {
    #[inline]
    #[must_use]
    pub fn new(ray: Ray, max_depth: usize, mirror: &'a M, ctx: &'a SimulationCtx) -> Self {
        Self {
            ray: Some(ray),
            remaining: max_depth,
            end: None,
            mirror,
            ctx,
        }
    }

    /// `None` until the iterator is exhausted.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Option<PathEnd> {
        self.end
    }
}

impl<'a, M: Mirror + ?Sized> Iterator for RayPath<'a, M> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let ray = self.ray.take()?;

        if self.remaining == 0 {
            self.end = Some(PathEnd::DepthCapped);
            return None;
        }
        self.remaining -= 1;

        let end = match self.mirror.reflect(&ray, self.ctx) {
            Some(reflection) => {
                trace!(
                    "ray from {:?} reflected at {:?}",
                    ray.origin.as_slice(),
                    reflection.point.as_slice()
                );
                self.ray = Some(reflection.outgoing);
                reflection.point
            }
            None => {
                self.end = Some(PathEnd::Exited);
                self.ctx
                    .bounds()
                    .exit_point(&ray.origin, &ray.aim, self.ctx.eps())
            }
        };

        Some(Segment {
            start: ray.origin,
            end,
        })
    }
}

/// Traces `light` through `mirror`, see [`RayPath`].
#[must_use]
pub fn simulate<M: Mirror + ?Sized>(light: &LightRay, mirror: &M, ctx: &SimulationCtx) -> Path {
    let mut path = RayPath::new(light.ray, light.max_depth, mirror, ctx);
    let segments = path.by_ref().collect();

    Path {
        appearance: light.appearance,
        segments,
        end: path.end().unwrap_or(PathEnd::DepthCapped),
    }
}
