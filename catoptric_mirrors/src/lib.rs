//! Mirror shapes for [`catoptric`]: line segments and circular arcs.

mod curved;
pub mod demo;
mod plane;

pub use curved::*;
pub use plane::*;

use catoptric::*;
use catoptric_random::*;

/// Any mirror shape of this crate.
#[derive(Clone, Debug, PartialEq)]
pub enum MirrorShape {
    Plane(PlaneMirror),
    Curved(CurvedMirror),
}

impl MirrorShape {
    #[inline]
    #[must_use]
    pub const fn appearance(&self) -> &Appearance {
        match self {
            Self::Plane(m) => &m.appearance,
            Self::Curved(m) => &m.appearance,
        }
    }
}

impl Mirror for MirrorShape {
    fn reflect(&self, ray: &Ray, ctx: &SimulationCtx) -> Option<Reflection> {
        match self {
            Self::Plane(m) => m.reflect(ray, ctx),
            Self::Curved(m) => m.reflect(ray, ctx),
        }
    }
}

impl From<PlaneMirror> for MirrorShape {
    #[inline]
    fn from(mirror: PlaneMirror) -> Self {
        Self::Plane(mirror)
    }
}

impl From<CurvedMirror> for MirrorShape {
    #[inline]
    fn from(mirror: CurvedMirror) -> Self {
        Self::Curved(mirror)
    }
}

impl Random for MirrorShape {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        if rng.gen() {
            PlaneMirror::random(rng).into()
        } else {
            CurvedMirror::random(rng).into()
        }
    }
}
