use log::debug;

use crate::{Light, Mirror, Path, SimulationCtx};

/// A set of light sources and mirrors, traced together.
///
/// Nothing is cached between passes: every call to [`Scene::simulate`] traces
/// everything from scratch with the current state of the scene.
#[derive(Clone, Debug)]
pub struct Scene<M> {
    lights: Vec<Light>,
    mirrors: Vec<M>,
    ctx: SimulationCtx,
}

impl<M> Scene<M> {
    #[inline]
    #[must_use]
    pub const fn new(ctx: SimulationCtx) -> Self {
        Self {
            lights: Vec::new(),
            mirrors: Vec::new(),
            ctx,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_light(mut self, light: impl Into<Light>) -> Self {
        self.push_light(light);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_mirror(mut self, mirror: impl Into<M>) -> Self {
        self.push_mirror(mirror);
        self
    }

    #[inline]
    pub fn push_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    #[inline]
    pub fn push_mirror(&mut self, mirror: impl Into<M>) {
        self.mirrors.push(mirror.into());
    }

    #[inline]
    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    #[inline]
    pub fn lights_mut(&mut self) -> &mut Vec<Light> {
        &mut self.lights
    }

    #[inline]
    #[must_use]
    pub fn mirrors(&self) -> &[M] {
        &self.mirrors
    }

    #[inline]
    pub fn mirrors_mut(&mut self) -> &mut Vec<M> {
        &mut self.mirrors
    }

    #[inline]
    #[must_use]
    pub const fn ctx(&self) -> &SimulationCtx {
        &self.ctx
    }

    #[inline]
    pub fn set_ctx(&mut self, ctx: SimulationCtx) {
        self.ctx = ctx;
    }
}

impl<M: Mirror> Scene<M> {
    /// Traces every light against every mirror.
    ///
    /// Returns one path per emitted ray, lights in insertion order,
    /// and beam rays in emission order.
    #[must_use]
    pub fn simulate(&self) -> Vec<Path> {
        debug!(
            "simulating {} lights against {} mirrors",
            self.lights.len(),
            self.mirrors.len()
        );

        self.lights
            .iter()
            .flat_map(|light| light.simulate(self.mirrors.as_slice(), &self.ctx))
            .collect()
    }
}
