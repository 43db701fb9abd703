use catoptric::*;

use core::iter;
pub use rand;

/// Largest coordinate magnitude of randomly generated points.
pub const MAX_COORD_MAG: Float = 400.0;

pub trait Random: Sized {
    /// Generate a randomized version of this type using the provided `rng`.
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success.
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

impl Random for Ray {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let origin = rand_vect(rng, MAX_COORD_MAG);
        Self::new(origin, origin + rand_direction(rng))
    }
}

impl Random for LightRay {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self::from(Ray::random(rng)).with_max_depth(rng.gen_range(1..=Self::DEFAULT_MAX_DEPTH))
    }
}

impl Random for ParallelBeam {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MAX_NUM_RAYS: usize = 32;

        let point1 = rand_vect(rng, MAX_COORD_MAG);
        let point2 = rand_vect(rng, MAX_COORD_MAG);

        Self::new(point1, point2, rng.gen_range(1..=MAX_NUM_RAYS))
            .with_direction(rand_direction(rng))
            .with_max_depth(rng.gen_range(1..=Self::DEFAULT_MAX_DEPTH))
    }
}

impl Random for Light {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        if rng.gen_bool(0.75) {
            LightRay::random(rng).into()
        } else {
            ParallelBeam::random(rng).into()
        }
    }
}

/// A scene of random lights and mirrors, traced with `ctx`.
pub fn random_scene<M: Mirror + Random>(
    rng: &mut (impl rand::Rng + ?Sized),
    ctx: SimulationCtx,
) -> Scene<M> {
    const MAX_NUM_LIGHTS: usize = 8;
    const MAX_NUM_MIRRORS: usize = 12;

    let num_lights = rng.gen_range(1..=MAX_NUM_LIGHTS);
    let num_mirrors = rng.gen_range(1..=MAX_NUM_MIRRORS);

    let mut scene = Scene::new(ctx);
    scene
        .lights_mut()
        .extend(iter::repeat_with(|| Light::random(rng)).take(num_lights));
    scene
        .mirrors_mut()
        .extend(iter::repeat_with(|| M::random(rng)).take(num_mirrors));
    scene
}

pub fn rand_vect(rng: &mut (impl rand::Rng + ?Sized), max_coord_mag: Float) -> Point {
    // the rng generates floats in 0.0..1.0, scale and translate the range accordingly

    Point::from_fn(|_, _| (rng.gen::<Float>() - 0.5) * (max_coord_mag.abs() * 2.0))
}

/// A random unit vector.
pub fn rand_direction(rng: &mut (impl rand::Rng + ?Sized)) -> Point {
    loop {
        let v = rand_vect(rng, 1.0);
        let norm = v.norm();
        if norm > Float::EPSILON * 8.0 {
            break v / norm;
        }
    }
}
