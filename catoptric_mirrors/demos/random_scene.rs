use std::{env, error::Error};

use catoptric::*;
use catoptric_mirrors::MirrorShape;
use catoptric_random::{
    rand::{rngs::StdRng, SeedableRng},
    random_scene,
};
use log::info;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let seed = env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(0);

    let mut rng = StdRng::seed_from_u64(seed);
    let ctx = SimulationCtx::new(Bounds::centered(1000.0, 1000.0)?);
    let scene = random_scene::<MirrorShape>(&mut rng, ctx);

    info!(
        "seed {seed}: {} lights, {} mirrors",
        scene.lights().len(),
        scene.mirrors().len()
    );

    for mirror in scene.mirrors() {
        match mirror {
            MirrorShape::Plane(m) => {
                println!("plane {:?} -> {:?}", m.point1.as_slice(), m.point2.as_slice());
            }
            MirrorShape::Curved(m) => {
                println!("curved {:?}: {:?}", m.points().map(|p| (p.x, p.y)), m.shape());
            }
        }
    }

    for path in scene.simulate() {
        let reflections = path.reflection_points().count();
        println!("{reflections} reflections, {:?}", path.end());
    }

    Ok(())
}
