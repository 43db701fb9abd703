use std::{env, error::Error};

use catoptric::*;
use catoptric_mirrors::demo;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let width = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(1000.0);
    let height = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(1000.0);

    let scene = demo::focusing_scene(SimulationCtx::new(Bounds::centered(width, height)?));

    for (i, path) in scene.simulate().iter().enumerate() {
        let vertices: Vec<_> = path.vertices().map(|p| (p.x, p.y)).collect();
        println!("ray {i} ({:?}): {vertices:?}", path.end());
    }

    Ok(())
}
