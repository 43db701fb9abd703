//! Ready made scenes.

use super::*;

/// A fan of horizontal rays hitting a concave mirror, converging near its focus.
///
/// 21 rays start at `x = -300`, one every 20 units from `y = 200` down to `y = -200`.
#[must_use]
pub fn focusing_scene(ctx: SimulationCtx) -> Scene<MirrorShape> {
    let appearance = Appearance {
        thickness: 1.5,
        ..Appearance::LIGHT_RAY
    };

    let mut scene = Scene::new(ctx).with_mirror(CurvedMirror::new(
        [100.0, 300.0],
        [100.0, -300.0],
        [290.0, 0.0],
    ));

    for i in 0..=20 {
        let y = 200.0 - 20.0 * Float::from(i);
        scene.push_light(
            LightRay::new([-300.0, y], [-200.0, y])
                .with_max_depth(LightRay::DEFAULT_MAX_DEPTH)
                .with_appearance(appearance),
        );
    }

    scene
}
