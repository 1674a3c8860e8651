//! Gaussian-bump surface - demonstrates structured-grid staging.
//!
//! Builds a 30x30 height field, places it as a triangulated surface, then
//! updates the same object with an animated copy.

use peltast::{MockViewer, PointGrid, Stage};

const N: usize = 30;

fn height_field(phase: f32) -> PointGrid {
    let mut data = Vec::with_capacity(N * N * 3);
    for i in 0..N {
        for j in 0..N {
            let x = -1.0 + 2.0 * (j as f32) / (N - 1) as f32;
            let y = -1.0 + 2.0 * (i as f32) / (N - 1) as f32;
            let r2 = x * x + y * y;
            let z = (-0.5 / 0.2 * r2).exp() - (-0.5 / 0.1 * r2).exp() + phase;
            data.extend_from_slice(&[x, y, z]);
        }
    }
    PointGrid::from_rows(N, N, 3, data).unwrap()
}

fn main() {
    env_logger::init();

    let mut stage = Stage::new(MockViewer::new());

    let handle = stage
        .place_surface("mesh", &height_field(0.0), None, None)
        .unwrap();

    // Same name, new heights: updates in place.
    stage
        .place_surface("mesh", &height_field(0.1), None, None)
        .unwrap();

    println!(
        "surface handle {} holds {} vertices",
        handle.raw(),
        stage.port().vertices(handle.raw()).unwrap().len()
    );
}
