//! Marker, cuboid and camera placement - demonstrates primitive staging.
//!
//! Runs against the in-memory MockViewer; swap in your own ViewerPort
//! implementation to drive a real viewer process.

use peltast::{
    ColorSpec, Mat3, MockViewer, RotationSpec, ScaleSpec, Stage, TransformSpec, Vec3,
};

fn main() {
    env_logger::init();

    let mut stage = Stage::new(MockViewer::new());

    // A red cuboid, squashed and lifted.
    let pose = TransformSpec::trs(
        Some(Vec3::new(0.0, 0.0, 0.3)),
        RotationSpec::AxisAngle(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_4)),
        ScaleSpec::PerAxis(Vec3::new(0.1, 0.2, 0.3)),
    );
    let red: ColorSpec = "r".parse().unwrap();
    stage.place_cuboid("rect", &pose, Some(&red), None).unwrap();

    // A green marker above it.
    let pose = TransformSpec::trs(
        Some(Vec3::new(0.0, 0.0, 0.6)),
        RotationSpec::Identity,
        ScaleSpec::Uniform(0.2),
    );
    let green: ColorSpec = "g".parse().unwrap();
    stage.place_marker("marker", &pose, Some(&green), None).unwrap();

    // A camera glyph with a wide-angle intrinsics matrix.
    let intrinsics = Mat3::from_cols_array(&[1.5, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0]);
    let blue: ColorSpec = "b".parse().unwrap();
    stage
        .place_camera(
            "camera",
            Vec3::new(0.0, 0.0, 2.0),
            RotationSpec::AxisAngle(Vec3::new(0.0, std::f32::consts::PI, 0.0)),
            0.5,
            intrinsics,
            Some(&blue),
            None,
        )
        .unwrap();

    stage.set_camera_look_at(Vec3::new(0.0, -2.0, 2.0), Vec3::ZERO, Vec3::Z);

    println!(
        "staged {} drawables; last keystroke: {}",
        stage.port().object_count(),
        stage.last_keystroke()
    );
}
