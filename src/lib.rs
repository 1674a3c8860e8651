//! # Peltast
//!
//! **A lightweight staging client for remote 3D viewers.**
//!
//! Throw points, meshes and marker glyphs at a viewer process from whatever
//! data you have on hand—no vertex bookkeeping, no duplicate objects, no
//! ceremony. Peltast encodes loosely-typed point data into the viewer's
//! fixed wire layout and keeps a name→handle registry so placing the same
//! name twice updates the drawable instead of creating a second one.
//!
//! ## Quick Start
//!
//! ```
//! use peltast::*;
//!
//! // MockViewer stands in for a real transport; implement ViewerPort to
//! // connect an actual viewer process.
//! let mut stage = Stage::new(MockViewer::new());
//!
//! // Two red points, then the same object again with fresh positions.
//! let cloud = PointCloud::from_xyz(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]).unwrap();
//! let red = ColorSpec::Rgb([1.0, 0.0, 0.0]);
//! let handle = stage.place_points("dots", &cloud, Some(&red), None).unwrap();
//!
//! let moved = PointCloud::from_xyz(&[[0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]).unwrap();
//! assert_eq!(stage.place_points("dots", &moved, None, None).unwrap(), handle);
//!
//! // A marker, sized then oriented then positioned.
//! let pose = TransformSpec::trs(
//!     Some(Vec3::new(0.0, 0.0, 2.0)),
//!     RotationSpec::Identity,
//!     ScaleSpec::Uniform(0.5),
//! );
//! stage.place_marker("origin", &pose, Some(&ColorSpec::Named(NamedColor::Green)), None).unwrap();
//! ```
//!
//! ## Philosophy
//!
//! - **Name it and forget it** — the registry decides create-vs-update; you
//!   just keep placing.
//! - **Loose in, exact out** — 3/4/6/7-channel point data, single-char color
//!   names, axis-angle or matrix rotations all funnel into one 16-byte wire
//!   vertex.
//! - **The viewer is a trait** — no transport, process or windowing code in
//!   this crate; implement [`ViewerPort`] for yours, test against
//!   [`MockViewer`].

mod color;
mod error;
mod grid;
mod mock;
mod shapes;
mod stage;
mod transform;
mod vertex;
mod viewer;

pub use color::{ColorSpec, NamedColor, pack_rgba, resolve_colors, unpack_rgba};
pub use error::{Result, StageError};
pub use grid::grid_triangles;
pub use mock::MockViewer;
pub use shapes::{Primitive, camera_glyph, cuboid, marker};
pub use stage::Stage;
pub use transform::{RotationSpec, ScaleSpec, TransformSpec};
pub use vertex::{PackedVertex, PointCloud, PointGrid};
pub use viewer::{Handle, INVALID_HANDLE, KEY_ENTER, KEY_ESC, ObjectRef, ViewerPort};

// Re-export glam math types for convenience
pub use glam::{Affine3A, Mat3, Mat4, Vec3};
