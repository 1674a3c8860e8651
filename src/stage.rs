//! The stage: named-object bookkeeping and the placement API.
//!
//! A [`Stage`] owns a [`ViewerPort`] plus the name→handle registry, and is
//! the front door of the crate: encode the caller's points, decide whether
//! the viewer should create a new drawable or update an existing one, and
//! hand back the handle either way.
//!
//! # Create or Update
//!
//! Placement is keyed by the caller's object name. The first placement under
//! a name creates a drawable and records its handle; every later placement
//! under the same name ships only a fresh vertex buffer to the same
//! drawable (topology is immutable after creation). Passing a [`Handle`]
//! instead of a name skips resolution entirely and goes straight to the
//! update path.
//!
//! ```
//! use peltast::{MockViewer, PointCloud, Stage};
//!
//! let mut stage = Stage::new(MockViewer::new());
//! let cloud = PointCloud::from_xyz(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]).unwrap();
//!
//! let handle = stage.place_points("cloud", &cloud, None, None).unwrap();
//! // Same name again: the existing drawable is updated, not recreated.
//! assert_eq!(stage.place_points("cloud", &cloud, None, None).unwrap(), handle);
//! ```

use std::collections::HashMap;

use glam::{Mat3, Vec3};

use crate::color::{self, ColorSpec, NamedColor};
use crate::error::{Result, StageError};
use crate::grid::grid_triangles;
use crate::shapes::{self, Primitive};
use crate::transform::{RotationSpec, ScaleSpec, TransformSpec};
use crate::vertex::{PackedVertex, PointCloud, PointGrid};
use crate::viewer::{Handle, INVALID_HANDLE, ObjectRef, ViewerPort};

/// Topology shipped with a creation call; updates never resend it.
enum Topology<'a> {
    Points,
    Mesh(&'a [[i32; 3]]),
    Edges(&'a [[i32; 2]]),
}

/// A staging client bound to one viewer.
///
/// All operations are synchronous and block until the viewer answers. The
/// stage holds no drawable data itself, only the name→handle mapping; the
/// viewer owns the drawables.
///
/// There is deliberately no global instance: construct one `Stage` per
/// viewer connection and pass it around (or share it behind a lock if the
/// embedding application is concurrent — name resolution followed by
/// creation must stay atomic per name).
pub struct Stage<P: ViewerPort> {
    port: P,
    handles: HashMap<String, Handle>,
}

impl<P: ViewerPort> Stage<P> {
    /// Creates a stage over a viewer connection.
    pub fn new(port: P) -> Self {
        Self {
            port,
            handles: HashMap::new(),
        }
    }

    /// The underlying viewer port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Consumes the stage, returning the viewer port.
    pub fn into_port(self) -> P {
        self.port
    }

    /// The handle recorded for `name`, if this stage has seen it.
    pub fn known_handle(&self, name: &str) -> Option<Handle> {
        self.handles.get(name).copied()
    }

    /// Places (creates or updates) a point cloud.
    pub fn place_points(
        &mut self,
        obj: impl Into<ObjectRef>,
        points: &PointCloud,
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        let vertices = points.encode(color, alpha)?;
        self.place_encoded(obj.into(), &vertices, Topology::Points)
    }

    /// Places a triangle mesh from raw points and faces.
    pub fn place_trimesh(
        &mut self,
        obj: impl Into<ObjectRef>,
        points: &PointCloud,
        faces: &[[i32; 3]],
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        let vertices = points.encode(color, alpha)?;
        self.place_encoded(obj.into(), &vertices, Topology::Mesh(faces))
    }

    /// Places an edge list from raw points and index pairs.
    pub fn place_edges(
        &mut self,
        obj: impl Into<ObjectRef>,
        points: &PointCloud,
        edges: &[[i32; 2]],
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        let vertices = points.encode(color, alpha)?;
        self.place_encoded(obj.into(), &vertices, Topology::Edges(edges))
    }

    /// Places a structured point grid as a triangulated surface.
    ///
    /// The grid is triangulated deterministically (see
    /// [`grid_triangles`]) when the drawable is created; later placements
    /// under the same name update vertices only, so the grid shape must not
    /// change across updates.
    pub fn place_surface(
        &mut self,
        obj: impl Into<ObjectRef>,
        grid: &PointGrid,
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        let vertices = grid.cloud().encode(color, alpha)?;
        let faces = grid_triangles(grid.rows(), grid.cols());
        self.place_encoded(obj.into(), &vertices, Topology::Mesh(&faces))
    }

    /// Places a tetrahedral marker under the given transform.
    pub fn place_marker(
        &mut self,
        obj: impl Into<ObjectRef>,
        transform: &TransformSpec,
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        self.place_primitive(obj.into(), &shapes::marker(), transform, color, alpha)
    }

    /// Places a unit cuboid under the given transform.
    pub fn place_cuboid(
        &mut self,
        obj: impl Into<ObjectRef>,
        transform: &TransformSpec,
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        self.place_primitive(obj.into(), &shapes::cuboid(), transform, color, alpha)
    }

    /// Places a camera frustum glyph.
    ///
    /// The glyph is scaled uniformly, its four frustum corners are reshaped
    /// by the inverse of `intrinsics`, and the whole glyph is then rotated
    /// and translated into place. On top of the caller's base color the
    /// apex is recolored white and the image-axis ticks red (x) and
    /// green (y), so the camera's orientation is readable at a glance.
    pub fn place_camera(
        &mut self,
        obj: impl Into<ObjectRef>,
        translation: Vec3,
        rotation: RotationSpec,
        scale: f32,
        intrinsics: Mat3,
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        let glyph = shapes::camera_glyph();
        let k_inv = intrinsics.inverse();
        let pose = TransformSpec::trs(Some(translation), rotation, ScaleSpec::Identity).matrix();

        let mut points = Vec::with_capacity(glyph.vertices.len());
        for (i, v) in glyph.vertices.iter().enumerate() {
            let mut p = Vec3::from(*v) * scale;
            if (1..5).contains(&i) {
                p = k_inv * p;
            }
            points.push(pose.transform_point3(p).to_array());
        }

        let cloud = PointCloud::from_xyz(&points)?;
        let mut vertices = cloud.encode(color, alpha)?;
        let a = match alpha {
            Some(a) if a != 0.0 => a,
            _ => 1.0,
        };
        let recolor = |v: &mut PackedVertex, named: NamedColor| {
            let [r, g, b] = named.rgb();
            v.color = color::pack_rgba([r, g, b, a]);
        };
        recolor(&mut vertices[0], NamedColor::White);
        for v in &mut vertices[5..7] {
            recolor(v, NamedColor::Red);
        }
        for v in &mut vertices[7..9] {
            recolor(v, NamedColor::Green);
        }

        self.place_encoded(obj.into(), &vertices, Topology::Mesh(&glyph.faces))
    }

    /// Removes a drawable and forgets its name mapping.
    ///
    /// Returns whether the viewer acknowledged a removal; an unknown name
    /// is a no-op returning `false`.
    pub fn remove(&mut self, obj: impl Into<ObjectRef>) -> bool {
        let handle = match obj.into() {
            ObjectRef::Handle(h) => Some(h),
            ObjectRef::Name(name) => {
                let resolved = self.resolve_name(&name);
                self.handles.remove(&name);
                resolved
            }
        };
        match handle {
            Some(h) => {
                log::debug!("removing drawable {}", h.raw());
                self.handles.retain(|_, recorded| *recorded != h);
                self.port.remove(h.raw())
            }
            None => false,
        }
    }

    /// Points the viewer camera at `center` from `eye`.
    pub fn set_camera_look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) -> bool {
        self.port.set_camera_look_at(eye, center, up)
    }

    /// The most recent keystroke captured by the viewer window; see
    /// [`KEY_ESC`](crate::KEY_ESC) and [`KEY_ENTER`](crate::KEY_ENTER).
    pub fn last_keystroke(&mut self) -> i32 {
        self.port.poll_last_keystroke()
    }

    /// Asks the viewer to save the current scene as a PLY file.
    pub fn save_ply(&mut self, path: &str) -> bool {
        self.port.save_ply(path)
    }

    /// Asks the viewer to load a geometry file.
    pub fn load_file(&mut self, path: &str) -> bool {
        self.port.load_file(path)
    }

    fn place_primitive(
        &mut self,
        obj: ObjectRef,
        primitive: &Primitive,
        transform: &TransformSpec,
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Handle> {
        let matrix = transform.matrix();
        let points: Vec<[f32; 3]> = primitive
            .vertices
            .iter()
            .map(|v| matrix.transform_point3(Vec3::from(*v)).to_array())
            .collect();
        let vertices = PointCloud::from_xyz(&points)?.encode(color, alpha)?;
        self.place_encoded(obj, &vertices, Topology::Mesh(&primitive.faces))
    }

    /// The create-or-update decision for an encoded buffer.
    fn place_encoded(
        &mut self,
        obj: ObjectRef,
        vertices: &[PackedVertex],
        topology: Topology<'_>,
    ) -> Result<Handle> {
        match obj {
            ObjectRef::Handle(handle) => {
                self.update(handle, vertices)?;
                Ok(handle)
            }
            ObjectRef::Name(name) => match self.resolve_name(&name) {
                Some(handle) => {
                    log::debug!("updating '{name}' via handle {}", handle.raw());
                    self.update(handle, vertices)?;
                    Ok(handle)
                }
                None => self.create(name, vertices, topology),
            },
        }
    }

    /// Looks a name up locally first, then asks the viewer; a remote hit is
    /// adopted into the local registry so the next placement skips the
    /// round trip.
    fn resolve_name(&mut self, name: &str) -> Option<Handle> {
        if let Some(handle) = self.handles.get(name) {
            return Some(*handle);
        }
        let raw = self.port.lookup_handle(name);
        if raw == INVALID_HANDLE {
            return None;
        }
        log::debug!("adopted '{name}' from viewer as handle {raw}");
        let handle = Handle(raw);
        self.handles.insert(name.to_owned(), handle);
        Some(handle)
    }

    fn create(
        &mut self,
        name: String,
        vertices: &[PackedVertex],
        topology: Topology<'_>,
    ) -> Result<Handle> {
        let raw = match topology {
            Topology::Points => self.port.create_points(&name, vertices),
            Topology::Mesh(faces) => self.port.create_mesh(&name, vertices, faces),
            Topology::Edges(edges) => self.port.create_edges(&name, vertices, edges),
        };
        if raw == INVALID_HANDLE {
            return Err(StageError::RemoteRejection { name });
        }
        log::debug!("created '{name}' as handle {raw} ({} vertices)", vertices.len());
        let handle = Handle(raw);
        self.handles.insert(name, handle);
        Ok(handle)
    }

    fn update(&mut self, handle: Handle, vertices: &[PackedVertex]) -> Result<()> {
        if self.port.update_vertices(handle.raw(), vertices) {
            Ok(())
        } else {
            Err(StageError::SizeMismatch { handle })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::unpack_rgba;
    use crate::mock::MockViewer;

    fn cloud(n: usize) -> PointCloud {
        let points: Vec<[f32; 3]> = (0..n).map(|i| [i as f32, 0.0, 0.0]).collect();
        PointCloud::from_xyz(&points).unwrap()
    }

    #[test]
    fn second_placement_updates_instead_of_creating() {
        let mut stage = Stage::new(MockViewer::new());
        let first = stage.place_points("x", &cloud(3), None, None).unwrap();
        let second = stage.place_points("x", &cloud(3), None, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(stage.port().create_calls, 1);
        assert_eq!(stage.port().update_calls, 1);
    }

    #[test]
    fn removal_clears_the_mapping() {
        let mut stage = Stage::new(MockViewer::new());
        stage.place_points("x", &cloud(2), None, None).unwrap();
        assert!(stage.remove("x"));
        assert!(stage.known_handle("x").is_none());
        stage.place_points("x", &cloud(2), None, None).unwrap();
        assert_eq!(stage.port().create_calls, 2);
    }

    #[test]
    fn removing_an_unknown_name_is_a_no_op() {
        let mut stage = Stage::new(MockViewer::new());
        assert!(!stage.remove("nothing"));
        assert_eq!(stage.port().remove_calls, 0);
    }

    #[test]
    fn handle_placement_bypasses_name_resolution() {
        let mut stage = Stage::new(MockViewer::new());
        let handle = stage.place_points("x", &cloud(2), None, None).unwrap();
        stage.place_points(handle, &cloud(2), None, None).unwrap();
        assert_eq!(stage.port().create_calls, 1);
        assert_eq!(stage.port().update_calls, 1);
    }

    #[test]
    fn update_with_a_different_size_is_a_size_mismatch() {
        let mut stage = Stage::new(MockViewer::new());
        let handle = stage.place_points("x", &cloud(2), None, None).unwrap();
        let err = stage.place_points(handle, &cloud(5), None, None).unwrap_err();
        assert!(matches!(err, StageError::SizeMismatch { handle: h } if h == handle));
    }

    #[test]
    fn rejected_creation_surfaces_as_an_error() {
        let mut mock = MockViewer::new();
        mock.reject_creates = true;
        let mut stage = Stage::new(mock);
        let err = stage.place_points("x", &cloud(1), None, None).unwrap_err();
        assert!(matches!(err, StageError::RemoteRejection { name } if name == "x"));
    }

    #[test]
    fn names_known_to_the_viewer_are_adopted() {
        // A previous client session created "old" against the same viewer.
        let mut mock = MockViewer::new();
        let existing = {
            let verts = cloud(2).encode(None, None).unwrap();
            mock.create_points("old", &verts)
        };
        let mut stage = Stage::new(mock);
        let handle = stage.place_points("old", &cloud(2), None, None).unwrap();
        assert_eq!(handle.raw(), existing);
        assert_eq!(stage.port().create_calls, 1); // only the seeding call
        assert_eq!(stage.port().update_calls, 1);
    }

    #[test]
    fn surface_placement_triangulates_on_create() {
        let mut stage = Stage::new(MockViewer::new());
        let grid = PointGrid::from_rows(2, 2, 3, vec![0.0; 12]).unwrap();
        let handle = stage.place_surface("s", &grid, None, None).unwrap();
        assert_eq!(stage.port().vertices(handle.raw()).unwrap().len(), 4);
        stage.place_surface("s", &grid, None, None).unwrap();
        assert_eq!(stage.port().create_calls, 1);
        assert_eq!(stage.port().update_calls, 1);
    }

    #[test]
    fn marker_is_placed_under_its_transform() {
        let mut stage = Stage::new(MockViewer::new());
        let spec = TransformSpec::trs(
            Some(Vec3::new(0.0, 0.0, 5.0)),
            RotationSpec::Identity,
            ScaleSpec::Uniform(2.0),
        );
        let handle = stage.place_marker("m", &spec, None, None).unwrap();
        let verts = stage.port().vertices(handle.raw()).unwrap();
        assert_eq!(verts.len(), 4);
        // Base vertices land on the z = 5 plane after translate·scale.
        for v in &verts[..3] {
            assert!((v.position[2] - 5.0).abs() < 1e-6);
        }
    }

    #[test]
    fn cuboid_has_eight_vertices() {
        let mut stage = Stage::new(MockViewer::new());
        let handle = stage
            .place_cuboid("box", &TransformSpec::IDENTITY, None, None)
            .unwrap();
        assert_eq!(stage.port().vertices(handle.raw()).unwrap().len(), 8);
    }

    #[test]
    fn camera_glyph_gets_axis_colors() {
        let mut stage = Stage::new(MockViewer::new());
        let handle = stage
            .place_camera(
                "cam",
                Vec3::ZERO,
                RotationSpec::Identity,
                1.0,
                Mat3::IDENTITY,
                Some(&ColorSpec::Named(NamedColor::Blue)),
                None,
            )
            .unwrap();
        let verts = stage.port().vertices(handle.raw()).unwrap();
        assert_eq!(verts.len(), 9);
        assert_eq!(unpack_rgba(verts[0].color), [255, 255, 255, 255]);
        for v in &verts[5..7] {
            assert_eq!(unpack_rgba(v.color), [255, 0, 0, 255]);
        }
        for v in &verts[7..9] {
            assert_eq!(unpack_rgba(v.color), [0, 255, 0, 255]);
        }
        for v in &verts[1..5] {
            assert_eq!(unpack_rgba(v.color), [0, 0, 255, 255]);
        }
    }

    #[test]
    fn camera_intrinsics_reshape_the_frustum() {
        let mut stage = Stage::new(MockViewer::new());
        let k = Mat3::from_diagonal(Vec3::new(2.0, 4.0, 1.0));
        let handle = stage
            .place_camera("cam", Vec3::ZERO, RotationSpec::Identity, 1.0, k, None, None)
            .unwrap();
        let verts = stage.port().vertices(handle.raw()).unwrap();
        // Corner (1, 1, 1) through K⁻¹ lands at (0.5, 0.25, 1).
        assert!((verts[1].position[0] - 0.5).abs() < 1e-6);
        assert!((verts[1].position[1] - 0.25).abs() < 1e-6);
        assert!((verts[1].position[2] - 1.0).abs() < 1e-6);
        // Axis ticks are not reshaped.
        assert_eq!(verts[5].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn camera_forwarding() {
        let mut stage = Stage::new(MockViewer::new());
        assert!(stage.set_camera_look_at(Vec3::Z, Vec3::ZERO, Vec3::Y));
        assert_eq!(
            stage.port().look_at,
            Some((Vec3::Z, Vec3::ZERO, Vec3::Y))
        );
    }

    #[test]
    fn keystrokes_are_forwarded() {
        let mut mock = MockViewer::new();
        mock.push_keystroke(crate::viewer::KEY_ENTER);
        let mut stage = Stage::new(mock);
        assert_eq!(stage.last_keystroke(), crate::viewer::KEY_ENTER);
    }

    #[test]
    fn file_operations_are_forwarded() {
        let mut stage = Stage::new(MockViewer::new());
        assert!(stage.save_ply("/tmp/scene.ply"));
        assert!(stage.load_file("model.obj"));
        assert_eq!(stage.port().file_ops.len(), 2);
    }

    #[test]
    fn edges_are_created_with_pairs() {
        let mut stage = Stage::new(MockViewer::new());
        let pairs = [[0, 1], [1, 2]];
        let handle = stage
            .place_edges("wire", &cloud(3), &pairs, None, None)
            .unwrap();
        assert_eq!(stage.port().vertices(handle.raw()).unwrap().len(), 3);
    }

    #[test]
    fn trimesh_placement_round_trips_color() {
        let mut stage = Stage::new(MockViewer::new());
        let faces = [[0, 1, 2]];
        let handle = stage
            .place_trimesh(
                "tri",
                &cloud(3),
                &faces,
                Some(&ColorSpec::Rgb([1.0, 0.0, 0.0])),
                Some(0.5),
            )
            .unwrap();
        for v in stage.port().vertices(handle.raw()).unwrap() {
            let [r, g, b, a] = unpack_rgba(v.color);
            assert_eq!((r, g, b), (255, 0, 0));
            assert!((i32::from(a) - 128).abs() <= 1);
        }
    }
}
