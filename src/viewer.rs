//! The viewer boundary: the trait a remote-renderer transport implements.
//!
//! This crate prepares geometry; something else draws it. That something is
//! modeled as [`ViewerPort`]: a synchronous, blocking contract mirroring the
//! remote viewer's native interface. Adapters (an IPC binding, a socket
//! transport, the in-memory [`MockViewer`](crate::MockViewer)) implement the
//! trait; [`Stage`](crate::Stage) drives it.
//!
//! Creation calls answer with a non-negative handle on success and
//! [`INVALID_HANDLE`] on failure; update calls answer `false` when the new
//! buffer's vertex count differs from the capacity allocated at creation.

use glam::Vec3;

use crate::vertex::PackedVertex;

/// Sentinel returned by creation and lookup calls when no handle exists.
pub const INVALID_HANDLE: i32 = -1;

/// Key code the viewer reports for the escape key.
pub const KEY_ESC: i32 = 16777216;

/// Key code the viewer reports for the enter key.
pub const KEY_ENTER: i32 = 16777220;

/// Opaque identifier for a drawable owned by the viewer.
///
/// Handles are assigned once by the viewer at creation and only ever wrap
/// valid (non-sentinel) values; the raw number is available for embedding
/// applications that persist it across sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) i32);

impl Handle {
    /// The viewer's raw numeric handle.
    pub fn raw(self) -> i32 {
        self.0
    }
}

/// Either a caller-chosen object name or an already-known handle.
///
/// Names go through the registry's create-or-update resolution; handles
/// bypass it and address the viewer directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectRef {
    /// A caller-chosen name, resolved by the registry.
    Name(String),
    /// A handle returned by an earlier placement.
    Handle(Handle),
}

impl From<&str> for ObjectRef {
    fn from(name: &str) -> Self {
        ObjectRef::Name(name.to_owned())
    }
}

impl From<String> for ObjectRef {
    fn from(name: String) -> Self {
        ObjectRef::Name(name)
    }
}

impl From<Handle> for ObjectRef {
    fn from(handle: Handle) -> Self {
        ObjectRef::Handle(handle)
    }
}

/// The remote viewer contract.
///
/// Every method blocks until the viewer acknowledges. Implementors do not
/// interpret geometry; they move the wire buffers across whatever transport
/// connects them to the rendering process.
pub trait ViewerPort {
    /// Creates a triangle mesh drawable. Returns its handle, or
    /// [`INVALID_HANDLE`] on failure.
    fn create_mesh(&mut self, name: &str, vertices: &[PackedVertex], faces: &[[i32; 3]]) -> i32;

    /// Creates a point-cloud drawable.
    fn create_points(&mut self, name: &str, vertices: &[PackedVertex]) -> i32;

    /// Creates an edge-list drawable.
    fn create_edges(&mut self, name: &str, vertices: &[PackedVertex], edges: &[[i32; 2]]) -> i32;

    /// Replaces a drawable's vertex buffer. Returns `false` when the new
    /// vertex count differs from the allocated capacity.
    fn update_vertices(&mut self, handle: i32, vertices: &[PackedVertex]) -> bool;

    /// Resolves a name the viewer already knows. Returns [`INVALID_HANDLE`]
    /// for unknown names.
    fn lookup_handle(&self, name: &str) -> i32;

    /// Deletes a drawable.
    fn remove(&mut self, handle: i32) -> bool;

    /// Points the viewer camera: eye position, look-at target, up vector.
    fn set_camera_look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) -> bool;

    /// Returns the most recent keystroke captured by the viewer window.
    /// [`KEY_ESC`] and [`KEY_ENTER`] are the only codes this crate names;
    /// everything else is opaque.
    fn poll_last_keystroke(&mut self) -> i32;

    /// Asks the viewer to save the current scene as a PLY file.
    fn save_ply(&mut self, path: &str) -> bool;

    /// Asks the viewer to load a geometry file from its own filesystem.
    fn load_file(&mut self, path: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ref_conversions() {
        assert_eq!(ObjectRef::from("cloud"), ObjectRef::Name("cloud".into()));
        assert_eq!(
            ObjectRef::from(Handle(7)),
            ObjectRef::Handle(Handle(7))
        );
    }

    #[test]
    fn reserved_key_codes() {
        assert_eq!(KEY_ESC, 16777216);
        assert_eq!(KEY_ENTER, 16777220);
    }
}
