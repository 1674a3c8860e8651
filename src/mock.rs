//! In-memory viewer for headless testing.
//!
//! `MockViewer` implements [`ViewerPort`] by tracking scene state in
//! HashMaps without any remote process. Use it to verify create-vs-update
//! dispatch, buffer-capacity semantics and removal bookkeeping, or to run
//! the demos without a viewer installed.

use std::collections::{HashMap, VecDeque};

use glam::Vec3;

use crate::vertex::PackedVertex;
use crate::viewer::{INVALID_HANDLE, ViewerPort};

/// Mock viewer for testing.
///
/// Handles are allocated sequentially from zero. Each drawable keeps the
/// vertex buffer it was created with as its fixed capacity: updates with a
/// different vertex count are refused, like the real viewer's vertex-buffer
/// allocation. Creation can be forced to fail via
/// [`reject_creates`](Self::reject_creates) to exercise rejection handling.
#[derive(Debug, Default)]
pub struct MockViewer {
    /// Name → handle, as the viewer itself would resolve names.
    names: HashMap<String, i32>,
    /// Per-handle vertex buffers; the stored length is the capacity.
    buffers: HashMap<i32, Vec<PackedVertex>>,
    next_handle: i32,
    /// When set, every creation call answers the invalid-handle sentinel.
    pub reject_creates: bool,
    /// Number of creation calls received (meshes, points and edges).
    pub create_calls: u32,
    /// Number of vertex-update calls received.
    pub update_calls: u32,
    /// Number of removal calls received.
    pub remove_calls: u32,
    /// Last camera look-at received, as (eye, center, up).
    pub look_at: Option<(Vec3, Vec3, Vec3)>,
    /// Paths passed to `save_ply` / `load_file`, in call order.
    pub file_ops: Vec<String>,
    keystrokes: VecDeque<i32>,
}

impl MockViewer {
    /// Creates an empty mock viewer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live drawables.
    pub fn object_count(&self) -> usize {
        self.buffers.len()
    }

    /// The current vertex buffer of a drawable, if it exists.
    pub fn vertices(&self, handle: i32) -> Option<&[PackedVertex]> {
        self.buffers.get(&handle).map(Vec::as_slice)
    }

    /// Queues a keystroke for a later `poll_last_keystroke`.
    pub fn push_keystroke(&mut self, code: i32) {
        self.keystrokes.push_back(code);
    }

    fn allocate(&mut self, name: &str, vertices: &[PackedVertex]) -> i32 {
        self.create_calls += 1;
        if self.reject_creates {
            return INVALID_HANDLE;
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.names.insert(name.to_owned(), handle);
        self.buffers.insert(handle, vertices.to_vec());
        handle
    }
}

impl ViewerPort for MockViewer {
    fn create_mesh(&mut self, name: &str, vertices: &[PackedVertex], _faces: &[[i32; 3]]) -> i32 {
        self.allocate(name, vertices)
    }

    fn create_points(&mut self, name: &str, vertices: &[PackedVertex]) -> i32 {
        self.allocate(name, vertices)
    }

    fn create_edges(&mut self, name: &str, vertices: &[PackedVertex], _edges: &[[i32; 2]]) -> i32 {
        self.allocate(name, vertices)
    }

    fn update_vertices(&mut self, handle: i32, vertices: &[PackedVertex]) -> bool {
        self.update_calls += 1;
        match self.buffers.get_mut(&handle) {
            Some(buffer) if buffer.len() == vertices.len() => {
                buffer.copy_from_slice(vertices);
                true
            }
            _ => false,
        }
    }

    fn lookup_handle(&self, name: &str) -> i32 {
        self.names.get(name).copied().unwrap_or(INVALID_HANDLE)
    }

    fn remove(&mut self, handle: i32) -> bool {
        self.remove_calls += 1;
        self.names.retain(|_, h| *h != handle);
        self.buffers.remove(&handle).is_some()
    }

    fn set_camera_look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) -> bool {
        self.look_at = Some((eye, center, up));
        true
    }

    fn poll_last_keystroke(&mut self) -> i32 {
        self.keystrokes.pop_front().unwrap_or(0)
    }

    fn save_ply(&mut self, path: &str) -> bool {
        self.file_ops.push(path.to_owned());
        true
    }

    fn load_file(&mut self, path: &str) -> bool {
        self.file_ops.push(path.to_owned());
        true
    }
}
