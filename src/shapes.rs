//! Built-in primitive shapes.
//!
//! Each primitive is a small hand-authored vertex/face table in its local
//! frame; placement calls transform and encode a fresh copy per call, so the
//! catalog itself is immutable.

/// A reusable vertex/face definition for a built-in primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    /// Vertex positions in the primitive's local frame.
    pub vertices: Vec<[f32; 3]>,
    /// Triangle indices into `vertices`.
    pub faces: Vec<[i32; 3]>,
}

/// A tetrahedral marker, half a unit tall, centered on the origin of its
/// base triangle.
pub fn marker() -> Primitive {
    let s = 1.0 / 3.0_f32.sqrt();
    let apex = 8.0_f32.sqrt() * s / 2.0;
    let vertices = vec![
        [-0.5, -s / 2.0, 0.0],
        [0.0, s, 0.0],
        [0.5, -s / 2.0, 0.0],
        [0.0, 0.0, apex],
    ];
    #[rustfmt::skip]
    let faces = vec![
        [0, 3, 1],
        [1, 3, 2],
        [0, 2, 3],
        [0, 2, 1],
    ];
    Primitive { vertices, faces }
}

/// A cuboid spanning `[-1, 1]` on every axis.
pub fn cuboid() -> Primitive {
    #[rustfmt::skip]
    let vertices = vec![
        [-1.0, -1.0, -1.0],
        [-1.0,  1.0, -1.0],
        [ 1.0,  1.0, -1.0],
        [ 1.0, -1.0, -1.0],
        [-1.0, -1.0,  1.0],
        [-1.0,  1.0,  1.0],
        [ 1.0,  1.0,  1.0],
        [ 1.0, -1.0,  1.0],
    ];
    #[rustfmt::skip]
    let faces = vec![
        [3, 1, 0], [3, 1, 2], // near
        [3, 6, 2], [3, 7, 6], // right
        [0, 1, 5], [0, 5, 4], // left
        [0, 7, 4], [0, 3, 7], // bottom
        [1, 2, 6], [1, 6, 5], // top
        [5, 6, 7], [4, 5, 7], // far
    ];
    Primitive { vertices, faces }
}

/// A camera frustum glyph: an apex at the origin, four frustum corners one
/// unit ahead, and two short axis ticks marking the image x and y
/// directions. Vertices 1–4 are the frustum corners (the part an intrinsics
/// matrix reshapes), 5–6 the x tick, 7–8 the y tick.
pub fn camera_glyph() -> Primitive {
    #[rustfmt::skip]
    let vertices = vec![
        [ 0.0,  0.0, 0.0],
        [ 1.0,  1.0, 1.0],
        [-1.0,  1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [ 1.0, -1.0, 1.0],
        [ 1.0,  0.0, 0.0],
        [ 1.0,  0.1, 0.0],
        [ 0.0,  1.0, 0.0],
        [ 0.1,  1.0, 0.0],
    ];
    #[rustfmt::skip]
    let faces = vec![
        [0, 1, 2], // frustum sides
        [0, 2, 3],
        [0, 3, 4],
        [0, 4, 1],
        [1, 2, 3], // far plane
        [1, 3, 4],
        [0, 6, 5], // x tick
        [0, 7, 8], // y tick
    ];
    Primitive { vertices, faces }
}
