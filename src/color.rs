//! Color resolution and RGBA packing.
//!
//! Colors can be given as a named single color, an explicit RGB triplet, or a
//! per-vertex array (one brightness scalar, one RGB triplet, or one RGBA
//! quadruplet per vertex). Whatever the source, every vertex ends up with an
//! RGBA quadruplet in `[0, 1]` which is then packed into the single `f32`
//! color lane of the wire format: each channel is scaled to `[0, 255]`,
//! truncated to an unsigned byte, and the four bytes `[r, g, b, a]` are
//! reinterpreted in memory order as one `f32`. The viewer unpacks the same
//! way, so the byte order is a wire contract, not a convenience.

use crate::error::{Result, StageError};

/// The fixed alphabet of named colors understood by the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedColor {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    White,
    Black,
}

impl NamedColor {
    /// The RGB triplet for this color, channels in `[0, 1]`.
    pub fn rgb(self) -> [f32; 3] {
        match self {
            NamedColor::Red => [1.0, 0.0, 0.0],
            NamedColor::Green => [0.0, 1.0, 0.0],
            NamedColor::Blue => [0.0, 0.0, 1.0],
            NamedColor::Cyan => [0.0, 1.0, 1.0],
            NamedColor::Magenta => [1.0, 0.0, 1.0],
            NamedColor::Yellow => [1.0, 1.0, 0.0],
            NamedColor::White => [1.0, 1.0, 1.0],
            NamedColor::Black => [0.0, 0.0, 0.0],
        }
    }
}

/// How to color the vertices of a single placement call.
///
/// Array variants are validated against the vertex count when the call is
/// resolved: `Scalar` expects one value per vertex, `PerVertexRgb` three and
/// `PerVertexRgba` four. Any other length is a
/// [`ColorResolution`](StageError::ColorResolution) error.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorSpec {
    /// One named color applied to every vertex.
    Named(NamedColor),
    /// One uniformly random RGB triplet, drawn once and shared by every
    /// vertex of the call.
    Random,
    /// An explicit RGB triplet applied to every vertex.
    Rgb([f32; 3]),
    /// One brightness value per vertex, broadcast into R, G and B.
    Scalar(Vec<f32>),
    /// One RGB triplet per vertex, flattened row-major.
    PerVertexRgb(Vec<f32>),
    /// One RGBA quadruplet per vertex, flattened row-major.
    PerVertexRgba(Vec<f32>),
}

impl ColorSpec {
    /// Overwrites the color channels of an xyz+rgba working set.
    ///
    /// RGB sources leave the existing alpha channel untouched;
    /// `PerVertexRgba` replaces it. The working set is owned by the encoder,
    /// never a caller buffer.
    pub(crate) fn apply_to(&self, rgba: &mut [[f32; 4]]) -> Result<()> {
        let n = rgba.len();
        match self {
            ColorSpec::Named(named) => broadcast_rgb(rgba, named.rgb()),
            ColorSpec::Random => broadcast_rgb(rgba, rand::random::<[f32; 3]>()),
            ColorSpec::Rgb(triplet) => broadcast_rgb(rgba, *triplet),
            ColorSpec::Scalar(values) => {
                check_len(values.len(), n, n)?;
                for (out, v) in rgba.iter_mut().zip(values) {
                    out[0] = *v;
                    out[1] = *v;
                    out[2] = *v;
                }
            }
            ColorSpec::PerVertexRgb(values) => {
                check_len(values.len(), 3 * n, n)?;
                for (out, v) in rgba.iter_mut().zip(values.chunks_exact(3)) {
                    out[..3].copy_from_slice(v);
                }
            }
            ColorSpec::PerVertexRgba(values) => {
                check_len(values.len(), 4 * n, n)?;
                for (out, v) in rgba.iter_mut().zip(values.chunks_exact(4)) {
                    out.copy_from_slice(v);
                }
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for ColorSpec {
    type Err = StageError;

    /// Parses the viewer's one-character color alphabet:
    /// `r g b c m y w k` for the named colors and `R` for random.
    fn from_str(s: &str) -> Result<Self> {
        let named = match s {
            "r" => NamedColor::Red,
            "g" => NamedColor::Green,
            "b" => NamedColor::Blue,
            "c" => NamedColor::Cyan,
            "m" => NamedColor::Magenta,
            "y" => NamedColor::Yellow,
            "w" => NamedColor::White,
            "k" => NamedColor::Black,
            "R" => return Ok(ColorSpec::Random),
            other => return Err(StageError::Format(format!("unknown color name '{other}'"))),
        };
        Ok(ColorSpec::Named(named))
    }
}

impl From<NamedColor> for ColorSpec {
    fn from(named: NamedColor) -> Self {
        ColorSpec::Named(named)
    }
}

impl From<[f32; 3]> for ColorSpec {
    fn from(rgb: [f32; 3]) -> Self {
        ColorSpec::Rgb(rgb)
    }
}

fn broadcast_rgb(rgba: &mut [[f32; 4]], rgb: [f32; 3]) {
    for out in rgba {
        out[..3].copy_from_slice(&rgb);
    }
}

fn check_len(len: usize, expected: usize, vertices: usize) -> Result<()> {
    if len == expected {
        Ok(())
    } else {
        Err(StageError::ColorResolution { len, vertices })
    }
}

/// Overwrites the alpha channel of the working set when an explicit alpha
/// was given. An alpha of zero means "unset" (the viewer's convention), so
/// it is ignored rather than applied.
pub(crate) fn apply_alpha(rgba: &mut [[f32; 4]], alpha: Option<f32>) {
    if let Some(a) = alpha {
        if a != 0.0 {
            for out in rgba {
                out[3] = a;
            }
        }
    }
}

/// Resolves a color specification to one RGBA quadruplet per vertex.
///
/// No specification defaults to opaque white; an explicit `alpha` overwrites
/// the alpha channel for every vertex regardless of source, including
/// [`ColorSpec::PerVertexRgba`].
pub fn resolve_colors(spec: Option<&ColorSpec>, alpha: Option<f32>, vertices: usize) -> Result<Vec<[f32; 4]>> {
    let mut rgba = vec![[1.0, 1.0, 1.0, 1.0]; vertices];
    if let Some(spec) = spec {
        spec.apply_to(&mut rgba)?;
    }
    apply_alpha(&mut rgba, alpha);
    Ok(rgba)
}

/// Packs an RGBA quadruplet into the wire format's `f32` color lane.
///
/// Channels are clamped to `[0, 1]`, scaled to `[0, 255]` and truncated to
/// bytes; the bytes occupy the lane in `[r, g, b, a]` memory order.
pub fn pack_rgba(rgba: [f32; 4]) -> f32 {
    let bytes = rgba.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
    bytemuck::cast(bytes)
}

/// Recovers the four color bytes from a packed `f32` color lane.
pub fn unpack_rgba(packed: f32) -> [u8; 4] {
    bytemuck::cast(packed)
}
