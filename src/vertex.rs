//! The wire vertex format and the point-data encoder.
//!
//! Every drawable the viewer knows about is backed by a buffer of
//! [`PackedVertex`] values. Input points arrive in one of four loosely-typed
//! channel layouts and are normalized to that single wire layout here:
//!
//! | Channels | Interpretation        | Expansion                                |
//! |----------|-----------------------|------------------------------------------|
//! | 3        | xyz                   | append opaque white RGBA                 |
//! | 4        | xyz + intensity       | broadcast channel 4 into R, G, B; A = 1  |
//! | 6        | xyz + rgb             | append A = 1                             |
//! | 7        | xyz + rgba            | pass through                             |
//!
//! Any other channel count is a [`Format`](StageError::Format) error. After
//! expansion, an optional [`ColorSpec`] overrides the color channels and an
//! optional alpha overrides the alpha channel, then each RGBA quadruplet is
//! packed into the final `f32` color lane (see [`pack_rgba`](crate::pack_rgba)).
//!
//! # Wire Layout
//!
//! Each vertex occupies 16 bytes, position always first:
//!
//! | Attribute | Format    | Offset |
//! |-----------|-----------|--------|
//! | position  | Float32x3 | 0      |
//! | color     | Float32   | 12     |
//!
//! The struct is `#[repr(C)]` and derives [`bytemuck::Pod`], so a buffer can
//! be handed to a transport as raw bytes with `bytemuck::cast_slice`.

use glam::Mat4;

use crate::color::{self, ColorSpec};
use crate::error::{Result, StageError};

/// A single vertex in the viewer's wire layout: three position floats
/// followed by one float whose four bytes are the packed RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVertex {
    /// Position in world space.
    pub position: [f32; 3],
    /// Four color bytes `[r, g, b, a]` reinterpreted as one `f32` lane.
    pub color: f32,
}

/// The accepted input channel layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChannelLayout {
    Xyz,
    XyzIntensity,
    XyzRgb,
    XyzRgba,
}

impl ChannelLayout {
    fn from_width(width: usize) -> Result<Self> {
        match width {
            3 => Ok(ChannelLayout::Xyz),
            4 => Ok(ChannelLayout::XyzIntensity),
            6 => Ok(ChannelLayout::XyzRgb),
            7 => Ok(ChannelLayout::XyzRgba),
            other => Err(StageError::Format(format!(
                "unsupported channel count {other}, expected 3, 4, 6 or 7"
            ))),
        }
    }

    fn width(self) -> usize {
        match self {
            ChannelLayout::Xyz => 3,
            ChannelLayout::XyzIntensity => 4,
            ChannelLayout::XyzRgb => 6,
            ChannelLayout::XyzRgba => 7,
        }
    }
}

/// An owned N×C point buffer, C ∈ {3, 4, 6, 7}, rows flattened row-major.
///
/// This is the "loose" side of the encoder: positions with optional color
/// channels, before any resolution against a [`ColorSpec`]. Construction
/// validates the shape once; encoding cannot fail on shape afterwards.
///
/// # Example
///
/// ```
/// use peltast::PointCloud;
///
/// // Two points with per-point RGB.
/// let cloud = PointCloud::from_rows(6, vec![
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0,
///     1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
/// ]).unwrap();
/// assert_eq!(cloud.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    layout: ChannelLayout,
    data: Vec<f32>,
}

impl PointCloud {
    /// Creates a point cloud from row-major data with the given channel
    /// count per point.
    ///
    /// Fails if the channel count is not 3, 4, 6 or 7, if the data length is
    /// not a multiple of it, or if the buffer holds no complete point.
    pub fn from_rows(channels: usize, data: Vec<f32>) -> Result<Self> {
        let layout = ChannelLayout::from_width(channels)?;
        if data.is_empty() || data.len() % channels != 0 {
            return Err(StageError::Format(format!(
                "{} values do not form complete {channels}-channel points",
                data.len()
            )));
        }
        Ok(Self { layout, data })
    }

    /// Creates a bare-position point cloud.
    pub fn from_xyz(points: &[[f32; 3]]) -> Result<Self> {
        Self::from_rows(3, points.iter().flatten().copied().collect())
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.data.len() / self.layout.width()
    }

    /// Always `false`; kept for the conventional pairing with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of channels per point.
    pub fn channels(&self) -> usize {
        self.layout.width()
    }

    /// Encodes the cloud into the viewer's wire layout.
    ///
    /// Channel expansion, color override and alpha override happen in that
    /// order (see the module docs); the input buffer is never mutated.
    pub fn encode(
        &self,
        color: Option<&ColorSpec>,
        alpha: Option<f32>,
    ) -> Result<Vec<PackedVertex>> {
        let width = self.layout.width();
        let n = self.len();
        let mut positions = Vec::with_capacity(n);
        let mut rgba = Vec::with_capacity(n);
        for row in self.data.chunks_exact(width) {
            positions.push([row[0], row[1], row[2]]);
            rgba.push(match self.layout {
                ChannelLayout::Xyz => [1.0, 1.0, 1.0, 1.0],
                ChannelLayout::XyzIntensity => [row[3], row[3], row[3], 1.0],
                ChannelLayout::XyzRgb => [row[3], row[4], row[5], 1.0],
                ChannelLayout::XyzRgba => [row[3], row[4], row[5], row[6]],
            });
        }

        if let Some(spec) = color {
            spec.apply_to(&mut rgba)?;
        }
        color::apply_alpha(&mut rgba, alpha);

        Ok(positions
            .into_iter()
            .zip(rgba)
            .map(|(position, quad)| PackedVertex {
                position,
                color: color::pack_rgba(quad),
            })
            .collect())
    }

    /// Returns a copy of the cloud with every position transformed by the
    /// given matrix. Color channels are carried over unchanged.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let width = self.layout.width();
        let mut data = self.data.clone();
        for row in data.chunks_exact_mut(width) {
            let p = matrix.transform_point3(glam::Vec3::new(row[0], row[1], row[2]));
            row[..3].copy_from_slice(&p.to_array());
        }
        Self {
            layout: self.layout,
            data,
        }
    }
}

/// A structured rows×cols grid of points, each with C ∈ {3, 4, 6, 7}
/// channels, stored row-major.
///
/// A grid is what [`Stage::place_surface`](crate::Stage::place_surface)
/// triangulates into a mesh: the grid dimensions drive the index generation
/// while the flattened point data drives vertex encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct PointGrid {
    rows: usize,
    cols: usize,
    cloud: PointCloud,
}

impl PointGrid {
    /// Creates a grid from row-major data laid out as rows×cols×channels.
    pub fn from_rows(rows: usize, cols: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols * channels {
            return Err(StageError::Format(format!(
                "{} values do not fill a {rows}x{cols} grid of {channels}-channel points",
                data.len()
            )));
        }
        let cloud = PointCloud::from_rows(channels, data)?;
        Ok(Self { rows, cols, cloud })
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The grid's points flattened row-major into a point cloud.
    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }
}
