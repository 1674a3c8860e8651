//! Error types for staging operations.

use crate::viewer::Handle;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, StageError>;

/// Errors that can occur while encoding geometry or placing objects.
///
/// Every error is synchronous and surfaces to the immediate caller; nothing
/// is retried or suppressed inside the crate.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// Input data had an unsupported shape: a channel count other than
    /// 3/4/6/7, a row length that does not divide evenly, or an empty buffer.
    #[error("format error: {0}")]
    Format(String),

    /// A per-vertex color array length matched none of the accepted
    /// broadcasts (N scalars, 3N RGB values, or 4N RGBA values).
    #[error("color array of {len} values cannot be broadcast over {vertices} vertices")]
    ColorResolution {
        /// Number of values in the rejected array.
        len: usize,
        /// Number of vertices the array was resolved against.
        vertices: usize,
    },

    /// The viewer answered a creation request with the invalid-handle
    /// sentinel. Usually transient (viewer busy or restarting); the caller
    /// may retry, the library never does.
    #[error("viewer rejected creation of '{name}'")]
    RemoteRejection {
        /// Name the object was to be created under.
        name: String,
    },

    /// The viewer refused a vertex update because the new buffer's vertex
    /// count differs from the capacity allocated at creation. Create a new
    /// object instead of updating.
    #[error("viewer refused vertex update for {handle:?}: buffer size differs from allocated capacity")]
    SizeMismatch {
        /// Handle of the object whose update was refused.
        handle: Handle,
    },
}
