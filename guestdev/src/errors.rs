//! Error types for device resolution and guest addressing.
//!
//! Errors are categorized by what the caller can do about them:
//! - [`DeviceError::InvalidArgument`]: bad input, surfaced immediately
//! - [`DeviceError::NotFound`]: the path or mount point does not resolve
//! - [`DeviceError::Os`]: a syscall failed for a reason other than "missing"
//!
//! ```ignore
//! match resolver.device_for_path(path) {
//!     Err(DeviceError::InvalidArgument(_)) => { /* caller bug */ }
//!     Err(DeviceError::NotFound(_)) => { /* report to user */ }
//!     Err(DeviceError::Os { .. }) => { /* log, maybe retry */ }
//!     _ => {}
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used across the crate.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur while resolving host devices or assigning guest addresses.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Empty path, negative index, index beyond the configured capacity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Path or mount point could not be resolved.
    #[error("not found: {0}")]
    NotFound(String),

    /// Underlying syscall failed.
    #[error("{op} {}: {source}", .path.display())]
    Os {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The mount table could not be read.
    #[error("mount table: {0}")]
    MountTable(String),

    /// Configuration could not be loaded.
    #[error("config: {0}")]
    Config(String),
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl DeviceError {
    /// Create an OS-level error for `op` on `path`.
    pub fn os(op: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Os {
            op,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Map a stat-like failure: "does not exist" becomes [`DeviceError::NotFound`],
    /// everything else an OS error.
    pub fn from_stat(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(format!("{}: {}", path.display(), source))
        } else {
            Self::os("stat", path, source)
        }
    }

    /// True for errors a caller can treat as "nothing there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
