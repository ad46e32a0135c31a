//! Content model
//!
//! Remote content fetched from the target repository and the desired state
//! it gets updated to. Only submodules are implemented; files and symlinks
//! are recognized so every consumer can reject them explicitly.

use crate::error::{Error, Result};
use crate::types::ContentEntry;

/// Content at a path of the target repository, or desired content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Submodule entry fetched from the remote
    RemoteSubmodule {
        /// Repository-relative path
        path: String,
        /// Pinned commit SHA
        sha: String,
    },
    /// Desired submodule pointer, path unknown
    LocalSubmodule {
        /// Desired commit SHA
        sha: String,
    },
    /// Regular file (not supported)
    File {
        /// Repository-relative path
        path: String,
        /// Blob SHA
        sha: String,
    },
    /// Symbolic link (not supported)
    Symlink {
        /// Repository-relative path
        path: String,
        /// Blob SHA
        sha: String,
    },
}

impl Content {
    /// Desired submodule pointer
    pub fn local_submodule(sha: impl Into<String>) -> Self {
        Self::LocalSubmodule { sha: sha.into() }
    }

    /// Classify an entry reported by the contents API
    pub fn from_entry(entry: ContentEntry) -> Result<Self> {
        let ContentEntry { kind, path, sha } = entry;
        match kind.as_str() {
            "submodule" => Ok(Self::RemoteSubmodule { path, sha }),
            "file" => Ok(Self::File { path, sha }),
            "symlink" => Ok(Self::Symlink { path, sha }),
            _ => Err(Error::UnsupportedContentType(kind)),
        }
    }

    /// Short name of the variant, for error messages
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RemoteSubmodule { .. } => "submodule",
            Self::LocalSubmodule { .. } => "local submodule",
            Self::File { .. } => "file",
            Self::Symlink { .. } => "symlink",
        }
    }

    /// Repository-relative path, unknown for local content
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::RemoteSubmodule { path, .. }
            | Self::File { path, .. }
            | Self::Symlink { path, .. } => Some(path),
            Self::LocalSubmodule { .. } => None,
        }
    }

    /// Pinned commit SHA if this is a submodule
    pub fn submodule_sha(&self) -> Option<&str> {
        match self {
            Self::RemoteSubmodule { sha, .. } | Self::LocalSubmodule { sha } => Some(sha),
            Self::File { .. } | Self::Symlink { .. } => None,
        }
    }

    /// Bring `self` to the state described by `other`.
    ///
    /// Returns `false` when nothing changed, in which case no remote
    /// mutation is needed.
    pub fn update(&mut self, other: &Self) -> Result<bool> {
        match self {
            Self::RemoteSubmodule { sha, .. } => {
                let desired = other.submodule_sha().ok_or(Error::TypeMismatch {
                    expected: "submodule",
                    actual: other.kind(),
                })?;
                if *sha == desired {
                    return Ok(false);
                }
                *sha = desired.to_string();
                Ok(true)
            }
            Self::LocalSubmodule { .. } | Self::File { .. } | Self::Symlink { .. } => Err(
                Error::UnsupportedContentType(format!("{} cannot be updated", self.kind())),
            ),
        }
    }
}
