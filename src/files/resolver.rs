//! Filesystem lookup and status classification.

use bytes::Bytes;
use std::io::ErrorKind;
use std::path::Path;

use crate::http::mime::content_type_for;
use crate::http::response::{Response, StatusCode};

/// Outcome of looking up a request path on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The file exists and was read completely.
    Found { contents: Bytes, content_type: String },
    /// Nothing exists at the path.
    NotFound,
    /// Something exists but could not be read (directories land here).
    ReadError,
    /// The stat call failed for a reason other than absence.
    StatError,
    /// The path resolves outside the serving root.
    Forbidden,
}

impl Resolution {
    pub fn status(&self) -> StatusCode {
        match self {
            Resolution::Found { .. } => StatusCode::OK,
            Resolution::NotFound => StatusCode::NOT_FOUND,
            Resolution::ReadError | Resolution::StatError => StatusCode::BAD_GATEWAY,
            Resolution::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    pub fn into_response(self) -> Response {
        match self {
            Resolution::Found { contents, content_type } => Response::ok(contents, content_type),
            Resolution::NotFound => Response::not_found(),
            Resolution::ReadError => Response::read_error(),
            Resolution::StatError => Response::system_error(),
            Resolution::Forbidden => Response::forbidden(),
        }
    }
}

/// Classifies `path`, which must already be joined onto `root`.
///
/// `root` is only used to reject entries whose canonical location (after
/// following symlinks) is outside the serving root.
pub async fn resolve(root: &Path, path: &Path) -> Resolution {
    if let Err(e) = tokio::fs::metadata(path).await {
        return match e.kind() {
            ErrorKind::NotFound => Resolution::NotFound,
            _ => {
                tracing::debug!(path = %path.display(), error = %e, "Stat failed");
                Resolution::StatError
            }
        };
    }

    if let (Ok(canonical_root), Ok(canonical_path)) = (
        tokio::fs::canonicalize(root).await,
        tokio::fs::canonicalize(path).await,
    ) {
        if !canonical_path.starts_with(&canonical_root) {
            tracing::debug!(
                path = %path.display(),
                resolved = %canonical_path.display(),
                "Path resolves outside serving root"
            );
            return Resolution::Forbidden;
        }
    }

    match tokio::fs::read(path).await {
        Ok(contents) => Resolution::Found {
            contents: Bytes::from(contents),
            content_type: content_type_for(path),
        },
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Read failed");
            Resolution::ReadError
        }
    }
}
