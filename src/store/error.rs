use http::StatusCode;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Failure while touching the record store file.
///
/// Read-side failures are classified so handlers can answer 404 / 403 / 500;
/// write-side failures are always [`StoreError::Io`].
#[derive(Debug)]
pub enum StoreError {
    /// The store file does not exist yet (nothing has ever been appended).
    NotFound {
        /// Path of the missing store file
        path: PathBuf,
    },
    /// The store file exists but cannot be read.
    PermissionDenied {
        /// Path of the unreadable store file
        path: PathBuf,
    },
    /// Any other read or write failure.
    Io {
        /// Path of the store file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

impl StoreError {
    /// Classify an error raised while reading the store.
    pub fn read(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => StoreError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Wrap an error raised while appending to or rewriting the store.
    pub fn write(path: &Path, err: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }

    /// HTTP status code a handler answers with for this fault.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            StoreError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { path } => {
                write!(f, "store file '{}' not found", path.display())
            }
            StoreError::PermissionDenied { path } => {
                write!(f, "no permission to read store file '{}'", path.display())
            }
            StoreError::Io { path, source } => {
                write!(f, "I/O error on store file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_errors_are_classified() {
        let p = Path::new("users.txt");
        let nf = StoreError::read(p, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(nf, StoreError::NotFound { .. }));
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);

        let pd = StoreError::read(p, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(pd, StoreError::PermissionDenied { .. }));
        assert_eq!(pd.status(), StatusCode::FORBIDDEN);

        let other = StoreError::read(p, io::Error::other("disk on fire"));
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_write_errors_are_always_io() {
        let p = Path::new("users.txt");
        let err = StoreError::write(p, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("users.txt"));
    }
}
