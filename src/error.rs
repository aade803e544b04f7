use std::{io, path::PathBuf};
use thiserror::Error;

/// The media directory could not be listed.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("media directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("media path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("could not read media directory {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl IndexError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io { path, source },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("query parameter `{name}` must be a non-negative integer, got {value:?}")]
    Malformed { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_maps_to_not_found() {
        let error = IndexError::from_io("/videos".into(), io::ErrorKind::NotFound.into());

        assert!(matches!(error, IndexError::NotFound(path) if path == PathBuf::from("/videos")));
    }

    #[test]
    fn permission_denied_keeps_io_source() {
        let error = IndexError::from_io("/videos".into(), io::ErrorKind::PermissionDenied.into());

        let IndexError::Io { path, source } = error else {
            panic!("expected an I/O error");
        };
        assert_eq!(path, PathBuf::from("/videos"));
        assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
    }
}
