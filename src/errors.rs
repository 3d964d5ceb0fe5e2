use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a session cannot start from the given archive.
///
/// Display strings are the diagnostics printed to the user; causes are
/// reached through `source()` and shown by `{:#}` formatting.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Unsupported file format: {}", .0.display())]
    Unsupported(PathBuf),
    #[error("Failed to create scratch directory")]
    Scratch(#[source] io::Error),
    #[error("Failed to extract {}", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to extract {}", .path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;
