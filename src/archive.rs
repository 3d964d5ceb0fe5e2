//! Extraction of the input archive into a scratch directory.

use crate::errors::{ArchiveError, ArchiveResult};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tempfile::TempDir;
use tracing::info;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Archive layouts recognized by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tar,
    TarGz,
    Zip,
}

impl ArchiveFormat {
    /// Detect the format from the file name suffix, ignoring ASCII case.
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else if name.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }
}

/// Extract `archive` into a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn materialize(archive: &Path) -> ArchiveResult<TempDir> {
    if !archive.exists() {
        return Err(ArchiveError::NotFound(archive.to_path_buf()));
    }
    let format = ArchiveFormat::detect(archive)
        .ok_or_else(|| ArchiveError::Unsupported(archive.to_path_buf()))?;

    let scratch = tempfile::Builder::new()
        .prefix("archive_shell-")
        .tempdir()
        .map_err(ArchiveError::Scratch)?;
    unpack(format, archive, scratch.path())?;

    info!(
        archive = %archive.display(),
        ?format,
        root = %scratch.path().display(),
        "archive extracted"
    );
    Ok(scratch)
}

fn unpack(format: ArchiveFormat, archive: &Path, dest: &Path) -> ArchiveResult<()> {
    let extract_err = |source| ArchiveError::Extract {
        path: archive.to_path_buf(),
        source,
    };
    let mut file = File::open(archive).map_err(extract_err)?;

    match format {
        // A `.tar` name may still hold gzip data.
        ArchiveFormat::Tar if is_gzip(&mut file).map_err(extract_err)? => {
            tar::Archive::new(GzDecoder::new(file))
                .unpack(dest)
                .map_err(extract_err)
        }
        ArchiveFormat::Tar => tar::Archive::new(file).unpack(dest).map_err(extract_err),
        ArchiveFormat::TarGz => tar::Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .map_err(extract_err),
        ArchiveFormat::Zip => {
            let zip_err = |source| ArchiveError::Zip {
                path: archive.to_path_buf(),
                source,
            };
            zip::ZipArchive::new(file)
                .and_then(|mut zip| zip.extract(dest))
                .map_err(zip_err)
        }
    }
}

/// Check for the gzip magic bytes, leaving the file rewound.
fn is_gzip(file: &mut File) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let read = file.read(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(read == 2 && magic == GZIP_MAGIC)
}
