use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use cpiofs_core::CpioFs;
use log::debug;

use crate::{wrap_io_err, Error};

/// An archive image read from disk into memory
#[derive(Debug)]
pub struct ArchiveFile {
    path: PathBuf,
    data: Vec<u8>,
}

impl ArchiveFile {
    pub fn open(path: impl AsRef<Path>) -> Result<ArchiveFile, Error> {
        let path = path.as_ref().to_path_buf();

        let mut file = File::open(&path).map_err(wrap_io_err!(path, "Opening archive"))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(wrap_io_err!(path, "Reading archive"))?;
        debug!("read {} bytes from {}", data.len(), path.display());

        Ok(ArchiveFile { path, data })
    }

    /// Wrap an image that is already in memory
    pub fn from_vec(path: impl AsRef<Path>, data: Vec<u8>) -> ArchiveFile {
        ArchiveFile {
            path: path.as_ref().to_path_buf(),
            data,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A filesystem view borrowing this image
    pub fn fs(&self) -> CpioFs<'_> {
        CpioFs::new(&self.data)
    }
}
