//! Extention traits for base types defined in `cpiofs-core`.
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use cpiofs_core::{File, Info};

use crate::{Error, READ_BUF_SIZE};

pub trait InfoExt {
    /// Full name as stored in the archive
    fn path(&self) -> &Path;

    /// Last component of the name
    fn file_name(&self) -> &OsStr;
}

impl InfoExt for Info<'_> {
    fn path(&self) -> &Path {
        Path::new(OsStr::from_bytes(self.path))
    }

    fn file_name(&self) -> &OsStr {
        OsStr::from_bytes(self.name)
    }
}

pub trait FileExt {
    /// Read from the current position to the end of the file
    fn read_to_vec(&mut self) -> Result<Vec<u8>, Error>;
}

impl FileExt for File<'_, '_> {
    fn read_to_vec(&mut self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(self.size()? as usize);
        let mut buf = vec![0; READ_BUF_SIZE];
        loop {
            let count = self.read(&mut buf)?;
            if count == 0 {
                break;
            }
            out.extend_from_slice(&buf[..count]);
        }
        Ok(out)
    }
}
