use core::convert::TryFrom;

use log::debug;

use crate::{CpioFs, Entry, Error};

/// Origin of a seek
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum Whence {
    /// Relative to the start of the file
    Set = 0,
    /// Relative to the current position
    Cur = 1,
    /// Relative to the end of the file
    End = 2,
}

impl TryFrom<i32> for Whence {
    type Error = Error;

    fn try_from(value: i32) -> Result<Whence, Error> {
        match value {
            0 => Ok(Whence::Set),
            1 => Ok(Whence::Cur),
            2 => Ok(Whence::End),
            _ => Err(Error::BadParameter),
        }
    }
}

/// An open regular file.
///
/// Reads copy out of the archive image. The handle releases its slot in the
/// open count when closed or dropped.
#[derive(Debug)]
pub struct File<'fs, 'a> {
    fs: &'fs CpioFs<'a>,
    entry: Option<Entry<'a>>,
    pos: u32,
}

impl<'fs, 'a> File<'fs, 'a> {
    pub(crate) fn new(fs: &'fs CpioFs<'a>, entry: Entry<'a>) -> File<'fs, 'a> {
        fs.acquire();
        File {
            fs,
            entry: Some(entry),
            pos: 0,
        }
    }

    fn entry(&self) -> Result<&Entry<'a>, Error> {
        self.entry.as_ref().ok_or(Error::NotExist)
    }

    /// Copy up to `buf.len()` bytes from the current position.
    ///
    /// Returns the number of bytes copied, which is zero at end of file.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let data = self.entry()?.data();
        let pos = self.pos as usize;
        if pos > data.len() {
            return Err(Error::Unknown);
        }
        let count = buf.len().min(data.len() - pos);
        buf[..count].copy_from_slice(&data[pos..pos + count]);
        self.pos += count as u32;
        Ok(count)
    }

    /// Move the position and return it.
    ///
    /// The resolved position must lie in `0..=size`; otherwise the position
    /// is left alone and [`Error::SeekOutOfRange`] is returned.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u32, Error> {
        let size = self.entry()?.size();
        let base = match whence {
            Whence::Set => 0,
            Whence::Cur => i64::from(self.pos),
            Whence::End => i64::from(size),
        };
        let pos = base.checked_add(offset).ok_or(Error::SeekOutOfRange)?;
        if pos < 0 || pos > i64::from(size) {
            return Err(Error::SeekOutOfRange);
        }
        self.pos = pos as u32;
        Ok(self.pos)
    }

    pub fn tell(&self) -> Result<u32, Error> {
        self.entry()?;
        Ok(self.pos)
    }

    pub fn rewind(&mut self) -> Result<(), Error> {
        self.seek(0, Whence::Set).map(|_| ())
    }

    /// Declared size of the file. The position is not changed.
    pub fn size(&self) -> Result<u32, Error> {
        Ok(self.entry()?.size())
    }

    /// The whole contents, borrowed from the archive
    pub fn contents(&self) -> Result<&'a [u8], Error> {
        Ok(self.entry()?.data())
    }

    pub fn is_open(&self) -> bool {
        self.entry.is_some()
    }

    /// Release the handle. Closing twice fails with [`Error::NotExist`].
    pub fn close(&mut self) -> Result<(), Error> {
        let entry = self.entry.take().ok_or(Error::NotExist)?;
        debug!("cpio close file at {:#x}", entry.offset());
        self.fs.release();
        self.pos = 0;
        Ok(())
    }
}

impl Drop for File<'_, '_> {
    fn drop(&mut self) {
        if self.entry.is_some() {
            let _ = self.close();
        }
    }
}
