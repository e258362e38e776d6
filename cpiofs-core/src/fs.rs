use core::cell::Cell;
use core::fmt;

use log::debug;

use crate::find::{self, Comparator, Exact};
use crate::{Dir, Entries, Entry, Error, File, Mode};

/// A read-only filesystem over an old binary cpio image.
///
/// The image is borrowed, never copied. Handles opened from a `CpioFs`
/// borrow it in turn and bump an advisory open count until they are closed
/// or dropped.
pub struct CpioFs<'a> {
    data: &'a [u8],
    open_count: Cell<usize>,
}

impl<'a> CpioFs<'a> {
    pub fn new(data: &'a [u8]) -> CpioFs<'a> {
        CpioFs {
            data,
            open_count: Cell::new(0),
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Number of file and directory handles currently open
    pub fn open_count(&self) -> usize {
        self.open_count.get()
    }

    pub(crate) fn acquire(&self) {
        self.open_count.set(self.open_count.get() + 1);
    }

    pub(crate) fn release(&self) {
        // Nothing enforces balanced calls beyond the handles themselves
        self.open_count.set(self.open_count.get().saturating_sub(1));
    }

    /// Every record of the archive in order, excluding the trailer
    pub fn entries(&self) -> Entries<'a> {
        Entries::new(self.data)
    }

    /// Linear search from the start of the archive.
    ///
    /// `path` may start with `./` or `/`; entry names are normalized the
    /// same way before `cmp` sees them. Only entries whose mode intersects
    /// `mask` are considered.
    pub fn find<P, C>(&self, path: P, mask: Mode, cmp: C) -> Option<Entry<'a>>
    where
        P: AsRef<[u8]>,
        C: Comparator,
    {
        find::find(self.entries(), path.as_ref(), mask, cmp)
    }

    pub(crate) fn lookup(&self, path: &[u8], mask: Mode) -> Result<Entry<'a>, Error> {
        match self.find(path, mask, Exact) {
            Some(entry) => Ok(entry),
            None => {
                let path = core::str::from_utf8(path).unwrap_or("<non-utf8>");
                debug!("cpio lookup of {:?} failed", path);
                Err(Error::NotExist)
            }
        }
    }

    /// Type, permissions and size of a regular file or directory
    pub fn stat(&self, path: impl AsRef<[u8]>) -> Result<Info<'a>, Error> {
        let entry = self.lookup(path.as_ref(), Mode::FILE_DIR)?;
        Ok(Info::new(&entry))
    }

    pub fn open_file(&self, path: impl AsRef<[u8]>) -> Result<File<'_, 'a>, Error> {
        let entry = self.lookup(path.as_ref(), Mode::FILE)?;
        debug!("cpio open file at {:#x}", entry.offset());
        Ok(File::new(self, entry))
    }

    pub fn open_dir(&self, path: impl AsRef<[u8]>) -> Result<Dir<'_, 'a>, Error> {
        let entry = self.lookup(path.as_ref(), Mode::FILE_DIR)?;
        debug!("cpio open dir at {:#x}", entry.offset());
        Ok(Dir::new(self, entry))
    }
}

impl fmt::Debug for CpioFs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpioFs")
            .field("len", &self.data.len())
            .field("open_count", &self.open_count.get())
            .finish()
    }
}

/// What `stat` and directory reads report about an entry.
///
/// `path` and `name` borrow from the archive. They are only filled in by
/// directory reads; `stat` leaves both empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Info<'a> {
    /// File type bits
    pub kind: Mode,
    /// Permission bits
    pub perm: Mode,
    pub size: u32,
    /// Full name as stored in the archive, without the terminator
    pub path: &'a [u8],
    /// Last component of `path`
    pub name: &'a [u8],
}

impl<'a> Info<'a> {
    pub(crate) fn new(entry: &Entry<'a>) -> Info<'a> {
        let mode = entry.mode();
        Info {
            kind: mode.kind(),
            perm: mode.perm(),
            size: entry.size(),
            path: &[],
            name: &[],
        }
    }

    pub(crate) fn with_names(entry: &Entry<'a>) -> Info<'a> {
        let path = entry.path_bytes();
        let name = match path.iter().rposition(|&b| b == b'/') {
            Some(i) => &path[i + 1..],
            None => path,
        };
        Info {
            path,
            name,
            ..Info::new(entry)
        }
    }

    pub fn mode(&self) -> Mode {
        self.kind | self.perm
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}
