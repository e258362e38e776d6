//! One-level directory listing over a flat archive.
//!
//! A cpio archive has no directory structure, only names. Listing a
//! directory scans forward for entries exactly one level below it, using
//! [`DirectChild`]. Each read resumes the scan right after the previous
//! child.
//!
//! This only works when every entry of a directory comes after the
//! directory's own record, and subtrees are written depth first without
//! interleaving, which is how `find | cpio -o` lays them out. Archives that
//! break this rule list in an unspecified way.
use log::debug;

use crate::find::{self, DirectChild};
use crate::{CpioFs, Entries, Entry, Error, Info, Mode};

#[derive(Debug)]
pub struct Dir<'fs, 'a> {
    fs: &'fs CpioFs<'a>,
    entry: Option<Entry<'a>>,
    /// Where the next read starts scanning; `None` once exhausted
    pos: Option<Entry<'a>>,
}

impl<'fs, 'a> Dir<'fs, 'a> {
    pub(crate) fn new(fs: &'fs CpioFs<'a>, entry: Entry<'a>) -> Dir<'fs, 'a> {
        fs.acquire();
        Dir {
            fs,
            entry: Some(entry),
            pos: Entry::first(fs.data()),
        }
    }

    fn find_child(&self, dir: &Entry<'a>, from: Option<Entry<'a>>) -> Option<Entry<'a>> {
        find::find(
            Entries::from_entry(from),
            dir.path_bytes(),
            Mode::FILE_DIR,
            DirectChild,
        )
    }

    /// Next direct child of this directory.
    ///
    /// Returns `Ok(None)` at the end of the directory and on every read
    /// after that.
    pub fn read(&mut self) -> Result<Option<Info<'a>>, Error> {
        let dir = *self.entry.as_ref().ok_or(Error::NotExist)?;
        if self.pos.is_none() {
            return Ok(None);
        }

        let mut found = self.find_child(&dir, self.pos);
        if found == Some(dir) {
            // The directory matches itself; step over its own record once
            found = found
                .and_then(|entry| entry.next_entry())
                .and_then(|next| self.find_child(&dir, Some(next)));
        }

        match found {
            Some(child) => {
                self.pos = child.next_entry();
                Ok(Some(Info::with_names(&child)))
            }
            None => {
                debug!("cpio dir at {:#x} exhausted", dir.offset());
                self.pos = None;
                Ok(None)
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.entry.is_some()
    }

    /// Release the handle. Closing twice fails with [`Error::NotExist`].
    pub fn close(&mut self) -> Result<(), Error> {
        let entry = self.entry.take().ok_or(Error::NotExist)?;
        debug!("cpio close dir at {:#x}", entry.offset());
        self.fs.release();
        self.pos = None;
        Ok(())
    }
}

impl<'a> Iterator for Dir<'_, 'a> {
    type Item = Info<'a>;

    fn next(&mut self) -> Option<Info<'a>> {
        self.read().ok().flatten()
    }
}

impl Drop for Dir<'_, '_> {
    fn drop(&mut self) {
        if self.entry.is_some() {
            let _ = self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use crate::test::{tree, ArchiveBuilder};
    use crate::{CpioFs, Endianness, Error};

    fn names<'a>(fs: &CpioFs<'a>, path: &str) -> Vec<&'a [u8]> {
        fs.open_dir(path).unwrap().map(|info| info.name).collect()
    }

    #[test]
    fn list_root() {
        for endian in [Endianness::Little, Endianness::Big] {
            let archive = tree(endian);
            let fs = CpioFs::new(&archive);
            assert_eq!(
                names(&fs, "./"),
                [&b"dir1"[..], b"empty_dir", b"file1.txt", b"file_empty.txt"]
            );
            assert_eq!(fs.open_count(), 0);
        }
    }

    #[test]
    fn list_subdir() {
        let archive = tree(Endianness::Little);
        let fs = CpioFs::new(&archive);
        let mut dir = fs.open_dir("./dir1").unwrap();
        let info = dir.read().unwrap().unwrap();
        assert_eq!(info.path, b"./dir1/file2.txt");
        assert_eq!(info.name, b"file2.txt");
        assert_eq!(info.size, 10);
        assert!(info.is_file());
        assert_eq!(dir.read(), Ok(None));
        assert_eq!(dir.read(), Ok(None));
    }

    #[test]
    fn list_empty_dir() {
        let archive = tree(Endianness::Big);
        let fs = CpioFs::new(&archive);
        assert!(names(&fs, "empty_dir").is_empty());
    }

    #[test]
    fn root_count_without_prefix() {
        let archive = tree(Endianness::Little);
        let fs = CpioFs::new(&archive);
        assert_eq!(fs.open_dir("/").unwrap().count(), 4);
        assert_eq!(fs.open_dir("dir1").unwrap().count(), 1);
    }

    #[test]
    fn last_child_is_last_record() {
        // Advancing past the final child ends the listing instead of
        // reporting that child again
        let archive = ArchiveBuilder::new(Endianness::Little)
            .dir("./")
            .dir("./d")
            .file("./d/a", b"1")
            .file("./d/b", b"2")
            .build();
        let fs = CpioFs::new(&archive);
        assert_eq!(names(&fs, "d"), [&b"a"[..], b"b"]);
    }

    #[test]
    fn nested_entries_are_skipped() {
        let archive = ArchiveBuilder::new(Endianness::Big)
            .dir("./")
            .dir("./a")
            .dir("./a/b")
            .file("./a/b/c", b"deep")
            .file("./a/x", b"")
            .file("./top", b"")
            .finish();
        let fs = CpioFs::new(&archive);
        assert_eq!(names(&fs, "a"), [&b"b"[..], b"x"]);
        assert_eq!(names(&fs, "a/b"), [&b"c"[..]]);
        assert_eq!(names(&fs, ""), [&b"a"[..], b"top"]);
    }

    #[test]
    fn names_without_dot_prefix() {
        let archive = ArchiveBuilder::new(Endianness::Little)
            .dir("etc")
            .file("etc/passwd", b"root:x:0:0\n")
            .dir("etc/init.d")
            .finish();
        let fs = CpioFs::new(&archive);
        let mut dir = fs.open_dir("/etc").unwrap();
        let first = dir.read().unwrap().unwrap();
        assert_eq!(first.path, b"etc/passwd");
        assert_eq!(first.name, b"passwd");
        let second = dir.read().unwrap().unwrap();
        assert_eq!(second.name, b"init.d");
        assert!(second.is_dir());
        assert_eq!(dir.read(), Ok(None));
    }

    #[test]
    fn open_missing() {
        let archive = tree(Endianness::Little);
        let fs = CpioFs::new(&archive);
        assert_eq!(fs.open_dir("nope").err(), Some(Error::NotExist));
        assert_eq!(fs.open_count(), 0);
    }

    #[test]
    fn close_twice() {
        let archive = tree(Endianness::Little);
        let fs = CpioFs::new(&archive);
        let mut dir = fs.open_dir("./").unwrap();
        assert_eq!(fs.open_count(), 1);
        assert_eq!(dir.close(), Ok(()));
        assert_eq!(fs.open_count(), 0);
        assert_eq!(dir.close(), Err(Error::NotExist));
        assert_eq!(dir.read(), Err(Error::NotExist));
        assert_eq!(dir.next(), None);
    }

    #[test]
    fn handles_are_independent() {
        let archive = tree(Endianness::Little);
        let fs = CpioFs::new(&archive);
        let mut root = fs.open_dir("./").unwrap();
        let mut sub = fs.open_dir("dir1").unwrap();
        assert_eq!(fs.open_count(), 2);
        assert_eq!(root.read().unwrap().unwrap().name, b"dir1");
        assert_eq!(sub.read().unwrap().unwrap().name, b"file2.txt");
        assert_eq!(root.read().unwrap().unwrap().name, b"empty_dir");
        drop(sub);
        assert_eq!(fs.open_count(), 1);
    }
}
