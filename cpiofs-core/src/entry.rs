//! Record validation and sequential traversal.
//!
//! There is no index in a cpio archive; a record can only be reached by
//! walking from a known earlier record. An [`Entry`] is a validated view of
//! one record that remembers where it sits in the archive, so the walk can be
//! resumed from it.
use core::fmt;

use log::trace;

use crate::{Header, Mode, HEADER_SIZE};

/// Name of the sentinel record, including its NUL terminator
pub const TRAILER: &[u8] = b"TRAILER!!!\0";

/// A validated record: header, name and data all fit in the archive.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    archive: &'a [u8],
    offset: usize,
    header: &'a Header,
}

impl<'a> Entry<'a> {
    /// Check that a whole padded record fits in `data`.
    ///
    /// `data` must be strictly longer than a bare header, even for a record
    /// with an empty name and no data.
    pub fn valid(data: &[u8]) -> bool {
        if data.len() <= HEADER_SIZE {
            return false;
        }
        let header = match Header::parse(data) {
            Some(header) => header,
            None => return false,
        };
        // Both padded sizes fit in 33 bits, so the sum cannot overflow
        let remaining = (data.len() - HEADER_SIZE) as u64;
        remaining >= header.padded_namesize() + header.padded_filesize()
    }

    /// Validate the record starting at `offset` in `archive`.
    ///
    /// Returns `None` if the record does not fit or if it is the trailer,
    /// so a caller cannot tell a truncated archive from a finished one.
    pub fn parse(archive: &'a [u8], offset: usize) -> Option<Entry<'a>> {
        let data = archive.get(offset..)?;
        if !Entry::valid(data) {
            trace!("cpio record at {:#x} does not fit in {} bytes", offset, data.len());
            return None;
        }
        let header = Header::parse(data)?;
        let entry = Entry {
            archive,
            offset,
            header,
        };
        if entry.is_trailer() {
            trace!("cpio trailer at {:#x}", offset);
            return None;
        }
        Some(entry)
    }

    /// First record of an archive, or `None` for an empty archive
    pub fn first(archive: &'a [u8]) -> Option<Entry<'a>> {
        Entry::parse(archive, 0)
    }

    /// The record following this one, or `None` once the archive ends
    pub fn next_entry(&self) -> Option<Entry<'a>> {
        let next = self.offset + self.record_len();
        if next >= self.archive.len() {
            return None;
        }
        Entry::parse(self.archive, next)
    }

    pub fn header(&self) -> &'a Header {
        self.header
    }

    /// Position of the header in the archive
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left in the archive from the start of this record
    pub fn remaining(&self) -> usize {
        self.archive.len() - self.offset
    }

    /// Size of header, padded name and padded data
    pub fn record_len(&self) -> usize {
        // A parsed entry fits in the archive, so this fits in usize
        HEADER_SIZE + (self.header.padded_namesize() + self.header.padded_filesize()) as usize
    }

    pub fn mode(&self) -> Mode {
        self.header.mode()
    }

    pub fn size(&self) -> u32 {
        self.header.filesize()
    }

    /// All `namesize` bytes of the name, usually ending in a NUL
    pub fn name_bytes(&self) -> &'a [u8] {
        let start = self.offset + HEADER_SIZE;
        &self.archive[start..start + self.header.namesize() as usize]
    }

    /// The name, ending at the first NUL
    pub fn path_bytes(&self) -> &'a [u8] {
        let name = self.name_bytes();
        let end = name.iter().position(|&b| b == 0).unwrap_or(name.len());
        &name[..end]
    }

    pub fn data(&self) -> &'a [u8] {
        let start = self.offset + HEADER_SIZE + self.header.padded_namesize() as usize;
        &self.archive[start..start + self.header.filesize() as usize]
    }

    pub fn is_trailer(&self) -> bool {
        self.name_bytes() == TRAILER
    }
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.archive.as_ptr() == other.archive.as_ptr() && self.offset == other.offset
    }
}

impl Eq for Entry<'_> {}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("offset", &self.offset)
            .field("path", &core::str::from_utf8(self.path_bytes()))
            .field("mode", &format_args!("{:o}", self.header.mode_bits()))
            .field("size", &self.size())
            .finish()
    }
}

/// Every validated record of an archive, in archive order
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    next: Option<Entry<'a>>,
}

impl<'a> Entries<'a> {
    pub fn new(archive: &'a [u8]) -> Entries<'a> {
        Entries {
            next: Entry::first(archive),
        }
    }

    /// Continue a walk from `entry`, which is yielded first
    pub fn from_entry(entry: Option<Entry<'a>>) -> Entries<'a> {
        Entries { next: entry }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Entry<'a>> {
        let entry = self.next.take()?;
        self.next = entry.next_entry();
        Some(entry)
    }
}
