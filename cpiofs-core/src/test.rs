//! Assemble old binary cpio images for tests

use std::vec::Vec;

use crate::{Endianness, HEADER_SIZE, MAGIC, TRAILER};

pub const FILE2_CONTENTS: &[u8] = b"0123456789";
pub const FILE1_CONTENTS: &[u8] = b"hello, cpio\n";

/// Decoded header fields, without the magic
#[derive(Clone, Copy, Debug, Default)]
pub struct RawHeader {
    pub dev: u16,
    pub ino: u16,
    pub mode: u16,
    pub uid: u16,
    pub gid: u16,
    pub nlink: u16,
    pub rdev: u16,
    pub mtime: u32,
    pub namesize: u16,
    pub filesize: u32,
}

impl RawHeader {
    pub fn file(mode: u16, namesize: u16, filesize: u32) -> RawHeader {
        RawHeader {
            mode,
            nlink: 1,
            namesize,
            filesize,
            ..RawHeader::default()
        }
    }

    pub fn encode(&self, endian: Endianness) -> [u8; HEADER_SIZE] {
        let mut out = [0; HEADER_SIZE];
        let words = [
            MAGIC, self.dev, self.ino, self.mode, self.uid, self.gid, self.nlink, self.rdev,
        ];
        for (i, word) in words.iter().enumerate() {
            out[i * 2..i * 2 + 2].copy_from_slice(&endian.write_u16(*word));
        }
        let mtime = endian.write_u32(self.mtime);
        out[16..18].copy_from_slice(&mtime[0]);
        out[18..20].copy_from_slice(&mtime[1]);
        out[20..22].copy_from_slice(&endian.write_u16(self.namesize));
        let filesize = endian.write_u32(self.filesize);
        out[22..24].copy_from_slice(&filesize[0]);
        out[24..26].copy_from_slice(&filesize[1]);
        out
    }
}

pub struct ArchiveBuilder {
    endian: Endianness,
    data: Vec<u8>,
    ino: u16,
}

impl ArchiveBuilder {
    pub fn new(endian: Endianness) -> ArchiveBuilder {
        ArchiveBuilder {
            endian,
            data: Vec::new(),
            ino: 1,
        }
    }

    /// Append a record; the name gets its NUL terminator here
    pub fn entry(&mut self, name: &str, mode: u16, contents: &[u8]) -> &mut Self {
        let mut header = RawHeader::file(mode, name.len() as u16 + 1, contents.len() as u32);
        header.ino = self.ino;
        header.mtime = 1_600_000_000;
        self.ino += 1;
        self.raw(header, name.as_bytes(), contents)
    }

    /// Append a record with the given header verbatim
    pub fn raw(&mut self, header: RawHeader, name: &[u8], contents: &[u8]) -> &mut Self {
        self.data.extend_from_slice(&header.encode(self.endian));
        self.data.extend_from_slice(name);
        let namesize = header.namesize as usize;
        self.data
            .resize(self.data.len() + (namesize + (namesize & 1)).saturating_sub(name.len()), 0);
        self.data.extend_from_slice(contents);
        if contents.len() % 2 == 1 {
            self.data.push(0);
        }
        self
    }

    pub fn dir(&mut self, name: &str) -> &mut Self {
        self.entry(name, 0o040755, &[])
    }

    pub fn file(&mut self, name: &str, contents: &[u8]) -> &mut Self {
        self.entry(name, 0o100644, contents)
    }

    pub fn trailer(&mut self) -> &mut Self {
        let name = core::str::from_utf8(&TRAILER[..TRAILER.len() - 1]).unwrap();
        self.entry(name, 0, &[])
    }

    /// Image without a trailer
    pub fn build(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Image terminated by a trailer and some block padding
    pub fn finish(&mut self) -> Vec<u8> {
        self.trailer();
        let mut data = self.build();
        data.extend_from_slice(&vec![0; 512 - data.len() % 512]);
        data
    }
}

/// A small tree, laid out the way `find ./ | cpio -o` writes it:
///
/// ```text
/// ./
/// ./dir1
/// ./dir1/file2.txt     10 bytes
/// ./empty_dir
/// ./file1.txt          12 bytes
/// ./file_empty.txt     0 bytes
/// ```
pub fn tree(endian: Endianness) -> Vec<u8> {
    ArchiveBuilder::new(endian)
        .dir("./")
        .dir("./dir1")
        .file("./dir1/file2.txt", FILE2_CONTENTS)
        .dir("./empty_dir")
        .file("./file1.txt", FILE1_CONTENTS)
        .file("./file_empty.txt", &[])
        .finish()
}

#[test]
fn builder_pads_records() {
    let data = ArchiveBuilder::new(Endianness::Little)
        .file("a", b"xyz")
        .build();
    // name "a\0" is already even, "xyz" gets one pad byte
    assert_eq!(data.len(), HEADER_SIZE + 2 + 4);
    assert_eq!(&data[HEADER_SIZE..HEADER_SIZE + 2], b"a\0");
    assert_eq!(&data[HEADER_SIZE + 2..], b"xyz\0");
}
