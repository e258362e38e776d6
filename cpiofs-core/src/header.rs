//! The packed struct represents the on-disk format of an old binary cpio
//! header. Every field is kept as raw bytes and decoded on access, so the
//! struct has alignment 1 and no layout depends on the host.

use bytemuck::{Pod, Zeroable};

use crate::{Mode, HEADER_SIZE};

/// `070707` in the byte order the archive was written with
pub const MAGIC: u16 = 0o070707;

/// Byte order of a single header record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endianness = Endianness::Little;
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endianness = Endianness::Big;

    fn opposite(self) -> Endianness {
        match self {
            Endianness::Little => Endianness::Big,
            Endianness::Big => Endianness::Little,
        }
    }

    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        }
    }

    /// Combine two half-words, most significant first. The word order is
    /// fixed; only the bytes within each half-word follow `self`.
    pub fn read_u32(self, halves: [[u8; 2]; 2]) -> u32 {
        let high = self.read_u16(halves[0]) as u32;
        let low = self.read_u16(halves[1]) as u32;
        (high << 16) + low
    }

    pub fn write_u16(self, value: u16) -> [u8; 2] {
        match self {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        }
    }

    pub fn write_u32(self, value: u32) -> [[u8; 2]; 2] {
        [
            self.write_u16((value >> 16) as u16),
            self.write_u16(value as u16),
        ]
    }
}

#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct Header {
    pub magic: [u8; 2],
    pub dev: [u8; 2],
    pub ino: [u8; 2],
    /// File type and permission bits
    pub mode: [u8; 2],
    pub uid: [u8; 2],
    pub gid: [u8; 2],
    pub nlink: [u8; 2],
    /// Device number for block and character special files
    pub rdev: [u8; 2],
    /// Modification time as two half-words, high first
    pub mtime: [[u8; 2]; 2],
    /// Length of the name including its NUL terminator, excluding padding
    pub namesize: [u8; 2],
    /// Length of the data, excluding padding
    pub filesize: [[u8; 2]; 2],
}

impl Header {
    /// View the first `HEADER_SIZE` bytes of `data` as a header.
    ///
    /// No field is checked here; see [`crate::Entry::parse`] for validation.
    pub fn parse(data: &[u8]) -> Option<&Header> {
        let bytes = data.get(..HEADER_SIZE)?;
        bytemuck::try_from_bytes(bytes).ok()
    }

    /// Byte order of this record, detected from the magic number.
    ///
    /// An unrecognized magic is assumed to be in the opposite of the host
    /// order, which is what a byte swapping reader would do.
    pub fn endianness(&self) -> Endianness {
        if u16::from_ne_bytes(self.magic) == MAGIC {
            Endianness::NATIVE
        } else {
            Endianness::NATIVE.opposite()
        }
    }

    fn read_u16(&self, bytes: [u8; 2]) -> u16 {
        self.endianness().read_u16(bytes)
    }

    pub fn magic(&self) -> u16 {
        self.read_u16(self.magic)
    }

    pub fn is_magic_valid(&self) -> bool {
        self.magic() == MAGIC
    }

    pub fn dev(&self) -> u16 {
        self.read_u16(self.dev)
    }

    pub fn ino(&self) -> u16 {
        self.read_u16(self.ino)
    }

    pub fn mode_bits(&self) -> u16 {
        self.read_u16(self.mode)
    }

    pub fn mode(&self) -> Mode {
        Mode::from_bits_retain(self.mode_bits())
    }

    pub fn uid(&self) -> u16 {
        self.read_u16(self.uid)
    }

    pub fn gid(&self) -> u16 {
        self.read_u16(self.gid)
    }

    pub fn nlink(&self) -> u16 {
        self.read_u16(self.nlink)
    }

    pub fn rdev(&self) -> u16 {
        self.read_u16(self.rdev)
    }

    pub fn mtime(&self) -> u32 {
        self.endianness().read_u32(self.mtime)
    }

    pub fn namesize(&self) -> u16 {
        self.read_u16(self.namesize)
    }

    pub fn filesize(&self) -> u32 {
        self.endianness().read_u32(self.filesize)
    }

    /// Name length rounded up to an even number of bytes
    pub fn padded_namesize(&self) -> u64 {
        pad(self.namesize().into())
    }

    /// Data length rounded up to an even number of bytes.
    ///
    /// Kept in `u64`: a `filesize` of `u32::MAX` pads past `u32::MAX`.
    pub fn padded_filesize(&self) -> u64 {
        pad(self.filesize().into())
    }
}

fn pad(len: u64) -> u64 {
    len + (len & 1)
}
