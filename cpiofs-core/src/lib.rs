#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub use crate::dir::Dir;
pub use crate::entry::{Entries, Entry, TRAILER};
pub use crate::error::Error;
pub use crate::file::{File, Whence};
pub use crate::find::{normalize_path, Comparator, DirectChild, Exact};
pub use crate::fs::{CpioFs, Info};
pub use crate::header::{Endianness, Header, MAGIC};
pub use crate::mode::Mode;

mod dir;
mod entry;
mod error;
mod file;
mod find;
mod fs;
mod header;
mod mode;

#[cfg(test)]
mod test;

pub const HEADER_SIZE: usize = core::mem::size_of::<Header>();

#[cfg(test)]
mod tests {
    use core::mem;

    use crate::{Header, HEADER_SIZE};

    #[test]
    fn header_size() {
        assert_eq!(mem::size_of::<Header>(), 26);
        assert_eq!(HEADER_SIZE, 26);
    }

    #[test]
    fn header_align() {
        assert_eq!(mem::align_of::<Header>(), 1);
    }
}
