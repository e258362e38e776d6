use core::error;
use core::fmt::{Display, Formatter, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Path does not resolve, or the handle was already closed
    NotExist,
    /// Resolved seek offset lies outside `0..=size`
    SeekOutOfRange,
    /// Invalid whence or other argument
    BadParameter,
    /// Internal inconsistency, such as a cursor past the end of an entry
    Unknown,
}

impl Error {
    /// Classic negative status code for this error. Success is `0`.
    pub fn code(&self) -> i32 {
        match self {
            Error::NotExist => -1,
            Error::SeekOutOfRange => -2,
            Error::BadParameter => -3,
            Error::Unknown => -4,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Error::*;

        let msg = match self {
            NotExist => "No such file or directory",
            SeekOutOfRange => "Seek out of range",
            BadParameter => "Bad parameter",
            Unknown => "Unknown error",
        };
        write!(f, "{}", msg)
    }
}

impl error::Error for Error {}
