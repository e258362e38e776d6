mod archive;
mod bin;
pub mod binprint;
pub mod ext;

pub use archive::ArchiveFile;
pub use bin::*;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

const READ_BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0}")]
    Core(#[from] cpiofs_core::Error),

    #[error("{context}{}: {source}", fmt_path(.path))]
    Io {
        source: io::Error,
        path: Option<PathBuf>,
        context: &'static str,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),
}

fn fmt_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

/// Build a closure for `map_err` that wraps an [`io::Error`] with context
/// and, optionally, the path being worked on.
#[macro_export]
macro_rules! wrap_io_err {
    ($context:expr) => {
        |source| $crate::Error::Io {
            source,
            path: None,
            context: $context,
        }
    };
    ($path:expr, $context:expr) => {
        |source| $crate::Error::Io {
            source,
            path: Some(::std::path::PathBuf::from(&$path)),
            context: $context,
        }
    };
}
