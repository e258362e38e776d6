//! Name matching used by path lookup and directory enumeration.
use core::cmp::Ordering;

use log::trace;

use crate::{Entries, Entry, Mode};

/// Compare an entry name against a lookup path.
///
/// Both sides are treated like C strings: a NUL byte or the end of the
/// slice ends the string. An entry matches when this returns
/// [`Ordering::Equal`].
pub trait Comparator {
    fn compare(&self, name: &[u8], path: &[u8]) -> Ordering;
}

impl<C: Comparator + ?Sized> Comparator for &C {
    fn compare(&self, name: &[u8], path: &[u8]) -> Ordering {
        (**self).compare(name, path)
    }
}

fn byte(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

/// Byte for byte equality, over at most `name.len()` bytes
#[derive(Clone, Copy, Debug, Default)]
pub struct Exact;

impl Comparator for Exact {
    fn compare(&self, name: &[u8], path: &[u8]) -> Ordering {
        for i in 0..name.len() {
            let (a, b) = (name[i], byte(path, i));
            if a != b {
                return a.cmp(&b);
            }
            if a == 0 {
                break;
            }
        }
        Ordering::Equal
    }
}

/// Matches names exactly one `/` below the directory given as path.
///
/// The byte right after the directory prefix is skipped without being
/// checked, and the rest of the name must contain no `/`. With an empty
/// path every name without a `/` matches.
///
/// A name equal to the directory itself also matches. Enumeration relies on
/// this to recognize and step over the directory's own record.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectChild;

impl Comparator for DirectChild {
    fn compare(&self, name: &[u8], path: &[u8]) -> Ordering {
        let n = name.len();
        let mut i = 0;
        if byte(path, 0) != 0 {
            while i < n && byte(path, i) != 0 {
                let (a, b) = (name[i], byte(path, i));
                if a != b {
                    return a.cmp(&b);
                }
                i += 1;
            }
            i += 1;
        }
        while i < n && name[i] != 0 {
            if name[i] == b'/' {
                return Ordering::Greater;
            }
            i += 1;
        }
        Ordering::Equal
    }
}

/// Strip a leading `./` or a single leading `/` from a lookup path
pub fn normalize_path(path: &[u8]) -> &[u8] {
    if let Some(rest) = path.strip_prefix(b"./") {
        rest
    } else if let Some(rest) = path.strip_prefix(b"/") {
        rest
    } else {
        path
    }
}

/// Strip a leading `./` or `/` from a raw entry name of at least two bytes
pub(crate) fn normalize_name(name: &[u8]) -> &[u8] {
    if name.len() < 2 {
        name
    } else if name.starts_with(b"./") {
        &name[2..]
    } else if name[0] == b'/' {
        &name[1..]
    } else {
        name
    }
}

/// First entry of `entries` whose mode intersects `mask` and whose name
/// matches `path` according to `cmp`.
pub(crate) fn find<'a, C: Comparator>(
    entries: Entries<'a>,
    path: &[u8],
    mask: Mode,
    cmp: C,
) -> Option<Entry<'a>> {
    let path = normalize_path(path);
    for entry in entries {
        if !entry.mode().intersects(mask) {
            continue;
        }
        let name = normalize_name(entry.name_bytes());
        if name.is_empty() {
            if path.is_empty() {
                return Some(entry);
            }
            continue;
        }
        if cmp.compare(name, path) == Ordering::Equal {
            trace!("cpio match at {:#x}: {:?}", entry.offset(), entry);
            return Some(entry);
        }
    }
    None
}
