use std::io::{self, Write};
use std::path::Path;

use cpiofs_core::{normalize_path, CpioFs, Info, Mode};
use log::{debug, warn};

use crate::archive::ArchiveFile;
use crate::binprint;
use crate::ext::InfoExt;
use crate::{wrap_io_err, Error, READ_BUF_SIZE};

/// `ls -l` style rendering of a mode, such as `drwxr-xr-x`
pub fn mode_string(mode: Mode) -> String {
    let bits = mode.bits();
    let mut s = String::with_capacity(10);
    s.push(mode.kind_char());
    for (shift, special, set_char) in [(6, Mode::SUID, 's'), (3, Mode::SGID, 's'), (0, Mode::STICKY, 't')] {
        let triplet = (bits >> shift) & 0o7;
        s.push(if triplet & 0o4 != 0 { 'r' } else { '-' });
        s.push(if triplet & 0o2 != 0 { 'w' } else { '-' });
        let exec = triplet & 0o1 != 0;
        s.push(match (mode.contains(special), exec) {
            (true, true) => set_char,
            (true, false) => set_char.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    s
}

fn kind_name(info: &Info) -> &'static str {
    match info.kind.kind_char() {
        '-' => "regular file",
        'd' => "directory",
        'l' => "symbolic link",
        'c' => "character device",
        'b' => "block device",
        'p' => "fifo",
        's' => "socket",
        _ => "unknown",
    }
}

fn list_fs(fs: &CpioFs, dir: &[u8], recursive: bool, out: &mut impl Write) -> Result<(), Error> {
    let mut handle = fs.open_dir(dir)?;
    while let Some(info) = handle.read()? {
        writeln!(
            out,
            "{} {:>10} {}",
            mode_string(info.mode()),
            info.size,
            info.path().display()
        )
        .map_err(wrap_io_err!("Writing listing"))?;

        if recursive && info.is_dir() {
            // Duplicate records match as their own children; only go deeper
            if normalize_path(info.path).len() <= normalize_path(dir).len() {
                warn!("not descending into {} again", info.path().display());
                continue;
            }
            list_fs(fs, info.path, recursive, out)?;
        }
    }
    handle.close()?;
    Ok(())
}

/// List the direct children of `dir`, or the whole subtree with `recursive`
pub fn list(
    archive_path: impl AsRef<Path>,
    dir: &str,
    recursive: bool,
    out: &mut impl Write,
) -> Result<(), Error> {
    let archive = ArchiveFile::open(archive_path)?;
    let fs = archive.fs();

    let info = fs.stat(dir)?;
    if !info.is_dir() {
        return Err(Error::NotADirectory(dir.to_string()));
    }
    list_fs(&fs, dir.as_bytes(), recursive, out)?;
    debug!("{} handles open after listing", fs.open_count());
    Ok(())
}

fn write_stat(out: &mut impl Write, path: &str, info: &Info) -> io::Result<()> {
    writeln!(out, "{:>6}: {}", "path", path)?;
    writeln!(out, "{:>6}: {}", "type", kind_name(info))?;
    writeln!(
        out,
        "{:>6}: {:04o} ({})",
        "mode",
        info.perm.bits(),
        mode_string(info.mode())
    )?;
    writeln!(out, "{:>6}: {}", "size", info.size)
}

pub fn stat(archive_path: impl AsRef<Path>, path: &str, out: &mut impl Write) -> Result<(), Error> {
    let archive = ArchiveFile::open(archive_path)?;
    let info = archive.fs().stat(path)?;
    write_stat(out, path, &info).map_err(wrap_io_err!("Writing stat"))
}

/// Copy the contents of a regular file to `out`
pub fn cat(archive_path: impl AsRef<Path>, path: &str, out: &mut impl Write) -> Result<(), Error> {
    let archive = ArchiveFile::open(archive_path)?;
    let fs = archive.fs();

    if fs.stat(path)?.is_dir() {
        return Err(Error::NotAFile(path.to_string()));
    }
    let mut file = fs.open_file(path)?;
    let mut buf = vec![0; READ_BUF_SIZE];
    loop {
        let count = file.read(&mut buf)?;
        if count == 0 {
            break;
        }
        out.write_all(&buf[..count])
            .map_err(wrap_io_err!("Writing file contents"))?;
    }
    file.close()?;
    Ok(())
}

/// Print every record of the archive, headers and data
pub fn dump(archive_path: impl AsRef<Path>, out: &mut impl Write) -> Result<(), Error> {
    let archive = ArchiveFile::open(archive_path)?;

    for entry in archive.fs().entries() {
        binprint::print_entry(out, &entry)
            .and_then(|()| writeln!(out, "-------"))
            .map_err(wrap_io_err!(archive.path(), "Dumping entry"))?;
    }
    Ok(())
}
