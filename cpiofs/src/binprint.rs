//! Format-print the records of a cpio archive; Useful for debugging
use std::io::{self, Write};

use cpiofs_core::Entry;

fn print_field(out: &mut impl Write, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{:>16}: {}", label, value)
}

/// Hex dump, 16 bytes per line with a gap after the eighth
pub fn print_hex(out: &mut impl Write, data: &[u8]) -> io::Result<()> {
    for line in data.chunks(16) {
        let (left, right) = line.split_at(line.len().min(8));
        let left: Vec<String> = left.iter().map(|b| format!("{:02x}", b)).collect();
        let right: Vec<String> = right.iter().map(|b| format!("{:02x}", b)).collect();
        if right.is_empty() {
            writeln!(out, "{}", left.join(" "))?;
        } else {
            writeln!(out, "{}    {}", left.join(" "), right.join(" "))?;
        }
    }
    Ok(())
}

/// Write every header field of `entry`, its name and its data to `out`.
pub fn print_entry(out: &mut impl Write, entry: &Entry) -> io::Result<()> {
    let header = entry.header();
    writeln!(out, "Entry at {:#x} ({:?})", entry.offset(), header.endianness())?;
    print_field(out, "magic", format_args!("{:#o}", header.magic()))?;
    print_field(out, "dev", header.dev())?;
    print_field(out, "ino", header.ino())?;
    print_field(out, "mode", format_args!("{:o}", header.mode_bits()))?;
    print_field(out, "uid", header.uid())?;
    print_field(out, "gid", header.gid())?;
    print_field(out, "nlink", header.nlink())?;
    print_field(out, "rdev", header.rdev())?;
    print_field(out, "mtime", header.mtime())?;
    print_field(out, "namesize", header.namesize())?;
    print_field(out, "filesize", header.filesize())?;
    print_field(out, "name", String::from_utf8_lossy(entry.path_bytes()))?;
    writeln!(out, "Data")?;
    print_hex(out, entry.data())
}
