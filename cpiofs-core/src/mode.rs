use bitflags::bitflags;

bitflags! {
    /// The `mode` field of a cpio header: file type in the high nibble,
    /// permission bits in the low twelve bits.
    ///
    /// Type values are not independent bits. Lookups test a type mask with
    /// [`Mode::intersects`], so `FILE` also admits symlinks and sockets, and
    /// `DIR` also admits block devices and sockets.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Mode: u16 {
        const TYPE = 0o170000;
        const SOCKET = 0o140000;
        /// Link target is stored as the file data
        const SYMLINK = 0o120000;
        const FILE = 0o100000;
        const BLOCK = 0o060000;
        const DIR = 0o040000;
        const CHAR = 0o020000;
        const PIPE = 0o010000;
        const FILE_DIR = Self::FILE.bits() | Self::DIR.bits();

        const MODE = 0o007777;
        const SUID = 0o004000;
        const SGID = 0o002000;
        const STICKY = 0o001000;
        /// rwx for user, group and other
        const PERM = 0o000777;
    }
}

impl Mode {
    /// Only the file type bits
    pub fn kind(self) -> Mode {
        self & Mode::TYPE
    }

    /// Only the permission bits, including suid, sgid and sticky
    pub fn perm(self) -> Mode {
        self & Mode::MODE
    }

    pub fn is_file(self) -> bool {
        self.kind() == Mode::FILE
    }

    pub fn is_dir(self) -> bool {
        self.kind() == Mode::DIR
    }

    pub fn is_symlink(self) -> bool {
        self.kind() == Mode::SYMLINK
    }

    /// Single character used by `ls -l` for this file type
    pub fn kind_char(self) -> char {
        match self.kind().bits() {
            0o140000 => 's',
            0o120000 => 'l',
            0o100000 => '-',
            0o060000 => 'b',
            0o040000 => 'd',
            0o020000 => 'c',
            0o010000 => 'p',
            _ => '?',
        }
    }
}

impl From<u16> for Mode {
    fn from(value: u16) -> Self {
        Mode::from_bits_retain(value)
    }
}

impl From<Mode> for u16 {
    fn from(mode: Mode) -> u16 {
        mode.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;

    #[test]
    fn split_kind_and_perm() {
        let mode = Mode::from(0o100644);
        assert_eq!(mode.kind(), Mode::FILE);
        assert_eq!(mode.perm().bits(), 0o644);
        assert!(mode.is_file());
        assert!(!mode.is_dir());
    }

    #[test]
    fn type_masks_overlap() {
        // A symlink shares the regular file bit
        assert!(Mode::from(0o120777).intersects(Mode::FILE));
        assert!(Mode::from(0o120777).is_symlink());
        assert!(!Mode::from(0o120777).is_file());
        assert!(!Mode::from(0o100644).is_symlink());
        assert!(Mode::from(0o040755).intersects(Mode::FILE_DIR));
        assert!(!Mode::from(0o020644).intersects(Mode::FILE_DIR));
    }

    #[test]
    fn kind_chars() {
        assert_eq!(Mode::from(0o040755).kind_char(), 'd');
        assert_eq!(Mode::from(0o120777).kind_char(), 'l');
        assert_eq!(Mode::from(0o100644).kind_char(), '-');
        assert_eq!(Mode::from(0o000644).kind_char(), '?');
    }
}
