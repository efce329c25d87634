//! ELF64 file header parsing.
//!
//! Decodes the fixed 64-byte ELF64 file header from a raw byte slice using
//! safe positional field extraction. All multi-byte fields are read with the
//! byte order the file itself declares in its identification block, so
//! big-endian-declared files decode correctly on any host.

use core::error;
use core::fmt;

use alloc::string::String;

/// ELF magic bytes: `\x7fELF`.
pub(crate) const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// ELF class: 32-bit.
pub(crate) const ELFCLASS32: u8 = 1;

/// ELF class: 64-bit.
pub(crate) const ELFCLASS64: u8 = 2;

/// ELF data encoding: two's complement, little-endian.
pub(crate) const ELFDATA2LSB: u8 = 1;

/// ELF data encoding: two's complement, big-endian.
pub(crate) const ELFDATA2MSB: u8 = 2;

/// Size of the ELF64 file header (64 bytes).
pub(crate) const ELF64_EHDR_SIZE: usize = 64;

/// Size of an ELF64 section header entry (64 bytes).
pub(crate) const ELF64_SHDR_SIZE: usize = 64;

/// Errors that can occur when decoding an ELF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElfError {
    /// The input data is shorter than the structure being decoded.
    Truncated,
    /// The file does not start with the ELF magic bytes.
    NotElf,
    /// The class byte is neither `ELFCLASS32` nor `ELFCLASS64`.
    InvalidClass,
    /// The file is 32-bit (`ELFCLASS32`), which this parser does not decode.
    UnsupportedClass,
    /// The data-encoding byte is neither little- nor big-endian.
    InvalidEncoding,
    /// The declared section header table range exceeds the input data.
    SectionTableOutOfBounds,
    /// The declared string-table section range exceeds the input data.
    StringTableOutOfBounds,
    /// The declared section header entry size is too small to hold an entry.
    MalformedSectionHeader,
    /// The section header string table index is not a valid section index.
    InvalidStringTableIndex,
    /// Failure opening or reading the file, produced by the caller's loader.
    Io(String),
}

impl fmt::Display for ElfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "input data truncated"),
            Self::NotElf => write!(f, "invalid ELF magic bytes"),
            Self::InvalidClass => write!(f, "unrecognized ELF class byte"),
            Self::UnsupportedClass => {
                write!(f, "32-bit ELF files are not supported (expected ELFCLASS64)")
            }
            Self::InvalidEncoding => write!(f, "unrecognized data encoding byte"),
            Self::SectionTableOutOfBounds => {
                write!(f, "section header table lies outside the file data")
            }
            Self::StringTableOutOfBounds => {
                write!(f, "section name string table lies outside the file data")
            }
            Self::MalformedSectionHeader => {
                write!(f, "section header entry size too small")
            }
            Self::InvalidStringTableIndex => {
                write!(f, "section header string table index out of range")
            }
            Self::Io(reason) => write!(f, "{reason}"),
        }
    }
}

impl error::Error for ElfError {}

/// Byte order declared in the ELF identification block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Two's complement, little-endian.
    Little,
    /// Two's complement, big-endian.
    Big,
}

impl Encoding {
    /// Read a `u16` from `data` at byte offset `off` in this byte order.
    ///
    /// # Panics
    ///
    /// Panics if `off + 2 > data.len()`. Callers must bounds-check first.
    pub(crate) fn read_u16(self, data: &[u8], off: usize) -> u16 {
        let raw = *data[off..].first_chunk().unwrap();
        match self {
            Self::Little => u16::from_le_bytes(raw),
            Self::Big => u16::from_be_bytes(raw),
        }
    }

    /// Read a `u32` from `data` at byte offset `off` in this byte order.
    pub(crate) fn read_u32(self, data: &[u8], off: usize) -> u32 {
        let raw = *data[off..].first_chunk().unwrap();
        match self {
            Self::Little => u32::from_le_bytes(raw),
            Self::Big => u32::from_be_bytes(raw),
        }
    }

    /// Read a `u64` from `data` at byte offset `off` in this byte order.
    pub(crate) fn read_u64(self, data: &[u8], off: usize) -> u64 {
        let raw = *data[off..].first_chunk().unwrap();
        match self {
            Self::Little => u64::from_le_bytes(raw),
            Self::Big => u64::from_be_bytes(raw),
        }
    }
}

/// Object file type from the `e_type` header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// No file type (`ET_NONE`).
    None,
    /// Relocatable object file (`ET_REL`).
    Relocatable,
    /// Executable file (`ET_EXEC`).
    Executable,
    /// Shared object file (`ET_DYN`).
    SharedObject,
    /// Core dump (`ET_CORE`).
    Core,
    /// Any other `e_type` value, kept verbatim.
    Unknown(u16),
}

impl FileType {
    /// Classify a raw `e_type` value.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Relocatable,
            2 => Self::Executable,
            3 => Self::SharedObject,
            4 => Self::Core,
            other => Self::Unknown(other),
        }
    }

    /// Returns the canonical short tag for this file type (`EXEC`, `DYN`, …).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Relocatable => "REL",
            Self::Executable => "EXEC",
            Self::SharedObject => "DYN",
            Self::Core => "CORE",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

/// Returns the architecture name for a known `e_machine` value.
#[must_use]
pub fn machine_name(machine: u16) -> Option<&'static str> {
    match machine {
        0 => Some("None"),
        2 => Some("SPARC"),
        3 => Some("x86"),
        8 => Some("MIPS"),
        20 => Some("PowerPC"),
        21 => Some("PowerPC64"),
        22 => Some("IBM S/390"),
        40 => Some("ARM"),
        50 => Some("IA-64"),
        62 => Some("x86_64"),
        183 => Some("AArch64"),
        243 => Some("RISC-V"),
        258 => Some("LoongArch"),
        _ => None,
    }
}

/// Returns the OS/ABI name for a known `EI_OSABI` value.
#[must_use]
pub fn osabi_name(osabi: u8) -> Option<&'static str> {
    match osabi {
        0 => Some("UNIX - System V"),
        1 => Some("HP-UX"),
        2 => Some("NetBSD"),
        3 => Some("Linux"),
        6 => Some("Solaris"),
        7 => Some("AIX"),
        8 => Some("IRIX"),
        9 => Some("FreeBSD"),
        10 => Some("TRU64 UNIX"),
        97 => Some("ARM"),
        255 => Some("Standalone App"),
        _ => None,
    }
}

/// Decoded ELF64 file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elf64Header {
    /// The raw 16-byte identification block, kept verbatim for display.
    pub ident: [u8; 16],
    /// Byte order declared in the identification block, used for every
    /// multi-byte field read (including by the section resolver).
    pub encoding: Encoding,
    /// Object file type.
    pub e_type: FileType,
    /// Target machine architecture (see [`machine_name`]).
    pub e_machine: u16,
    /// Object file version.
    pub e_version: u32,
    /// Virtual address of the entry point.
    pub e_entry: u64,
    /// Offset of the program header table in the file.
    pub e_phoff: u64,
    /// Offset of the section header table in the file.
    pub e_shoff: u64,
    /// Processor-specific flags.
    pub e_flags: u32,
    /// Size of this header in bytes.
    pub e_ehsize: u16,
    /// Size of each program header entry.
    pub e_phentsize: u16,
    /// Number of program header entries.
    pub e_phnum: u16,
    /// Size of each section header entry.
    pub e_shentsize: u16,
    /// Number of section header entries.
    pub e_shnum: u16,
    /// Section header string table index.
    pub e_shstrndx: u16,
}

impl Elf64Header {
    /// Decode an ELF64 file header from raw bytes.
    ///
    /// Validates the magic bytes, the class (64-bit only; 32-bit files are
    /// rejected explicitly rather than misread with 64-bit field offsets),
    /// and the data encoding, then extracts every remaining field at its
    /// fixed byte offset. Offsets such as `e_shoff` are not checked against
    /// the data length here; [`resolve_sections`](crate::resolve_sections)
    /// re-validates them before dereferencing.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError`] if the data is shorter than 64 bytes or the
    /// magic, class, or encoding byte is invalid.
    pub fn parse(data: &[u8]) -> Result<Self, ElfError> {
        if data.len() < ELF64_EHDR_SIZE {
            return Err(ElfError::Truncated);
        }

        if data[..4] != ELF_MAGIC {
            return Err(ElfError::NotElf);
        }

        // Class byte: reject unrecognized values and 32-bit files distinctly.
        match data[4] {
            ELFCLASS64 => {}
            ELFCLASS32 => return Err(ElfError::UnsupportedClass),
            _ => return Err(ElfError::InvalidClass),
        }

        let en = match data[5] {
            ELFDATA2LSB => Encoding::Little,
            ELFDATA2MSB => Encoding::Big,
            _ => return Err(ElfError::InvalidEncoding),
        };

        let mut ident = [0u8; 16];
        ident.copy_from_slice(&data[..16]);

        // Field offsets per the ELF64 layout, safe because len >= 64 was checked.
        Ok(Self {
            ident,
            encoding: en,
            e_type: FileType::from_raw(en.read_u16(data, 16)),
            e_machine: en.read_u16(data, 18),
            e_version: en.read_u32(data, 20),
            e_entry: en.read_u64(data, 24),
            e_phoff: en.read_u64(data, 32),
            e_shoff: en.read_u64(data, 40),
            e_flags: en.read_u32(data, 48),
            e_ehsize: en.read_u16(data, 52),
            e_phentsize: en.read_u16(data, 54),
            e_phnum: en.read_u16(data, 56),
            e_shentsize: en.read_u16(data, 58),
            e_shnum: en.read_u16(data, 60),
            e_shstrndx: en.read_u16(data, 62),
        })
    }

    /// Returns the class byte from the identification block.
    #[must_use]
    pub fn class(&self) -> u8 {
        self.ident[4]
    }

    /// Returns the version byte from the identification block.
    #[must_use]
    pub fn version_ident(&self) -> u8 {
        self.ident[6]
    }

    /// Returns the OS/ABI byte from the identification block.
    #[must_use]
    pub fn osabi(&self) -> u8 {
        self.ident[7]
    }

    /// Returns the ABI version byte from the identification block.
    #[must_use]
    pub fn abi_version(&self) -> u8 {
        self.ident[8]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// ELF type: executable.
    pub(crate) const ET_EXEC: u16 = 2;

    /// ELF machine: x86-64.
    pub(crate) const EM_X86_64: u16 = 62;

    /// Build a minimal valid ELF64 header (64 bytes) as a `Vec<u8>`.
    ///
    /// Defaults: little-endian, `ET_EXEC`, `EM_X86_64`, entry=0x401000,
    /// phoff=64. Section header fields default to shoff=0, shnum=0,
    /// shentsize=64, shstrndx=0.
    pub(crate) fn make_elf_header() -> Vec<u8> {
        let mut buf = vec![0u8; ELF64_EHDR_SIZE];

        // Magic
        buf[0..4].copy_from_slice(&ELF_MAGIC);
        // Class: ELFCLASS64
        buf[4] = ELFCLASS64;
        // Data: little-endian
        buf[5] = ELFDATA2LSB;
        // Version
        buf[6] = 1;
        // e_type: ET_EXEC
        buf[16..18].copy_from_slice(&ET_EXEC.to_le_bytes());
        // e_machine: EM_X86_64
        buf[18..20].copy_from_slice(&EM_X86_64.to_le_bytes());
        // e_version
        buf[20..24].copy_from_slice(&1u32.to_le_bytes());
        // e_entry
        buf[24..32].copy_from_slice(&0x0040_1000u64.to_le_bytes());
        // e_phoff: right after header
        buf[32..40].copy_from_slice(&(ELF64_EHDR_SIZE as u64).to_le_bytes());
        // e_shoff: 0 (no sections by default) at offset 40..48
        // e_ehsize
        buf[52..54].copy_from_slice(&(ELF64_EHDR_SIZE as u16).to_le_bytes());
        // e_phentsize
        buf[54..56].copy_from_slice(&56u16.to_le_bytes());
        // e_shentsize
        buf[58..60].copy_from_slice(&(ELF64_SHDR_SIZE as u16).to_le_bytes());
        // e_shnum: 0, e_shstrndx: 0
        buf
    }

    #[test]
    fn parse_valid_header() {
        let buf = make_elf_header();
        let hdr = Elf64Header::parse(&buf).expect("valid header");
        assert_eq!(hdr.e_type, FileType::Executable);
        assert_eq!(hdr.e_machine, EM_X86_64);
        assert_eq!(hdr.e_version, 1);
        assert_eq!(hdr.e_entry, 0x0040_1000);
        assert_eq!(hdr.e_phoff, ELF64_EHDR_SIZE as u64);
        assert_eq!(hdr.e_shoff, 0);
        assert_eq!(hdr.e_ehsize, ELF64_EHDR_SIZE as u16);
        assert_eq!(hdr.e_shentsize, ELF64_SHDR_SIZE as u16);
        assert_eq!(hdr.e_shnum, 0);
        assert_eq!(hdr.encoding, Encoding::Little);
    }

    #[test]
    fn ident_accessors() {
        let mut buf = make_elf_header();
        buf[7] = 3; // EI_OSABI: Linux
        buf[8] = 1; // EI_ABIVERSION
        let hdr = Elf64Header::parse(&buf).expect("valid header");
        assert_eq!(hdr.class(), ELFCLASS64);
        assert_eq!(hdr.version_ident(), 1);
        assert_eq!(hdr.osabi(), 3);
        assert_eq!(hdr.abi_version(), 1);
        assert_eq!(&hdr.ident[..4], &ELF_MAGIC);
    }

    #[test]
    fn reject_truncated_data() {
        assert_eq!(Elf64Header::parse(&[]), Err(ElfError::Truncated));
        assert_eq!(Elf64Header::parse(&[0u8; 32]), Err(ElfError::Truncated));
        let buf = make_elf_header();
        assert_eq!(Elf64Header::parse(&buf[..63]), Err(ElfError::Truncated));
    }

    #[test]
    fn reject_bad_magic() {
        let mut buf = make_elf_header();
        buf[0] = 0x00;
        assert_eq!(Elf64Header::parse(&buf), Err(ElfError::NotElf));
    }

    #[test]
    fn reject_unrecognized_class() {
        let mut buf = make_elf_header();
        buf[4] = 3;
        assert_eq!(Elf64Header::parse(&buf), Err(ElfError::InvalidClass));
    }

    #[test]
    fn reject_32bit_class_distinctly() {
        let mut buf = make_elf_header();
        buf[4] = ELFCLASS32;
        assert_eq!(Elf64Header::parse(&buf), Err(ElfError::UnsupportedClass));
    }

    #[test]
    fn reject_unrecognized_encoding() {
        let mut buf = make_elf_header();
        buf[5] = 3;
        assert_eq!(Elf64Header::parse(&buf), Err(ElfError::InvalidEncoding));
    }

    #[test]
    fn big_endian_fields_decode() {
        let mut buf = make_elf_header();
        buf[5] = ELFDATA2MSB;
        buf[16..18].copy_from_slice(&ET_EXEC.to_be_bytes());
        buf[18..20].copy_from_slice(&20u16.to_be_bytes()); // EM_PPC
        buf[20..24].copy_from_slice(&1u32.to_be_bytes());
        buf[24..32].copy_from_slice(&0x1000_0000u64.to_be_bytes());
        buf[32..40].copy_from_slice(&64u64.to_be_bytes());
        buf[52..54].copy_from_slice(&64u16.to_be_bytes());
        buf[54..56].copy_from_slice(&56u16.to_be_bytes());
        buf[58..60].copy_from_slice(&64u16.to_be_bytes());

        let hdr = Elf64Header::parse(&buf).expect("valid big-endian header");
        assert_eq!(hdr.encoding, Encoding::Big);
        assert_eq!(hdr.e_type, FileType::Executable);
        assert_eq!(hdr.e_machine, 20);
        assert_eq!(hdr.e_entry, 0x1000_0000);
        assert_eq!(hdr.e_phoff, 64);
        assert_eq!(hdr.e_shentsize, 64);
    }

    #[test]
    fn unknown_type_and_machine_kept_verbatim() {
        let mut buf = make_elf_header();
        buf[16..18].copy_from_slice(&0xbeefu16.to_le_bytes());
        buf[18..20].copy_from_slice(&0xdeadu16.to_le_bytes());
        let hdr = Elf64Header::parse(&buf).expect("valid header");
        assert_eq!(hdr.e_type, FileType::Unknown(0xbeef));
        assert_eq!(hdr.e_type.name(), "UNKNOWN");
        assert_eq!(hdr.e_machine, 0xdead);
        assert_eq!(machine_name(hdr.e_machine), None);
    }

    #[test]
    fn offsets_not_bounds_checked_here() {
        // A wild e_shoff still decodes; the section resolver re-validates it.
        let mut buf = make_elf_header();
        buf[40..48].copy_from_slice(&u64::MAX.to_le_bytes());
        let hdr = Elf64Header::parse(&buf).expect("valid header");
        assert_eq!(hdr.e_shoff, u64::MAX);
    }

    #[test]
    fn file_type_classification() {
        assert_eq!(FileType::from_raw(0), FileType::None);
        assert_eq!(FileType::from_raw(1), FileType::Relocatable);
        assert_eq!(FileType::from_raw(2), FileType::Executable);
        assert_eq!(FileType::from_raw(3), FileType::SharedObject);
        assert_eq!(FileType::from_raw(4), FileType::Core);
        assert_eq!(FileType::from_raw(5), FileType::Unknown(5));
        assert_eq!(FileType::from_raw(3).name(), "DYN");
    }

    #[test]
    fn machine_lookup() {
        assert_eq!(machine_name(62), Some("x86_64"));
        assert_eq!(machine_name(183), Some("AArch64"));
        assert_eq!(machine_name(243), Some("RISC-V"));
        assert_eq!(machine_name(0xffff), None);
    }

    #[test]
    fn osabi_lookup() {
        assert_eq!(osabi_name(0), Some("UNIX - System V"));
        assert_eq!(osabi_name(3), Some("Linux"));
        assert_eq!(osabi_name(9), Some("FreeBSD"));
        assert_eq!(osabi_name(200), None);
    }

    #[test]
    fn error_display() {
        let errors = [
            ElfError::Truncated,
            ElfError::NotElf,
            ElfError::InvalidClass,
            ElfError::UnsupportedClass,
            ElfError::InvalidEncoding,
            ElfError::SectionTableOutOfBounds,
            ElfError::StringTableOutOfBounds,
            ElfError::MalformedSectionHeader,
            ElfError::InvalidStringTableIndex,
            ElfError::Io("open failed".into()),
        ];
        for err in &errors {
            assert!(!format!("{err}").is_empty());
        }
    }
}
