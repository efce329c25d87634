//! ELF64 section header table and section name resolution.
//!
//! Decodes the section header table located by a validated
//! [`Elf64Header`], resolving each entry's name through the section header
//! string table. Zero-copy: resolved names borrow from the input buffer.

use alloc::vec::Vec;

use crate::header::{ELF64_SHDR_SIZE, Elf64Header, ElfError, Encoding};

/// Section type from the `sh_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    /// Inactive entry (`SHT_NULL`); index 0 is always one of these.
    Null,
    /// Program-defined contents (`SHT_PROGBITS`).
    Progbits,
    /// Symbol table (`SHT_SYMTAB`).
    Symtab,
    /// String table (`SHT_STRTAB`).
    Strtab,
    /// Relocation entries with addends (`SHT_RELA`).
    Rela,
    /// Symbol hash table (`SHT_HASH`).
    Hash,
    /// Dynamic linking information (`SHT_DYNAMIC`).
    Dynamic,
    /// Auxiliary notes (`SHT_NOTE`).
    Note,
    /// Occupies no file space, like `.bss` (`SHT_NOBITS`).
    Nobits,
    /// Relocation entries without addends (`SHT_REL`).
    Rel,
    /// Reserved (`SHT_SHLIB`).
    Shlib,
    /// Dynamic symbol table (`SHT_DYNSYM`).
    Dynsym,
    /// Any other `sh_type` value, kept verbatim.
    Unknown(u32),
}

impl SectionType {
    /// Classify a raw `sh_type` value.
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Null,
            1 => Self::Progbits,
            2 => Self::Symtab,
            3 => Self::Strtab,
            4 => Self::Rela,
            5 => Self::Hash,
            6 => Self::Dynamic,
            7 => Self::Note,
            8 => Self::Nobits,
            9 => Self::Rel,
            10 => Self::Shlib,
            11 => Self::Dynsym,
            other => Self::Unknown(other),
        }
    }

    /// Returns the canonical textual label for this section type.
    ///
    /// Total over every possible value: unknown types map to `"UNKNOWN"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Progbits => "PROGBITS",
            Self::Symtab => "SYMTAB",
            Self::Strtab => "STRTAB",
            Self::Rela => "RELA",
            Self::Hash => "HASH",
            Self::Dynamic => "DYNAMIC",
            Self::Note => "NOTE",
            Self::Nobits => "NOBITS",
            Self::Rel => "REL",
            Self::Shlib => "SHLIB",
            Self::Dynsym => "DYNSYM",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

/// A zero-copy wrapper around a NUL-terminated string table section.
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    data: &'a [u8],
}

impl<'a> StringTable<'a> {
    /// Creates a new string table from the raw section data.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Looks up a NUL-terminated string at the given byte offset.
    ///
    /// Returns `None` if the offset is out of bounds, no NUL terminator
    /// follows, or the string is not valid UTF-8.
    #[must_use]
    pub fn get(&self, offset: u32) -> Option<&'a str> {
        let start = offset as usize;
        if start >= self.data.len() {
            return None;
        }
        let remaining = &self.data[start..];
        let nul_pos = remaining.iter().position(|&b| b == 0)?;
        core::str::from_utf8(&remaining[..nul_pos]).ok()
    }
}

/// One decoded section header entry with its resolved name.
///
/// Field names mirror the on-disk `Elf64_Shdr` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Resolved section name; empty when `sh_name` falls outside the
    /// string table or the name is malformed.
    pub name: &'a str,
    /// Offset into the section header string table for this section's name.
    pub sh_name: u32,
    /// Section type.
    pub sh_type: SectionType,
    /// Section flags (bit set, not further decoded).
    pub sh_flags: u64,
    /// Virtual address of the section in memory (0 for non-loaded sections).
    pub sh_addr: u64,
    /// File offset of the section data.
    pub sh_offset: u64,
    /// Size of the section data in bytes.
    pub sh_size: u64,
    /// Index of a related section (not resolved).
    pub sh_link: u32,
    /// Extra info (interpretation depends on section type).
    pub sh_info: u32,
    /// Required alignment of the section.
    pub sh_addralign: u64,
    /// Size of each entry (for sections with fixed-size entries).
    pub sh_entsize: u64,
}

impl<'a> Section<'a> {
    /// Decode one section header entry at the given file offset, resolving
    /// its name through `strtab`.
    ///
    /// The caller must ensure `off + ELF64_SHDR_SIZE <= data.len()`.
    fn parse(data: &'a [u8], off: usize, en: Encoding, strtab: &StringTable<'a>) -> Self {
        let b = &data[off..];
        let sh_name = en.read_u32(b, 0);
        Self {
            // Out-of-range or malformed names degrade to "" so one corrupt
            // name does not abort the rest of the listing.
            name: strtab.get(sh_name).unwrap_or(""),
            sh_name,
            sh_type: SectionType::from_raw(en.read_u32(b, 4)),
            sh_flags: en.read_u64(b, 8),
            sh_addr: en.read_u64(b, 16),
            sh_offset: en.read_u64(b, 24),
            sh_size: en.read_u64(b, 32),
            sh_link: en.read_u32(b, 40),
            sh_info: en.read_u32(b, 44),
            sh_addralign: en.read_u64(b, 48),
            sh_entsize: en.read_u64(b, 56),
        }
    }
}

/// Decode the section header table and resolve every section name.
///
/// `header` must come from a successful [`Elf64Header::parse`] over the same
/// `data`. Entries are returned in file order, the null entry at index 0
/// included. The declared `e_shentsize` is honored as the stride, so files
/// with vendor padding after the canonical 64 bytes decode correctly.
///
/// # Errors
///
/// - [`ElfError::SectionTableOutOfBounds`] if the declared table range
///   exceeds `data`.
/// - [`ElfError::MalformedSectionHeader`] if `e_shentsize` is smaller than
///   the 64-byte entry layout.
/// - [`ElfError::InvalidStringTableIndex`] if `e_shstrndx` is not a valid
///   section index.
/// - [`ElfError::StringTableOutOfBounds`] if the string-table section's
///   declared range exceeds `data`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "offsets are checked against data.len() before narrowing"
)]
pub fn resolve_sections<'a>(
    data: &'a [u8],
    header: &Elf64Header,
) -> Result<Vec<Section<'a>>, ElfError> {
    let shnum = header.e_shnum as usize;
    if shnum == 0 {
        // No section header table at all; nothing to resolve.
        return Ok(Vec::new());
    }

    let en = header.encoding;
    let shentsize = header.e_shentsize as usize;

    let table_len = (shentsize as u64) * (shnum as u64);
    let table_end = header
        .e_shoff
        .checked_add(table_len)
        .ok_or(ElfError::SectionTableOutOfBounds)?;
    if table_end > data.len() as u64 {
        return Err(ElfError::SectionTableOutOfBounds);
    }

    if shentsize < ELF64_SHDR_SIZE {
        return Err(ElfError::MalformedSectionHeader);
    }

    let shstrndx = header.e_shstrndx as usize;
    if shstrndx >= shnum {
        return Err(ElfError::InvalidStringTableIndex);
    }

    // The table range was checked above, so these narrowing casts are safe.
    let shoff = header.e_shoff as usize;

    // Locate the string table before decoding the full table: its entry
    // supplies the byte range every name offset resolves against.
    let strtab_entry = shoff + shstrndx * shentsize;
    let strtab_off = en.read_u64(data, strtab_entry + 24);
    let strtab_size = en.read_u64(data, strtab_entry + 32);
    let strtab_end = strtab_off
        .checked_add(strtab_size)
        .ok_or(ElfError::StringTableOutOfBounds)?;
    if strtab_end > data.len() as u64 {
        return Err(ElfError::StringTableOutOfBounds);
    }
    let strtab = StringTable::new(&data[strtab_off as usize..strtab_end as usize]);

    Ok((0..shnum)
        .map(|i| Section::parse(data, shoff + i * shentsize, en, &strtab))
        .collect())
}
