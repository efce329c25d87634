//! ELF64 metadata parser for binspect.
//!
//! Decodes the ELF64 file header and the section header table (with
//! resolved section names) from raw byte slices using safe field
//! extraction. No unsafe code; the caller owns the buffer and the parser
//! borrows it only for the duration of a call.
//!
//! # Usage
//!
//! ```
//! use binspect_elf::{Elf64Header, resolve_sections};
//!
//! fn list_sections(data: &[u8]) {
//!     let header = Elf64Header::parse(data).expect("valid ELF64");
//!     for section in resolve_sections(data, &header).expect("valid table") {
//!         println!("{:20} {}", section.name, section.sh_type.name());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod header;
pub mod section;

pub use header::{Elf64Header, ElfError, Encoding, FileType, machine_name, osabi_name};
pub use section::{Section, SectionType, StringTable, resolve_sections};
