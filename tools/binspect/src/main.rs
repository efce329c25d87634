//! binspect: ELF64 file header and section table inspector.
//!
//! Reads an ELF object file, decodes its metadata with `binspect-elf`, and
//! renders it readelf-style. I/O happens once, up front; decoding is a pure
//! transformation over the loaded bytes.

mod cli;
mod display;

use std::fs;
use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use binspect_elf::{Elf64Header, ElfError, resolve_sections};
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let colors = match args.color {
        cli::ColorChoice::Always => true,
        cli::ColorChoice::Never => false,
        cli::ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    let theme = display::Theme::new(colors);

    let data = open_and_load(&args.file)
        .with_context(|| format!("cannot load {}", args.file.display()))?;

    let header = Elf64Header::parse(&data)
        .with_context(|| format!("{}: not a valid ELF64 file", args.file.display()))?;

    println!();
    println!("File: {}", args.file.display());
    print!("{}", display::render_file_header(&header, theme));

    if !args.header_only {
        let sections = resolve_sections(&data, &header)
            .with_context(|| format!("{}: cannot decode section table", args.file.display()))?;
        print!("{}", display::render_sections(&header, &sections, theme));
    }

    Ok(())
}

/// Read the whole file into memory, surfacing open/read failures as
/// [`ElfError::Io`]. The engine itself never performs I/O.
fn open_and_load(path: &Path) -> Result<Vec<u8>, ElfError> {
    fs::read(path).map_err(|err| ElfError::Io(err.to_string()))
}
