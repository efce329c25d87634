//! Command-line interface definitions for binspect.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// ELF64 file header and section table inspector.
#[derive(Parser)]
#[command(name = "binspect", version, about)]
pub struct Cli {
    /// Path to the ELF file to inspect.
    pub file: PathBuf,

    /// Print only the file header, skipping the section listing.
    #[arg(long = "header", short = 'H')]
    pub header_only: bool,

    /// When to colorize output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// Color output selection.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Colorize only when stdout is a terminal.
    Auto,
    /// Always emit color escape sequences.
    Always,
    /// Never emit color escape sequences.
    Never,
}
