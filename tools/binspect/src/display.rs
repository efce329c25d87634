//! Terminal rendering of decoded ELF metadata.
//!
//! Every function renders into a `String` and `main` prints; color is an
//! injected [`Theme`] value, never global state, so the same code path
//! serves colored terminals and plain pipes.

use std::fmt::Write;

use binspect_elf::{Elf64Header, Encoding, FileType, Section, machine_name, osabi_name};
use crossterm::style::{Color, Stylize};

/// Color roles for the rendered output.
///
/// With colors off, every method returns the text unchanged, so piped
/// output is byte-identical to the plain rendering.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    colors: bool,
}

impl Theme {
    /// Creates a theme; `colors` enables escape sequences.
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    fn paint(self, text: &str, color: Color) -> String {
        if self.colors {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Block headings ("ELF Header:", "Section Headers:").
    fn title(self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    /// Field labels and column headings.
    fn label(self, text: &str) -> String {
        self.paint(text, Color::Cyan)
    }

    /// Addresses and sizes.
    fn addr(self, text: &str) -> String {
        self.paint(text, Color::Magenta)
    }

    /// Section type names.
    fn kind(self, text: &str) -> String {
        self.paint(text, Color::Blue)
    }

    /// The section-count banner line.
    fn banner(self, text: &str) -> String {
        self.paint(text, Color::Green)
    }
}

/// Append one `  Label:  value` header line, label padded so values align.
fn field(out: &mut String, theme: Theme, label: &str, value: &str) {
    let _ = writeln!(out, "{}{value}", theme.label(&format!("  {label:<35}")));
}

/// Human label for the object file type, raw value shown for unknowns.
fn file_type_label(file_type: FileType) -> String {
    match file_type {
        FileType::None => "NONE (Unknown type)".into(),
        FileType::Relocatable => "REL (Relocatable file)".into(),
        FileType::Executable => "EXEC (Executable file)".into(),
        FileType::SharedObject => "DYN (Shared object file)".into(),
        FileType::Core => "CORE (Core file)".into(),
        FileType::Unknown(raw) => format!("<unknown: {raw:#x}>"),
    }
}

/// Human label for the machine architecture.
fn machine_label(machine: u16) -> String {
    machine_name(machine).map_or_else(|| format!("<unknown: {machine:#x}>"), Into::into)
}

/// Render the decoded file header as readelf-style labeled lines.
pub fn render_file_header(header: &Elf64Header, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.title("ELF Header:"));

    let magic = header
        .ident
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "{}{magic}", theme.label("  Magic:   "));

    let class = match header.class() {
        1 => "ELF32",
        2 => "ELF64",
        _ => "Invalid class",
    };
    field(&mut out, theme, "Class:", class);

    let data = match header.encoding {
        Encoding::Little => "2's complement, little endian",
        Encoding::Big => "2's complement, big endian",
    };
    field(&mut out, theme, "Data:", data);

    field(
        &mut out,
        theme,
        "Version:",
        &format!("{} (current)", header.version_ident()),
    );
    field(
        &mut out,
        theme,
        "OS/ABI:",
        osabi_name(header.osabi()).unwrap_or("Unknown OS/ABI"),
    );
    field(
        &mut out,
        theme,
        "ABI Version:",
        &header.abi_version().to_string(),
    );
    field(&mut out, theme, "Type:", &file_type_label(header.e_type));
    field(&mut out, theme, "Machine:", &machine_label(header.e_machine));
    field(&mut out, theme, "Version:", &format!("{:#x}", header.e_version));
    field(
        &mut out,
        theme,
        "Entry point address:",
        &theme.addr(&format!("{:#x}", header.e_entry)),
    );
    field(
        &mut out,
        theme,
        "Start of program headers:",
        &format!("{} (bytes into file)", header.e_phoff),
    );
    field(
        &mut out,
        theme,
        "Start of section headers:",
        &format!("{} (bytes into file)", header.e_shoff),
    );
    field(&mut out, theme, "Flags:", &format!("{:#x}", header.e_flags));
    field(
        &mut out,
        theme,
        "Size of this header:",
        &format!("{} (bytes)", header.e_ehsize),
    );
    field(
        &mut out,
        theme,
        "Size of program headers:",
        &format!("{} (bytes)", header.e_phentsize),
    );
    field(
        &mut out,
        theme,
        "Number of program headers:",
        &header.e_phnum.to_string(),
    );
    field(
        &mut out,
        theme,
        "Size of section headers:",
        &format!("{} (bytes)", header.e_shentsize),
    );
    field(
        &mut out,
        theme,
        "Number of section headers:",
        &header.e_shnum.to_string(),
    );
    field(
        &mut out,
        theme,
        "Section header string table index:",
        &header.e_shstrndx.to_string(),
    );

    out
}

/// Render the section listing as two-line rows in file order.
pub fn render_sections(header: &Elf64Header, sections: &[Section<'_>], theme: Theme) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        theme.banner(&format!(
            "There are {} section headers, starting at offset {:#x}:",
            header.e_shnum, header.e_shoff
        ))
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", theme.title("Section Headers:"));
    let _ = writeln!(
        out,
        "{}",
        theme.label("  [Nr] Name               Type               Address          Offset")
    );
    let _ = writeln!(
        out,
        "{}",
        theme.label("       Size               EntSize            Flags  Link  Info  Align")
    );

    for (index, section) in sections.iter().enumerate() {
        let _ = writeln!(
            out,
            "  [{index:2}] {:<17} {} {} {:08x}",
            section.name,
            theme.kind(&format!("{:<18}", section.sh_type.name())),
            theme.addr(&format!("{:016x}", section.sh_addr)),
            section.sh_offset,
        );
        let _ = writeln!(
            out,
            "       {} {:5} {:6} {:5} {:5}",
            theme.addr(&format!("{:016x} {:016x}", section.sh_size, section.sh_entsize)),
            section.sh_flags,
            section.sh_link,
            section.sh_info,
            section.sh_addralign,
        );
    }

    out
}
