pub mod classes;
pub mod enemies;
pub mod enml;
pub mod items;
pub mod strings;

use anyhow::{Context, Result};
use clap::ValueEnum;
use codegen::OutputFormat;
use std::fs;
use std::path::Path;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Java constructor calls
    #[default]
    Code,
    /// Readable summaries
    Human,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Code => OutputFormat::Code,
            FormatArg::Human => OutputFormat::Human,
        }
    }
}

/// Write `lines` newline-joined, creating parent directories as needed.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(path, lines.join("\n")).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Report non-fatal parse problems on stderr.
pub fn report_diagnostics(diagnostics: &::enml::Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{} warning(s):", diagnostics.len());
    for entry in diagnostics.iter() {
        eprintln!("  {entry}");
    }
}
