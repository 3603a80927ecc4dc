//! Preset container access.
//!
//! `.mnlgxdprog` packages and `.mnlgxdlib` libraries are ZIP archives; a bare
//! `.prog_bin` file is a single record and is passed through as one entry.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use zip::ZipArchive;

pub const PACKAGE_EXTENSION: &str = "mnlgxdprog";
pub const LIBRARY_EXTENSION: &str = "mnlgxdlib";
pub const RECORD_EXTENSION: &str = "prog_bin";

pub const SUPPORTED_HINT: &str = "expected a .mnlgxdprog, .mnlgxdlib or .prog_bin file";

/// One archive member: name and raw bytes.
pub type Entry = (String, Vec<u8>);

pub fn is_supported_extension(ext: &str) -> bool {
    [PACKAGE_EXTENSION, LIBRARY_EXTENSION, RECORD_EXTENSION]
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Reads every entry of `path` in archive order.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if ext.eq_ignore_ascii_case(RECORD_EXTENSION) {
        let data = fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(vec![(name, data)]);
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open archive: {}", path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read archive: {}", path.display()))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to read archive entry #{index}"))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut data = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut data)
            .with_context(|| format!("Failed to extract archive entry: {name}"))?;
        debug!(entry = %name, bytes = data.len(), "archive entry read");
        entries.push((name, data));
    }
    Ok(entries)
}

/// File stem used for per-entry outputs: the entry's base name without the
/// record suffix.
pub fn output_stem(entry_name: &str) -> String {
    let base = entry_name.rsplit(['/', '\\']).next().unwrap_or(entry_name);
    base.strip_suffix(xdpreset_core::PROGRAM_ENTRY_SUFFIX)
        .unwrap_or(base)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{is_supported_extension, output_stem};

    #[test]
    fn supported_extensions() {
        assert!(is_supported_extension("mnlgxdlib"));
        assert!(is_supported_extension("MNLGXDPROG"));
        assert!(is_supported_extension("prog_bin"));
        assert!(!is_supported_extension("zip"));
    }

    #[test]
    fn stems_drop_directories_and_suffix() {
        assert_eq!(output_stem("Prog_007.prog_bin"), "Prog_007");
        assert_eq!(output_stem("sub/dir/Prog_001.prog_bin"), "Prog_001");
        assert_eq!(output_stem("odd.name"), "odd.name");
    }
}
