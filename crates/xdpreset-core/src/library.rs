//! Batch decoding of archive entries.
//!
//! The archive container itself is opened by the caller; this module only
//! sees `(entry name, bytes)` pairs. Entries whose names do not end in
//! [`PROGRAM_ENTRY_SUFFIX`] are ignored. A fault on one entry is recorded and
//! the batch continues.

use thiserror::Error;
use tracing::{debug, warn};

use crate::format::program::error::StructuralFault;
use crate::format::program::parser::decode_program;
use crate::model::Program;

/// Suffix of archive entries holding one preset record.
pub const PROGRAM_ENTRY_SUFFIX: &str = ".prog_bin";

pub fn is_program_entry(name: &str) -> bool {
    name.ends_with(PROGRAM_ENTRY_SUFFIX)
}

/// Entry name used for the preset at `index` (`Prog_000.prog_bin`, ...).
pub fn program_entry_name(index: usize) -> String {
    format!("Prog_{index:03}{PROGRAM_ENTRY_SUFFIX}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    pub name: String,
    pub program: Program,
}

/// A structural fault scoped to one archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {fault}")]
pub struct EntryFault {
    pub name: String,
    #[source]
    pub fault: StructuralFault,
}

/// Successes and per-entry faults, both in archive order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryDecode {
    pub presets: Vec<DecodedEntry>,
    pub faults: Vec<EntryFault>,
}

impl LibraryDecode {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

fn no_matching_entries() -> StructuralFault {
    StructuralFault::NoMatchingEntries {
        suffix: PROGRAM_ENTRY_SUFFIX.to_string(),
    }
}

/// Decodes every preset entry in `entries`.
///
/// Fails only when no entry carries the preset suffix.
///
/// # Examples
/// ```
/// use xdpreset_core::decode_library;
///
/// let mut record = vec![0u8; 160];
/// record[..4].copy_from_slice(b"PROG");
/// record[156..].copy_from_slice(b"PRED");
/// let entries = vec![
///     ("Prog_000.prog_bin", record.clone()),
///     ("Prog_001.prog_bin", record[..20].to_vec()),
///     ("FileInformation.xml", Vec::new()),
/// ];
/// let decoded = decode_library(&entries)?;
/// assert_eq!(decoded.presets.len(), 1);
/// assert_eq!(decoded.faults.len(), 1);
/// # Ok::<(), xdpreset_core::StructuralFault>(())
/// ```
pub fn decode_library<N, D>(entries: &[(N, D)]) -> Result<LibraryDecode, StructuralFault>
where
    N: AsRef<str>,
    D: AsRef<[u8]>,
{
    let mut decoded = LibraryDecode::default();
    let mut matched = 0usize;
    for (name, data) in entries {
        let name = name.as_ref();
        if !is_program_entry(name) {
            debug!(entry = name, "skipping non-preset entry");
            continue;
        }
        matched += 1;
        match decode_program(data.as_ref()) {
            Ok(program) => decoded.presets.push(DecodedEntry {
                name: name.to_string(),
                program,
            }),
            Err(fault) => {
                warn!(entry = name, %fault, "preset entry skipped");
                decoded.faults.push(EntryFault {
                    name: name.to_string(),
                    fault,
                });
            }
        }
    }
    if matched == 0 {
        return Err(no_matching_entries());
    }
    debug!(
        presets = decoded.presets.len(),
        faults = decoded.faults.len(),
        "library decoded"
    );
    Ok(decoded)
}

/// Decodes the preset at `index` of a package, falling back to the first
/// preset entry when the conventional name is missing.
pub fn decode_package_entry<N, D>(
    entries: &[(N, D)],
    index: usize,
) -> Result<DecodedEntry, StructuralFault>
where
    N: AsRef<str>,
    D: AsRef<[u8]>,
{
    let wanted = program_entry_name(index);
    let (name, data) = entries
        .iter()
        .find(|(name, _)| name.as_ref() == wanted)
        .or_else(|| {
            let first = entries.iter().find(|(name, _)| is_program_entry(name.as_ref()));
            if let Some((name, _)) = first {
                warn!(
                    wanted = %wanted,
                    entry = name.as_ref(),
                    "requested preset entry not found; falling back to first preset entry"
                );
            }
            first
        })
        .ok_or_else(no_matching_entries)?;
    let program = decode_program(data.as_ref())?;
    Ok(DecodedEntry {
        name: name.as_ref().to_string(),
        program,
    })
}
