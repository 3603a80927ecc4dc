//! xdpreset core library: preset record decoding and rendering.
//!
//! A preset record is a fixed 160-byte program region followed by an
//! optional step-sequencer extension. The decoder walks a static field table
//! (`format`) into a [`Program`] holding raw values; the value semantics layer
//! (`semantics`) turns raw values into labels and percentages; the document
//! serializer and the schematic renderer both consume the same program.
//! Everything here is pure: archive access and file output belong to the
//! CLI.
//!
//! Invariants:
//! - Decoding never fails on field contents, only on record length.
//! - Unknown ordinals render as the `"---"` sentinel and are reported as
//!   degradations.
//! - Decode then encode reproduces every table-covered byte.
//!
//! Version française (résumé):
//! Cette crate décode un enregistrement de preset (zone fixe de 160 octets
//! puis extension séquenceur optionnelle) via une table de champs statique,
//! puis produit un document JSON et un schéma SVG. Aucune E/S ici.
//!
//! # Examples
//! ```
//! use xdpreset_core::{PresetDocument, decode_program, render_schematic};
//!
//! let mut data = vec![0u8; 160];
//! data[..4].copy_from_slice(b"PROG");
//! data[4..8].copy_from_slice(b"Pad1");
//! data[156..].copy_from_slice(b"PRED");
//!
//! let program = decode_program(&data)?;
//! assert_eq!(program.name(), "Pad1");
//! assert!(program.degradations().is_empty());
//!
//! let doc = PresetDocument::from_program(&program);
//! assert_eq!(doc.parameters.get("program_name").and_then(|v| v.as_str()), Some("Pad1"));
//! assert!(render_schematic(&program).contains("Program: Pad1"));
//! # Ok::<(), xdpreset_core::StructuralFault>(())
//! ```

pub mod format;
pub mod semantics;

mod document;
mod library;
mod model;
mod schematic;

pub use document::{DOCUMENT_VERSION, ParameterSection, PresetDocument, SequencerSection};
pub use format::program::error::{Degradation, StructuralFault};
pub use format::program::layout::PROGRAM_LEN;
pub use format::program::table::{
    Domain, EnumKind, FIELD_TABLE, FieldDescriptor, FieldId, Width, descriptor,
    descriptor_by_name,
};
pub use format::program::{decode_program, encode_program};
pub use library::{
    DecodedEntry, EntryFault, LibraryDecode, PROGRAM_ENTRY_SUFFIX, decode_library,
    decode_package_entry, is_program_entry, program_entry_name,
};
pub use model::{
    ExtensionStatus, FieldValue, MotionSlot, Program, Sequencer, SequencerFormat, SequencerStep,
};
pub use schematic::{
    DEFAULT_DISPLAY_WIDTH, SchematicOptions, render_schematic, render_schematic_with,
};
