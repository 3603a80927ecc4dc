//! Structured JSON document built from a decoded [`Program`].
//!
//! The shape is fixed regardless of which preset features are present:
//!
//! ```text
//! { "document_version": 1,
//!   "parameters": { <field name>: <raw value>, ... },
//!   "sequencer": { ... } | {},
//!   "user_units": {} }
//! ```

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::model::{FieldValue, Program, Sequencer};

/// Current document schema version.
pub const DOCUMENT_VERSION: u32 = 1;

/// Raw parameter values keyed by field name, serialized in field-table
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSection {
    entries: Vec<(&'static str, FieldValue)>,
}

impl ParameterSection {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value))
    }
}

impl Serialize for ParameterSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Sequencer data, or an empty object when the preset carries none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SequencerSection {
    #[serde(flatten)]
    pub data: Option<Sequencer>,
}

/// Versioned document for one preset.
///
/// # Examples
/// ```
/// use xdpreset_core::{PresetDocument, decode_program};
///
/// let mut data = vec![0u8; 160];
/// data[..4].copy_from_slice(b"PROG");
/// data[156..].copy_from_slice(b"PRED");
/// let program = decode_program(&data).unwrap();
/// let doc = PresetDocument::from_program(&program);
/// assert_eq!(doc.document_version, 1);
/// assert_eq!(doc.parameters.len(), xdpreset_core::FIELD_TABLE.len());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetDocument {
    pub document_version: u32,
    pub parameters: ParameterSection,
    pub sequencer: SequencerSection,
    /// Reserved for user oscillator/effect unit metadata; always empty.
    pub user_units: BTreeMap<String, serde_json::Value>,
}

impl PresetDocument {
    pub fn from_program(program: &Program) -> Self {
        let entries = program
            .fields()
            .map(|(desc, value)| (desc.name, value.clone()))
            .collect();
        Self {
            document_version: DOCUMENT_VERSION,
            parameters: ParameterSection { entries },
            sequencer: SequencerSection {
                data: program.sequencer().cloned(),
            },
            user_units: BTreeMap::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::PresetDocument;
    use crate::format::program::layout::PROGRAM_LEN;
    use crate::format::program::parser::decode_program;
    use crate::format::program::table::FIELD_TABLE;

    fn record(extension: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; PROGRAM_LEN];
        data[..4].copy_from_slice(b"PROG");
        data[4..8].copy_from_slice(b"Bass");
        data[156..].copy_from_slice(b"PRED");
        data[18] = 1;
        data.extend_from_slice(extension);
        data
    }

    #[test]
    fn parameters_follow_table_order() {
        let program = decode_program(&record(&[])).expect("decode");
        let doc = PresetDocument::from_program(&program);
        let json = doc.to_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(
            value["parameters"].as_object().map(|o| o.len()),
            Some(FIELD_TABLE.len())
        );

        let mut last = 0;
        for desc in FIELD_TABLE {
            let needle = format!("\"{}\":", desc.name);
            let pos = json.find(&needle).expect("field present");
            assert!(pos >= last, "{} out of order", desc.name);
            last = pos;
        }
    }

    #[test]
    fn raw_value_kinds() {
        let program = decode_program(&record(&[])).expect("decode");
        let value = serde_json::to_value(PresetDocument::from_program(&program)).expect("value");
        let params = &value["parameters"];
        assert_eq!(params["header"], "PROG");
        assert_eq!(params["program_name"], "Bass");
        assert_eq!(params["key_trig"], true);
        assert_eq!(params["ring_mod"], false);
        assert_eq!(params["vco1_pitch"], 0);
    }

    #[test]
    fn placeholder_sections_when_absent() {
        let program = decode_program(&record(&[])).expect("decode");
        let value = serde_json::to_value(PresetDocument::from_program(&program)).expect("value");
        assert_eq!(value["document_version"], 1);
        assert_eq!(value["sequencer"], serde_json::json!({}));
        assert_eq!(value["user_units"], serde_json::json!({}));
    }

    #[test]
    fn sequencer_section_is_flattened() {
        let mut extension = vec![0u8; 864];
        extension[..2].copy_from_slice(b"SQ");
        extension[4..6].copy_from_slice(&1200u16.to_le_bytes());
        let program = decode_program(&record(&extension)).expect("decode");
        let value = serde_json::to_value(PresetDocument::from_program(&program)).expect("value");
        assert_eq!(value["sequencer"]["format"], "short");
        assert_eq!(value["sequencer"]["bpm"], 1200);
        assert_eq!(
            value["sequencer"]["steps"].as_array().map(Vec::len),
            Some(16)
        );
    }
}
