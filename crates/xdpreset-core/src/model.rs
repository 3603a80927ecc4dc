//! Decoded preset model.
//!
//! A [`Program`] holds one raw value per [`FIELD_TABLE`] entry plus the
//! optional sequencer extension. Values stay raw: labels and derived units
//! come from [`crate::semantics`].

use serde::{Serialize, Serializer};

use crate::format::program::error::Degradation;
use crate::format::program::table::{FIELD_TABLE, FieldDescriptor, FieldId};
use crate::format::sequencer::layout::{
    GATE_TIME_MASK, GATE_TRIGGER_BIT, MOTION_BYTES_PER_SLOT, MOTION_ON_BIT, MOTION_PARAMETER_SHIFT,
    MOTION_SLOT_COUNT, MOTION_SMOOTH_BIT, NOTES_PER_STEP,
};
use crate::semantics::enums::lookup;

/// Raw value of one fixed-region field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Stored byte; any non-zero value reads as `true`.
    Flag(u8),
    Number(u16),
}

impl FieldValue {
    /// Numeric view: flags yield their stored byte, tags yield zero.
    pub fn as_u16(&self) -> u16 {
        match self {
            FieldValue::Number(value) => *value,
            FieldValue::Flag(raw) => u16::from(*raw),
            FieldValue::Text(_) => 0,
        }
    }

    pub fn as_bool(&self) -> bool {
        self.as_u16() != 0
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::Flag(raw) => serializer.serialize_bool(*raw != 0),
            FieldValue::Number(value) => serializer.serialize_u16(*value),
        }
    }
}

/// Outcome of looking for a sequencer extension past the fixed region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionStatus {
    Absent,
    Decoded,
    UnknownTag(String),
    Truncated { needed: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencerFormat {
    Short,
    Legacy,
}

impl SequencerFormat {
    pub fn tag(self) -> &'static str {
        match self {
            SequencerFormat::Short => "SQ",
            SequencerFormat::Legacy => "SEQD",
        }
    }
}

/// One motion-sequence lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MotionSlot {
    /// Bit 0 motion on, bit 1 smooth, bits 8..15 parameter id.
    pub parameter: u16,
    pub step_on_off: u16,
}

impl MotionSlot {
    pub fn motion_on(&self) -> bool {
        self.parameter & MOTION_ON_BIT != 0
    }

    pub fn smooth(&self) -> bool {
        self.parameter & MOTION_SMOOTH_BIT != 0
    }

    pub fn parameter_id(&self) -> u8 {
        (self.parameter >> MOTION_PARAMETER_SHIFT) as u8
    }
}

/// Event data for one sequencer step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SequencerStep {
    pub notes: [u8; NOTES_PER_STEP],
    pub velocities: [u8; NOTES_PER_STEP],
    /// Bits 0..6 gate time, bit 7 trigger.
    pub gates: [u8; NOTES_PER_STEP],
    pub motion: [[u8; MOTION_BYTES_PER_SLOT]; MOTION_SLOT_COUNT],
}

impl SequencerStep {
    pub fn gate_time(&self, note: usize) -> u8 {
        self.gates.get(note).map_or(0, |gate| gate & GATE_TIME_MASK)
    }

    pub fn trigger(&self, note: usize) -> bool {
        self.gates
            .get(note)
            .is_some_and(|gate| gate & GATE_TRIGGER_BIT != 0)
    }

    /// Notes that carry a non-zero velocity.
    pub fn sounding_notes(&self) -> impl Iterator<Item = u8> + '_ {
        self.notes
            .iter()
            .zip(self.velocities.iter())
            .filter(|(_, velocity)| **velocity > 0)
            .map(|(note, _)| *note)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequencer {
    pub format: SequencerFormat,
    /// Bit n marks step n + 1 active.
    pub active_steps: u16,
    /// Tempo in tenths of a BPM.
    pub bpm: u16,
    pub step_length: u8,
    pub step_resolution: u8,
    pub swing: i8,
    pub default_gate_time: u8,
    pub step_on_off: u16,
    pub motion_on_off: u16,
    pub motion_slots: [MotionSlot; MOTION_SLOT_COUNT],
    pub steps: Vec<SequencerStep>,
}

impl Sequencer {
    pub fn step_active(&self, step: usize) -> bool {
        step < 16 && self.active_steps & (1 << step) != 0
    }

    pub fn step_enabled(&self, step: usize) -> bool {
        step < 16 && self.step_on_off & (1 << step) != 0
    }
}

/// A decoded preset. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    values: Vec<FieldValue>,
    sequencer: Option<Sequencer>,
    extension: ExtensionStatus,
}

impl Program {
    pub(crate) fn from_parts(
        values: Vec<FieldValue>,
        sequencer: Option<Sequencer>,
        extension: ExtensionStatus,
    ) -> Self {
        debug_assert_eq!(values.len(), FIELD_TABLE.len());
        Self {
            values,
            sequencer,
            extension,
        }
    }

    pub fn value(&self, id: FieldId) -> &FieldValue {
        &self.values[id as usize]
    }

    pub fn raw(&self, id: FieldId) -> u16 {
        self.value(id).as_u16()
    }

    pub fn flag(&self, id: FieldId) -> bool {
        self.value(id).as_bool()
    }

    pub fn text(&self, id: FieldId) -> &str {
        self.value(id).as_str().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.text(FieldId::ProgramName)
    }

    /// Fields paired with their descriptors, in table order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldDescriptor, &FieldValue)> + '_ {
        FIELD_TABLE.iter().zip(self.values.iter())
    }

    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }

    pub fn extension(&self) -> &ExtensionStatus {
        &self.extension
    }

    /// Attaches a sequencer extension, replacing any decoded one.
    pub fn with_sequencer(mut self, sequencer: Sequencer) -> Self {
        self.sequencer = Some(sequencer);
        self.extension = ExtensionStatus::Decoded;
        self
    }

    /// Collects every non-fatal issue: unlabeled enumeration ordinals and
    /// extension problems.
    pub fn degradations(&self) -> Vec<Degradation> {
        let mut out: Vec<Degradation> = self
            .fields()
            .filter_map(|(desc, value)| {
                let kind = desc.enum_kind()?;
                let raw = value.as_u16();
                match lookup(kind, raw) {
                    Some(_) => None,
                    None => Some(Degradation::UnknownOrdinal {
                        field: desc.name,
                        value: raw,
                    }),
                }
            })
            .collect();
        match &self.extension {
            ExtensionStatus::UnknownTag(tag) => {
                out.push(Degradation::UnknownExtensionTag { tag: tag.clone() })
            }
            ExtensionStatus::Truncated { needed, actual } => {
                out.push(Degradation::PartialExtension {
                    needed: *needed,
                    actual: *actual,
                })
            }
            ExtensionStatus::Absent | ExtensionStatus::Decoded => {}
        }
        out
    }
}
