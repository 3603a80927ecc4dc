use crate::format::program::layout::EXTENSION_OFFSET;

pub const SHORT_TAG: &[u8; 2] = b"SQ";
pub const LEGACY_TAG: &[u8; 4] = b"SEQD";
/// Bytes inspected when reporting an unrecognized tag.
pub const TAG_PROBE_LEN: usize = 4;

pub const STEP_COUNT: usize = 16;
pub const MOTION_SLOT_COUNT: usize = 4;
pub const NOTES_PER_STEP: usize = 8;
pub const MOTION_BYTES_PER_SLOT: usize = 5;

pub const ALL_STEPS_ACTIVE: u16 = 0xFFFF;

pub const STEP_EVENT_LEN: usize = 52;
pub const STEP_NOTES_OFFSET: usize = 0;
pub const STEP_VELOCITIES_OFFSET: usize = 8;
pub const STEP_GATES_OFFSET: usize = 16;
pub const STEP_MOTION_OFFSET: usize = 24;

pub const GATE_TIME_MASK: u8 = 0x7F;
pub const GATE_TRIGGER_BIT: u8 = 0x80;

pub const MOTION_ON_BIT: u16 = 0x0001;
pub const MOTION_SMOOTH_BIT: u16 = 0x0002;
pub const MOTION_PARAMETER_SHIFT: u16 = 8;

/// Absolute offsets of one extension variant.
///
/// Optional entries are absent from that variant and decode to their
/// variant default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerLayout {
    pub tag_len: usize,
    pub active_steps: Option<usize>,
    pub bpm: usize,
    pub step_length: usize,
    pub step_resolution: usize,
    pub swing: usize,
    pub default_gate_time: usize,
    pub step_on_off: usize,
    pub motion_on_off: usize,
    pub motion_slot_params: usize,
    pub motion_slot_steps: Option<usize>,
    pub step_events: usize,
}

impl SequencerLayout {
    pub const fn motion_slot_param(&self, slot: usize) -> usize {
        self.motion_slot_params + slot * 2
    }

    pub const fn motion_slot_step(&self, slot: usize) -> Option<usize> {
        match self.motion_slot_steps {
            Some(base) => Some(base + slot * 2),
            None => None,
        }
    }

    pub const fn step_event(&self, step: usize) -> usize {
        self.step_events + step * STEP_EVENT_LEN
    }

    /// Buffer length needed to hold every field of this variant.
    pub const fn total_len(&self) -> usize {
        self.step_event(STEP_COUNT)
    }
}

pub const SHORT_LAYOUT: SequencerLayout = SequencerLayout {
    tag_len: SHORT_TAG.len(),
    active_steps: Some(EXTENSION_OFFSET + 2),
    bpm: EXTENSION_OFFSET + 4,
    step_length: EXTENSION_OFFSET + 6,
    step_resolution: EXTENSION_OFFSET + 7,
    swing: EXTENSION_OFFSET + 8,
    default_gate_time: EXTENSION_OFFSET + 9,
    step_on_off: EXTENSION_OFFSET + 10,
    motion_on_off: EXTENSION_OFFSET + 12,
    motion_slot_params: EXTENSION_OFFSET + 14,
    motion_slot_steps: Some(EXTENSION_OFFSET + 22),
    step_events: EXTENSION_OFFSET + 32,
};

pub const LEGACY_LAYOUT: SequencerLayout = SequencerLayout {
    tag_len: LEGACY_TAG.len(),
    active_steps: None,
    bpm: EXTENSION_OFFSET + 4,
    step_length: EXTENSION_OFFSET + 6,
    step_resolution: EXTENSION_OFFSET + 7,
    swing: EXTENSION_OFFSET + 8,
    default_gate_time: EXTENSION_OFFSET + 9,
    step_on_off: EXTENSION_OFFSET + 10,
    motion_on_off: EXTENSION_OFFSET + 12,
    motion_slot_params: EXTENSION_OFFSET + 14,
    motion_slot_steps: None,
    step_events: EXTENSION_OFFSET + 22,
};
