use tracing::debug;

use super::layout::{
    ALL_STEPS_ACTIVE, LEGACY_LAYOUT, LEGACY_TAG, MOTION_BYTES_PER_SLOT, MOTION_SLOT_COUNT,
    NOTES_PER_STEP, SHORT_LAYOUT, SHORT_TAG, STEP_COUNT, STEP_GATES_OFFSET, STEP_MOTION_OFFSET,
    STEP_NOTES_OFFSET, STEP_VELOCITIES_OFFSET, SequencerLayout, TAG_PROBE_LEN,
};
use crate::format::common::reader::{ByteReader, decode_tag};
use crate::format::program::layout::EXTENSION_OFFSET;
use crate::model::{ExtensionStatus, MotionSlot, Sequencer, SequencerFormat, SequencerStep};

/// Picks the extension variant from the tag at the extension offset.
///
/// The longer legacy tag is checked first since it never starts with the
/// short tag.
pub(crate) fn detect_format(data: &[u8]) -> Option<SequencerFormat> {
    let reader = ByteReader::new(data);
    let probe = |len: usize| reader.read_slice(EXTENSION_OFFSET..EXTENSION_OFFSET + len);
    if probe(LEGACY_TAG.len()) == Some(LEGACY_TAG.as_slice()) {
        Some(SequencerFormat::Legacy)
    } else if probe(SHORT_TAG.len()) == Some(SHORT_TAG.as_slice()) {
        Some(SequencerFormat::Short)
    } else {
        None
    }
}

pub(crate) fn layout_for(format: SequencerFormat) -> &'static SequencerLayout {
    match format {
        SequencerFormat::Short => &SHORT_LAYOUT,
        SequencerFormat::Legacy => &LEGACY_LAYOUT,
    }
}

/// Decodes whatever follows the fixed region.
///
/// Never fails: an unknown tag skips the extension and a short buffer leaves
/// the missing fields zeroed. Both outcomes are reported through the
/// returned status.
pub(crate) fn decode_extension(data: &[u8]) -> (Option<Sequencer>, ExtensionStatus) {
    if data.len() <= EXTENSION_OFFSET {
        return (None, ExtensionStatus::Absent);
    }

    let Some(format) = detect_format(data) else {
        let end = data.len().min(EXTENSION_OFFSET + TAG_PROBE_LEN);
        let tag = decode_tag(&data[EXTENSION_OFFSET..end]);
        debug!(tag = %tag.escape_debug(), "unrecognized sequencer tag; extension skipped");
        return (None, ExtensionStatus::UnknownTag(tag));
    };

    let layout = layout_for(format);
    let sequencer = parse_sequencer(data, format, layout);
    let needed = layout.total_len();
    let status = if data.len() < needed {
        debug!(
            ?format,
            needed,
            actual = data.len(),
            "sequencer extension truncated; missing fields left at zero"
        );
        ExtensionStatus::Truncated {
            needed,
            actual: data.len(),
        }
    } else {
        ExtensionStatus::Decoded
    };
    (Some(sequencer), status)
}

fn parse_sequencer(data: &[u8], format: SequencerFormat, layout: &SequencerLayout) -> Sequencer {
    let reader = ByteReader::new(data);
    let u8_at = |offset: usize| reader.read_u8(offset).unwrap_or(0);
    let u16_at = |offset: usize| reader.read_u16_le(offset).unwrap_or(0);

    let active_steps = match layout.active_steps {
        Some(offset) => u16_at(offset),
        None => ALL_STEPS_ACTIVE,
    };

    let mut motion_slots = [MotionSlot::default(); MOTION_SLOT_COUNT];
    for (slot, motion) in motion_slots.iter_mut().enumerate() {
        motion.parameter = u16_at(layout.motion_slot_param(slot));
        motion.step_on_off = layout.motion_slot_step(slot).map_or(0, u16_at);
    }

    let steps = (0..STEP_COUNT)
        .map(|step| parse_step(&reader, layout.step_event(step)))
        .collect();

    Sequencer {
        format,
        active_steps,
        bpm: u16_at(layout.bpm),
        step_length: u8_at(layout.step_length),
        step_resolution: u8_at(layout.step_resolution),
        swing: i8::from_le_bytes([u8_at(layout.swing)]),
        default_gate_time: u8_at(layout.default_gate_time),
        step_on_off: u16_at(layout.step_on_off),
        motion_on_off: u16_at(layout.motion_on_off),
        motion_slots,
        steps,
    }
}

fn parse_step(reader: &ByteReader<'_>, base: usize) -> SequencerStep {
    let mut motion = [[0u8; MOTION_BYTES_PER_SLOT]; MOTION_SLOT_COUNT];
    for (slot, bytes) in motion.iter_mut().enumerate() {
        *bytes = reader.read_array(base + STEP_MOTION_OFFSET + slot * MOTION_BYTES_PER_SLOT);
    }
    SequencerStep {
        notes: reader.read_array::<NOTES_PER_STEP>(base + STEP_NOTES_OFFSET),
        velocities: reader.read_array::<NOTES_PER_STEP>(base + STEP_VELOCITIES_OFFSET),
        gates: reader.read_array::<NOTES_PER_STEP>(base + STEP_GATES_OFFSET),
        motion,
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_extension, detect_format};
    use crate::format::program::layout::PROGRAM_LEN;
    use crate::format::sequencer::layout::{LEGACY_LAYOUT, SHORT_LAYOUT, STEP_GATES_OFFSET};
    use crate::model::{ExtensionStatus, SequencerFormat};

    fn with_extension(tag: &[u8], total: usize) -> Vec<u8> {
        let mut data = vec![0u8; total];
        data[PROGRAM_LEN..PROGRAM_LEN + tag.len()].copy_from_slice(tag);
        data
    }

    #[test]
    fn no_extension_is_absent() {
        let data = vec![0u8; PROGRAM_LEN];
        let (sequencer, status) = decode_extension(&data);
        assert!(sequencer.is_none());
        assert_eq!(status, ExtensionStatus::Absent);
    }

    #[test]
    fn short_variant_reads_explicit_fields() {
        let mut data = with_extension(b"SQ", SHORT_LAYOUT.total_len());
        data[162..164].copy_from_slice(&0x00F0u16.to_le_bytes());
        data[164..166].copy_from_slice(&1200u16.to_le_bytes());
        data[166] = 16;
        data[168] = (-20i8).to_le_bytes()[0];
        data[182..184].copy_from_slice(&0x0003u16.to_le_bytes());
        data[SHORT_LAYOUT.step_event(1) + STEP_GATES_OFFSET] = 0x80 | 36;

        let (sequencer, status) = decode_extension(&data);
        let sequencer = sequencer.expect("sequencer");
        assert_eq!(status, ExtensionStatus::Decoded);
        assert_eq!(sequencer.format, SequencerFormat::Short);
        assert_eq!(sequencer.active_steps, 0x00F0);
        assert_eq!(sequencer.bpm, 1200);
        assert_eq!(sequencer.step_length, 16);
        assert_eq!(sequencer.swing, -20);
        assert_eq!(sequencer.motion_slots[0].step_on_off, 0x0003);
        assert!(sequencer.steps[1].trigger(0));
        assert_eq!(sequencer.steps[1].gate_time(0), 36);
        assert_eq!(sequencer.steps.len(), 16);
    }

    #[test]
    fn legacy_variant_implies_all_steps_and_shifted_events() {
        let mut data = with_extension(b"SEQD", LEGACY_LAYOUT.total_len());
        data[LEGACY_LAYOUT.step_event(0)] = 60;

        let (sequencer, status) = decode_extension(&data);
        let sequencer = sequencer.expect("sequencer");
        assert_eq!(status, ExtensionStatus::Decoded);
        assert_eq!(sequencer.format, SequencerFormat::Legacy);
        assert_eq!(sequencer.active_steps, 0xFFFF);
        assert_eq!(sequencer.steps[0].notes[0], 60);
        assert!(sequencer.motion_slots.iter().all(|slot| slot.step_on_off == 0));
    }

    #[test]
    fn unknown_tag_skips_extension() {
        let data = with_extension(b"XYZW", PROGRAM_LEN + 20);
        assert_eq!(detect_format(&data), None);
        let (sequencer, status) = decode_extension(&data);
        assert!(sequencer.is_none());
        assert_eq!(status, ExtensionStatus::UnknownTag("XYZW".to_string()));
    }

    #[test]
    fn truncated_extension_zero_fills() {
        let mut data = with_extension(b"SQ", 170);
        data[164..166].copy_from_slice(&900u16.to_le_bytes());

        let (sequencer, status) = decode_extension(&data);
        let sequencer = sequencer.expect("sequencer");
        assert_eq!(
            status,
            ExtensionStatus::Truncated {
                needed: 1024,
                actual: 170
            }
        );
        assert_eq!(sequencer.bpm, 900);
        assert_eq!(sequencer.step_on_off, 0);
        assert!(sequencer.steps.iter().all(|step| step.notes == [0; 8]));
    }

    #[test]
    fn single_byte_extension_is_unknown() {
        let data = with_extension(b"S", PROGRAM_LEN + 1);
        let (_, status) = decode_extension(&data);
        assert_eq!(status, ExtensionStatus::UnknownTag("S".to_string()));
    }
}
