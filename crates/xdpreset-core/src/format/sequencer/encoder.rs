use super::layout::{
    LEGACY_TAG, MOTION_BYTES_PER_SLOT, SHORT_TAG, STEP_COUNT, STEP_GATES_OFFSET, STEP_MOTION_OFFSET,
    STEP_NOTES_OFFSET, STEP_VELOCITIES_OFFSET,
};
use super::parser::layout_for;
use crate::format::program::layout::EXTENSION_OFFSET;
use crate::model::{Sequencer, SequencerFormat};

/// Writes the extension bytes (starting at the extension offset) into
/// `out`, growing it to the variant's full length. Reserved bytes are zero.
pub(crate) fn encode_extension(sequencer: &Sequencer, out: &mut Vec<u8>) {
    let layout = layout_for(sequencer.format);
    if out.len() < layout.total_len() {
        out.resize(layout.total_len(), 0);
    }

    let tag: &[u8] = match sequencer.format {
        SequencerFormat::Short => SHORT_TAG,
        SequencerFormat::Legacy => LEGACY_TAG,
    };
    out[EXTENSION_OFFSET..EXTENSION_OFFSET + tag.len()].copy_from_slice(tag);

    if let Some(offset) = layout.active_steps {
        put_u16(out, offset, sequencer.active_steps);
    }
    put_u16(out, layout.bpm, sequencer.bpm);
    out[layout.step_length] = sequencer.step_length;
    out[layout.step_resolution] = sequencer.step_resolution;
    out[layout.swing] = sequencer.swing.to_le_bytes()[0];
    out[layout.default_gate_time] = sequencer.default_gate_time;
    put_u16(out, layout.step_on_off, sequencer.step_on_off);
    put_u16(out, layout.motion_on_off, sequencer.motion_on_off);

    for (slot, motion) in sequencer.motion_slots.iter().enumerate() {
        put_u16(out, layout.motion_slot_param(slot), motion.parameter);
        if let Some(offset) = layout.motion_slot_step(slot) {
            put_u16(out, offset, motion.step_on_off);
        }
    }

    for (idx, step) in sequencer.steps.iter().enumerate().take(STEP_COUNT) {
        let base = layout.step_event(idx);
        let notes = base + STEP_NOTES_OFFSET;
        out[notes..notes + step.notes.len()].copy_from_slice(&step.notes);
        let velocities = base + STEP_VELOCITIES_OFFSET;
        out[velocities..velocities + step.velocities.len()].copy_from_slice(&step.velocities);
        let gates = base + STEP_GATES_OFFSET;
        out[gates..gates + step.gates.len()].copy_from_slice(&step.gates);
        for (slot, bytes) in step.motion.iter().enumerate() {
            let start = base + STEP_MOTION_OFFSET + slot * MOTION_BYTES_PER_SLOT;
            out[start..start + MOTION_BYTES_PER_SLOT].copy_from_slice(bytes);
        }
    }
}

fn put_u16(out: &mut [u8], offset: usize, value: u16) {
    out[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}
