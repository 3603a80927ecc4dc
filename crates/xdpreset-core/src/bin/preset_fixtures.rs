use std::fs;
use std::path::{Path, PathBuf};

use xdpreset_core::format::program::layout::{
    END_MARKER_RANGE, END_MARKER_TAG, HEADER_RANGE, HEADER_TAG, NAME_RANGE,
};
use xdpreset_core::format::sequencer::layout::STEP_COUNT;
use xdpreset_core::{
    Domain, MotionSlot, PROGRAM_LEN, Sequencer, SequencerFormat, SequencerStep, Width,
    decode_program, descriptor_by_name, encode_program,
};

const UNKNOWN_EXTENSION: &[u8] = b"JUNK\x01\x02\x03\x04";

const INIT_PROGRAM: &[(&str, u16)] = &[
    ("octave", 2),
    ("voice_mode_depth", 0),
    ("voice_mode_type", 4),
    ("vco1_wave", 2),
    ("vco1_octave", 1),
    ("vco1_pitch", 512),
    ("vco1_shape", 0),
    ("vco2_wave", 2),
    ("vco2_octave", 1),
    ("vco2_pitch", 512),
    ("vco2_shape", 0),
    ("cross_mod_depth", 0),
    ("multi_osc_type", 1),
    ("selected_multi_osc_vpm", 3),
    ("shape_vpm", 256),
    ("shift_shape_vpm", 768),
    ("vco1_level", 1023),
    ("vco2_level", 0),
    ("multi_level", 512),
    ("filter_cutoff", 1023),
    ("filter_resonance", 0),
    ("filter_cutoff_keyboard_track", 1),
    ("amp_eg_attack", 0),
    ("amp_eg_decay", 512),
    ("amp_eg_sustain", 1023),
    ("amp_eg_release", 10),
    ("eg_int", 512),
    ("eg_target", 0),
    ("lfo_wave", 1),
    ("lfo_mode", 1),
    ("lfo_rate", 512),
    ("lfo_int", 0),
    ("lfo_target", 2),
    ("mod_fx_on_off", 1),
    ("mod_fx_type", 1),
    ("mod_fx_chorus", 3),
    ("mod_fx_time", 512),
    ("mod_fx_depth", 512),
    ("delay_sub_type", 2),
    ("delay_time", 512),
    ("delay_depth", 512),
    ("reverb_on_off", 1),
    ("reverb_sub_type", 0),
    ("reverb_time", 512),
    ("reverb_depth", 512),
    ("bend_range_plus", 2),
    ("bend_range_minus", 2),
    ("joystick_assign_plus", 12),
    ("joystick_range_plus", 200),
    ("joystick_assign_minus", 1),
    ("joystick_range_minus", 200),
    ("cv_in_mode", 0),
    ("cv_in1_assign", 12),
    ("cv_in1_range", 100),
    ("cv_in2_assign", 3),
    ("cv_in2_range", 100),
    ("micro_tuning", 0),
    ("scale_key", 12),
    ("program_tuning", 50),
    ("lfo_key_sync", 0),
    ("lfo_voice_sync", 0),
    ("lfo_target_osc", 0),
    ("cutoff_velocity", 64),
    ("amp_velocity", 127),
    ("multi_octave", 1),
    ("multi_routing", 0),
    ("eg_legato", 0),
    ("portamento_mode", 0),
    ("program_level", 102),
    ("vpm_parameter1_feedback", 100),
    ("vpm_parameter2_noise_depth", 100),
    ("vpm_parameter3_shape_mod_int", 100),
    ("vpm_parameter4_mod_attack", 100),
    ("vpm_parameter5_mod_decay", 100),
    ("vpm_parameter6_mod_key_track", 100),
    ("user_param56_type", 0x06),
    ("user_param1234_type", 0x64),
    ("program_transpose", 13),
    ("delay_dry_wet", 100),
    ("reverb_dry_wet", 100),
    ("midi_after_touch_assign", 12),
];

const SEQUENCER_PROGRAM: &[(&str, u16)] = &[
    ("octave", 2),
    ("key_trig", 1),
    ("voice_mode_type", 1),
    ("voice_mode_depth", 300),
    ("vco1_wave", 0),
    ("vco1_octave", 2),
    ("vco1_pitch", 700),
    ("vco1_shape", 400),
    ("vco2_wave", 1),
    ("vco2_octave", 2),
    ("vco2_pitch", 345),
    ("oscillator_sync", 1),
    ("multi_osc_type", 2),
    ("selected_multi_osc_user", 4),
    ("shape_user", 600),
    ("shift_shape_user", 100),
    ("vco1_level", 800),
    ("vco2_level", 600),
    ("multi_level", 300),
    ("filter_cutoff", 640),
    ("filter_resonance", 300),
    ("filter_cutoff_drive", 2),
    ("amp_eg_sustain", 900),
    ("eg_decay", 400),
    ("eg_int", 12),
    ("eg_target", 1),
    ("lfo_mode", 2),
    ("lfo_rate", 700),
    ("lfo_int", 300),
    ("mod_fx_type", 5),
    ("mod_fx_user", 2),
    ("delay_on_off", 1),
    ("delay_sub_type", 8),
    ("delay_time", 300),
    ("delay_depth", 700),
    ("reverb_sub_type", 5),
    ("bend_range_plus", 12),
    ("bend_range_minus", 7),
    ("joystick_assign_plus", 22),
    ("joystick_range_plus", 150),
    ("joystick_assign_minus", 21),
    ("joystick_range_minus", 50),
    ("cv_in_mode", 1),
    ("micro_tuning", 129),
    ("scale_key", 19),
    ("program_tuning", 40),
    ("lfo_key_sync", 1),
    ("lfo_target_osc", 1),
    ("multi_routing", 1),
    ("eg_legato", 1),
    ("portamento_mode", 1),
    ("portamento_bpm_sync", 1),
    ("program_level", 132),
    ("user_param1", 50),
    ("user_param2", 150),
    ("user_param3", 7),
    ("user_param56_type", 0x01),
    ("user_param1234_type", 0x24),
    ("program_transpose", 1),
    ("delay_dry_wet", 200),
    ("reverb_dry_wet", 0),
];

const UNKNOWN_ORDINALS: &[(&str, u16)] = &[
    ("voice_mode_type", 9),
    ("vco1_wave", 3),
    ("vco1_pitch", 1023),
    ("mod_fx_type", 7),
    ("delay_sub_type", 42),
    ("joystick_assign_plus", 29),
    ("micro_tuning", 100),
    ("user_param1234_type", 0xFF),
    ("program_level", 12),
    ("program_transpose", 25),
];

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");

    write_case(
        &root,
        "init_program",
        &fixed_region("Init Program", INIT_PROGRAM)?,
    )?;

    for (case, name, format) in [
        ("sequencer_short", "Seq Short", SequencerFormat::Short),
        ("sequencer_legacy", "Seq Legacy", SequencerFormat::Legacy),
    ] {
        let data = attach_sequencer(&fixed_region(name, SEQUENCER_PROGRAM)?, format)?;
        write_case(&root, case, &data)?;
    }

    let mut unknown = fixed_region("Odd <Values>", UNKNOWN_ORDINALS)?;
    unknown.extend_from_slice(UNKNOWN_EXTENSION);
    write_case(&root, "unknown_ordinals", &unknown)?;
    Ok(())
}

fn write_case(root: &Path, case: &str, data: &[u8]) -> Result<(), String> {
    let dir = root.join(case);
    fs::create_dir_all(&dir)
        .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.prog_bin");
    fs::write(&path, data).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}

/// Builds the fixed region from raw field values. Packed type nibbles are
/// set through their carrier bytes.
fn fixed_region(name: &str, edits: &[(&str, u16)]) -> Result<Vec<u8>, String> {
    let mut data = vec![0u8; PROGRAM_LEN];
    data[HEADER_RANGE].copy_from_slice(HEADER_TAG);
    data[END_MARKER_RANGE].copy_from_slice(END_MARKER_TAG);

    if name.len() > NAME_RANGE.len() {
        return Err(format!("program name too long: {name}"));
    }
    data[NAME_RANGE.start..NAME_RANGE.start + name.len()].copy_from_slice(name.as_bytes());

    for &(field, value) in edits {
        let desc = descriptor_by_name(field).ok_or_else(|| format!("unknown field {field}"))?;
        match (desc.width, desc.domain) {
            (_, Domain::Packed { .. }) | (Width::Ascii(_), _) => {
                return Err(format!("{field}: not a raw numeric field"));
            }
            (Width::Word, _) => data[desc.byte_range()].copy_from_slice(&value.to_le_bytes()),
            (Width::Byte, _) => {
                data[desc.offset] = u8::try_from(value)
                    .map_err(|_| format!("{field}: {value} does not fit in a byte"))?;
            }
        }
    }
    Ok(data)
}

fn attach_sequencer(fixed: &[u8], format: SequencerFormat) -> Result<Vec<u8>, String> {
    let program = decode_program(fixed).map_err(|err| err.to_string())?;
    Ok(encode_program(&program.with_sequencer(fixture_sequencer(format))))
}

fn fixture_sequencer(format: SequencerFormat) -> Sequencer {
    let legacy = format == SequencerFormat::Legacy;
    Sequencer {
        format,
        active_steps: if legacy { 0xFFFF } else { 0x00FF },
        bpm: 1200,
        step_length: 16,
        step_resolution: 1,
        swing: -10,
        default_gate_time: 72,
        step_on_off: 0x0F0F,
        motion_on_off: 0x0003,
        motion_slots: [
            MotionSlot {
                parameter: (12 << 8) | 0x01,
                step_on_off: if legacy { 0 } else { 0xFFFF },
            },
            MotionSlot {
                parameter: (30 << 8) | 0x03,
                step_on_off: if legacy { 0 } else { 0x00F0 },
            },
            MotionSlot::default(),
            MotionSlot::default(),
        ],
        steps: (0..STEP_COUNT).map(fixture_step).collect(),
    }
}

/// Two sounding voices per step, triggers on every fourth step and two
/// recorded motion lanes.
fn fixture_step(step: usize) -> SequencerStep {
    let mut event = SequencerStep::default();
    for voice in 0..2 {
        event.notes[voice] = (48 + step + voice * 4) as u8;
        event.velocities[voice] = (100 - voice * 20) as u8;
        event.gates[voice] = if step % 4 == 0 { 36 | 0x80 } else { 36 };
    }
    for slot in 0..2 {
        for (idx, byte) in event.motion[slot].iter_mut().enumerate() {
            *byte = (step * 4 + slot * 16 + idx) as u8;
        }
    }
    event
}
