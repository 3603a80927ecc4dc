use std::ops::Range;

use super::layout::{
    USER_PARAM1_TYPE_SHIFT, USER_PARAM2_TYPE_SHIFT, USER_PARAM3_TYPE_SHIFT, USER_PARAM4_TYPE_SHIFT,
    USER_PARAM5_TYPE_SHIFT, USER_PARAM6_TYPE_SHIFT, USER_PARAM56_TYPE_OFFSET,
    USER_PARAM1234_TYPE_OFFSET,
};

/// Identifies one field of the fixed 160-byte region.
///
/// Discriminants follow [`FIELD_TABLE`] order, so `id as usize` indexes both
/// the table and a decoded [`crate::Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Header,
    ProgramName,
    Octave,
    Portamento,
    KeyTrig,
    VoiceModeDepth,
    VoiceModeType,
    Vco1Wave,
    Vco1Octave,
    Vco1Pitch,
    Vco1Shape,
    Vco2Wave,
    Vco2Octave,
    Vco2Pitch,
    Vco2Shape,
    OscillatorSync,
    RingMod,
    CrossModDepth,
    MultiOscType,
    SelectedMultiOscNoise,
    SelectedMultiOscVpm,
    SelectedMultiOscUser,
    ShapeNoise,
    ShapeVpm,
    ShapeUser,
    ShiftShapeNoise,
    ShiftShapeVpm,
    ShiftShapeUser,
    Vco1Level,
    Vco2Level,
    MultiLevel,
    FilterCutoff,
    FilterResonance,
    FilterCutoffDrive,
    FilterCutoffKeyboardTrack,
    AmpEgAttack,
    AmpEgDecay,
    AmpEgSustain,
    AmpEgRelease,
    EgAttack,
    EgDecay,
    EgInt,
    EgTarget,
    LfoWave,
    LfoMode,
    LfoRate,
    LfoInt,
    LfoTarget,
    ModFxOnOff,
    ModFxType,
    ModFxChorus,
    ModFxEnsemble,
    ModFxPhaser,
    ModFxFlanger,
    ModFxUser,
    ModFxTime,
    ModFxDepth,
    DelayOnOff,
    DelaySubType,
    DelayTime,
    DelayDepth,
    ReverbOnOff,
    ReverbSubType,
    ReverbTime,
    ReverbDepth,
    BendRangePlus,
    BendRangeMinus,
    JoystickAssignPlus,
    JoystickRangePlus,
    JoystickAssignMinus,
    JoystickRangeMinus,
    CvInMode,
    CvIn1Assign,
    CvIn1Range,
    CvIn2Assign,
    CvIn2Range,
    MicroTuning,
    ScaleKey,
    ProgramTuning,
    LfoKeySync,
    LfoVoiceSync,
    LfoTargetOsc,
    CutoffVelocity,
    AmpVelocity,
    MultiOctave,
    MultiRouting,
    EgLegato,
    PortamentoMode,
    PortamentoBpmSync,
    ProgramLevel,
    VpmParameter1Feedback,
    VpmParameter2NoiseDepth,
    VpmParameter3ShapeModInt,
    VpmParameter4ModAttack,
    VpmParameter5ModDecay,
    VpmParameter6ModKeyTrack,
    UserParam1,
    UserParam2,
    UserParam3,
    UserParam4,
    UserParam5,
    UserParam6,
    UserParam56Type,
    UserParam1234Type,
    UserParam1Type,
    UserParam2Type,
    UserParam3Type,
    UserParam4Type,
    UserParam5Type,
    UserParam6Type,
    ProgramTranspose,
    DelayDryWet,
    ReverbDryWet,
    MidiAfterTouchAssign,
    ProgramEndMarker,
}

pub const FIELD_COUNT: usize = FieldId::ProgramEndMarker as usize + 1;

/// Enumerated value domains. Label tables live in [`crate::semantics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    VoiceModeType,
    Wave,
    MultiOscType,
    MultiOscNoise,
    MultiOscVpm,
    EgTarget,
    LfoMode,
    LfoTarget,
    ModFxType,
    ModFxChorus,
    ModFxEnsemble,
    ModFxPhaser,
    ModFxFlanger,
    DelaySubType,
    ReverbSubType,
    AssignTarget,
    CvInMode,
    MicroTuning,
    LfoTargetOsc,
    MultiRouting,
    PortamentoMode,
    UserParamType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
    Ascii(usize),
}

impl Width {
    pub const fn len(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
            Width::Ascii(len) => len,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Tag,
    Flag,
    Integer { min: u16, max: u16 },
    Enumeration(EnumKind),
    /// Two-bit sub-field of the byte at the descriptor's offset, starting
    /// at `shift`.
    Packed { shift: u8, kind: EnumKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub name: &'static str,
    pub offset: usize,
    pub width: Width,
    pub domain: Domain,
}

impl FieldDescriptor {
    pub fn byte_range(&self) -> Range<usize> {
        self.offset..self.offset + self.width.len()
    }

    pub fn is_packed(&self) -> bool {
        matches!(self.domain, Domain::Packed { .. })
    }

    /// Enumeration backing this field, packed or not.
    pub fn enum_kind(&self) -> Option<EnumKind> {
        match self.domain {
            Domain::Enumeration(kind) | Domain::Packed { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Inclusive raw bounds for integer fields.
    pub fn bounds(&self) -> Option<(u16, u16)> {
        match self.domain {
            Domain::Integer { min, max } => Some((min, max)),
            _ => None,
        }
    }
}

const fn tag(id: FieldId, name: &'static str, offset: usize, len: usize) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        offset,
        width: Width::Ascii(len),
        domain: Domain::Tag,
    }
}

const fn byte(
    id: FieldId,
    name: &'static str,
    offset: usize,
    min: u16,
    max: u16,
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        offset,
        width: Width::Byte,
        domain: Domain::Integer { min, max },
    }
}

const fn word(
    id: FieldId,
    name: &'static str,
    offset: usize,
    min: u16,
    max: u16,
) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        offset,
        width: Width::Word,
        domain: Domain::Integer { min, max },
    }
}

const fn flag(id: FieldId, name: &'static str, offset: usize) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        offset,
        width: Width::Byte,
        domain: Domain::Flag,
    }
}

const fn choice(id: FieldId, name: &'static str, offset: usize, kind: EnumKind) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        offset,
        width: Width::Byte,
        domain: Domain::Enumeration(kind),
    }
}

const fn packed(id: FieldId, name: &'static str, offset: usize, shift: u8) -> FieldDescriptor {
    FieldDescriptor {
        id,
        name,
        offset,
        width: Width::Byte,
        domain: Domain::Packed {
            shift,
            kind: EnumKind::UserParamType,
        },
    }
}

/// Every field of the fixed region, in serialization order.
///
/// Offsets come from the instrument's MIDI implementation chart. Non-packed
/// entries tile `0..PROGRAM_LEN` exactly once; packed entries overlay the
/// two raw type bytes.
#[rustfmt::skip]
pub static FIELD_TABLE: &[FieldDescriptor] = &[
    tag(FieldId::Header, "header", 0, 4),
    tag(FieldId::ProgramName, "program_name", 4, 12),
    byte(FieldId::Octave, "octave", 16, 0, 4),
    byte(FieldId::Portamento, "portamento", 17, 0, 127),
    flag(FieldId::KeyTrig, "key_trig", 18),
    word(FieldId::VoiceModeDepth, "voice_mode_depth", 19, 0, 1023),
    choice(FieldId::VoiceModeType, "voice_mode_type", 21, EnumKind::VoiceModeType),
    choice(FieldId::Vco1Wave, "vco1_wave", 22, EnumKind::Wave),
    byte(FieldId::Vco1Octave, "vco1_octave", 23, 0, 3),
    word(FieldId::Vco1Pitch, "vco1_pitch", 24, 0, 1023),
    word(FieldId::Vco1Shape, "vco1_shape", 26, 0, 1023),
    choice(FieldId::Vco2Wave, "vco2_wave", 28, EnumKind::Wave),
    byte(FieldId::Vco2Octave, "vco2_octave", 29, 0, 3),
    word(FieldId::Vco2Pitch, "vco2_pitch", 30, 0, 1023),
    word(FieldId::Vco2Shape, "vco2_shape", 32, 0, 1023),
    flag(FieldId::OscillatorSync, "oscillator_sync", 34),
    flag(FieldId::RingMod, "ring_mod", 35),
    word(FieldId::CrossModDepth, "cross_mod_depth", 36, 0, 1023),
    choice(FieldId::MultiOscType, "multi_osc_type", 38, EnumKind::MultiOscType),
    choice(FieldId::SelectedMultiOscNoise, "selected_multi_osc_noise", 39, EnumKind::MultiOscNoise),
    choice(FieldId::SelectedMultiOscVpm, "selected_multi_osc_vpm", 40, EnumKind::MultiOscVpm),
    byte(FieldId::SelectedMultiOscUser, "selected_multi_osc_user", 41, 0, 15),
    word(FieldId::ShapeNoise, "shape_noise", 42, 0, 1023),
    word(FieldId::ShapeVpm, "shape_vpm", 44, 0, 1023),
    word(FieldId::ShapeUser, "shape_user", 46, 0, 1023),
    word(FieldId::ShiftShapeNoise, "shift_shape_noise", 48, 0, 1023),
    word(FieldId::ShiftShapeVpm, "shift_shape_vpm", 50, 0, 1023),
    word(FieldId::ShiftShapeUser, "shift_shape_user", 52, 0, 1023),
    word(FieldId::Vco1Level, "vco1_level", 54, 0, 1023),
    word(FieldId::Vco2Level, "vco2_level", 56, 0, 1023),
    word(FieldId::MultiLevel, "multi_level", 58, 0, 1023),
    word(FieldId::FilterCutoff, "filter_cutoff", 60, 0, 1023),
    word(FieldId::FilterResonance, "filter_resonance", 62, 0, 1023),
    byte(FieldId::FilterCutoffDrive, "filter_cutoff_drive", 64, 0, 2),
    byte(FieldId::FilterCutoffKeyboardTrack, "filter_cutoff_keyboard_track", 65, 0, 2),
    word(FieldId::AmpEgAttack, "amp_eg_attack", 66, 0, 1023),
    word(FieldId::AmpEgDecay, "amp_eg_decay", 68, 0, 1023),
    word(FieldId::AmpEgSustain, "amp_eg_sustain", 70, 0, 1023),
    word(FieldId::AmpEgRelease, "amp_eg_release", 72, 0, 1023),
    word(FieldId::EgAttack, "eg_attack", 74, 0, 1023),
    word(FieldId::EgDecay, "eg_decay", 76, 0, 1023),
    word(FieldId::EgInt, "eg_int", 78, 0, 1023),
    choice(FieldId::EgTarget, "eg_target", 80, EnumKind::EgTarget),
    choice(FieldId::LfoWave, "lfo_wave", 81, EnumKind::Wave),
    choice(FieldId::LfoMode, "lfo_mode", 82, EnumKind::LfoMode),
    word(FieldId::LfoRate, "lfo_rate", 83, 0, 1023),
    word(FieldId::LfoInt, "lfo_int", 85, 0, 1023),
    choice(FieldId::LfoTarget, "lfo_target", 87, EnumKind::LfoTarget),
    flag(FieldId::ModFxOnOff, "mod_fx_on_off", 88),
    choice(FieldId::ModFxType, "mod_fx_type", 89, EnumKind::ModFxType),
    choice(FieldId::ModFxChorus, "mod_fx_chorus", 90, EnumKind::ModFxChorus),
    choice(FieldId::ModFxEnsemble, "mod_fx_ensemble", 91, EnumKind::ModFxEnsemble),
    choice(FieldId::ModFxPhaser, "mod_fx_phaser", 92, EnumKind::ModFxPhaser),
    choice(FieldId::ModFxFlanger, "mod_fx_flanger", 93, EnumKind::ModFxFlanger),
    byte(FieldId::ModFxUser, "mod_fx_user", 94, 0, 15),
    word(FieldId::ModFxTime, "mod_fx_time", 95, 0, 1023),
    word(FieldId::ModFxDepth, "mod_fx_depth", 97, 0, 1023),
    flag(FieldId::DelayOnOff, "delay_on_off", 99),
    choice(FieldId::DelaySubType, "delay_sub_type", 100, EnumKind::DelaySubType),
    word(FieldId::DelayTime, "delay_time", 101, 0, 1023),
    word(FieldId::DelayDepth, "delay_depth", 103, 0, 1023),
    flag(FieldId::ReverbOnOff, "reverb_on_off", 105),
    choice(FieldId::ReverbSubType, "reverb_sub_type", 106, EnumKind::ReverbSubType),
    word(FieldId::ReverbTime, "reverb_time", 107, 0, 1023),
    word(FieldId::ReverbDepth, "reverb_depth", 109, 0, 1023),
    byte(FieldId::BendRangePlus, "bend_range_plus", 111, 0, 12),
    byte(FieldId::BendRangeMinus, "bend_range_minus", 112, 0, 12),
    choice(FieldId::JoystickAssignPlus, "joystick_assign_plus", 113, EnumKind::AssignTarget),
    byte(FieldId::JoystickRangePlus, "joystick_range_plus", 114, 0, 200),
    choice(FieldId::JoystickAssignMinus, "joystick_assign_minus", 115, EnumKind::AssignTarget),
    byte(FieldId::JoystickRangeMinus, "joystick_range_minus", 116, 0, 200),
    choice(FieldId::CvInMode, "cv_in_mode", 117, EnumKind::CvInMode),
    choice(FieldId::CvIn1Assign, "cv_in1_assign", 118, EnumKind::AssignTarget),
    byte(FieldId::CvIn1Range, "cv_in1_range", 119, 0, 200),
    choice(FieldId::CvIn2Assign, "cv_in2_assign", 120, EnumKind::AssignTarget),
    byte(FieldId::CvIn2Range, "cv_in2_range", 121, 0, 200),
    choice(FieldId::MicroTuning, "micro_tuning", 122, EnumKind::MicroTuning),
    byte(FieldId::ScaleKey, "scale_key", 123, 0, 24),
    byte(FieldId::ProgramTuning, "program_tuning", 124, 0, 100),
    flag(FieldId::LfoKeySync, "lfo_key_sync", 125),
    flag(FieldId::LfoVoiceSync, "lfo_voice_sync", 126),
    choice(FieldId::LfoTargetOsc, "lfo_target_osc", 127, EnumKind::LfoTargetOsc),
    byte(FieldId::CutoffVelocity, "cutoff_velocity", 128, 0, 127),
    byte(FieldId::AmpVelocity, "amp_velocity", 129, 0, 127),
    byte(FieldId::MultiOctave, "multi_octave", 130, 0, 3),
    choice(FieldId::MultiRouting, "multi_routing", 131, EnumKind::MultiRouting),
    flag(FieldId::EgLegato, "eg_legato", 132),
    choice(FieldId::PortamentoMode, "portamento_mode", 133, EnumKind::PortamentoMode),
    flag(FieldId::PortamentoBpmSync, "portamento_bpm_sync", 134),
    byte(FieldId::ProgramLevel, "program_level", 135, 12, 132),
    byte(FieldId::VpmParameter1Feedback, "vpm_parameter1_feedback", 136, 0, 200),
    byte(FieldId::VpmParameter2NoiseDepth, "vpm_parameter2_noise_depth", 137, 0, 200),
    byte(FieldId::VpmParameter3ShapeModInt, "vpm_parameter3_shape_mod_int", 138, 0, 200),
    byte(FieldId::VpmParameter4ModAttack, "vpm_parameter4_mod_attack", 139, 0, 200),
    byte(FieldId::VpmParameter5ModDecay, "vpm_parameter5_mod_decay", 140, 0, 200),
    byte(FieldId::VpmParameter6ModKeyTrack, "vpm_parameter6_mod_key_track", 141, 0, 200),
    byte(FieldId::UserParam1, "user_param1", 142, 0, 200),
    byte(FieldId::UserParam2, "user_param2", 143, 0, 200),
    byte(FieldId::UserParam3, "user_param3", 144, 0, 200),
    byte(FieldId::UserParam4, "user_param4", 145, 0, 200),
    byte(FieldId::UserParam5, "user_param5", 146, 0, 200),
    byte(FieldId::UserParam6, "user_param6", 147, 0, 200),
    byte(FieldId::UserParam56Type, "user_param56_type", USER_PARAM56_TYPE_OFFSET, 0, 255),
    byte(FieldId::UserParam1234Type, "user_param1234_type", USER_PARAM1234_TYPE_OFFSET, 0, 255),
    packed(FieldId::UserParam1Type, "user_param1_type",
           USER_PARAM1234_TYPE_OFFSET, USER_PARAM1_TYPE_SHIFT),
    packed(FieldId::UserParam2Type, "user_param2_type",
           USER_PARAM1234_TYPE_OFFSET, USER_PARAM2_TYPE_SHIFT),
    packed(FieldId::UserParam3Type, "user_param3_type",
           USER_PARAM1234_TYPE_OFFSET, USER_PARAM3_TYPE_SHIFT),
    packed(FieldId::UserParam4Type, "user_param4_type",
           USER_PARAM1234_TYPE_OFFSET, USER_PARAM4_TYPE_SHIFT),
    packed(FieldId::UserParam5Type, "user_param5_type",
           USER_PARAM56_TYPE_OFFSET, USER_PARAM5_TYPE_SHIFT),
    packed(FieldId::UserParam6Type, "user_param6_type",
           USER_PARAM56_TYPE_OFFSET, USER_PARAM6_TYPE_SHIFT),
    byte(FieldId::ProgramTranspose, "program_transpose", 150, 1, 25),
    word(FieldId::DelayDryWet, "delay_dry_wet", 151, 0, 200),
    word(FieldId::ReverbDryWet, "reverb_dry_wet", 153, 0, 200),
    choice(FieldId::MidiAfterTouchAssign, "midi_after_touch_assign", 155, EnumKind::AssignTarget),
    tag(FieldId::ProgramEndMarker, "program_end_marker", 156, 4),
];

pub fn descriptor(id: FieldId) -> &'static FieldDescriptor {
    &FIELD_TABLE[id as usize]
}

pub fn descriptor_by_name(name: &str) -> Option<&'static FieldDescriptor> {
    FIELD_TABLE.iter().find(|desc| desc.name == name)
}

#[cfg(test)]
mod tests {
    use super::{Domain, FIELD_COUNT, FIELD_TABLE, FieldId, descriptor, descriptor_by_name};
    use crate::format::program::layout::PROGRAM_LEN;

    #[test]
    fn table_order_matches_field_ids() {
        assert_eq!(FIELD_TABLE.len(), FIELD_COUNT);
        for (idx, desc) in FIELD_TABLE.iter().enumerate() {
            assert_eq!(desc.id as usize, idx, "{} is out of order", desc.name);
        }
    }

    #[test]
    fn unpacked_fields_tile_fixed_region() {
        let mut owner: Vec<Option<&str>> = vec![None; PROGRAM_LEN];
        for desc in FIELD_TABLE.iter().filter(|desc| !desc.is_packed()) {
            for byte in desc.byte_range() {
                assert!(byte < PROGRAM_LEN, "{} runs past the fixed region", desc.name);
                assert!(
                    owner[byte].is_none(),
                    "byte {byte} claimed by {} and {:?}",
                    desc.name,
                    owner[byte]
                );
                owner[byte] = Some(desc.name);
            }
        }
        let gaps: Vec<usize> = owner
            .iter()
            .enumerate()
            .filter(|(_, name)| name.is_none())
            .map(|(idx, _)| idx)
            .collect();
        assert!(gaps.is_empty(), "uncovered bytes: {gaps:?}");
    }

    #[test]
    fn packed_fields_overlay_raw_type_bytes() {
        let raw_offsets = [
            descriptor(FieldId::UserParam56Type).offset,
            descriptor(FieldId::UserParam1234Type).offset,
        ];
        for desc in FIELD_TABLE.iter().filter(|desc| desc.is_packed()) {
            assert!(raw_offsets.contains(&desc.offset), "{}", desc.name);
            if let Domain::Packed { shift, .. } = desc.domain {
                assert!(shift <= 6);
            }
        }
    }

    #[test]
    fn names_are_unique() {
        for desc in FIELD_TABLE {
            assert_eq!(descriptor_by_name(desc.name).map(|d| d.id), Some(desc.id));
        }
    }
}
