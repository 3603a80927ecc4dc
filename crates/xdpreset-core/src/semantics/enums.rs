use crate::format::program::table::EnumKind;

/// Shown in place of a label when a raw ordinal has no meaning.
pub const SENTINEL_LABEL: &str = "---";

const VOICE_MODE_TYPE: &[&str] = &["NONE", "ARP", "CHORD", "UNISON", "POLY"];
const WAVE: &[&str] = &["SQR", "TRI", "SAW"];
const MULTI_OSC_TYPE: &[&str] = &["NOISE", "VPM", "USER"];
const MULTI_OSC_NOISE: &[&str] = &["HIGH", "LOW", "PEAK", "DECIM"];
const MULTI_OSC_VPM: &[&str] = &[
    "SIN1", "SIN2", "SIN3", "SIN4", "SAW1", "SAW2", "SQU1", "SQU2", "FAT1", "FAT2", "AIR1",
    "AIR2", "DECAY1", "DECAY2", "CREEP", "THROAT",
];
const EG_TARGET: &[&str] = &["CUTOFF", "PITCH 2", "PITCH"];
const LFO_MODE: &[&str] = &["1-SHOT", "NORMAL", "BPM"];
const LFO_TARGET: &[&str] = &["CUTOFF", "SHAPE", "PITCH"];
const MOD_FX_TYPE: &[&str] = &["NONE", "CHORUS", "ENSEMBLE", "PHASER", "FLANGER", "USER"];
const MOD_FX_CHORUS: &[&str] = &[
    "STEREO", "LIGHT", "DEEP", "TRIPHASE", "HARMONIC", "MONO", "FEEDBACK", "VIBRATO",
];
const MOD_FX_ENSEMBLE: &[&str] = &["STEREO", "LIGHT", "MONO"];
const MOD_FX_PHASER: &[&str] = &[
    "STEREO",
    "FAST",
    "ORANGE",
    "SMALL",
    "SMALL RESO",
    "BLACK",
    "FORMANT",
    "TWINKLE",
];
const MOD_FX_FLANGER: &[&str] = &[
    "STEREO",
    "LIGHT",
    "MONO",
    "HIGH SWEEP",
    "MID SWEEP",
    "PAN SWEEP",
    "MONO SWEEP",
    "TRIPHASE",
];
const DELAY_SUB_TYPE: &[&str] = &[
    "STEREO",
    "MONO",
    "PING PONG",
    "HIPASS",
    "TAPE",
    "ONE TAP",
    "STEREO BPM",
    "MONO BPM",
    "PING BPM",
    "HIPASS BPM",
    "TAPE BPM",
    "DOUBLING",
    "USER1",
    "USER2",
    "USER3",
    "USER4",
    "USER5",
    "USER6",
    "USER7",
    "USER8",
];
const REVERB_SUB_TYPE: &[&str] = &[
    "HALL",
    "SMOOTH",
    "ARENA",
    "PLATE",
    "ROOM",
    "EARLY REF",
    "SPACE",
    "RISER",
    "SUBMARINE",
    "HORROR",
    "USER1",
    "USER2",
    "USER3",
    "USER4",
    "USER5",
    "USER6",
    "USER7",
    "USER8",
];
const ASSIGN_TARGET: &[&str] = &[
    "GATE TIME",
    "PORTAMENTO",
    "VM DEPTH",
    "VCO1 PITCH",
    "VCO1 SHAPE",
    "VCO2 PITCH",
    "VCO2 SHAPE",
    "CROSS MOD",
    "MULTI SHAPE",
    "VCO1 LEVEL",
    "VCO2 LEVEL",
    "MULTI LEVEL",
    "CUTOFF",
    "RESONANCE",
    "AMP EG ATTACK",
    "AMP EG DECAY",
    "AMP EG SUSTAIN",
    "AMP EG RELEASE",
    "EG ATTACK",
    "EG DECAY",
    "EG INT",
    "LFO RATE",
    "LFO INT",
    "MOD FX SPEED",
    "MOD FX DEPTH",
    "REVERB TIME",
    "REVERB DEPTH",
    "DELAY TIME",
    "DELAY DEPTH",
];
const CV_IN_MODE: &[&str] = &["MODULATION", "CV/GATE(+)", "CV/GATE(-)"];
const MICRO_TUNING_PRESETS: &[&str] = &[
    "EQUAL TEMP",
    "PURE MAJOR",
    "PURE MINOR",
    "PYTHAGOREAN",
    "WERCKMEISTER",
    "KIRNBURGER",
    "SLENDRO",
    "PELOG",
    "IONIAN",
    "DORIAN",
    "AEOLIAN",
    "MAJOR PENTA",
    "MINOR PENTA",
    "REVERSE",
    "AFX001",
    "AFX002",
    "AFX003",
    "AFX004",
    "AFX005",
    "AFX006",
    "DC001",
    "DC002",
    "DC003",
];
/// User scales and octaves start at ordinal 128.
const MICRO_TUNING_USER_BASE: u16 = 128;
const MICRO_TUNING_USER: &[&str] = &[
    "USER SCALE 1",
    "USER SCALE 2",
    "USER SCALE 3",
    "USER SCALE 4",
    "USER SCALE 5",
    "USER SCALE 6",
    "USER OCTAVE 1",
    "USER OCTAVE 2",
    "USER OCTAVE 3",
    "USER OCTAVE 4",
    "USER OCTAVE 5",
    "USER OCTAVE 6",
];
const LFO_TARGET_OSC: &[&str] = &["ALL", "VCO1+2", "VCO2", "MULTI"];
const MULTI_ROUTING: &[&str] = &["PRE VCF", "POST VCF"];
const PORTAMENTO_MODE: &[&str] = &["AUTO", "ON"];
const USER_PARAM_TYPE: &[&str] = &["PERCENT", "BIPOLAR", "SELECT"];

/// Labels of a contiguous enumeration, indexed by ordinal.
///
/// Micro tuning is sparse; only its preset block is returned here.
pub fn options(kind: EnumKind) -> &'static [&'static str] {
    match kind {
        EnumKind::VoiceModeType => VOICE_MODE_TYPE,
        EnumKind::Wave => WAVE,
        EnumKind::MultiOscType => MULTI_OSC_TYPE,
        EnumKind::MultiOscNoise => MULTI_OSC_NOISE,
        EnumKind::MultiOscVpm => MULTI_OSC_VPM,
        EnumKind::EgTarget => EG_TARGET,
        EnumKind::LfoMode => LFO_MODE,
        EnumKind::LfoTarget => LFO_TARGET,
        EnumKind::ModFxType => MOD_FX_TYPE,
        EnumKind::ModFxChorus => MOD_FX_CHORUS,
        EnumKind::ModFxEnsemble => MOD_FX_ENSEMBLE,
        EnumKind::ModFxPhaser => MOD_FX_PHASER,
        EnumKind::ModFxFlanger => MOD_FX_FLANGER,
        EnumKind::DelaySubType => DELAY_SUB_TYPE,
        EnumKind::ReverbSubType => REVERB_SUB_TYPE,
        EnumKind::AssignTarget => ASSIGN_TARGET,
        EnumKind::CvInMode => CV_IN_MODE,
        EnumKind::MicroTuning => MICRO_TUNING_PRESETS,
        EnumKind::LfoTargetOsc => LFO_TARGET_OSC,
        EnumKind::MultiRouting => MULTI_ROUTING,
        EnumKind::PortamentoMode => PORTAMENTO_MODE,
        EnumKind::UserParamType => USER_PARAM_TYPE,
    }
}

/// Label for `ordinal`, or `None` when the ordinal is undefined.
pub fn lookup(kind: EnumKind, ordinal: u16) -> Option<&'static str> {
    if kind == EnumKind::MicroTuning && ordinal >= MICRO_TUNING_USER_BASE {
        return MICRO_TUNING_USER
            .get(usize::from(ordinal - MICRO_TUNING_USER_BASE))
            .copied();
    }
    options(kind).get(usize::from(ordinal)).copied()
}

/// Total label lookup: undefined ordinals map to [`SENTINEL_LABEL`].
pub fn enum_label(kind: EnumKind, ordinal: u16) -> &'static str {
    lookup(kind, ordinal).unwrap_or(SENTINEL_LABEL)
}

/// Sub-type label for the active modulation effect.
///
/// Each effect type keeps its own sub-type byte; the user slot is a plain
/// index.
pub fn mod_fx_subtype_label(
    fx_type: u16,
    chorus: u16,
    ensemble: u16,
    phaser: u16,
    flanger: u16,
    user: u16,
) -> String {
    match fx_type {
        0 => String::new(),
        1 => enum_label(EnumKind::ModFxChorus, chorus).to_string(),
        2 => enum_label(EnumKind::ModFxEnsemble, ensemble).to_string(),
        3 => enum_label(EnumKind::ModFxPhaser, phaser).to_string(),
        4 => enum_label(EnumKind::ModFxFlanger, flanger).to_string(),
        5 => format!("USER {}", u32::from(user) + 1),
        _ => SENTINEL_LABEL.to_string(),
    }
}
