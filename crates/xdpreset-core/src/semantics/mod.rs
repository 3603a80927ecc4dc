//! Raw-value semantics shared by the document and schematic outputs.
//!
//! Every function here is pure and total. Inputs outside a parameter's
//! documented range never fail: numeric formulas extrapolate or clamp, and
//! categorical lookups fall back to [`SENTINEL_LABEL`].

pub mod enums;

pub use enums::{SENTINEL_LABEL, enum_label, lookup, mod_fx_subtype_label, options};

const ARP_BUCKETS: &[(u16, u16, &str)] = &[
    (0, 78, "MANUAL 1"),
    (79, 156, "MANUAL 2"),
    (157, 234, "RISE 1"),
    (235, 312, "RISE 2"),
    (313, 390, "FALL 1"),
    (391, 468, "FALL 2"),
    (469, 546, "RISE FALL 1"),
    (547, 624, "RISE FALL 2"),
    (625, 702, "POLY 1"),
    (703, 780, "POLY 2"),
    (781, 858, "RANDOM 1"),
    (859, 936, "RANDOM 2"),
    (937, 1023, "RANDOM 3"),
];

const CHORD_BUCKETS: &[(u16, u16, &str)] = &[
    (0, 73, "5th"),
    (74, 146, "sus2"),
    (147, 219, "m"),
    (220, 292, "Maj"),
    (293, 365, "sus4"),
    (366, 438, "m7"),
    (439, 511, "7"),
    (512, 585, "7sus4"),
    (586, 658, "Maj7"),
    (659, 731, "aug"),
    (732, 804, "dim"),
    (805, 877, "m7b5"),
    (878, 950, "mMaj7"),
    (951, 1023, "Maj7b5"),
];

const LFO_BPM_DIVISIONS: &[&str] = &[
    "4", "2", "1", "3/4", "1/2", "3/8", "1/3", "1/4", "3/16", "1/6", "1/8", "1/12", "1/16", "1/24",
    "1/32", "1/36",
];
const LFO_BPM_BUCKET: u16 = 64;
const LFO_MODE_BPM: u16 = 2;

const VOICE_MODE_NONE: u16 = 0;
const VOICE_MODE_ARP: u16 = 1;
const VOICE_MODE_CHORD: u16 = 2;
const VOICE_MODE_UNISON: u16 = 3;
const VOICE_MODE_POLY: u16 = 4;
const POLY_DUO_THRESHOLD: u16 = 256;

const KNOB_MIN_ANGLE: f64 = 35.0;
const KNOB_MAX_ANGLE: f64 = 360.0 - KNOB_MIN_ANGLE;

const EG_DEPTH_SCALE: f64 = (1u64 << 30) as f64;

const FOOTAGES: &[&str] = &["16'", "8'", "4'", "2'"];
const STEP_RESOLUTIONS: &[&str] = &["1/16", "1/8", "1/4", "1/2", "1/1"];
const GATE_TIME_MAX: u16 = 72;
const GATE_TIME_TIE: u16 = 73;

/// Rounds half-to-even and drops the fraction, matching how the instrument's
/// editor prints whole-number cents.
fn whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn signed<T: PartialOrd + Default + std::fmt::Display>(value: T) -> String {
    if value > T::default() {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn bucket(buckets: &[(u16, u16, &'static str)], raw: u16) -> &'static str {
    buckets
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&raw))
        .map_or(SENTINEL_LABEL, |&(_, _, label)| label)
}

/// Position of `raw` within `min..=max`, in percent. A degenerate range
/// yields zero.
pub fn percent_of_range(raw: u16, min: u16, max: u16) -> f64 {
    if max == min {
        return 0.0;
    }
    (f64::from(raw) - f64::from(min)) / (f64::from(max) - f64::from(min)) * 100.0
}

pub fn percent_label(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Program level in dB: 12 maps to -18 dB, 132 to +6 dB.
pub fn decibel(raw: u16) -> f64 {
    (f64::from(raw) - 12.0) / 5.0 - 18.0
}

pub fn decibel_label(raw: u16) -> String {
    let db = decibel(raw);
    let sign = if db > 0.0 { "+" } else { "" };
    format!("{sign}{db:.1} dB")
}

/// Oscillator pitch offset in cents.
///
/// Nine segments over 0..=1023; where two segments share an endpoint the
/// lower one wins. Values past 1023 are echoed back.
pub fn pitch_cents(raw: u16) -> String {
    let value = i64::from(raw);
    match raw {
        0..=4 => "-1200".to_string(),
        5..=356 => whole(((value - 356) * 944) as f64 / 352.0 - 256.0).to_string(),
        357..=476 => ((value - 476) * 2 - 16).to_string(),
        477..=492 => (value - 492).to_string(),
        493..=532 => "0".to_string(),
        533..=548 => format!("+{}", value - 532),
        549..=668 => format!("+{}", (value - 548) * 2 + 16),
        669..=1020 => format!("+{}", whole(((value - 668) * 944) as f64 / 352.0 + 256.0)),
        1021..=1023 => "+1200".to_string(),
        _ => raw.to_string(),
    }
}

/// Modulation envelope depth in percent, on a quadratic curve around the
/// 492..=532 dead zone.
pub fn eg_depth_percent(raw: u16) -> f64 {
    let value = i64::from(raw);
    match raw {
        0..=11 => -100.0,
        12..=491 => -(((492 - value).pow(2) * 4641 * 100) as f64) / EG_DEPTH_SCALE,
        492..=532 => 0.0,
        533..=1012 => ((value - 532).pow(2) * 4641 * 100) as f64 / EG_DEPTH_SCALE,
        _ => 100.0,
    }
}

pub fn eg_depth_label(raw: u16) -> String {
    let percent = eg_depth_percent(raw);
    let sign = if percent > 0.0 { "+" } else { "" };
    format!("{sign}{percent:.1}%")
}

/// LFO rate. Only BPM-sync mode has named divisions; the free-running
/// modes (and unknown modes) show the raw value.
pub fn lfo_rate_label(raw: u16, mode: u16) -> String {
    if mode != LFO_MODE_BPM {
        return raw.to_string();
    }
    LFO_BPM_DIVISIONS
        .get(usize::from(raw / LFO_BPM_BUCKET))
        .copied()
        .unwrap_or(SENTINEL_LABEL)
        .to_string()
}

/// Voice mode depth, whose meaning depends on the voice mode type.
pub fn voice_mode_depth_label(vm_type: u16, depth: u16) -> String {
    let detune = f64::from(depth) * 50.0 / 1023.0;
    match vm_type {
        VOICE_MODE_NONE => depth.to_string(),
        VOICE_MODE_ARP => bucket(ARP_BUCKETS, depth).to_string(),
        VOICE_MODE_CHORD => bucket(CHORD_BUCKETS, depth).to_string(),
        VOICE_MODE_UNISON => format!("{detune:.1} Cent"),
        VOICE_MODE_POLY if depth < POLY_DUO_THRESHOLD => "Poly".to_string(),
        VOICE_MODE_POLY => format!("Duo {detune:.1}"),
        _ => SENTINEL_LABEL.to_string(),
    }
}

/// Knob pointer rotation in degrees; the sweep runs 35..=325.
pub fn knob_angle(percent: f64) -> f64 {
    let percent = percent.clamp(0.0, 100.0);
    KNOB_MIN_ANGLE + percent * ((KNOB_MAX_ANGLE - KNOB_MIN_ANGLE) / 100.0)
}

/// 0..=200 shown as -100%..+100%.
pub fn bipolar_percent_label(raw: u16) -> String {
    format!("{}%", signed(i32::from(raw) - 100))
}

/// Semitone offset around `center` (scale key, program transpose).
pub fn note_offset_label(raw: u16, center: u16) -> String {
    format!("{} Note", signed(i32::from(raw) - i32::from(center)))
}

/// Program tuning: 0..=100 shown as -50..+50 cents.
pub fn cent_offset_label(raw: u16) -> String {
    format!("{} Cent", signed(i32::from(raw) - 50))
}

pub fn bend_range_label(raw: u16, upward: bool) -> String {
    match (raw, upward) {
        (0, _) => "OFF".to_string(),
        (_, true) => format!("+{raw} Note"),
        (_, false) => format!("-{raw} Note"),
    }
}

/// Keyboard octave: 0..=4 shown as -2..+2.
pub fn octave_label(raw: u16) -> String {
    signed(i32::from(raw) - 2)
}

pub fn footage_label(raw: u16) -> &'static str {
    FOOTAGES.get(usize::from(raw)).copied().unwrap_or(SENTINEL_LABEL)
}

pub fn footage_options() -> &'static [&'static str] {
    FOOTAGES
}

pub fn portamento_label(raw: u16) -> String {
    if raw == 0 {
        "OFF".to_string()
    } else {
        raw.to_string()
    }
}

/// User oscillator/effect parameter, interpreted by its packed type.
pub fn user_param_label(raw: u16, param_type: u16) -> String {
    match param_type {
        0 => format!("{raw}%"),
        1 => bipolar_percent_label(raw),
        2 => (u32::from(raw) + 1).to_string(),
        _ => SENTINEL_LABEL.to_string(),
    }
}

/// Tempo stored in tenths of a BPM.
pub fn bpm_label(raw: u16) -> String {
    format!("{:.1}", f64::from(raw) / 10.0)
}

pub fn swing_label(swing: i8) -> String {
    format!("{}%", signed(swing))
}

/// Gate time 0..=72 covers 0..100%; 73 ties into the next step.
pub fn gate_time_label(raw: u16) -> String {
    match raw {
        GATE_TIME_TIE => "TIE".to_string(),
        0..=GATE_TIME_MAX => format!(
            "{}%",
            whole(f64::from(raw) * 100.0 / f64::from(GATE_TIME_MAX))
        ),
        _ => SENTINEL_LABEL.to_string(),
    }
}

pub fn step_resolution_label(raw: u16) -> &'static str {
    STEP_RESOLUTIONS
        .get(usize::from(raw))
        .copied()
        .unwrap_or(SENTINEL_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_range_endpoints_and_monotonic() {
        assert_eq!(percent_of_range(0, 0, 1023), 0.0);
        assert_eq!(percent_of_range(1023, 0, 1023), 100.0);
        assert_eq!(percent_of_range(5, 7, 7), 0.0);
        let mut last = f64::MIN;
        for raw in 0..=1023 {
            let percent = percent_of_range(raw, 0, 1023);
            assert!(percent >= last);
            last = percent;
        }
    }

    #[test]
    fn decibel_endpoints() {
        assert_eq!(decibel(12), -18.0);
        assert_eq!(decibel(132), 6.0);
        assert_eq!(decibel_label(12), "-18.0 dB");
        assert_eq!(decibel_label(132), "+6.0 dB");
        assert_eq!(decibel_label(102), "0.0 dB");
    }

    #[test]
    fn pitch_cents_anchor_points() {
        assert_eq!(pitch_cents(0), "-1200");
        assert_eq!(pitch_cents(4), "-1200");
        assert_eq!(pitch_cents(356), "-256");
        assert_eq!(pitch_cents(476), "-16");
        assert_eq!(pitch_cents(492), "0");
        assert_eq!(pitch_cents(512), "0");
        assert_eq!(pitch_cents(532), "0");
        assert_eq!(pitch_cents(540), "+8");
        assert_eq!(pitch_cents(548), "+16");
        assert_eq!(pitch_cents(600), "+120");
        assert_eq!(pitch_cents(668), "+256");
        assert_eq!(pitch_cents(1020), "+1200");
        assert_eq!(pitch_cents(1023), "+1200");
        assert_eq!(pitch_cents(2000), "2000");
    }

    #[test]
    fn pitch_cents_rounds_ties_to_even() {
        // (323 - 356) * 944 / 352 - 256 == -344.5
        assert_eq!(pitch_cents(323), "-344");
        // (345 - 356) * 944 / 352 - 256 == -285.5
        assert_eq!(pitch_cents(345), "-286");
        assert_eq!(pitch_cents(5), "-1197");
        assert_eq!(pitch_cents(700), "+342");
    }

    #[test]
    fn eg_depth_segments() {
        assert_eq!(eg_depth_percent(0), -100.0);
        assert_eq!(eg_depth_percent(11), -100.0);
        assert_eq!(eg_depth_percent(492), 0.0);
        assert_eq!(eg_depth_percent(532), 0.0);
        assert_eq!(eg_depth_percent(1013), 100.0);
        assert_eq!(eg_depth_percent(1023), 100.0);
        assert_eq!(eg_depth_label(12), "-99.6%");
        assert_eq!(eg_depth_label(1012), "+99.6%");
        assert_eq!(eg_depth_label(500), "0.0%");
    }

    #[test]
    fn lfo_rate_only_buckets_in_bpm_mode() {
        assert_eq!(lfo_rate_label(100, 0), "100");
        assert_eq!(lfo_rate_label(100, 1), "100");
        assert_eq!(lfo_rate_label(100, 7), "100");
        assert_eq!(lfo_rate_label(0, 2), "4");
        assert_eq!(lfo_rate_label(63, 2), "4");
        assert_eq!(lfo_rate_label(64, 2), "2");
        assert_eq!(lfo_rate_label(1023, 2), "1/36");
        assert_eq!(lfo_rate_label(1024, 2), SENTINEL_LABEL);
    }

    #[test]
    fn voice_mode_depth_by_type() {
        assert_eq!(voice_mode_depth_label(0, 77), "77");
        assert_eq!(voice_mode_depth_label(1, 78), "MANUAL 1");
        assert_eq!(voice_mode_depth_label(1, 79), "MANUAL 2");
        assert_eq!(voice_mode_depth_label(1, 1023), "RANDOM 3");
        assert_eq!(voice_mode_depth_label(2, 0), "5th");
        assert_eq!(voice_mode_depth_label(2, 585), "7sus4");
        assert_eq!(voice_mode_depth_label(2, 1023), "Maj7b5");
        assert_eq!(voice_mode_depth_label(2, 2000), SENTINEL_LABEL);
        assert_eq!(voice_mode_depth_label(3, 1023), "50.0 Cent");
        assert_eq!(voice_mode_depth_label(4, 255), "Poly");
        assert_eq!(voice_mode_depth_label(4, 256), "Duo 12.5");
        assert_eq!(voice_mode_depth_label(9, 0), SENTINEL_LABEL);
    }

    #[test]
    fn knob_angle_clamps() {
        assert_eq!(knob_angle(0.0), 35.0);
        assert_eq!(knob_angle(100.0), 325.0);
        assert_eq!(knob_angle(-5.0), 35.0);
        assert_eq!(knob_angle(250.0), 325.0);
        assert!((knob_angle(50.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn offset_labels() {
        assert_eq!(bipolar_percent_label(0), "-100%");
        assert_eq!(bipolar_percent_label(100), "0%");
        assert_eq!(bipolar_percent_label(200), "+100%");
        assert_eq!(note_offset_label(12, 12), "0 Note");
        assert_eq!(note_offset_label(25, 13), "+12 Note");
        assert_eq!(cent_offset_label(0), "-50 Cent");
        assert_eq!(bend_range_label(0, true), "OFF");
        assert_eq!(bend_range_label(12, false), "-12 Note");
        assert_eq!(octave_label(0), "-2");
        assert_eq!(octave_label(2), "0");
        assert_eq!(octave_label(4), "+2");
        assert_eq!(footage_label(1), "8'");
        assert_eq!(footage_label(4), SENTINEL_LABEL);
        assert_eq!(portamento_label(0), "OFF");
    }

    #[test]
    fn user_param_by_type() {
        assert_eq!(user_param_label(50, 0), "50%");
        assert_eq!(user_param_label(150, 1), "+50%");
        assert_eq!(user_param_label(0, 2), "1");
        assert_eq!(user_param_label(0, 3), SENTINEL_LABEL);
    }

    #[test]
    fn sequencer_labels() {
        assert_eq!(bpm_label(1200), "120.0");
        assert_eq!(swing_label(-20), "-20%");
        assert_eq!(swing_label(15), "+15%");
        assert_eq!(gate_time_label(72), "100%");
        assert_eq!(gate_time_label(36), "50%");
        assert_eq!(gate_time_label(73), "TIE");
        assert_eq!(gate_time_label(90), SENTINEL_LABEL);
        assert_eq!(step_resolution_label(0), "1/16");
        assert_eq!(step_resolution_label(9), SENTINEL_LABEL);
    }
}
