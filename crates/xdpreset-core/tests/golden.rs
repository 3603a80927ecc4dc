use std::fs;
use std::path::{Path, PathBuf};

use xdpreset_core::{
    Degradation, ExtensionStatus, PROGRAM_LEN, PresetDocument, Program, SequencerFormat,
    decode_program, encode_program, render_schematic,
};

fn case_dir(case: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
        .join(case)
}

fn load_input(case: &str) -> Vec<u8> {
    fs::read(case_dir(case).join("input.prog_bin")).expect("read input.prog_bin")
}

fn load_program(case: &str) -> Program {
    decode_program(&load_input(case)).expect("decode golden input")
}

fn load_expected_document(case: &str) -> serde_json::Value {
    let path = case_dir(case).join("expected_document.json");
    let json = fs::read_to_string(&path).expect("read expected_document.json");
    serde_json::from_str(&json).expect("parse expected document")
}

fn run_golden(case: &str) {
    let program = load_program(case);
    let actual = serde_json::to_value(PresetDocument::from_program(&program))
        .expect("serialize actual");
    let expected = load_expected_document(case);
    assert_eq!(actual, expected, "golden mismatch in {case}");
}

#[test]
fn golden_init_program() {
    run_golden("init_program");
}

#[test]
fn golden_sequencer_short() {
    run_golden("sequencer_short");
}

#[test]
fn golden_sequencer_legacy() {
    run_golden("sequencer_legacy");
}

#[test]
fn golden_unknown_ordinals() {
    run_golden("unknown_ordinals");
}

#[test]
fn golden_init_program_is_clean() {
    let program = load_program("init_program");
    assert_eq!(program.name(), "Init Program");
    assert_eq!(program.extension(), &ExtensionStatus::Absent);
    assert!(program.degradations().is_empty());
}

#[test]
fn golden_sequencer_variants() {
    let short = load_program("sequencer_short");
    let legacy = load_program("sequencer_legacy");
    let short_seq = short.sequencer().expect("short sequencer");
    let legacy_seq = legacy.sequencer().expect("legacy sequencer");

    assert_eq!(short_seq.format, SequencerFormat::Short);
    assert_eq!(legacy_seq.format, SequencerFormat::Legacy);
    assert_eq!(short_seq.active_steps, 0x00FF);
    assert_eq!(legacy_seq.active_steps, 0xFFFF);
    assert_eq!(short_seq.motion_slots[1].step_on_off, 0x00F0);
    assert_eq!(legacy_seq.motion_slots[1].step_on_off, 0);
    assert_eq!(short_seq.steps, legacy_seq.steps);
    assert!(short.degradations().is_empty());
}

#[test]
fn golden_unknown_ordinals_degradations() {
    let program = load_program("unknown_ordinals");
    let degradations = program.degradations();

    let ordinals: Vec<(&str, u16)> = degradations
        .iter()
        .filter_map(|d| match d {
            Degradation::UnknownOrdinal { field, value } => Some((*field, *value)),
            _ => None,
        })
        .collect();
    assert_eq!(
        ordinals,
        vec![
            ("voice_mode_type", 9),
            ("vco1_wave", 3),
            ("mod_fx_type", 7),
            ("delay_sub_type", 42),
            ("joystick_assign_plus", 29),
            ("micro_tuning", 100),
            ("user_param1_type", 3),
            ("user_param2_type", 3),
            ("user_param3_type", 3),
            ("user_param4_type", 3),
        ]
    );
    assert_eq!(
        degradations.last(),
        Some(&Degradation::UnknownExtensionTag {
            tag: "JUNK".to_string()
        })
    );
    assert!(program.sequencer().is_none());
}

#[test]
fn golden_round_trip_reproduces_input() {
    for case in ["init_program", "sequencer_short", "sequencer_legacy"] {
        let input = load_input(case);
        let encoded = encode_program(&decode_program(&input).expect("decode"));
        assert_eq!(encoded, input, "round trip mismatch in {case}");
    }

    // Unknown extensions are dropped; the fixed region still round-trips.
    let input = load_input("unknown_ordinals");
    let encoded = encode_program(&decode_program(&input).expect("decode"));
    assert_eq!(encoded, input[..PROGRAM_LEN]);
}

#[test]
fn golden_schematics_render() {
    for (case, title) in [
        ("init_program", ">Program: Init Program<"),
        ("sequencer_short", ">Program: Seq Short<"),
        ("sequencer_legacy", ">Program: Seq Legacy<"),
        ("unknown_ordinals", ">Program: Odd &lt;Values&gt;<"),
    ] {
        let svg = render_schematic(&load_program(case));
        assert!(svg.contains(title), "missing title in {case}");
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}

#[test]
fn golden_schematic_labels() {
    let init = render_schematic(&load_program("init_program"));
    assert!(init.contains("id=\"multi-engine-vpm\""));
    assert!(init.contains(">MOD FX (ON): CHORUS TRIPHASE<"));
    assert!(init.contains(">LEVEL: 0.0 dB<"));

    let seq = render_schematic(&load_program("sequencer_short"));
    assert!(seq.contains("id=\"multi-engine-user\""));
    assert!(seq.contains(">MOD FX (OFF): USER USER 3<"));
    assert!(seq.contains(">MICRO TUNING: USER SCALE 2<"));
    assert!(seq.contains(">BPM: 120.0<"));
    assert!(seq.contains(">ACTIVE: XXXXXXXX--------<"));

    let odd = render_schematic(&load_program("unknown_ordinals"));
    assert!(odd.contains("id=\"multi-engine-noise\""));
    assert!(odd.contains(">DELAY FX (OFF): ---<"));
    assert!(odd.contains(">MICRO TUNING: ---<"));
}
