//! SVG schematic of a decoded preset.
//!
//! The panel template is fixed: every region is drawn at the same place for
//! every preset, and only the control states change. Knob pointers follow
//! the raw value's position in its range, switches light the option at the
//! raw ordinal, and captions carry the human-readable value. The multi-engine
//! region swaps its widget set on the multi-oscillator type.

mod panel;
mod svg;
mod widgets;

use crate::model::Program;

/// Default rendered width in CSS pixels; the view box keeps the panel's
/// own coordinate space.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchematicOptions {
    pub display_width: u32,
}

impl Default for SchematicOptions {
    fn default() -> Self {
        Self {
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

/// Renders `program` as a standalone SVG document.
pub fn render_schematic(program: &Program) -> String {
    render_schematic_with(program, &SchematicOptions::default())
}

pub fn render_schematic_with(program: &Program, options: &SchematicOptions) -> String {
    panel::Panel::new(program).render(options.display_width)
}

#[cfg(test)]
mod tests {
    use super::{SchematicOptions, render_schematic, render_schematic_with};
    use crate::format::program::layout::PROGRAM_LEN;
    use crate::format::program::parser::decode_program;
    use crate::format::program::table::{FieldId, descriptor};
    use crate::model::Program;

    fn program_with(edits: &[(FieldId, u16)], name: &[u8]) -> Program {
        let mut data = vec![0u8; PROGRAM_LEN];
        data[..4].copy_from_slice(b"PROG");
        data[4..4 + name.len()].copy_from_slice(name);
        data[156..].copy_from_slice(b"PRED");
        for (id, value) in edits {
            let desc = descriptor(*id);
            let bytes = value.to_le_bytes();
            let range = desc.byte_range();
            let len = range.len();
            data[range].copy_from_slice(&bytes[..len]);
        }
        decode_program(&data).expect("decode")
    }

    #[test]
    fn document_is_svg_with_every_region() {
        let svg = render_schematic(&program_with(&[], b"Lead"));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox=\"0 0 2320 1310\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        for id in [
            "logo",
            "voice-mode",
            "vco-1",
            "vco-2",
            "vco-mod",
            "multi-engine",
            "mixer",
            "filter",
            "amp-eg",
            "eg",
            "lfo",
            "effects",
            "misc",
        ] {
            assert!(svg.contains(&format!("<g id=\"{id}\">")), "missing {id}");
        }
        assert!(svg.contains(">Program: Lead<"));
        assert!(svg.contains(">minilogue xd<"));
    }

    #[test]
    fn empty_name_renders_untitled() {
        let svg = render_schematic(&program_with(&[], b""));
        assert!(svg.contains(">Program: Untitled<"));
    }

    #[test]
    fn name_is_escaped() {
        let svg = render_schematic(&program_with(&[], b"<A&B>"));
        assert!(svg.contains(">Program: &lt;A&amp;B&gt;<"));
        assert!(!svg.contains("<A&B>"));
    }

    #[test]
    fn control_characters_in_name_are_replaced() {
        let svg = render_schematic(&program_with(&[], b"Init\0old"));
        assert!(svg.contains(">Program: Init\u{fffd}old<"));
        let forbidden = |c: char| c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r');
        assert!(!svg.chars().any(forbidden));
    }

    #[test]
    fn display_width_is_configurable() {
        let program = program_with(&[], b"x");
        assert!(render_schematic(&program).contains("width=\"1900\""));
        let narrow = render_schematic_with(&program, &SchematicOptions { display_width: 800 });
        assert!(narrow.contains("width=\"800\""));
    }

    #[test]
    fn multi_engine_variant_follows_type() {
        let noise = render_schematic(&program_with(&[(FieldId::MultiOscType, 0)], b"n"));
        assert!(noise.contains("id=\"multi-engine-noise\""));
        assert!(noise.contains(">NOISE<"));

        let vpm = render_schematic(&program_with(
            &[
                (FieldId::MultiOscType, 1),
                (FieldId::VpmParameter1Feedback, 150),
            ],
            b"v",
        ));
        assert!(vpm.contains("id=\"multi-engine-vpm\""));
        assert!(vpm.contains(">MOD DEPTH<"));
        assert!(vpm.contains(">FEEDBACK: +50%<"));
        assert!(!vpm.contains("multi-engine-noise"));

        let user = render_schematic(&program_with(&[(FieldId::MultiOscType, 2)], b"u"));
        assert!(user.contains("id=\"multi-engine-user\""));
        assert!(user.contains(">SLOT 1<"));

        let unknown = render_schematic(&program_with(&[(FieldId::MultiOscType, 3)], b"?"));
        assert!(unknown.contains("id=\"multi-engine-unknown\""));
    }

    #[test]
    fn unknown_ordinals_render_sentinel() {
        let svg = render_schematic(&program_with(&[(FieldId::DelaySubType, 200)], b"d"));
        assert!(svg.contains(">DELAY FX (OFF): ---<"));
    }

    #[test]
    fn sequencer_block_reports_absence() {
        let svg = render_schematic(&program_with(&[], b"s"));
        assert!(svg.contains(">SEQUENCER<"));
        assert!(svg.contains(">STATUS: none<"));
    }

    #[test]
    fn sequencer_block_reports_truncation() {
        let mut data = vec![0u8; PROGRAM_LEN];
        data[..4].copy_from_slice(b"PROG");
        data[156..].copy_from_slice(b"PRED");
        data.extend_from_slice(b"SQ");
        data.resize(PROGRAM_LEN + 40, 0);
        let svg = render_schematic(&decode_program(&data).expect("decode"));
        assert!(svg.contains(">STATUS: truncated (200/1024 bytes)<"));
    }

    #[test]
    fn switch_lights_selected_wave() {
        let svg = render_schematic(&program_with(&[(FieldId::Vco1Wave, 2)], b"w"));
        let start = svg.find("<g id=\"vco-1\">").expect("vco-1");
        let end = start + svg[start..].find("<g id=\"vco-2\">").expect("vco-2");
        let section = &svg[start..end];
        // Options are drawn bottom-up, so SAW is the first LED.
        let first_led = section.find("<circle").expect("led");
        let line_end = first_led + section[first_led..].find('\n').expect("eol");
        assert!(section[first_led..line_end].contains("fill=\"red\""));
    }
}
