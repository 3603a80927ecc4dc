use super::svg::SvgWriter;
use super::widgets::{
    BACKGROUND_COLOR, KNOB_RADIUS, Knob, STROKE_COLOR, Switch, TextStyle, draw_knob, draw_led_row,
    draw_switch, draw_text, draw_text_block,
};
use crate::format::program::table::{EnumKind, FieldId, descriptor};
use crate::model::{ExtensionStatus, Program, Sequencer};
use crate::semantics::{
    SENTINEL_LABEL, bend_range_label, bipolar_percent_label, bpm_label, cent_offset_label,
    decibel_label, enum_label, eg_depth_label, footage_options, gate_time_label, lfo_rate_label,
    mod_fx_subtype_label, note_offset_label, octave_label, options, percent_of_range, pitch_cents,
    portamento_label, step_resolution_label, swing_label, user_param_label, voice_mode_depth_label,
};

pub(crate) const PADDING: i32 = 10;
pub(crate) const SYNTH_WIDTH: i32 = 2300;
pub(crate) const SYNTH_HEIGHT: i32 = 1290;
const CORNER_RADIUS: i32 = 30;

const HEADER_OFFSET: i32 = 35;
const ROW_SPACING: i32 = 255;
const FIRST_ROW_Y: i32 = 90;
const SECOND_ROW_Y: i32 = FIRST_ROW_Y + ROW_SPACING;
const THIRD_ROW_Y: i32 = FIRST_ROW_Y + ROW_SPACING * 2;
const MISC_ROW_Y: i32 = 1000;

const VOICE_MODE_X: i32 = 75;
const OSCILLATOR_X: i32 = 400;
const MIXER_X: i32 = 1070;
const FILTER_X: i32 = 1215;
const ENVELOPE_X: i32 = 1360;
const EFFECTS_X: i32 = 1860;

const ENVELOPE_SPACING: i32 = 120;
const LFO_ROW_Y: i32 = THIRD_ROW_Y + 20;
const MULTI_DETAIL_Y: i32 = THIRD_ROW_Y + 200;

const JOYSTICK_X: i32 = 75;
const CV_IN_X: i32 = 500;
const TUNING_X: i32 = 880;
const PROGRAM_X: i32 = 1260;
const SEQUENCER_X: i32 = 1700;

const OCTAVE_POSITIONS: usize = 5;
const VOICE_MODE_OPTIONS: &[&str] = &["ARP/LATCH", "CHORD", "UNISON", "POLY"];
const ON_OFF: &[&str] = &["OFF", "ON"];
const DRIVE_OPTIONS: &[&str] = &["0%", "50%", "100%"];
const SCALE_KEY_CENTER: u16 = 12;
const TRANSPOSE_CENTER: u16 = 13;

const MULTI_NOISE: u16 = 0;
const MULTI_VPM: u16 = 1;
const MULTI_USER: u16 = 2;

const VPM_PARAMS: &[(&str, FieldId)] = &[
    ("FEEDBACK", FieldId::VpmParameter1Feedback),
    ("NOISE DEPTH", FieldId::VpmParameter2NoiseDepth),
    ("SHAPE MOD INT", FieldId::VpmParameter3ShapeModInt),
    ("MOD ATTACK", FieldId::VpmParameter4ModAttack),
    ("MOD DECAY", FieldId::VpmParameter5ModDecay),
    ("MOD KEY TRACK", FieldId::VpmParameter6ModKeyTrack),
];

const USER_PARAMS: &[(&str, FieldId, FieldId)] = &[
    ("PARAM 1", FieldId::UserParam1, FieldId::UserParam1Type),
    ("PARAM 2", FieldId::UserParam2, FieldId::UserParam2Type),
    ("PARAM 3", FieldId::UserParam3, FieldId::UserParam3Type),
    ("PARAM 4", FieldId::UserParam4, FieldId::UserParam4Type),
    ("PARAM 5", FieldId::UserParam5, FieldId::UserParam5Type),
    ("PARAM 6", FieldId::UserParam6, FieldId::UserParam6Type),
];

/// Which widget set the multi-engine region shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MultiVariant {
    Noise,
    Vpm,
    User,
    Unknown,
}

impl MultiVariant {
    fn from_raw(raw: u16) -> Self {
        match raw {
            MULTI_NOISE => MultiVariant::Noise,
            MULTI_VPM => MultiVariant::Vpm,
            MULTI_USER => MultiVariant::User,
            _ => MultiVariant::Unknown,
        }
    }

    fn group_id(self) -> &'static str {
        match self {
            MultiVariant::Noise => "multi-engine-noise",
            MultiVariant::Vpm => "multi-engine-vpm",
            MultiVariant::User => "multi-engine-user",
            MultiVariant::Unknown => "multi-engine-unknown",
        }
    }
}

fn active_index(raw: u16, len: usize) -> Option<usize> {
    let idx = usize::from(raw);
    (idx < len).then_some(idx)
}

fn on_off(flag: bool) -> String {
    ON_OFF[usize::from(flag)].to_string()
}

fn step_pattern(mask: u16, len: usize) -> String {
    (0..len.min(16))
        .map(|step| if mask & (1 << step) != 0 { 'X' } else { '-' })
        .collect()
}

/// Lays out one preset on the fixed panel template.
pub(crate) struct Panel<'a> {
    w: SvgWriter,
    program: &'a Program,
}

impl<'a> Panel<'a> {
    pub(crate) fn new(program: &'a Program) -> Self {
        Self {
            w: SvgWriter::new(),
            program,
        }
    }

    pub(crate) fn render(mut self, display_width: u32) -> String {
        let viewbox_width = SYNTH_WIDTH + PADDING * 2;
        let viewbox_height = SYNTH_HEIGHT + PADDING * 2;
        self.w.open(
            "svg",
            &[
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
                ("version", "1.1".to_string()),
                ("width", display_width.to_string()),
                ("preserveAspectRatio", "xMidYMid meet".to_string()),
                ("viewBox", format!("0 0 {viewbox_width} {viewbox_height}")),
            ],
        );
        self.w.empty(
            "rect",
            &[
                ("x", PADDING.to_string()),
                ("y", PADDING.to_string()),
                ("width", SYNTH_WIDTH.to_string()),
                ("height", SYNTH_HEIGHT.to_string()),
                ("stroke", STROKE_COLOR.to_string()),
                ("stroke-width", PADDING.to_string()),
                ("fill", BACKGROUND_COLOR.to_string()),
                ("rx", CORNER_RADIUS.to_string()),
                ("ry", CORNER_RADIUS.to_string()),
            ],
        );

        let name = match self.program.name() {
            "" => "Untitled",
            name => name,
        };
        draw_text(
            &mut self.w,
            30,
            30,
            &format!("Program: {name}"),
            TextStyle::TITLE,
        );
        self.logo();

        self.voice_mode(VOICE_MODE_X);
        self.oscillators(OSCILLATOR_X);
        self.multi_engine(OSCILLATOR_X);
        self.mixer(MIXER_X);
        self.filter(FILTER_X);
        self.envelopes(ENVELOPE_X);
        self.lfo(ENVELOPE_X);
        self.effects(EFFECTS_X);
        self.misc(MISC_ROW_Y);

        self.w.close("svg");
        self.w.finish()
    }

    fn raw(&self, id: FieldId) -> u16 {
        self.program.raw(id)
    }

    fn label(&self, id: FieldId) -> String {
        match descriptor(id).enum_kind() {
            Some(kind) => enum_label(kind, self.raw(id)).to_string(),
            None => self.raw(id).to_string(),
        }
    }

    fn knob(&mut self, x: i32, y: i32, id: FieldId, label: &str, display: Option<String>) {
        let raw = self.raw(id);
        let (min, max) = descriptor(id).bounds().unwrap_or((0, 1023));
        let knob = Knob {
            label,
            display,
            raw,
            percent: percent_of_range(raw, min, max),
        };
        draw_knob(&mut self.w, x, y, &knob);
    }

    fn enum_switch(&mut self, x: i32, y: i32, id: FieldId, kind: EnumKind, label: &str) {
        let opts = options(kind);
        let active = active_index(self.raw(id), opts.len());
        self.switch(x, y, label, opts, active);
    }

    fn switch(&mut self, x: i32, y: i32, label: &str, opts: &[&str], active: Option<usize>) {
        draw_switch(
            &mut self.w,
            x,
            y,
            &Switch {
                label,
                options: opts,
                active,
            },
        );
    }

    fn heading(&mut self, x: i32, y: i32, text: &str) {
        draw_text(&mut self.w, x, y, text, TextStyle::HEADING);
    }

    fn open_section(&mut self, id: &str) {
        self.w.open("g", &[("id", id.to_string())]);
    }

    fn logo(&mut self) {
        self.open_section("logo");
        draw_text(
            &mut self.w,
            35 + PADDING,
            890 + PADDING,
            "minilogue xd",
            TextStyle::LOGO,
        );
        draw_text(
            &mut self.w,
            35 + PADDING,
            930 + PADDING,
            "POLYPHONIC ANALOGUE SYNTHESIZER",
            TextStyle::BODY,
        );
        self.w.close("g");
    }

    fn voice_mode(&mut self, x: i32) {
        self.open_section("voice-mode");
        let octave = self.raw(FieldId::Octave);
        draw_led_row(
            &mut self.w,
            x - 20,
            FIRST_ROW_Y,
            OCTAVE_POSITIONS,
            active_index(octave, OCTAVE_POSITIONS),
            &format!("OCTAVE\n({})", octave_label(octave)),
        );

        let portamento = portamento_label(self.raw(FieldId::Portamento));
        self.knob(
            x + 180,
            FIRST_ROW_Y,
            FieldId::Portamento,
            "PORTAMENTO",
            Some(portamento),
        );

        let vm_type = self.raw(FieldId::VoiceModeType);
        let depth = voice_mode_depth_label(vm_type, self.raw(FieldId::VoiceModeDepth));
        self.knob(
            x + 180,
            SECOND_ROW_Y,
            FieldId::VoiceModeDepth,
            "VOICE MODE\nDEPTH",
            Some(depth),
        );

        // NONE has no LED; the panel options start at ARP.
        let active = vm_type
            .checked_sub(1)
            .and_then(|idx| active_index(idx, VOICE_MODE_OPTIONS.len()));
        self.switch(x + 170, THIRD_ROW_Y, "", VOICE_MODE_OPTIONS, active);
        self.w.close("g");
    }

    fn oscillators(&mut self, x: i32) {
        let rows = [
            (
                "VCO 1",
                FIRST_ROW_Y,
                FieldId::Vco1Wave,
                FieldId::Vco1Octave,
                FieldId::Vco1Pitch,
                FieldId::Vco1Shape,
            ),
            (
                "VCO 2",
                SECOND_ROW_Y,
                FieldId::Vco2Wave,
                FieldId::Vco2Octave,
                FieldId::Vco2Pitch,
                FieldId::Vco2Shape,
            ),
        ];
        for (title, y, wave, octave, pitch, shape) in rows {
            self.open_section(&title.to_lowercase().replace(' ', "-"));
            self.heading(x + 315, y - HEADER_OFFSET, title);
            self.enum_switch(x, y, wave, EnumKind::Wave, "WAVE");
            let footage = active_index(self.raw(octave), footage_options().len());
            self.switch(x + 100, y, "OCTAVE", footage_options(), footage);
            let cents = format!("{} Cent", pitch_cents(self.raw(pitch)));
            self.knob(x + 200, y, pitch, "PITCH", Some(cents));
            self.knob(x + 355, y, shape, "SHAPE", None);
            self.w.close("g");
        }

        self.open_section("vco-mod");
        self.knob(
            x + 510,
            SECOND_ROW_Y,
            FieldId::CrossModDepth,
            "CROSS MOD\nDEPTH",
            None,
        );
        let sync = usize::from(self.program.flag(FieldId::OscillatorSync));
        self.switch(x + 490, FIRST_ROW_Y, "SYNC", ON_OFF, Some(sync));
        let ring = usize::from(self.program.flag(FieldId::RingMod));
        self.switch(x + 580, FIRST_ROW_Y, "RING", ON_OFF, Some(ring));
        self.w.close("g");
    }

    fn multi_engine(&mut self, x: i32) {
        let y = THIRD_ROW_Y;
        self.open_section("multi-engine");
        self.heading(x + 315, y - HEADER_OFFSET, "MULTI ENGINE");
        self.enum_switch(x, y, FieldId::MultiOscType, EnumKind::MultiOscType, "TYPE");
        let footage = active_index(self.raw(FieldId::MultiOctave), footage_options().len());
        self.switch(x + 510, y, "OCTAVE", footage_options(), footage);

        let variant = MultiVariant::from_raw(self.raw(FieldId::MultiOscType));
        self.w.open("g", &[("id", variant.group_id().to_string())]);
        let routing = ("ROUTING", self.label(FieldId::MultiRouting));
        match variant {
            MultiVariant::Noise => {
                let select = self.label(FieldId::SelectedMultiOscNoise);
                draw_text(
                    &mut self.w,
                    x + 100,
                    y,
                    &format!("NOISE\n{select}"),
                    TextStyle::BODY,
                );
                self.knob(x + 200, y, FieldId::ShapeNoise, "NOISE\nSHAPE", None);
                self.knob(
                    x + 355,
                    y,
                    FieldId::ShiftShapeNoise,
                    "NOISE\nSHIFT SHAPE",
                    None,
                );
                draw_text_block(&mut self.w, x + 200, MULTI_DETAIL_Y, "NOISE", &[routing]);
            }
            MultiVariant::Vpm => {
                let select = self.label(FieldId::SelectedMultiOscVpm);
                draw_text(
                    &mut self.w,
                    x + 100,
                    y,
                    &format!("VPM\n{select}"),
                    TextStyle::BODY,
                );
                self.knob(x + 200, y, FieldId::ShapeVpm, "MOD DEPTH", None);
                self.knob(x + 355, y, FieldId::ShiftShapeVpm, "RATIO", None);
                let mut rows: Vec<(&str, String)> = VPM_PARAMS
                    .iter()
                    .map(|(name, id)| (*name, bipolar_percent_label(self.raw(*id))))
                    .collect();
                rows.push(routing);
                draw_text_block(&mut self.w, x + 200, MULTI_DETAIL_Y, "VPM", &rows);
            }
            MultiVariant::User => {
                let slot = u32::from(self.raw(FieldId::SelectedMultiOscUser)) + 1;
                draw_text(
                    &mut self.w,
                    x + 100,
                    y,
                    &format!("USER\nSLOT {slot}"),
                    TextStyle::BODY,
                );
                self.knob(x + 200, y, FieldId::ShapeUser, "USER\nSHAPE", None);
                self.knob(
                    x + 355,
                    y,
                    FieldId::ShiftShapeUser,
                    "USER\nSHIFT SHAPE",
                    None,
                );
                let mut rows: Vec<(&str, String)> = USER_PARAMS
                    .iter()
                    .map(|(name, value, kind)| {
                        let param_type = self.raw(*kind);
                        let text = format!(
                            "{} ({})",
                            user_param_label(self.raw(*value), param_type),
                            enum_label(EnumKind::UserParamType, param_type)
                        );
                        (*name, text)
                    })
                    .collect();
                rows.push(routing);
                draw_text_block(&mut self.w, x + 200, MULTI_DETAIL_Y, "USER OSC", &rows);
            }
            MultiVariant::Unknown => {
                draw_text(&mut self.w, x + 100, y, SENTINEL_LABEL, TextStyle::BODY);
            }
        }
        self.w.close("g");
        self.w.close("g");
    }

    fn mixer(&mut self, x: i32) {
        self.open_section("mixer");
        self.heading(x + KNOB_RADIUS, FIRST_ROW_Y - HEADER_OFFSET, "MIXER");
        self.knob(x, FIRST_ROW_Y, FieldId::Vco1Level, "VCO 1", None);
        self.knob(x, SECOND_ROW_Y, FieldId::Vco2Level, "VCO 2", None);
        self.knob(x, THIRD_ROW_Y, FieldId::MultiLevel, "MULTI", None);
        self.w.close("g");
    }

    fn filter(&mut self, x: i32) {
        self.open_section("filter");
        self.heading(x + KNOB_RADIUS, FIRST_ROW_Y - HEADER_OFFSET, "FILTER");
        self.knob(x, FIRST_ROW_Y, FieldId::FilterCutoff, "CUTOFF", None);
        self.knob(x, SECOND_ROW_Y, FieldId::FilterResonance, "RESONANCE", None);
        let drive = active_index(self.raw(FieldId::FilterCutoffDrive), DRIVE_OPTIONS.len());
        self.switch(
            x - KNOB_RADIUS - 5,
            THIRD_ROW_Y,
            "DRIVE",
            DRIVE_OPTIONS,
            drive,
        );
        let track = active_index(
            self.raw(FieldId::FilterCutoffKeyboardTrack),
            DRIVE_OPTIONS.len(),
        );
        self.switch(
            x + KNOB_RADIUS + 5,
            THIRD_ROW_Y,
            "KEY\nTRACK",
            DRIVE_OPTIONS,
            track,
        );
        self.w.close("g");
    }

    fn envelopes(&mut self, x: i32) {
        self.open_section("amp-eg");
        self.heading(x + 220, FIRST_ROW_Y - HEADER_OFFSET, "AMP EG");
        let amp = [
            (FieldId::AmpEgAttack, "ATTACK"),
            (FieldId::AmpEgDecay, "DECAY"),
            (FieldId::AmpEgSustain, "SUSTAIN"),
            (FieldId::AmpEgRelease, "RELEASE"),
        ];
        for (idx, (id, label)) in amp.into_iter().enumerate() {
            self.knob(
                x + ENVELOPE_SPACING * idx as i32,
                FIRST_ROW_Y,
                id,
                label,
                None,
            );
        }
        self.w.close("g");

        self.open_section("eg");
        self.heading(x + 220, SECOND_ROW_Y - HEADER_OFFSET, "EG");
        self.knob(x, SECOND_ROW_Y, FieldId::EgAttack, "ATTACK", None);
        self.knob(
            x + ENVELOPE_SPACING,
            SECOND_ROW_Y,
            FieldId::EgDecay,
            "DECAY",
            None,
        );
        let depth = eg_depth_label(self.raw(FieldId::EgInt));
        self.knob(
            x + ENVELOPE_SPACING * 2,
            SECOND_ROW_Y,
            FieldId::EgInt,
            "EG INT",
            Some(depth),
        );
        self.enum_switch(
            x + ENVELOPE_SPACING * 3,
            SECOND_ROW_Y,
            FieldId::EgTarget,
            EnumKind::EgTarget,
            "TARGET",
        );
        self.w.close("g");
    }

    fn lfo(&mut self, x: i32) {
        let y = LFO_ROW_Y;
        self.open_section("lfo");
        self.heading(x + 220, y - HEADER_OFFSET, "LFO");
        self.enum_switch(x, y, FieldId::LfoWave, EnumKind::Wave, "WAVE");
        self.enum_switch(x + 90, y, FieldId::LfoMode, EnumKind::LfoMode, "MODE");
        let rate = lfo_rate_label(self.raw(FieldId::LfoRate), self.raw(FieldId::LfoMode));
        self.knob(x + 200, y, FieldId::LfoRate, "RATE", Some(rate));
        self.knob(x + 300, y, FieldId::LfoInt, "INT", None);
        self.enum_switch(
            x + 400,
            y,
            FieldId::LfoTarget,
            EnumKind::LfoTarget,
            "TARGET",
        );
        self.w.close("g");
    }

    fn effects(&mut self, x: i32) {
        self.open_section("effects");
        self.heading(x + 120, FIRST_ROW_Y - HEADER_OFFSET, "EFFECTS");

        let mod_type = self.raw(FieldId::ModFxType);
        let subtype = mod_fx_subtype_label(
            mod_type,
            self.raw(FieldId::ModFxChorus),
            self.raw(FieldId::ModFxEnsemble),
            self.raw(FieldId::ModFxPhaser),
            self.raw(FieldId::ModFxFlanger),
            self.raw(FieldId::ModFxUser),
        );
        let mod_title = format!(
            "MOD FX ({}): {} {}",
            on_off(self.program.flag(FieldId::ModFxOnOff)),
            enum_label(EnumKind::ModFxType, mod_type),
            subtype
        );
        draw_text(
            &mut self.w,
            x,
            FIRST_ROW_Y,
            mod_title.trim_end(),
            TextStyle::BLOCK_TITLE,
        );
        self.knob(
            x + 20,
            FIRST_ROW_Y + 40,
            FieldId::ModFxTime,
            "MOD FX\nTIME",
            None,
        );
        self.knob(
            x + 140,
            FIRST_ROW_Y + 40,
            FieldId::ModFxDepth,
            "MOD FX\nDEPTH",
            None,
        );

        let fx_rows = [
            (
                "REVERB FX",
                SECOND_ROW_Y,
                FieldId::ReverbOnOff,
                FieldId::ReverbSubType,
                FieldId::ReverbTime,
                FieldId::ReverbDepth,
                FieldId::ReverbDryWet,
            ),
            (
                "DELAY FX",
                THIRD_ROW_Y,
                FieldId::DelayOnOff,
                FieldId::DelaySubType,
                FieldId::DelayTime,
                FieldId::DelayDepth,
                FieldId::DelayDryWet,
            ),
        ];
        for (name, y, on, sub_type, time, depth, dry_wet) in fx_rows {
            let title = format!(
                "{name} ({}): {}",
                on_off(self.program.flag(on)),
                self.label(sub_type)
            );
            draw_text(&mut self.w, x, y, &title, TextStyle::BLOCK_TITLE);
            self.knob(x + 20, y + 40, time, &format!("{name}\nTIME"), None);
            self.knob(x + 140, y + 40, depth, &format!("{name}\nDEPTH"), None);
            self.knob(x + 260, y + 40, dry_wet, "DRY/WET", None);
        }
        self.w.close("g");
    }

    fn misc(&mut self, y: i32) {
        self.open_section("misc");

        let joystick = [
            ("BEND +", bend_range_label(self.raw(FieldId::BendRangePlus), true)),
            ("BEND -", bend_range_label(self.raw(FieldId::BendRangeMinus), false)),
            ("ASSIGN +", self.label(FieldId::JoystickAssignPlus)),
            ("RANGE +", bipolar_percent_label(self.raw(FieldId::JoystickRangePlus))),
            ("ASSIGN -", self.label(FieldId::JoystickAssignMinus)),
            ("RANGE -", bipolar_percent_label(self.raw(FieldId::JoystickRangeMinus))),
            ("AFTERTOUCH", self.label(FieldId::MidiAfterTouchAssign)),
        ];
        draw_text_block(&mut self.w, JOYSTICK_X, y, "JOYSTICK", &joystick);

        let cv_in = [
            ("MODE", self.label(FieldId::CvInMode)),
            ("IN1 ASSIGN", self.label(FieldId::CvIn1Assign)),
            ("IN1 RANGE", bipolar_percent_label(self.raw(FieldId::CvIn1Range))),
            ("IN2 ASSIGN", self.label(FieldId::CvIn2Assign)),
            ("IN2 RANGE", bipolar_percent_label(self.raw(FieldId::CvIn2Range))),
        ];
        draw_text_block(&mut self.w, CV_IN_X, y, "CV IN", &cv_in);

        let tuning = [
            ("MICRO TUNING", self.label(FieldId::MicroTuning)),
            (
                "SCALE KEY",
                note_offset_label(self.raw(FieldId::ScaleKey), SCALE_KEY_CENTER),
            ),
            ("PROGRAM TUNING", cent_offset_label(self.raw(FieldId::ProgramTuning))),
            (
                "TRANSPOSE",
                note_offset_label(self.raw(FieldId::ProgramTranspose), TRANSPOSE_CENTER),
            ),
        ];
        draw_text_block(&mut self.w, TUNING_X, y, "TUNING", &tuning);

        let flag = |id: FieldId| on_off(self.program.flag(id));
        let program = [
            ("LEVEL", decibel_label(self.raw(FieldId::ProgramLevel))),
            ("KEY TRIG", flag(FieldId::KeyTrig)),
            ("PORTAMENTO MODE", self.label(FieldId::PortamentoMode)),
            ("PORTAMENTO BPM", flag(FieldId::PortamentoBpmSync)),
            ("EG LEGATO", flag(FieldId::EgLegato)),
            ("LFO KEY SYNC", flag(FieldId::LfoKeySync)),
            ("LFO VOICE SYNC", flag(FieldId::LfoVoiceSync)),
            ("LFO TARGET OSC", self.label(FieldId::LfoTargetOsc)),
            ("CUTOFF VELOCITY", self.raw(FieldId::CutoffVelocity).to_string()),
            ("AMP VELOCITY", self.raw(FieldId::AmpVelocity).to_string()),
        ];
        draw_text_block(&mut self.w, PROGRAM_X, y, "PROGRAM", &program);

        let sequencer = sequencer_rows(self.program.sequencer(), self.program.extension());
        draw_text_block(&mut self.w, SEQUENCER_X, y, "SEQUENCER", &sequencer);

        self.w.close("g");
    }
}

fn sequencer_rows(
    sequencer: Option<&Sequencer>,
    status: &ExtensionStatus,
) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    match status {
        ExtensionStatus::Absent => rows.push(("STATUS", "none".to_string())),
        ExtensionStatus::UnknownTag(tag) => {
            rows.push(("STATUS", format!("unrecognized tag {tag:?}")));
        }
        ExtensionStatus::Truncated { needed, actual } => {
            rows.push(("STATUS", format!("truncated ({actual}/{needed} bytes)")));
        }
        ExtensionStatus::Decoded => {}
    }
    let Some(seq) = sequencer else {
        return rows;
    };
    let motion_slots = seq
        .motion_slots
        .iter()
        .filter(|slot| slot.motion_on())
        .count();
    rows.extend([
        ("FORMAT", seq.format.tag().to_string()),
        ("BPM", bpm_label(seq.bpm)),
        ("LENGTH", seq.step_length.to_string()),
        ("RESOLUTION", step_resolution_label(u16::from(seq.step_resolution)).to_string()),
        ("SWING", swing_label(seq.swing)),
        ("GATE", gate_time_label(u16::from(seq.default_gate_time))),
        ("ACTIVE", step_pattern(seq.active_steps, 16)),
        ("STEPS ON", step_pattern(seq.step_on_off, 16)),
        ("MOTION SLOTS", format!("{motion_slots} on")),
    ]);
    rows
}

#[cfg(test)]
mod tests {
    use super::{active_index, step_pattern};

    #[test]
    fn active_index_bounds() {
        assert_eq!(active_index(2, 3), Some(2));
        assert_eq!(active_index(3, 3), None);
    }

    #[test]
    fn step_pattern_marks_bits_low_first() {
        assert_eq!(step_pattern(0b0000_0000_0000_0101, 16), "X-X-------------");
        assert_eq!(step_pattern(0xFFFF, 4), "XXXX");
    }
}
