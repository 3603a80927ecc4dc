use super::svg::{SvgWriter, num};
use crate::semantics::{knob_angle, percent_label};

pub(crate) const STROKE_COLOR: &str = "black";
pub(crate) const BACKGROUND_COLOR: &str = "white";
pub(crate) const SWITCH_ACTIVE_COLOR: &str = "red";
pub(crate) const INACTIVE_FILL: &str = "transparent";
pub(crate) const STROKE_WIDTH: i32 = 3;

pub(crate) const KNOB_DIAMETER: i32 = 70;
pub(crate) const KNOB_RADIUS: i32 = KNOB_DIAMETER / 2;
pub(crate) const LED_DIAMETER: i32 = 20;
pub(crate) const LED_RADIUS: i32 = LED_DIAMETER / 2;

const SWITCH_STEP: i32 = LED_RADIUS * 3 + 2;
const LED_ROW_STEP: i32 = (LED_RADIUS + 2) * 2;
const LABEL_GAP: i32 = 8;
const BLOCK_TITLE_GAP: i32 = 30;
const BLOCK_LINE_STEP: i32 = 22;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TextStyle {
    pub size: &'static str,
    pub weight: &'static str,
    pub anchor: &'static str,
}

impl TextStyle {
    pub(crate) const BODY: TextStyle = TextStyle {
        size: "1.2em",
        weight: "normal",
        anchor: "start",
    };
    pub(crate) const CAPTION: TextStyle = TextStyle {
        size: "1.2em",
        weight: "normal",
        anchor: "middle",
    };
    pub(crate) const SMALL: TextStyle = TextStyle {
        size: "1.1em",
        weight: "normal",
        anchor: "start",
    };
    pub(crate) const HEADING: TextStyle = TextStyle {
        size: "1.6em",
        weight: "normal",
        anchor: "start",
    };
    pub(crate) const BLOCK_TITLE: TextStyle = TextStyle {
        size: "1.3em",
        weight: "bold",
        anchor: "start",
    };
    pub(crate) const TITLE: TextStyle = TextStyle {
        size: "3em",
        weight: "bold",
        anchor: "start",
    };
    pub(crate) const LOGO: TextStyle = TextStyle {
        size: "2em",
        weight: "bold",
        anchor: "start",
    };
}

/// Text at `(x, y)`; embedded newlines become stacked `tspan` lines.
pub(crate) fn draw_text(w: &mut SvgWriter, x: i32, y: i32, text: &str, style: TextStyle) {
    let attrs = [
        ("x", x.to_string()),
        ("y", y.to_string()),
        ("font-family", "Arial, sans-serif".to_string()),
        ("font-size", style.size.to_string()),
        ("font-weight", style.weight.to_string()),
        ("text-anchor", style.anchor.to_string()),
        ("dominant-baseline", "hanging".to_string()),
        ("fill", STROKE_COLOR.to_string()),
    ];
    if !text.contains('\n') {
        w.text("text", &attrs, text);
        return;
    }
    w.open("text", &attrs);
    for (idx, line) in text.split('\n').enumerate() {
        let dy = if idx == 0 { "0" } else { "1.2em" };
        w.text(
            "tspan",
            &[("x", x.to_string()), ("dy", dy.to_string())],
            line,
        );
    }
    w.close("text");
}

/// A rotary control.
pub(crate) struct Knob<'a> {
    pub label: &'a str,
    /// Value in the parameter's own unit, when it has one.
    pub display: Option<String>,
    pub raw: u16,
    pub percent: f64,
}

impl Knob<'_> {
    fn caption(&self) -> String {
        let mut lines = vec![self.label.to_string()];
        if let Some(display) = &self.display {
            lines.push(display.clone());
        }
        lines.push(format!("raw {}", self.raw));
        lines.push(percent_label(self.percent));
        lines.join("\n")
    }
}

/// Draws a knob with its top-left corner at `(x, y)`. The pointer is
/// omitted when the percentage falls outside 0..=100.
pub(crate) fn draw_knob(w: &mut SvgWriter, x: i32, y: i32, knob: &Knob<'_>) {
    let cx = x + KNOB_RADIUS;
    let cy = y + KNOB_RADIUS;
    w.open("g", &[("class", "knob".to_string())]);
    w.empty(
        "circle",
        &[
            ("cx", cx.to_string()),
            ("cy", cy.to_string()),
            ("r", KNOB_RADIUS.to_string()),
            ("stroke", STROKE_COLOR.to_string()),
            ("stroke-width", STROKE_WIDTH.to_string()),
            ("fill", INACTIVE_FILL.to_string()),
        ],
    );
    if (0.0..=100.0).contains(&knob.percent) {
        let angle = knob_angle(knob.percent);
        w.empty(
            "line",
            &[
                ("x1", cx.to_string()),
                ("y1", cy.to_string()),
                ("x2", cx.to_string()),
                ("y2", (cy + KNOB_RADIUS).to_string()),
                ("stroke", STROKE_COLOR.to_string()),
                ("stroke-width", STROKE_WIDTH.to_string()),
                ("transform", format!("rotate({} {cx} {cy})", num(angle))),
            ],
        );
    }
    draw_text(
        w,
        cx,
        cy + KNOB_DIAMETER,
        &knob.caption(),
        TextStyle::CAPTION,
    );
    w.close("g");
}

/// A vertical LED selector.
pub(crate) struct Switch<'a> {
    pub label: &'a str,
    /// Options in declared order; empty strings leave a gap.
    pub options: &'a [&'a str],
    pub active: Option<usize>,
}

/// Draws the options bottom-up: the last declared option sits at the top.
/// Only the active option is filled.
pub(crate) fn draw_switch(w: &mut SvgWriter, x: i32, y: i32, switch: &Switch<'_>) {
    let cx = x + LED_RADIUS;
    let mut current_y = y + LED_RADIUS;
    w.open("g", &[("class", "switch".to_string())]);
    for (idx, option) in switch.options.iter().enumerate().rev() {
        if !option.is_empty() {
            let fill = if switch.active == Some(idx) {
                SWITCH_ACTIVE_COLOR
            } else {
                INACTIVE_FILL
            };
            w.empty(
                "circle",
                &[
                    ("cx", cx.to_string()),
                    ("cy", current_y.to_string()),
                    ("r", LED_RADIUS.to_string()),
                    ("stroke", STROKE_COLOR.to_string()),
                    ("stroke-width", STROKE_WIDTH.to_string()),
                    ("fill", fill.to_string()),
                ],
            );
            draw_text(
                w,
                cx + LED_RADIUS + 4,
                current_y - LABEL_GAP,
                option,
                TextStyle::BODY,
            );
        }
        current_y += SWITCH_STEP;
    }
    if !switch.label.is_empty() {
        draw_text(
            w,
            cx + LED_RADIUS + LABEL_GAP,
            current_y - LABEL_GAP,
            switch.label,
            TextStyle::CAPTION,
        );
    }
    w.close("g");
}

/// Horizontal row of `count` LEDs with a caption underneath.
pub(crate) fn draw_led_row(
    w: &mut SvgWriter,
    x: i32,
    y: i32,
    count: usize,
    active: Option<usize>,
    caption: &str,
) {
    let cx = x + LED_RADIUS;
    let cy = y + LED_RADIUS;
    w.open("g", &[("class", "led-row".to_string())]);
    let mut offset = 0;
    for idx in 0..count {
        let fill = if active == Some(idx) {
            SWITCH_ACTIVE_COLOR
        } else {
            INACTIVE_FILL
        };
        w.empty(
            "circle",
            &[
                ("cx", (cx + offset).to_string()),
                ("cy", cy.to_string()),
                ("r", LED_RADIUS.to_string()),
                ("stroke", STROKE_COLOR.to_string()),
                ("stroke-width", STROKE_WIDTH.to_string()),
                ("fill", fill.to_string()),
            ],
        );
        offset += LED_ROW_STEP;
    }
    draw_text(w, x + 58, y + 40, caption, TextStyle::CAPTION);
    w.close("g");
}

/// Titled list of `label: value` lines.
pub(crate) fn draw_text_block(
    w: &mut SvgWriter,
    x: i32,
    y: i32,
    title: &str,
    rows: &[(&str, String)],
) {
    w.open("g", &[("class", "text-block".to_string())]);
    draw_text(w, x, y, title, TextStyle::BLOCK_TITLE);
    let mut line_y = y + BLOCK_TITLE_GAP;
    for (label, value) in rows {
        draw_text(w, x, line_y, &format!("{label}: {value}"), TextStyle::SMALL);
        line_y += BLOCK_LINE_STEP;
    }
    w.close("g");
}
