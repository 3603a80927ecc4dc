/// Minimal indented SVG/XML emitter. Attribute values and text content are
/// always escaped.
pub(crate) struct SvgWriter {
    out: String,
    depth: usize,
}

pub(crate) type Attrs<'a> = &'a [(&'a str, String)];

impl SvgWriter {
    pub(crate) fn new() -> Self {
        Self {
            out: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            depth: 0,
        }
    }

    fn start_tag(&mut self, tag: &str, attrs: Attrs<'_>) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attrs {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape_markup(value));
            self.out.push('"');
        }
    }

    pub(crate) fn open(&mut self, tag: &str, attrs: Attrs<'_>) {
        self.start_tag(tag, attrs);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    pub(crate) fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    pub(crate) fn empty(&mut self, tag: &str, attrs: Attrs<'_>) {
        self.start_tag(tag, attrs);
        self.out.push_str("/>\n");
    }

    /// Element holding escaped text on a single line.
    pub(crate) fn text(&mut self, tag: &str, attrs: Attrs<'_>, content: &str) {
        self.start_tag(tag, attrs);
        self.out.push('>');
        self.out.push_str(&escape_markup(content));
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }
}

/// Escapes reserved markup characters and replaces control characters that
/// XML 1.0 does not allow (everything below U+0020 except tab, LF and CR).
pub(crate) fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if c < '\u{20}' => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

/// Formats a coordinate without a trailing `.0` for whole numbers.
pub(crate) fn num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::{SvgWriter, escape_markup, num};

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            escape_markup(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(escape_markup("A\0B\u{1b}C"), "A\u{fffd}B\u{fffd}C");
        assert_eq!(escape_markup("tab\there\r\n"), "tab\there\r\n");
    }

    #[test]
    fn nested_elements_are_indented() {
        let mut writer = SvgWriter::new();
        writer.open("g", &[("id", "knob".to_string())]);
        writer.empty("circle", &[("r", "35".to_string())]);
        writer.text("text", &[], "A&B");
        writer.close("g");
        let out = writer.finish();
        assert!(out.contains(
            "<g id=\"knob\">\n  <circle r=\"35\"/>\n  <text>A&amp;B</text>\n</g>\n"
        ));
    }

    #[test]
    fn numbers_drop_whole_fraction() {
        assert_eq!(num(35.0), "35");
        assert_eq!(num(180.5), "180.50");
        assert_eq!(num(-2.0), "-2");
    }
}
