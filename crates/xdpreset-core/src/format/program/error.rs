use thiserror::Error;

/// Fatal decode failures. No document is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralFault {
    #[error("preset record too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("archive has no entries ending in {suffix}")]
    NoMatchingEntries { suffix: String },
}

impl StructuralFault {
    /// Stable identifier for reports and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            StructuralFault::TooShort { .. } => "TooShort",
            StructuralFault::NoMatchingEntries { .. } => "NoMatchingEntries",
        }
    }
}

/// Non-fatal issues found in an otherwise valid preset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Degradation {
    #[error("{field}: ordinal {value} has no label")]
    UnknownOrdinal { field: &'static str, value: u16 },
    #[error("sequencer extension tag {tag:?} not recognized; extension skipped")]
    UnknownExtensionTag { tag: String },
    #[error("sequencer extension truncated: need {needed} bytes, got {actual}")]
    PartialExtension { needed: usize, actual: usize },
}

impl Degradation {
    pub fn kind(&self) -> &'static str {
        match self {
            Degradation::UnknownOrdinal { .. } => "UnknownOrdinal",
            Degradation::UnknownExtensionTag { .. } => "UnknownExtensionTag",
            Degradation::PartialExtension { .. } => "PartialExtension",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Degradation, StructuralFault};

    #[test]
    fn too_short_message_names_sizes() {
        let fault = StructuralFault::TooShort {
            needed: 160,
            actual: 12,
        };
        assert_eq!(fault.kind(), "TooShort");
        assert_eq!(
            fault.to_string(),
            "preset record too short: need 160 bytes, got 12"
        );
    }

    #[test]
    fn degradation_kinds_are_stable() {
        let degradation = Degradation::UnknownOrdinal {
            field: "vco1_wave",
            value: 7,
        };
        assert_eq!(degradation.kind(), "UnknownOrdinal");
        assert_eq!(degradation.to_string(), "vco1_wave: ordinal 7 has no label");
    }
}
