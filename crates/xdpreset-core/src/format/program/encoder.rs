use super::layout::{PACKED_TYPE_MASK, PROGRAM_LEN};
use super::table::{Domain, Width};
use crate::format::common::reader::{encode_tag, pack_bits};
use crate::format::sequencer::encoder::encode_extension;
use crate::model::Program;

/// Re-encodes a decoded preset.
///
/// Packed sub-fields are written after their raw carrier bytes, so the
/// sub-field values win if the two disagree.
pub fn encode_program(program: &Program) -> Vec<u8> {
    let mut out = vec![0u8; PROGRAM_LEN];

    let (packed, plain): (Vec<_>, Vec<_>) =
        program.fields().partition(|(desc, _)| desc.is_packed());
    for (desc, value) in plain {
        let range = desc.byte_range();
        match desc.width {
            Width::Ascii(_) => encode_tag(value.as_str().unwrap_or_default(), &mut out[range]),
            Width::Word => out[range].copy_from_slice(&value.as_u16().to_le_bytes()),
            Width::Byte => out[desc.offset] = value.as_u16() as u8,
        }
    }
    for (desc, value) in packed {
        if let Domain::Packed { shift, .. } = desc.domain {
            let sub = value.as_u16() as u8;
            out[desc.offset] = pack_bits(out[desc.offset], sub, shift, PACKED_TYPE_MASK);
        }
    }

    if let Some(sequencer) = program.sequencer() {
        encode_extension(sequencer, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::encode_program;
    use crate::format::program::layout::PROGRAM_LEN;
    use crate::format::program::parser::decode_program;
    use crate::format::sequencer::layout::{LEGACY_LAYOUT, SHORT_LAYOUT};

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|idx| (idx * 37 % 251) as u8).collect()
    }

    #[test]
    fn fixed_region_roundtrips() {
        let mut data = patterned(PROGRAM_LEN);
        data[0..4].copy_from_slice(b"PROG");
        data[4..16].copy_from_slice(b"Pad\0\0\0\0\0\0\0\0\0");
        data[156..160].copy_from_slice(b"PRED");
        let program = decode_program(&data).expect("decode");
        assert_eq!(encode_program(&program), data);
    }

    #[test]
    fn short_sequencer_roundtrips() {
        let mut data = patterned(SHORT_LAYOUT.total_len());
        data[160..162].copy_from_slice(b"SQ");
        // reserved bytes are not carried by the model
        data[190..192].fill(0);
        for step in 0..16 {
            let reserved = SHORT_LAYOUT.step_event(step) + 44;
            data[reserved..reserved + 8].fill(0);
        }
        let program = decode_program(&data).expect("decode");
        assert_eq!(encode_program(&program), data);
    }

    #[test]
    fn legacy_sequencer_roundtrips() {
        let mut data = patterned(LEGACY_LAYOUT.total_len());
        data[160..164].copy_from_slice(b"SEQD");
        for step in 0..16 {
            let reserved = LEGACY_LAYOUT.step_event(step) + 44;
            data[reserved..reserved + 8].fill(0);
        }
        let program = decode_program(&data).expect("decode");
        assert_eq!(encode_program(&program), data);
    }
}
