use tracing::debug;

use super::error::StructuralFault;
use super::layout::{PACKED_TYPE_MASK, PROGRAM_LEN};
use super::table::{Domain, FIELD_TABLE, FieldDescriptor, Width};
use crate::format::common::reader::{ByteReader, unpack_bits};
use crate::format::sequencer::parser::decode_extension;
use crate::model::{FieldValue, Program};

/// Decodes one preset record.
///
/// Fails only when the fixed region is incomplete. Unknown enumeration
/// ordinals pass through untouched, and the header and end-marker tags are
/// read but never compared against their expected contents.
pub fn decode_program(data: &[u8]) -> Result<Program, StructuralFault> {
    if data.len() < PROGRAM_LEN {
        return Err(StructuralFault::TooShort {
            needed: PROGRAM_LEN,
            actual: data.len(),
        });
    }

    let reader = ByteReader::new(data);
    let values = FIELD_TABLE
        .iter()
        .map(|desc| read_field(&reader, desc))
        .collect();

    let (sequencer, extension) = decode_extension(data);
    debug!(
        len = reader.len(),
        extension = ?extension,
        "decoded preset record"
    );
    Ok(Program::from_parts(values, sequencer, extension))
}

fn read_field(reader: &ByteReader<'_>, desc: &FieldDescriptor) -> FieldValue {
    match (desc.width, desc.domain) {
        (Width::Ascii(_), _) => {
            FieldValue::Text(reader.read_tag(desc.byte_range()).unwrap_or_default())
        }
        (_, Domain::Flag) => FieldValue::Flag(reader.read_u8(desc.offset).unwrap_or(0)),
        (_, Domain::Packed { shift, .. }) => {
            let byte = reader.read_u8(desc.offset).unwrap_or(0);
            FieldValue::Number(u16::from(unpack_bits(byte, shift, PACKED_TYPE_MASK)))
        }
        (Width::Word, _) => FieldValue::Number(reader.read_u16_le(desc.offset).unwrap_or(0)),
        (Width::Byte, _) => FieldValue::Number(u16::from(reader.read_u8(desc.offset).unwrap_or(0))),
    }
}

#[cfg(test)]
mod tests {
    use super::decode_program;
    use crate::format::program::error::{Degradation, StructuralFault};
    use crate::format::program::layout::{
        END_MARKER_RANGE, HEADER_RANGE, NAME_RANGE, PROGRAM_LEN, USER_PARAM56_TYPE_OFFSET,
        USER_PARAM1234_TYPE_OFFSET,
    };
    use crate::format::program::table::{FIELD_COUNT, FieldId};
    use crate::format::sequencer::layout::{LEGACY_LAYOUT, SHORT_LAYOUT};
    use crate::model::{ExtensionStatus, FieldValue};

    fn blank_record() -> Vec<u8> {
        let mut data = vec![0u8; PROGRAM_LEN];
        data[HEADER_RANGE].copy_from_slice(b"PROG");
        data[END_MARKER_RANGE].copy_from_slice(b"PRED");
        data
    }

    #[test]
    fn zero_body_decodes_cleanly() {
        let program = decode_program(&blank_record()).expect("decode");
        assert_eq!(program.fields().count(), FIELD_COUNT);
        assert_eq!(program.text(FieldId::Header), "PROG");
        assert_eq!(program.text(FieldId::ProgramEndMarker), "PRED");
        assert_eq!(program.name(), "");
        assert_eq!(program.extension(), &ExtensionStatus::Absent);
        assert!(program.sequencer().is_none());
    }

    #[test]
    fn short_buffers_are_structural_faults() {
        for len in [0usize, 1, 4, 100, PROGRAM_LEN - 1] {
            let data = vec![0u8; len];
            let err = decode_program(&data).unwrap_err();
            assert_eq!(
                err,
                StructuralFault::TooShort {
                    needed: PROGRAM_LEN,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn tags_are_not_validated() {
        let mut data = blank_record();
        data[HEADER_RANGE].copy_from_slice(b"XXXX");
        data[END_MARKER_RANGE].copy_from_slice(b"\0\0\0\0");
        let program = decode_program(&data).expect("decode");
        assert_eq!(program.text(FieldId::Header), "XXXX");
        assert_eq!(program.text(FieldId::ProgramEndMarker), "");
    }

    #[test]
    fn reads_name_words_and_flags() {
        let mut data = blank_record();
        data[NAME_RANGE][..8].copy_from_slice(b"Lead 1\0\0");
        data[24..26].copy_from_slice(&600u16.to_le_bytes());
        data[18] = 1;
        data[34] = 7;
        let program = decode_program(&data).expect("decode");
        assert_eq!(program.name(), "Lead 1");
        assert_eq!(program.raw(FieldId::Vco1Pitch), 600);
        assert!(program.flag(FieldId::KeyTrig));
        assert_eq!(program.value(FieldId::OscillatorSync), &FieldValue::Flag(7));
    }

    #[test]
    fn unpacks_user_param_types_low_bits_first() {
        let mut data = blank_record();
        data[USER_PARAM1234_TYPE_OFFSET] = 0b11_10_01_00;
        data[USER_PARAM56_TYPE_OFFSET] = 0b0000_10_01;
        let program = decode_program(&data).expect("decode");
        assert_eq!(program.raw(FieldId::UserParam1234Type), 0b11_10_01_00);
        assert_eq!(program.raw(FieldId::UserParam1Type), 0);
        assert_eq!(program.raw(FieldId::UserParam2Type), 1);
        assert_eq!(program.raw(FieldId::UserParam3Type), 2);
        assert_eq!(program.raw(FieldId::UserParam4Type), 3);
        assert_eq!(program.raw(FieldId::UserParam5Type), 1);
        assert_eq!(program.raw(FieldId::UserParam6Type), 2);
    }

    #[test]
    fn unknown_ordinals_pass_through() {
        let mut data = blank_record();
        data[22] = 9;
        data[122] = 200;
        let program = decode_program(&data).expect("decode");
        assert_eq!(program.raw(FieldId::Vco1Wave), 9);
        assert_eq!(program.raw(FieldId::MicroTuning), 200);
        let fields: Vec<_> = program
            .degradations()
            .into_iter()
            .map(|d| d.to_string())
            .collect();
        assert!(fields.contains(&"vco1_wave: ordinal 9 has no label".to_string()));
        assert!(fields.contains(&"micro_tuning: ordinal 200 has no label".to_string()));
    }

    #[test]
    fn unknown_extension_keeps_base_model() {
        let mut data = blank_record();
        data.extend_from_slice(b"JUNK0000");
        data[NAME_RANGE][..4].copy_from_slice(b"Keep");
        let program = decode_program(&data).expect("decode");
        assert_eq!(program.name(), "Keep");
        assert!(program.sequencer().is_none());
        assert_eq!(
            program.extension(),
            &ExtensionStatus::UnknownTag("JUNK".to_string())
        );
    }

    #[test]
    fn truncated_extension_is_a_degradation() {
        for (tag, needed) in [
            (&b"SQ"[..], SHORT_LAYOUT.total_len()),
            (&b"SEQD"[..], LEGACY_LAYOUT.total_len()),
        ] {
            let mut data = blank_record();
            data.extend_from_slice(tag);
            data.resize(PROGRAM_LEN + 40, 0);
            let program = decode_program(&data).expect("decode");
            assert!(program.sequencer().is_some());
            assert_eq!(
                program.extension(),
                &ExtensionStatus::Truncated {
                    needed,
                    actual: PROGRAM_LEN + 40
                }
            );
            assert_eq!(
                program.degradations(),
                vec![Degradation::PartialExtension {
                    needed,
                    actual: PROGRAM_LEN + 40
                }]
            );
        }
    }
}
