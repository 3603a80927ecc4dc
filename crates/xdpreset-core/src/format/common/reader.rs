use std::ops::Range;

/// Bounds-checked little-endian reads over a preset buffer.
///
/// Every read returns `None` when the requested bytes run past the end of
/// the buffer. The fixed region is length-checked once up front, so only the
/// extension decoder ever observes a `None` and substitutes zero defaults.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn read_u8(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    pub(crate) fn read_u16_le(&self, offset: usize) -> Option<u16> {
        let bytes = self.read_slice(offset..offset.checked_add(2)?)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_slice(&self, range: Range<usize>) -> Option<&'a [u8]> {
        self.data.get(range)
    }

    pub(crate) fn read_tag(&self, range: Range<usize>) -> Option<String> {
        self.read_slice(range).map(decode_tag)
    }

    /// Reads `N` consecutive bytes, zero-filling whatever lies past the end.
    pub(crate) fn read_array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        for (idx, slot) in out.iter_mut().enumerate() {
            *slot = self.read_u8(offset + idx).unwrap_or(0);
        }
        out
    }
}

/// Decodes a NUL-padded ASCII tag.
///
/// Bytes map one-to-one onto chars (Latin-1) so that re-encoding is
/// lossless even for non-ASCII garbage; only trailing NULs are stripped.
pub(crate) fn decode_tag(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|b| *b != 0)
        .map(|idx| idx + 1)
        .unwrap_or(0);
    bytes[..end].iter().map(|b| char::from(*b)).collect()
}

/// Encodes a tag into a fixed-width NUL-padded field.
pub(crate) fn encode_tag(text: &str, out: &mut [u8]) {
    out.fill(0);
    for (slot, ch) in out.iter_mut().zip(text.chars()) {
        *slot = u8::try_from(u32::from(ch)).unwrap_or(b'?');
    }
}

pub(crate) fn unpack_bits(byte: u8, shift: u8, mask: u8) -> u8 {
    (byte >> shift) & mask
}

pub(crate) fn pack_bits(byte: u8, value: u8, shift: u8, mask: u8) -> u8 {
    (byte & !(mask << shift)) | ((value & mask) << shift)
}
