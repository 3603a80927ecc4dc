pub const PROGRAM_LEN: usize = 160;

pub const HEADER_RANGE: std::ops::Range<usize> = 0..4;
pub const NAME_RANGE: std::ops::Range<usize> = 4..16;
pub const END_MARKER_RANGE: std::ops::Range<usize> = 156..160;

pub const HEADER_TAG: &[u8; 4] = b"PROG";
pub const END_MARKER_TAG: &[u8; 4] = b"PRED";

pub const USER_PARAM56_TYPE_OFFSET: usize = 148;
pub const USER_PARAM1234_TYPE_OFFSET: usize = 149;

pub const PACKED_TYPE_MASK: u8 = 0b11;
pub const USER_PARAM1_TYPE_SHIFT: u8 = 0;
pub const USER_PARAM2_TYPE_SHIFT: u8 = 2;
pub const USER_PARAM3_TYPE_SHIFT: u8 = 4;
pub const USER_PARAM4_TYPE_SHIFT: u8 = 6;
pub const USER_PARAM5_TYPE_SHIFT: u8 = 0;
pub const USER_PARAM6_TYPE_SHIFT: u8 = 2;

pub const EXTENSION_OFFSET: usize = PROGRAM_LEN;
