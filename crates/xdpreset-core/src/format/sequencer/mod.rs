//! Optional step-sequencer extension following the fixed region.
//!
//! Two wire variants exist, told apart by the tag at offset 160: the short
//! `"SQ"` form with per-slot motion step masks, and the older `"SEQD"` form
//! whose steps are implicitly all active.

pub(crate) mod encoder;
pub mod layout;
pub(crate) mod parser;
