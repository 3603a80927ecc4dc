//! Wire format of a preset record.
//!
//! Each part follows the same layered structure:
//! - `layout`: byte offsets, ranges and bit positions
//! - `table` (program only): the ordered field table every codec pass walks
//! - `parser` / `encoder`: bytes to model and back, no direct I/O
//! - `error`: structural faults and non-fatal degradations
//!
//! Shared byte access lives in `common::reader`.

pub(crate) mod common;
pub mod program;
pub mod sequencer;
