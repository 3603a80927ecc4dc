//! Fixed 160-byte program region.
//!
//! The region opens with the `"PROG"` tag and closes with `"PRED"`; neither
//! is validated, both are reported as decoded. Some fields share a carrier
//! byte (the user-parameter type nibbles), so the encoder writes packed
//! sub-fields after their carriers.

pub mod encoder;
pub mod error;
pub mod layout;
pub mod parser;
pub mod table;

pub use encoder::encode_program;
pub use error::{Degradation, StructuralFault};
pub use parser::decode_program;
