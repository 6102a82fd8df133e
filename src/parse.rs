//!
//! Numeric/boolean token parsing used by the PROJ-string tokenizer.
//!
pub use std::str::FromStr;
