//! Field codec
//!
//! Leaf helpers shared by the record layer:
//! - wire name translation (snake_case ⇄ camelCase)
//! - separator-delimited dates
//! - vulgar fractions and numeral words
//! - closest-name matching for ingredient lines
//! - unicode escape repair and whitespace cleanup

pub mod date;
pub mod error;
pub mod fraction;
pub mod matching;
pub mod naming;
pub mod text;

pub use date::{DateOrder, parse_date};
pub use error::{CodecError, CodecResult};
pub use fraction::{json_kind, parse_vulgar_fraction, parse_vulgar_fraction_value, read_numeral};
pub use matching::closest_match;
pub use naming::{camel_to_snake, snake_to_camel};
pub use text::{parse_str_unicode, trim_spaces};
