//! Round source: turns input text into normalized [`Round`](crate::models::Round) values.

pub mod io;
pub mod parse;
pub mod shape;

pub use io::load_rounds;
pub use parse::{parse_json_document, parse_json_lines, parse_rounds, InputFormat};
pub use shape::{is_typed_event, normalize_round, DocumentShape, RoundShape};
