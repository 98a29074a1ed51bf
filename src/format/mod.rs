//! Display helpers: Indian digit grouping and amounts in words

mod grouping;
mod words;

pub use grouping::{format_compact, format_indian_groups, format_rupees, parse_formatted_number};
pub use words::{amount_in_words, integer_to_words, title_case, to_indian_words};
