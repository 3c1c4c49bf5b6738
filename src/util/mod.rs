//! Utility modules

pub mod text;
pub mod wrap;

pub use text::{remove_last_word, word_end_after, word_start_before};
pub use wrap::wrap_lines;
