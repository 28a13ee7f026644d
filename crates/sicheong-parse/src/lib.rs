pub mod elements;
pub mod keyword;
pub mod parser;

pub use elements::{Enclosure, Segment, TitleElements};
pub use parser::parse;
pub use parser::title::{extract_display_title, strip_rerun_tags};
