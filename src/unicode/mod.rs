//! Unicode utilities: column widths, compose characters, and bidi tables.

mod bidi;
mod compose;
mod width;

pub use bidi::{BidiTable, Direction, detect_base_direction, inset_placeholder};
pub use compose::is_compose_char;
pub use width::{WidthMethod, char_columns, is_wide, str_columns};
