//! Document model types.
//!
//! These types sit between line classification and HTML rendering: the
//! parser produces a [`Document`] of headings, list blocks, table blocks and
//! closed sections, and the renderer turns it into markup.

mod block;
mod heading;
mod list;
mod section;
mod table;

pub use block::{Block, Document, Section};
pub use heading::{
    clamp_level, generate_id, unique_id, Heading, Outline, MAX_HEADING_LEVEL, MAX_ID_LEN,
    MIN_HEADING_LEVEL,
};
pub use list::{ListBlock, ListKind};
pub use section::SectionTag;
pub use table::{is_separator_row, split_cells, Delimiter, TableBlock};
