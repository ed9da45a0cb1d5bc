//! Document rendering (part documents, index, anchors)

pub mod anchor;
pub mod document;
pub mod index;
pub mod markdown;

pub use anchor::anchor_id;
pub use document::{part_file_name, DocumentEntry, OutputDocument, RenderContext, INDEX_FILE_NAME};
pub use index::{render_index, usage_command, write_index, IndexTotals};
pub use markdown::{format_code_block, number_lines, write_part, write_part_to};
