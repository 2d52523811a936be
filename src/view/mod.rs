mod clearable;
mod table;

pub use clearable::{
    physical_lines, terminal_width, ClearableWriter, HiddenCursor, COLUMN_PADDING, FALLBACK_WIDTH,
};
pub use table::TableWriter;
