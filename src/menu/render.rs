use std::io::{self, Write};

use crate::view::ClearableWriter;

use super::item::Row;
use super::state::MenuState;

pub const TABLE_HEADING: &str = "CONTROLLER \tSTATUS \tUPDATES";
pub const INSTRUCTIONS: &str =
    "Use arrow keys and [Space] to deselect containers; hit [Enter] to release selected.";

const CURSOR: &str = "\u{21d2}";

/// Table line for a row. Rows continuing the previous row's resource leave
/// the id and status columns blank.
pub fn render_row(row: &Row, inline: bool) -> String {
    if inline {
        format!("\t\t{}", row.description())
    } else {
        format!("{}\t{}\t{}", row.id, row.status, row.description())
    }
}

pub fn render_interactive_row(row: &Row, inline: bool, at_cursor: bool) -> String {
    let pointer = if at_cursor { CURSOR } else { " " };
    format!("{}{} {}", pointer, row.checkbox(), render_row(row, inline))
}

/// Static listing: heading plus one line per row.
pub fn print_table<W: Write>(out: &mut ClearableWriter<W>, rows: &[Row]) -> io::Result<()> {
    out.writeln(TABLE_HEADING)?;
    let mut prev = None;
    for row in rows {
        let inline = prev == Some(&row.id);
        out.writeln(&render_row(row, inline))?;
        prev = Some(&row.id);
    }
    out.flush()
}

/// Overwrite the previous frame with the current menu state.
pub fn print_interactive<W: Write>(out: &mut ClearableWriter<W>, state: &MenuState) -> io::Result<()> {
    out.clear()?;
    out.writeln(&format!("   {}", TABLE_HEADING))?;
    let cursor_row = state.cursor_row();
    let mut prev = None;
    for (idx, row) in state.rows().iter().enumerate() {
        let inline = prev == Some(&row.id);
        out.writeln(&render_interactive_row(row, inline, cursor_row == Some(idx)))?;
        prev = Some(&row.id);
    }
    out.writeln("")?;
    out.writeln(INSTRUCTIONS)?;
    out.flush()
}
