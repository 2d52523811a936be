use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use crossterm::{cursor::{Hide, MoveUp, Show}, queue, terminal};
use unicode_width::UnicodeWidthStr;

use super::table::TableWriter;

/// Spaces between aligned columns.
pub const COLUMN_PADDING: usize = 2;

/// Width assumed when the output is not a terminal.
pub const FALLBACK_WIDTH: u16 = 9999;

/// Current terminal width in columns, or [`FALLBACK_WIDTH`] when there is no tty.
pub fn terminal_width() -> u16 {
    terminal::size()
        .ok()
        .map(|(cols, _)| cols)
        .filter(|&cols| cols > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Physical terminal rows a line occupies once wrapped at `width` columns.
pub fn physical_lines(line: &str, width: u16) -> usize {
    wrapped_rows(line.width(), width)
}

/// Rows taken by `cols` columns of output wrapped at `width`; an empty line still takes one.
fn wrapped_rows(cols: usize, width: u16) -> usize {
    cols.div_ceil(usize::from(width.max(1))).max(1)
}

/// Column-aligned line writer that remembers how many rows it has written,
/// so the block can be overwritten in place.
///
/// Rows are counted when the table is flushed, on the aligned text the
/// terminal actually receives.
///
/// The terminal width is sampled once; a resize mid-session leaves the row
/// count stale and the next [`clear`](Self::clear) will land on the wrong row.
pub struct ClearableWriter<W: Write> {
    table: TableWriter<W>,
    lines: usize,
    width: u16,
}

impl<W: Write> ClearableWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_width(out, terminal_width())
    }

    pub fn with_width(out: W, width: u16) -> Self {
        Self {
            table: TableWriter::new(out, COLUMN_PADDING),
            lines: 0,
            width: width.max(1),
        }
    }

    /// Rows flushed to the terminal since the last clear.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn writeln(&mut self, line: &str) -> io::Result<()> {
        self.table.write_all(line.as_bytes())?;
        self.table.write_all(b"\n")
    }

    /// Move the cursor back to the start of the first tracked row.
    pub fn clear(&mut self) -> io::Result<()> {
        self.flush()?;
        if self.lines == 0 {
            return Ok(());
        }
        let rows = u16::try_from(self.lines).unwrap_or(u16::MAX);
        let out = self.table.get_mut();
        queue!(out, MoveUp(rows))?;
        out.write_all(b"\r")?;
        self.lines = 0;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        let widths = self.table.flush_widths()?;
        self.lines += widths.into_iter().map(|cols| wrapped_rows(cols, self.width)).sum::<usize>();
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.flush()?;
        let out = self.table.get_mut();
        if visible {
            queue!(out, Show)?;
        } else {
            queue!(out, Hide)?;
        }
        out.flush()
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.table.into_inner()
    }
}

/// Keeps the terminal cursor hidden until dropped.
pub struct HiddenCursor<'a, W: Write> {
    out: &'a mut ClearableWriter<W>,
}

impl<'a, W: Write> HiddenCursor<'a, W> {
    pub fn new(out: &'a mut ClearableWriter<W>) -> io::Result<Self> {
        out.set_cursor_visible(false)?;
        Ok(Self { out })
    }
}

impl<W: Write> Deref for HiddenCursor<'_, W> {
    type Target = ClearableWriter<W>;

    fn deref(&self) -> &Self::Target {
        self.out
    }
}

impl<W: Write> DerefMut for HiddenCursor<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.out
    }
}

impl<W: Write> Drop for HiddenCursor<'_, W> {
    fn drop(&mut self) {
        let _ = self.out.set_cursor_visible(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(writer: ClearableWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn physical_lines_wraps_at_width() {
        assert_eq!(physical_lines("", 10), 1);
        assert_eq!(physical_lines("abc", 10), 1);
        assert_eq!(physical_lines("0123456789", 10), 1);
        assert_eq!(physical_lines("0123456789a", 10), 2);
        assert_eq!(physical_lines(&"x".repeat(25), 10), 3);
    }

    #[test]
    fn physical_lines_survives_zero_width() {
        assert_eq!(physical_lines("abc", 0), 3);
    }

    #[test]
    fn counts_written_lines() {
        let mut w = ClearableWriter::with_width(Vec::new(), 4);
        w.writeln("ab").unwrap();
        w.writeln("abcdef").unwrap();
        w.writeln("").unwrap();
        assert_eq!(w.lines(), 0, "nothing reaches the terminal before a flush");
        w.flush().unwrap();
        assert_eq!(w.lines(), 4);
    }

    #[test]
    fn counts_rows_after_column_alignment() {
        let mut w = ClearableWriter::with_width(Vec::new(), 10);
        w.writeln("a-very-long-id\tx").unwrap();
        // Three columns raw, but padded out to the long id's cell once aligned.
        w.writeln("\ty").unwrap();
        w.flush().unwrap();
        assert_eq!(w.lines(), 4);
        assert_eq!(output(w), "a-very-long-id  x\n                y\n");
    }

    #[test]
    fn clear_counts_unflushed_lines() {
        let mut w = ClearableWriter::with_width(Vec::new(), 80);
        w.writeln("one").unwrap();
        w.clear().unwrap();
        assert_eq!(output(w), "one\n\x1b[1A\r");
    }

    #[test]
    fn clear_without_lines_is_a_no_op() {
        let mut w = ClearableWriter::with_width(Vec::new(), 80);
        w.clear().unwrap();
        w.flush().unwrap();
        assert_eq!(output(w), "");
    }

    #[test]
    fn clear_moves_up_and_resets() {
        let mut w = ClearableWriter::with_width(Vec::new(), 80);
        w.writeln("one").unwrap();
        w.writeln("two").unwrap();
        w.clear().unwrap();
        assert_eq!(w.lines(), 0);
        assert_eq!(output(w), "one\ntwo\n\x1b[2A\r");
    }

    #[test]
    fn hidden_cursor_is_restored_on_drop() {
        let mut w = ClearableWriter::with_width(Vec::new(), 80);
        {
            let mut hidden = HiddenCursor::new(&mut w).unwrap();
            hidden.writeln("x").unwrap();
        }
        assert_eq!(output(w), "\x1b[?25lx\n\x1b[?25h");
    }
}
