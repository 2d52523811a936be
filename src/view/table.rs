use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

/// Buffers tab-separated text and writes it out column-aligned on flush.
///
/// Every `\t` terminates a cell. The trailing cell of a line is not part of
/// any column. Consecutive lines that all have a cell in column `n` form a
/// block, and every cell in a block is padded to the block's widest cell
/// plus `padding` spaces. A line with fewer cells ends the block.
pub struct TableWriter<W: Write> {
    out: W,
    padding: usize,
    buf: Vec<u8>,
}

impl<W: Write> TableWriter<W> {
    pub fn new(out: W, padding: usize) -> Self {
        Self { out, padding, buf: Vec::new() }
    }

    /// Direct access to the underlying writer, bypassing the table buffer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Flush pending text and hand back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.out)
    }

    /// Flush like [`Write::flush`], returning the display width of every
    /// line written, measured after alignment.
    pub fn flush_widths(&mut self) -> io::Result<Vec<usize>> {
        let widths = self.write_table()?;
        self.out.flush()?;
        Ok(widths)
    }

    fn write_table(&mut self) -> io::Result<Vec<usize>> {
        if self.buf.is_empty() {
            return Ok(Vec::new());
        }
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();

        let terminated = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(&text);
        let lines: Vec<Vec<&str>> = body.split('\n').map(|l| l.split('\t').collect()).collect();

        let mut formatted = String::with_capacity(text.len());
        let mut widths = Vec::new();
        self.format(&mut formatted, &mut widths, &lines, 0, lines.len());

        if !terminated {
            formatted.pop();
        }
        self.out.write_all(formatted.as_bytes())?;
        Ok(formatted.split_terminator('\n').map(UnicodeWidthStr::width).collect())
    }

    fn format(&self, out: &mut String, widths: &mut Vec<usize>, lines: &[Vec<&str>], mut line0: usize, line1: usize) {
        let column = widths.len();
        let mut this = line0;
        while this < line1 {
            if column >= lines[this].len() - 1 {
                this += 1;
                continue;
            }

            // Lines above the block are already fully aligned.
            write_lines(out, widths, &lines[line0..this]);
            line0 = this;

            let mut width = 0;
            while this < line1 && column < lines[this].len() - 1 {
                width = width.max(lines[this][column].width() + self.padding);
                this += 1;
            }

            widths.push(width);
            self.format(out, widths, lines, line0, this);
            widths.pop();
            line0 = this;
        }
        write_lines(out, widths, &lines[line0..line1]);
    }
}

fn write_lines(out: &mut String, widths: &[usize], lines: &[Vec<&str>]) {
    for line in lines {
        for (j, cell) in line.iter().enumerate() {
            out.push_str(cell);
            if let Some(&width) = widths.get(j) {
                if j < line.len() - 1 {
                    let pad = width.saturating_sub(cell.width());
                    out.extend(std::iter::repeat_n(' ', pad));
                }
            }
        }
        out.push('\n');
    }
}

impl<W: Write> Write for TableWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_widths().map(|_| ())
    }
}
