mod input;
mod item;
mod render;
mod state;

use std::io::{self, Write};

use crate::error::MenuError;
use crate::model::{ResultSet, Verbosity};
use crate::view::{ClearableWriter, HiddenCursor};

pub use input::{Command, KeySource, Keypress, ScriptedKeys, TerminalKeys, KEY_DOWN, KEY_UP};
pub use item::{build_rows, Row, RowKind};
pub use render::{render_interactive_row, render_row, INSTRUCTIONS, TABLE_HEADING};
pub use state::{MenuState, Selection};

/// A menu over a release result set.
///
/// `print` writes a one-off listing; `run` lets the user deselect container
/// updates and returns what is still selected once they hit Enter.
pub struct Menu<W: Write> {
    out: ClearableWriter<W>,
    state: MenuState,
}

impl<W: Write> Menu<W> {
    /// Menu writing to `out`, showing resources visible at `verbosity`.
    pub fn new(out: W, results: &ResultSet, verbosity: Verbosity) -> Self {
        Self::with_writer(ClearableWriter::new(out), results, verbosity)
    }

    pub fn with_writer(out: ClearableWriter<W>, results: &ResultSet, verbosity: Verbosity) -> Self {
        Self::from_rows(out, build_rows(results, verbosity))
    }

    pub fn from_rows(out: ClearableWriter<W>, rows: Vec<Row>) -> Self {
        Self { out, state: MenuState::new(rows) }
    }

    pub fn rows(&self) -> &[Row] {
        self.state.rows()
    }

    pub fn selectable_count(&self) -> usize {
        self.state.selectable_count()
    }

    pub fn print(&mut self) -> io::Result<()> {
        render::print_table(&mut self.out, self.state.rows())
    }

    /// Interactive mode. Blocks on `keys` until the user confirms or quits.
    pub fn run<K: KeySource>(&mut self, keys: &mut K) -> Result<Selection, MenuError> {
        if self.state.selectable_count() == 0 {
            return Err(MenuError::NoChanges);
        }

        render::print_interactive(&mut self.out, &self.state)?;
        let mut out = HiddenCursor::new(&mut self.out)?;

        loop {
            let key = keys.read_key().map_err(MenuError::Input)?;
            let Some(command) = Command::from_keypress(key) else {
                tracing::trace!(?key, "unbound key");
                continue;
            };
            tracing::trace!(?command, cursor = self.state.cursor(), "menu command");

            match command {
                Command::Quit => return Err(MenuError::Aborted),
                Command::Toggle => self.state.toggle_selected(),
                Command::Next => self.state.cursor_down(),
                Command::Previous => self.state.cursor_up(),
                Command::Confirm => {
                    out.writeln("")?;
                    out.flush()?;
                    return Ok(self.state.selection());
                }
            }
            render::print_interactive(&mut *out, &self.state)?;
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner()
    }
}
