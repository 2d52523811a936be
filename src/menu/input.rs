use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Platform key code for the down arrow.
pub const KEY_DOWN: u16 = 40;
/// Platform key code for the up arrow.
pub const KEY_UP: u16 = 38;

const CTRL_C: u8 = 3;
const TAB: u8 = 9;
const ENTER: u8 = 13;
const ESCAPE: u8 = 27;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A single decoded keypress: character code plus platform key code.
/// Either may be zero when it does not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Keypress {
    pub ascii: u8,
    pub key_code: u16,
}

impl Keypress {
    pub fn ascii(ascii: u8) -> Self {
        Self { ascii, key_code: 0 }
    }

    pub fn code(key_code: u16) -> Self {
        Self { ascii: 0, key_code }
    }

    pub fn from_key_event(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic() => {
                Self::ascii(c.to_ascii_lowercase() as u8 - b'a' + 1)
            }
            KeyCode::Char(c) if c.is_ascii() => Self::ascii(c as u8),
            KeyCode::Esc => Self::ascii(ESCAPE),
            KeyCode::Enter => Self::ascii(ENTER),
            KeyCode::Tab => Self::ascii(TAB),
            KeyCode::Down => Self::code(KEY_DOWN),
            KeyCode::Up => Self::code(KEY_UP),
            _ => Self::default(),
        }
    }
}

/// What a keypress asks the menu to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Toggle,
    Confirm,
    Next,
    Previous,
}

impl Command {
    pub fn from_keypress(key: Keypress) -> Option<Self> {
        match key.ascii {
            CTRL_C | ESCAPE | b'q' => Some(Command::Quit),
            b' ' => Some(Command::Toggle),
            ENTER => Some(Command::Confirm),
            TAB | b'j' => Some(Command::Next),
            b'k' => Some(Command::Previous),
            _ => match key.key_code {
                KEY_DOWN => Some(Command::Next),
                KEY_UP => Some(Command::Previous),
                _ => None,
            },
        }
    }
}

/// Blocking source of keypresses, one per call.
pub trait KeySource {
    fn read_key(&mut self) -> io::Result<Keypress>;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn read_key(&mut self) -> io::Result<Keypress> {
        (**self).read_key()
    }
}

/// Reads keys from the controlling terminal.
///
/// Raw mode is only held while waiting for a key, so everything written
/// between reads keeps normal line discipline.
pub struct TerminalKeys {
    should_quit: Arc<AtomicBool>,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self::with_quit_flag(Arc::new(AtomicBool::new(false)))
    }

    /// Reads fail with `Interrupted` once `should_quit` is raised.
    pub fn with_quit_flag(should_quit: Arc<AtomicBool>) -> Self {
        Self { should_quit }
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<Keypress> {
        let _raw = RawMode::enable()?;
        loop {
            if self.should_quit.load(Ordering::Relaxed) {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by signal"));
            }
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                return Ok(Keypress::from_key_event(key));
            }
        }
    }
}

/// Restore the terminal's line discipline on drop.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Replays a fixed sequence of keys, then fails with `UnexpectedEof`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Keypress>,
    consumed: usize,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Keypress>) -> Self {
        Self { keys: keys.into_iter().collect(), consumed: 0 }
    }

    /// One keypress per byte of `keys`.
    pub fn from_ascii(keys: &str) -> Self {
        Self::new(keys.bytes().map(Keypress::ascii))
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<Keypress> {
        let key = self
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))?;
        self.consumed += 1;
        Ok(key)
    }
}
