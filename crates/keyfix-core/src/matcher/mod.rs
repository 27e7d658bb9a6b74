//! Incremental autocorrect matcher.
//!
//! `MatcherState` is owned by whoever runs the key-event loop and is fed
//! one `KeyInput` per key press. Each press re-walks the encoded trie from
//! the root over the buffered symbols, most recent first; the walk is
//! bounded by the buffer capacity (the longest typo), so a keystroke costs
//! at most `max_len` edge steps.

mod action;
mod buffer;

pub use action::{CorrectionAction, EditSink};
pub use buffer::TypedBuffer;

use serde::Deserialize;
use tracing::debug;

use crate::dict::{EncodedDictionary, Step, Terminal, TrieCursor};
use crate::keycode::{letter_symbol, BOUNDARY_SYMBOL};

/// What a single key press means to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A letter, as its trie symbol.
    Letter(u8),
    /// Space, digits, punctuation. With `reset`, the preceding word is
    /// dropped first so it cannot complete a trailing-boundary typo (enter,
    /// underscore).
    Boundary { reset: bool },
    Backspace,
    /// Navigation, function keys, shortcuts: the cursor may have moved.
    Other,
}

impl KeyInput {
    /// Interpret a typed character.
    pub fn from_char(c: char) -> Self {
        match c {
            _ if c.is_ascii_alphabetic() => letter_symbol(c).map_or(Self::Other, Self::Letter),
            '\n' | '\r' | '_' => Self::Boundary { reset: true },
            '\u{8}' => Self::Backspace,
            ' '..='~' | '\t' => Self::Boundary { reset: false },
            _ => Self::Other,
        }
    }
}

/// What a user backspace does to the tracked word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackspacePolicy {
    /// Drop the last symbol and re-walk the rest.
    #[default]
    Pop,
    /// Drop the whole word.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// No trie edge matches the recent input.
    Idle,
    /// The recent input is a proper suffix path of at least one typo.
    Tracking,
}

/// Per-session matcher state.
#[derive(Debug, Clone)]
pub struct MatcherState {
    buffer: TypedBuffer,
    cursor: Option<TrieCursor>,
    boundaries_seen: u64,
    enabled: bool,
    backspace: BackspacePolicy,
}

impl MatcherState {
    /// A fresh, enabled matcher positioned at the start of a word.
    pub fn new(capacity: usize) -> Self {
        let mut buffer = TypedBuffer::new(capacity);
        buffer.reset_to_boundary();
        Self {
            buffer,
            cursor: None,
            boundaries_seen: 0,
            enabled: true,
            backspace: BackspacePolicy::default(),
        }
    }

    /// Matcher sized for the longest typo in `dict`.
    pub fn for_dictionary<B: AsRef<[u8]>>(dict: &EncodedDictionary<B>) -> Self {
        Self::new(dict.max_len())
    }

    pub fn with_backspace_policy(mut self, policy: BackspacePolicy) -> Self {
        self.backspace = policy;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enabling or disabling always drops tracked input, so a re-enabled
    /// matcher starts idle.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.reset();
    }

    /// Flip the enabled flag, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Forget all typed input. The next word has no known start.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = None;
    }

    pub fn phase(&self) -> MatchPhase {
        match self.cursor {
            Some(_) => MatchPhase::Tracking,
            None => MatchPhase::Idle,
        }
    }

    /// Deepest trie node reached by the last walk, `None` at the root.
    pub fn cursor(&self) -> Option<TrieCursor> {
        self.cursor
    }

    pub fn buffer(&self) -> &TypedBuffer {
        &self.buffer
    }

    /// Word boundaries seen since the matcher was created.
    pub fn boundaries_seen(&self) -> u64 {
        self.boundaries_seen
    }

    /// Process one key press against `dict`.
    ///
    /// Returns the edit to apply when the press completes a typo. The caller
    /// must replay it in full before handling the next key.
    pub fn process_keystroke<B: AsRef<[u8]>>(
        &mut self,
        dict: &EncodedDictionary<B>,
        input: KeyInput,
    ) -> Option<CorrectionAction> {
        if !self.enabled {
            self.reset();
            return None;
        }

        match input {
            KeyInput::Letter(symbol) => self.push_and_match(dict, symbol),
            KeyInput::Boundary { reset } => {
                if reset {
                    self.buffer.clear();
                }
                self.boundaries_seen += 1;
                self.push_and_match(dict, BOUNDARY_SYMBOL)
            }
            KeyInput::Backspace => {
                match self.backspace {
                    BackspacePolicy::Pop => {
                        self.buffer.pop();
                        self.cursor = self.walk(dict).0;
                    }
                    BackspacePolicy::Reset => self.reset(),
                }
                None
            }
            KeyInput::Other => {
                self.reset();
                None
            }
        }
    }

    fn push_and_match<B: AsRef<[u8]>>(
        &mut self,
        dict: &EncodedDictionary<B>,
        symbol: u8,
    ) -> Option<CorrectionAction> {
        self.buffer.push(symbol);

        let is_boundary = symbol == BOUNDARY_SYMBOL;
        let (cursor, terminal) = self.walk(dict);
        let Some(terminal) = terminal else {
            if is_boundary {
                // Sentinels only sit at the ends of a typo, so nothing typed
                // before a boundary can take part in a later match.
                self.buffer.reset_to_boundary();
                self.cursor = self.walk(dict).0;
            } else {
                self.cursor = cursor;
            }
            return None;
        };

        let action = CorrectionAction {
            backspaces: terminal.backspaces,
            replacement: terminal.replacement.to_string(),
            consumes_trigger: !is_boundary,
        };
        debug!(
            backspaces = action.backspaces,
            replacement = %action.replacement,
            depth = terminal.depth,
            "autocorrect"
        );

        // A swallowed letter leaves us mid-word; a delivered boundary
        // starts the next word.
        if is_boundary {
            self.buffer.reset_to_boundary();
        } else {
            self.buffer.clear();
        }
        self.cursor = None;
        Some(action)
    }

    /// Walk the buffer most recent first. Returns the deepest non-terminal
    /// node reached, or the terminal if one completes.
    fn walk<'d, B: AsRef<[u8]>>(
        &self,
        dict: &'d EncodedDictionary<B>,
    ) -> (Option<TrieCursor>, Option<Terminal<'d>>) {
        let mut cursor = dict.root();
        let mut deepest = None;
        for symbol in self.buffer.iter_recent_first() {
            match dict.step(cursor, symbol) {
                Step::Edge(next) => {
                    cursor = next;
                    deepest = Some(next);
                }
                Step::Terminal(t) => return (None, Some(t)),
                Step::Dead => break,
            }
        }
        (deepest, None)
    }
}
