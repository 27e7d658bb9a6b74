//! Read access to an encoded reversed-suffix trie.
//!
//! Layout, one record after another, all links little-endian `u16` offsets:
//!
//! - **branch**: `(symbol | 0x40, lo, hi)` then `(symbol, lo, hi)`* then `0`.
//!   Symbols ascend.
//! - **chain**: `symbol+` then `0`; the child record follows immediately.
//! - **terminal**: `0x80 | backspaces`, the replacement text, then `0`.
//!
//! Paths are typos read last letter first, so a walk starts at the most
//! recently typed symbol. Every link points forward, which makes validation
//! a single bounded pass.

use serde::Serialize;

use super::{DictionaryError, BRANCH_FLAG, CODE_MASK, LEAF_FLAG};
use crate::keycode::{is_symbol, symbol_char, BOUNDARY_SYMBOL};

/// Deepest path accepted when validating a table.
const MAX_DEPTH: usize = 255;

/// Position in the trie: the offset of the next byte to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieCursor {
    offset: usize,
    depth: usize,
}

impl TrieCursor {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of symbols consumed from the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.depth == 0
    }
}

/// Payload of a matched typo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal<'a> {
    pub backspaces: u8,
    pub replacement: &'a str,
    /// Symbols consumed to reach the terminal, boundaries included.
    pub depth: usize,
}

/// Result of following one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Edge(TrieCursor),
    Terminal(Terminal<'a>),
    Dead,
}

/// A dictionary entry recovered from an encoded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEntry {
    pub typo: String,
    pub correction: String,
    pub backspaces: u8,
    pub replacement: String,
}

/// A validated encoded trie over any byte storage.
///
/// `B` is usually `Vec<u8>` (compiled or loaded at runtime) or
/// `&'static [u8]` (a table baked into the binary).
#[derive(Debug, Clone)]
pub struct EncodedDictionary<B = Vec<u8>> {
    data: B,
    min_len: usize,
    max_len: usize,
    entry_count: usize,
}

struct Stats {
    min_len: usize,
    max_len: usize,
    entry_count: usize,
}

impl<B: AsRef<[u8]>> EncodedDictionary<B> {
    /// Validate `data` as a trie table.
    pub fn from_raw(data: B) -> Result<Self, DictionaryError> {
        let stats = validate(data.as_ref())?;
        Ok(Self {
            data,
            min_len: stats.min_len,
            max_len: stats.max_len,
            entry_count: stats.entry_count,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Table size in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Shortest typo, in symbols (sentinels count as one symbol).
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Longest typo, in symbols. The matcher buffers this many.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn root(&self) -> TrieCursor {
        TrieCursor {
            offset: 0,
            depth: 0,
        }
    }

    /// Follow the edge labelled `symbol` from `cursor`.
    pub fn step(&self, cursor: TrieCursor, symbol: u8) -> Step<'_> {
        let code = self.byte(cursor.offset);
        let next = if code & BRANCH_FLAG != 0 {
            let mut pos = cursor.offset;
            let mut c = code & CODE_MASK;
            loop {
                if c == 0 {
                    return Step::Dead;
                }
                if c == symbol {
                    break self.link(pos + 1);
                }
                pos += 3;
                c = self.byte(pos);
            }
        } else if code == 0 || code != symbol {
            return Step::Dead;
        } else if self.byte(cursor.offset + 1) == 0 {
            // End of chain: the child record starts after the terminator.
            cursor.offset + 2
        } else {
            cursor.offset + 1
        };

        let depth = cursor.depth + 1;
        if next >= self.len() {
            return Step::Dead;
        }
        let head = self.byte(next);
        if head & LEAF_FLAG != 0 {
            Step::Terminal(self.terminal_at(next, depth))
        } else {
            Step::Edge(TrieCursor {
                offset: next,
                depth,
            })
        }
    }

    /// Look up a typo as written in a dictionary source (`:thier`, `teh:`).
    ///
    /// Returns `None` if the typo is absent, or if a shorter entry fires
    /// before the whole typo is consumed.
    pub fn lookup(&self, typo: &str) -> Option<Terminal<'_>> {
        let symbols = super::DictEntry::new(typo, "-").symbols().ok()?;
        let mut cursor = self.root();
        let mut remaining = symbols.len();
        for &symbol in symbols.iter().rev() {
            remaining -= 1;
            match self.step(cursor, symbol) {
                Step::Edge(next) => cursor = next,
                Step::Terminal(t) if remaining == 0 => return Some(t),
                Step::Terminal(_) | Step::Dead => return None,
            }
        }
        None
    }

    /// Recover every entry, in table order (sorted by reversed typo).
    pub fn entries(&self) -> Vec<DecodedEntry> {
        let mut out = Vec::with_capacity(self.entry_count);
        let mut path = Vec::new();
        self.collect(0, &mut path, &mut out);
        out
    }

    fn collect(&self, offset: usize, path: &mut Vec<u8>, out: &mut Vec<DecodedEntry>) {
        let code = self.byte(offset);
        if code & LEAF_FLAG != 0 {
            let terminal = self.terminal_at(offset, path.len());
            out.push(decode_entry(path, terminal));
        } else if code & BRANCH_FLAG != 0 {
            let mut pos = offset;
            let mut c = code & CODE_MASK;
            while c != 0 {
                path.push(c);
                self.collect(self.link(pos + 1), path, out);
                path.pop();
                pos += 3;
                c = self.byte(pos);
            }
        } else {
            let mut pos = offset;
            while self.byte(pos) != 0 {
                path.push(self.byte(pos));
                pos += 1;
            }
            let chain_len = pos - offset;
            self.collect(pos + 1, path, out);
            path.truncate(path.len() - chain_len);
        }
    }

    fn terminal_at(&self, offset: usize, depth: usize) -> Terminal<'_> {
        let data = self.as_bytes();
        let start = offset + 1;
        let end = data[start..]
            .iter()
            .position(|&b| b == 0)
            .map_or(data.len(), |p| start + p);
        Terminal {
            backspaces: self.byte(offset) & CODE_MASK,
            replacement: std::str::from_utf8(&data[start..end]).unwrap_or(""),
            depth,
        }
    }

    /// Out-of-range reads yield the terminator.
    fn byte(&self, offset: usize) -> u8 {
        self.as_bytes().get(offset).copied().unwrap_or(0)
    }

    fn link(&self, offset: usize) -> usize {
        u16::from_le_bytes([self.byte(offset), self.byte(offset + 1)]) as usize
    }
}

/// Rebuild `(typo, correction)` from a reversed path and its terminal.
fn decode_entry(reversed: &[u8], terminal: Terminal<'_>) -> DecodedEntry {
    let forward: Vec<u8> = reversed.iter().rev().copied().collect();
    let boundary_before = forward.first() == Some(&BOUNDARY_SYMBOL);
    let boundary_after = forward.len() > 1 && forward.last() == Some(&BOUNDARY_SYMBOL);
    let word: String = forward
        .iter()
        .filter(|&&s| s != BOUNDARY_SYMBOL)
        .filter_map(|&s| symbol_char(s))
        .collect();

    let mut typo = String::with_capacity(word.len() + 2);
    if boundary_before {
        typo.push(':');
    }
    typo.push_str(&word);
    if boundary_after {
        typo.push(':');
    }

    // backspaces = len - shared - 1 + trailing, solved for `shared`.
    let shared = (word.len() + usize::from(boundary_after))
        .saturating_sub(1)
        .saturating_sub(terminal.backspaces as usize)
        .min(word.len());
    let correction = format!("{}{}", &word[..shared], terminal.replacement);

    DecodedEntry {
        typo,
        correction,
        backspaces: terminal.backspaces,
        replacement: terminal.replacement.to_string(),
    }
}

fn malformed(msg: String) -> DictionaryError {
    DictionaryError::MalformedDictionary(msg)
}

fn validate(data: &[u8]) -> Result<Stats, DictionaryError> {
    if data.is_empty() {
        return Err(malformed("empty table".to_string()));
    }
    if data.len() > u16::MAX as usize + 1 {
        return Err(malformed(format!("{} bytes exceeds link range", data.len())));
    }
    let at = |pos: usize| {
        data.get(pos)
            .copied()
            .ok_or_else(|| malformed(format!("truncated record at offset {pos}")))
    };

    let mut visited = vec![false; data.len()];
    let mut stats = Stats {
        min_len: usize::MAX,
        max_len: 0,
        entry_count: 0,
    };
    let mut stack = vec![(0usize, 0usize)];

    while let Some((offset, depth)) = stack.pop() {
        if depth > MAX_DEPTH {
            return Err(malformed(format!("path deeper than {MAX_DEPTH}")));
        }
        if std::mem::replace(&mut visited[offset], true) {
            return Err(malformed(format!("record at offset {offset} is shared")));
        }
        let code = at(offset)?;

        if code & LEAF_FLAG != 0 {
            if depth == 0 {
                return Err(malformed("root is a terminal".to_string()));
            }
            let backspaces = (code & CODE_MASK) as usize;
            if backspaces > depth {
                return Err(malformed(format!(
                    "terminal at offset {offset} erases {backspaces} of {depth} symbols"
                )));
            }
            let mut pos = offset + 1;
            loop {
                match at(pos)? {
                    0 => break,
                    b if (b' '..=b'~').contains(&b) => pos += 1,
                    b => {
                        return Err(malformed(format!(
                            "non-printable byte {b:#04x} in replacement at offset {pos}"
                        )))
                    }
                }
            }
            stats.entry_count += 1;
            stats.min_len = stats.min_len.min(depth);
            stats.max_len = stats.max_len.max(depth);
        } else if code & BRANCH_FLAG != 0 {
            let mut pos = offset;
            let mut symbol = code & CODE_MASK;
            let mut previous = 0u8;
            if symbol == 0 {
                return Err(malformed(format!("empty branch at offset {offset}")));
            }
            while symbol != 0 {
                if !is_symbol(symbol) {
                    return Err(malformed(format!(
                        "invalid edge symbol {symbol:#04x} at offset {pos}"
                    )));
                }
                if symbol <= previous {
                    return Err(malformed(format!("edges out of order at offset {pos}")));
                }
                let link = u16::from_le_bytes([at(pos + 1)?, at(pos + 2)?]) as usize;
                if link <= offset || link >= data.len() {
                    return Err(malformed(format!(
                        "link {link} at offset {pos} is out of range"
                    )));
                }
                stack.push((link, depth + 1));
                previous = symbol;
                pos += 3;
                symbol = at(pos)?;
                if symbol & !CODE_MASK != 0 {
                    return Err(malformed(format!("flag bits inside branch at offset {pos}")));
                }
            }
        } else {
            let mut pos = offset;
            loop {
                let symbol = at(pos)?;
                if symbol == 0 {
                    break;
                }
                if !is_symbol(symbol) {
                    return Err(malformed(format!(
                        "invalid chain symbol {symbol:#04x} at offset {pos}"
                    )));
                }
                pos += 1;
            }
            if pos == offset {
                return Err(malformed(format!("empty chain at offset {offset}")));
            }
            let child = pos + 1;
            if child >= data.len() {
                return Err(malformed(format!("chain at offset {offset} has no child")));
            }
            stack.push((child, depth + (pos - offset)));
        }
    }

    if stats.entry_count == 0 {
        return Err(malformed("no terminals".to_string()));
    }
    Ok(stats)
}
