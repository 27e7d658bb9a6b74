use serde::Serialize;

use super::DictionaryError;
use crate::keycode::{letter_symbol, BOUNDARY_SYMBOL};

/// A `typo -> correction` pair.
///
/// The typo is kept lowercase with its word-boundary sentinels: a leading
/// `:` restricts the match to the start of a word, a trailing `:` to the
/// end of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DictEntry {
    pub typo: String,
    pub correction: String,
}

impl DictEntry {
    pub fn new(typo: &str, correction: &str) -> Self {
        Self {
            typo: typo.trim().to_ascii_lowercase(),
            correction: correction.trim().to_string(),
        }
    }

    /// The typo's letters without sentinels.
    pub fn word(&self) -> &str {
        let s = self.typo.strip_prefix(':').unwrap_or(&self.typo);
        s.strip_suffix(':').unwrap_or(s)
    }

    pub fn boundary_before(&self) -> bool {
        self.typo.starts_with(':')
    }

    pub fn boundary_after(&self) -> bool {
        self.typo.len() > 1 && self.typo.ends_with(':')
    }

    /// Trie symbols in typing order, boundaries included.
    pub(crate) fn symbols(&self) -> Result<Vec<u8>, DictionaryError> {
        let mut symbols = Vec::with_capacity(self.typo.len());
        if self.boundary_before() {
            symbols.push(BOUNDARY_SYMBOL);
        }
        for ch in self.word().chars() {
            match letter_symbol(ch) {
                Some(s) if ch.is_ascii_lowercase() => symbols.push(s),
                _ => {
                    return Err(DictionaryError::InvalidCharacter {
                        typo: self.typo.clone(),
                        ch,
                    })
                }
            }
        }
        if self.boundary_after() {
            symbols.push(BOUNDARY_SYMBOL);
        }
        Ok(symbols)
    }

    pub(crate) fn validate_correction(&self) -> Result<(), DictionaryError> {
        let reason = if self.correction.is_empty() {
            "empty"
        } else if !self.correction.bytes().all(|b| (b' '..=b'~').contains(&b)) {
            "only printable ASCII can be retyped"
        } else {
            return Ok(());
        };
        Err(DictionaryError::InvalidCorrection {
            typo: self.typo.clone(),
            reason: reason.to_string(),
        })
    }

    /// Minimal edit for this entry: how many already-sent characters to
    /// erase, and the text to type afterwards.
    ///
    /// The key that completes a typo has not been sent yet, so only the
    /// letters before it count. A trailing-boundary typo completes on the
    /// boundary key, after every letter was sent.
    ///
    /// Requires a validated entry (non-empty word, ASCII correction).
    pub(crate) fn edit(&self) -> (usize, &str) {
        let word = self.word().as_bytes();
        let shared = word
            .iter()
            .zip(self.correction.as_bytes())
            .take_while(|(a, b)| a == b)
            .count()
            .min(word.len().saturating_sub(1));
        let backspaces = word.len() - shared - 1 + usize::from(self.boundary_after());
        (backspaces, &self.correction[shared..])
    }
}
