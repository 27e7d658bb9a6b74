//! Autocorrect dictionary: source parsing, trie encoding and binary I/O.
//!
//! `encode` turns `DictEntry` pairs into an `EncodedDictionary`, a flat
//! reversed-suffix trie. `EncodedDictionary::from_raw` validates a table
//! produced elsewhere (firmware header, `.kfac` payload) before it is used.

mod encoded;
mod encoder;
mod entry;
mod io;
mod source;
#[cfg(test)]
mod tests;

pub use encoded::{DecodedEntry, EncodedDictionary, Step, Terminal, TrieCursor};
pub use encoder::{encode, EncoderOptions};
pub use entry::DictEntry;
pub use io::{HEADER_SIZE, MAGIC, VERSION};
pub use source::parse_dictionary;

use std::io as std_io;

/// First byte of a branch node: edges are `(symbol, lo, hi)` triples.
pub(crate) const BRANCH_FLAG: u8 = 0x40;
/// First byte of a terminal: low six bits hold the backspace count.
pub(crate) const LEAF_FLAG: u8 = 0x80;
pub(crate) const CODE_MASK: u8 = 0x3F;

/// Largest backspace count a terminal can carry.
pub const MAX_BACKSPACES: usize = CODE_MASK as usize;
/// Hard ceiling on typo length; a trailing boundary adds one backspace.
pub const MAX_TYPO_LENGTH: usize = MAX_BACKSPACES - 1;

/// Unified error type for building, loading and saving dictionaries.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] std_io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("dictionary has no entries")]
    Empty,

    #[error("typo '{typo}' is too short ({len} < {min})")]
    WordTooShort { typo: String, len: usize, min: usize },

    #[error("typo '{typo}' is too long ({len} > {max})")]
    WordTooLong { typo: String, len: usize, max: usize },

    #[error("duplicate typo '{0}'")]
    DuplicateEntry(String),

    #[error("typo '{typo}' contains invalid character {ch:?}")]
    InvalidCharacter { typo: String, ch: char },

    #[error("correction for '{typo}' is invalid: {reason}")]
    InvalidCorrection { typo: String, reason: String },

    #[error("typo '{typo}' can never match: '{shadowed_by}' always fires first")]
    ShadowedEntry { typo: String, shadowed_by: String },

    #[error("typing correction '{correction}' (for '{typo}') triggers another correction")]
    CorrectionTriggersTypo { typo: String, correction: String },

    #[error("encoded trie is {0} bytes, links are limited to 65535")]
    TooLarge(usize),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected KFAC)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (header {expected:#010x}, payload {actual:#010x})")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("malformed dictionary: {0}")]
    MalformedDictionary(String),
}
