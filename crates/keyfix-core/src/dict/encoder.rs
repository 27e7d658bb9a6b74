use std::collections::{BTreeMap, HashMap};

use tracing::{debug, debug_span};

use super::{
    DictEntry, DictionaryError, EncodedDictionary, BRANCH_FLAG, LEAF_FLAG, MAX_TYPO_LENGTH,
};
use crate::matcher::{KeyInput, MatcherState};
use crate::settings::{settings, DictionarySettings};

/// Typo length bounds, in letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    pub min_len: usize,
    pub max_len: usize,
}

impl From<&DictionarySettings> for EncoderOptions {
    fn from(s: &DictionarySettings) -> Self {
        Self {
            min_len: s.min_typo_length,
            max_len: s.max_typo_length,
        }
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::from(&settings().dictionary)
    }
}

#[derive(Default)]
struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    leaf: Option<usize>,
}

impl TrieNode {
    fn first_leaf(&self) -> Option<usize> {
        self.leaf
            .or_else(|| self.children.values().find_map(TrieNode::first_leaf))
    }
}

enum Record<'a> {
    Leaf { backspaces: u8, text: &'a str },
    Chain { symbols: Vec<u8> },
    Branch { edges: Vec<(u8, usize)> },
}

impl Record<'_> {
    fn size(&self) -> usize {
        match self {
            Record::Leaf { text, .. } => text.len() + 2,
            Record::Chain { symbols } => symbols.len() + 1,
            Record::Branch { edges } => edges.len() * 3 + 1,
        }
    }
}

/// Encode `entries` into a reversed-suffix trie.
///
/// Fails on the first invalid entry. The output depends only on the set of
/// entries, not their order, so re-encoding is byte-identical.
pub fn encode(
    entries: &[DictEntry],
    opts: &EncoderOptions,
) -> Result<EncodedDictionary, DictionaryError> {
    let _span = debug_span!("encode", entries = entries.len()).entered();

    if entries.is_empty() {
        return Err(DictionaryError::Empty);
    }
    let min_len = opts.min_len.max(1);
    let max_len = opts.max_len.min(MAX_TYPO_LENGTH);

    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(entries.len());
    let mut root = TrieNode::default();

    for (idx, entry) in entries.iter().enumerate() {
        let len = entry.word().chars().count();
        if len < min_len {
            return Err(DictionaryError::WordTooShort {
                typo: entry.typo.clone(),
                len,
                min: min_len,
            });
        }
        if len > max_len {
            return Err(DictionaryError::WordTooLong {
                typo: entry.typo.clone(),
                len,
                max: max_len,
            });
        }
        let symbols = entry.symbols()?;
        entry.validate_correction()?;
        if seen.insert(entry.word(), &entry.typo).is_some() {
            return Err(DictionaryError::DuplicateEntry(entry.typo.clone()));
        }
        insert(&mut root, &symbols, idx, entries)?;
    }

    let mut records = Vec::new();
    serialize(&root, entries, &mut records);

    let mut offsets = Vec::with_capacity(records.len());
    let mut total = 0usize;
    for record in &records {
        offsets.push(total);
        total += record.size();
    }
    if total > u16::MAX as usize {
        return Err(DictionaryError::TooLarge(total));
    }

    let mut data = Vec::with_capacity(total);
    for record in &records {
        match record {
            Record::Leaf { backspaces, text } => {
                data.push(LEAF_FLAG | backspaces);
                data.extend_from_slice(text.as_bytes());
            }
            Record::Chain { symbols } => data.extend_from_slice(symbols),
            Record::Branch { edges } => {
                for (i, &(symbol, child)) in edges.iter().enumerate() {
                    let flag = if i == 0 { BRANCH_FLAG } else { 0 };
                    data.push(symbol | flag);
                    data.extend_from_slice(&(offsets[child] as u16).to_le_bytes());
                }
            }
        }
        data.push(0);
    }
    debug!(records = records.len(), bytes = data.len());

    let dict = EncodedDictionary::from_raw(data)?;
    check_idempotent(&dict, entries)?;
    Ok(dict)
}

/// Insert a typo's symbols, last symbol first.
///
/// A terminal cannot have children: the shorter typo would always fire
/// before the longer one could complete.
fn insert(
    root: &mut TrieNode,
    symbols: &[u8],
    idx: usize,
    entries: &[DictEntry],
) -> Result<(), DictionaryError> {
    let mut node = root;
    for &symbol in symbols.iter().rev() {
        if let Some(other) = node.leaf {
            return Err(DictionaryError::ShadowedEntry {
                typo: entries[idx].typo.clone(),
                shadowed_by: entries[other].typo.clone(),
            });
        }
        node = node.children.entry(symbol).or_default();
    }
    if let Some(other) = node.first_leaf() {
        return Err(DictionaryError::ShadowedEntry {
            typo: entries[other].typo.clone(),
            shadowed_by: entries[idx].typo.clone(),
        });
    }
    node.leaf = Some(idx);
    Ok(())
}

/// Flatten the trie in pre-order. A chain's child is emitted right after the
/// chain, which is how the reader finds it without a link.
fn serialize<'a>(node: &TrieNode, entries: &'a [DictEntry], records: &mut Vec<Record<'a>>) -> usize {
    let idx = records.len();
    if let Some(entry_idx) = node.leaf {
        let (backspaces, text) = entries[entry_idx].edit();
        records.push(Record::Leaf {
            backspaces: backspaces as u8,
            text,
        });
        return idx;
    }

    if node.children.len() == 1 {
        let mut symbols = Vec::new();
        let mut cur = node;
        while let (1, None) = (cur.children.len(), cur.leaf) {
            let Some((&symbol, child)) = cur.children.iter().next() else {
                break;
            };
            symbols.push(symbol);
            cur = child;
        }
        records.push(Record::Chain { symbols });
        serialize(cur, entries, records);
        return idx;
    }

    records.push(Record::Branch { edges: Vec::new() });
    let edges: Vec<(u8, usize)> = node
        .children
        .iter()
        .map(|(&symbol, child)| (symbol, serialize(child, entries, records)))
        .collect();
    records[idx] = Record::Branch { edges };
    idx
}

/// Type each correction as a standalone word and make sure nothing fires.
fn check_idempotent(dict: &EncodedDictionary, entries: &[DictEntry]) -> Result<(), DictionaryError> {
    for entry in entries {
        let mut state = MatcherState::for_dictionary(dict);
        let inputs = entry
            .correction
            .chars()
            .map(KeyInput::from_char)
            .chain(std::iter::once(KeyInput::Boundary { reset: false }));
        for input in inputs {
            if state.process_keystroke(dict, input).is_some() {
                return Err(DictionaryError::CorrectionTriggersTypo {
                    typo: entry.typo.clone(),
                    correction: entry.correction.clone(),
                });
            }
        }
    }
    Ok(())
}
