use super::{DictEntry, DictionaryError};

/// Parse a text dictionary: one `typo -> correction` pair per line.
///
/// `#` starts a comment; blank lines are ignored. Entries keep their source
/// order, which is also the order used for the generated header comment.
pub fn parse_dictionary(text: &str) -> Result<Vec<DictEntry>, DictionaryError> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (typo, correction) = line.split_once("->").ok_or_else(|| DictionaryError::Parse {
            line: idx + 1,
            reason: format!("expected 'typo -> correction', got '{line}'"),
        })?;
        let entry = DictEntry::new(typo, correction);
        if entry.typo.is_empty() || entry.correction.is_empty() {
            return Err(DictionaryError::Parse {
                line: idx + 1,
                reason: "typo and correction must both be non-empty".to_string(),
            });
        }
        if entry.typo.split_whitespace().count() > 1 {
            return Err(DictionaryError::Parse {
                line: idx + 1,
                reason: format!("typo '{}' contains whitespace", entry.typo),
            });
        }
        entries.push(entry);
    }
    Ok(entries)
}
