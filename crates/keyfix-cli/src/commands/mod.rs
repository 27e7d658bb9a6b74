pub mod config_ops;
pub mod dict_ops;
pub mod sim_ops;

use std::fs;
use std::path::Path;

use keyfix_core::dict::{
    encode, parse_dictionary, DictEntry, DictionaryError, EncodedDictionary, EncoderOptions, MAGIC,
};
use tracing::debug;

/// Errors raised while loading a dictionary given on the command line.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{path} is neither a .kfac file nor UTF-8 text")]
    NotText { path: String },

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// A dictionary plus the entries it was built from.
///
/// Entries keep source order for text input and table order for `.kfac`.
pub struct LoadedDictionary {
    pub dict: EncodedDictionary,
    pub entries: Vec<DictEntry>,
    pub compiled: bool,
}

/// Load a `.kfac` container, or compile a text source on the fly.
///
/// The format is detected from the magic bytes, not the extension.
pub fn load_dictionary(path: &str, opts: &EncoderOptions) -> Result<LoadedDictionary, InputError> {
    let bytes = fs::read(Path::new(path)).map_err(|source| InputError::Io {
        path: path.to_string(),
        source,
    })?;

    if bytes.starts_with(MAGIC) {
        let dict = EncodedDictionary::from_bytes(&bytes)?;
        let entries = dict.entries().iter().map(DictEntry::from).collect();
        debug!(path, entries = dict.entry_count(), "loaded container");
        return Ok(LoadedDictionary {
            dict,
            entries,
            compiled: false,
        });
    }

    let text = String::from_utf8(bytes).map_err(|_| InputError::NotText {
        path: path.to_string(),
    })?;
    let entries = parse_dictionary(&text)?;
    let dict = encode(&entries, opts)?;
    debug!(path, entries = entries.len(), bytes = dict.len(), "compiled source");
    Ok(LoadedDictionary {
        dict,
        entries,
        compiled: true,
    })
}

/// Encoder options from the active settings, with CLI overrides applied.
pub fn encoder_options(min_len: Option<usize>, max_len: Option<usize>) -> EncoderOptions {
    let mut opts = EncoderOptions::default();
    if let Some(min) = min_len {
        opts.min_len = min;
    }
    if let Some(max) = max_len {
        opts.max_len = max;
    }
    opts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "fitler -> filter\n:thier -> their\nwidht -> width\n";

    fn opts() -> EncoderOptions {
        EncoderOptions {
            min_len: 4,
            max_len: 8,
        }
    }

    #[test]
    fn test_load_text_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.txt");
        fs::write(&path, SOURCE).unwrap();

        let loaded = load_dictionary(path.to_str().unwrap(), &opts()).unwrap();
        assert!(loaded.compiled);
        assert_eq!(loaded.dict.entry_count(), 3);
        assert_eq!(loaded.entries[1], DictEntry::new(":thier", "their"));
    }

    #[test]
    fn test_load_container_detected_by_magic() {
        let dir = tempfile::tempdir().unwrap();
        let entries = parse_dictionary(SOURCE).unwrap();
        let dict = encode(&entries, &opts()).unwrap();
        // Extension is irrelevant.
        let path = dir.path().join("dict.txt");
        dict.save(&path).unwrap();

        let loaded = load_dictionary(path.to_str().unwrap(), &opts()).unwrap();
        assert!(!loaded.compiled);
        assert_eq!(loaded.dict.as_bytes(), dict.as_bytes());
        assert_eq!(loaded.entries.len(), 3);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.kfac");
        assert!(matches!(
            load_dictionary(missing.to_str().unwrap(), &opts()),
            Err(InputError::Io { .. })
        ));

        let binary = dir.path().join("junk.bin");
        fs::write(&binary, [0xFF, 0xFE, 0x00]).unwrap();
        assert!(matches!(
            load_dictionary(binary.to_str().unwrap(), &opts()),
            Err(InputError::NotText { .. })
        ));

        let bad = dir.path().join("bad.txt");
        fs::write(&bad, "ab -> cd\n").unwrap();
        assert!(matches!(
            load_dictionary(bad.to_str().unwrap(), &opts()),
            Err(InputError::Dictionary(DictionaryError::WordTooShort { .. }))
        ));
    }

    #[test]
    fn test_encoder_option_overrides() {
        let opts = encoder_options(Some(3), None);
        assert_eq!(opts.min_len, 3);
        assert_eq!(opts.max_len, EncoderOptions::default().max_len);
    }
}
