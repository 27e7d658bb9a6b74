use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::warn;

use super::{DecodedEntry, DictEntry, DictionaryError, EncodedDictionary};

pub const MAGIC: &[u8; 4] = b"KFAC";
pub const VERSION: u8 = 1;

/// Container header:
///
/// ```text
/// 0..4    magic "KFAC"
/// 4       version
/// 5       shortest typo, in symbols
/// 6       longest typo, in symbols
/// 7       reserved
/// 8..12   entry count (u32 LE)
/// 12..16  table length (u32 LE)
/// 16..20  CRC-32 of the table (u32 LE)
/// ```
pub const HEADER_SIZE: usize = 20;

/// Table bytes per line in an exported C header.
const HEADER_BYTES_PER_LINE: usize = 16;

impl<B: AsRef<[u8]>> EncodedDictionary<B> {
    /// Serialize as a `.kfac` container.
    pub fn to_bytes(&self) -> Vec<u8> {
        let table = self.as_bytes();
        let mut buf = Vec::with_capacity(HEADER_SIZE + table.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.push(self.min_len().min(u8::MAX as usize) as u8);
        buf.push(self.max_len().min(u8::MAX as usize) as u8);
        buf.push(0); // reserved
        buf.extend_from_slice(&(self.entry_count() as u32).to_le_bytes());
        buf.extend_from_slice(&(table.len() as u32).to_le_bytes());
        buf.extend_from_slice(&crc32fast::hash(table).to_le_bytes());
        buf.extend_from_slice(table);
        buf
    }

    pub fn save(&self, path: &Path) -> Result<(), DictionaryError> {
        Ok(fs::write(path, self.to_bytes())?)
    }

    /// Render the table as a C header for firmware builds.
    ///
    /// `entries` only feed the comment block and the length examples; the
    /// byte table always comes from `self`.
    pub fn to_c_header(&self, entries: &[DictEntry]) -> String {
        let mut out = String::new();
        out.push_str("#pragma once\n\n");

        let width = entries.iter().map(|e| e.typo.len()).max().unwrap_or(0);
        let _ = writeln!(out, "// Autocorrection dictionary ({} entries):", entries.len());
        for entry in entries {
            let _ = writeln!(out, "//   {:<width$} -> {}", entry.typo, entry.correction);
        }
        out.push('\n');

        // First of the shortest and first of the longest, as listed.
        let shortest = entries.iter().min_by_key(|e| e.typo.len());
        let longest = entries.iter().rev().max_by_key(|e| e.typo.len());
        let example = |e: Option<&DictEntry>| {
            e.map(|e| format!(" // \"{}\"", e.typo)).unwrap_or_default()
        };
        let _ = writeln!(
            out,
            "#define AUTOCORRECT_MIN_LENGTH {}{}",
            self.min_len(),
            example(shortest)
        );
        let _ = writeln!(
            out,
            "#define AUTOCORRECT_MAX_LENGTH {}{}",
            self.max_len(),
            example(longest)
        );
        let _ = writeln!(out, "#define DICTIONARY_SIZE {}", self.len());
        out.push('\n');

        out.push_str("static const uint8_t autocorrect_data[DICTIONARY_SIZE] PROGMEM = {\n");
        let lines: Vec<String> = self
            .as_bytes()
            .chunks(HEADER_BYTES_PER_LINE)
            .map(|chunk| {
                let bytes: Vec<String> = chunk.iter().map(|b| format!("0x{b:02X}")).collect();
                format!("    {}", bytes.join(", "))
            })
            .collect();
        out.push_str(&lines.join(",\n"));
        out.push_str("\n};\n");
        out
    }
}

impl EncodedDictionary {
    /// Parse and validate a `.kfac` container.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DictionaryError> {
        if data.len() < 5 {
            return Err(DictionaryError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictionaryError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictionaryError::UnsupportedVersion(data[4]));
        }
        if data.len() < HEADER_SIZE {
            return Err(DictionaryError::InvalidHeader);
        }

        let min_len = data[5] as usize;
        let max_len = data[6] as usize;
        let entry_count = read_u32(data, 8) as usize;
        let table_len = read_u32(data, 12) as usize;
        let expected = read_u32(data, 16);

        let table = data
            .get(HEADER_SIZE..HEADER_SIZE + table_len)
            .ok_or(DictionaryError::InvalidHeader)?;
        let actual = crc32fast::hash(table);
        if actual != expected {
            warn!(expected, actual, "rejecting dictionary with bad checksum");
            return Err(DictionaryError::ChecksumMismatch { expected, actual });
        }

        let dict = Self::from_raw(table.to_vec())?;
        if (dict.min_len(), dict.max_len(), dict.entry_count()) != (min_len, max_len, entry_count)
        {
            return Err(DictionaryError::MalformedDictionary(format!(
                "header says {entry_count} entries of {min_len}..={max_len} symbols, table has {} of {}..={}",
                dict.entry_count(),
                dict.min_len(),
                dict.max_len()
            )));
        }
        Ok(dict)
    }

    pub fn open(path: &Path) -> Result<Self, DictionaryError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to load dictionary");
        })
    }
}

impl From<&DecodedEntry> for DictEntry {
    fn from(e: &DecodedEntry) -> Self {
        DictEntry::new(&e.typo, &e.correction)
    }
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
