use std::fs;
use std::path::Path;
use std::process;

use keyfix_core::dict::{encode, parse_dictionary, DecodedEntry, EncodedDictionary};
use serde::Serialize;

use super::{encoder_options, load_dictionary};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn compile(input: &str, output: &str, min_len: Option<usize>, max_len: Option<usize>) {
    let text = die!(fs::read_to_string(input), "Error reading {input}: {}");
    let entries = die!(parse_dictionary(&text), "Error parsing {input}: {}");
    let opts = encoder_options(min_len, max_len);

    eprintln!(
        "Encoding {} entries (typo length {}..={})...",
        entries.len(),
        opts.min_len,
        opts.max_len
    );
    let dict = die!(encode(&entries, &opts), "Error encoding dictionary: {}");
    die!(dict.save(Path::new(output)), "Error writing {output}: {}");

    eprintln!(
        "Wrote {output}: {} entries, {} table bytes, typo length {}..={}",
        dict.entry_count(),
        dict.len(),
        dict.min_len(),
        dict.max_len()
    );
}

/// Write a firmware C header. `output` of `None` prints to stdout.
pub fn header(input: &str, output: Option<&str>, min_len: Option<usize>, max_len: Option<usize>) {
    let loaded = die!(
        load_dictionary(input, &encoder_options(min_len, max_len)),
        "Error loading {input}: {}"
    );
    let text = loaded.dict.to_c_header(&loaded.entries);
    match output {
        Some(path) => {
            die!(fs::write(path, &text), "Error writing {path}: {}");
            eprintln!("Wrote {path} ({} bytes of table)", loaded.dict.len());
        }
        None => print!("{text}"),
    }
}

#[derive(Serialize)]
struct InfoReport<'a> {
    file: &'a str,
    compiled: bool,
    entries: usize,
    table_bytes: usize,
    min_len: usize,
    max_len: usize,
    crc32: u32,
    words: Vec<DecodedEntry>,
}

pub fn info(file: &str, json: bool) {
    let loaded = die!(
        load_dictionary(file, &encoder_options(None, None)),
        "Error loading {file}: {}"
    );
    let dict = &loaded.dict;
    let report = InfoReport {
        file,
        compiled: loaded.compiled,
        entries: dict.entry_count(),
        table_bytes: dict.len(),
        min_len: dict.min_len(),
        max_len: dict.max_len(),
        crc32: crc32(dict),
        words: dict.entries(),
    };

    if json {
        let out = die!(serde_json::to_string_pretty(&report), "Error serializing: {}");
        println!("{out}");
        return;
    }

    println!("Dictionary: {file}{}", if report.compiled { " (compiled from source)" } else { "" });
    println!("Entries:    {}", report.entries);
    println!("Table:      {} bytes", report.table_bytes);
    println!("Typo len:   {}..={}", report.min_len, report.max_len);
    println!("CRC-32:     {:#010x}", report.crc32);
    println!();
    let width = report.words.iter().map(|e| e.typo.len()).max().unwrap_or(0);
    for e in &report.words {
        println!(
            "  {:<width$} -> {:<width$}  (bs={}, type \"{}\")",
            e.typo, e.correction, e.backspaces, e.replacement
        );
    }
}

pub fn lookup(file: &str, typo: &str) {
    let loaded = die!(
        load_dictionary(file, &encoder_options(None, None)),
        "Error loading {file}: {}"
    );
    match loaded.dict.lookup(typo) {
        Some(t) => println!(
            "{typo} → {} backspace(s), type \"{}\"",
            t.backspaces, t.replacement
        ),
        None => {
            println!("{typo} → (not found)");
            process::exit(2);
        }
    }
}

fn crc32(dict: &EncodedDictionary) -> u32 {
    crc32fast::hash(dict.as_bytes())
}
