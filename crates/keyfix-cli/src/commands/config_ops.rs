use std::fs;
use std::process;

use keyfix_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Install a settings file before anything reads the global settings.
pub fn settings_load(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::init_custom(content), "Error in {file}: {}");
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: dictionary.min_typo_length={}, dictionary.max_typo_length={}, matcher.backspace={:?}, indicator.led_index={}",
        s.dictionary.min_typo_length,
        s.dictionary.max_typo_length,
        s.matcher.backspace,
        s.indicator.led_index
    );
}
