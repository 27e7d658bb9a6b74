use std::process;
use std::sync::Arc;

use keyfix_core::keycode::{keycode_for_char, MOD_LSFT};
use keyfix_core::matcher::EditSink;
use keyfix_session::{AutocorrectSession, KeyEvent};
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

/// A correction fired while typing, located in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimCorrection {
    /// Character index of the key that completed the typo.
    pub position: usize,
    pub backspaces: u8,
    pub replacement: String,
    pub consumes_trigger: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub input: String,
    pub output: String,
    pub corrections: Vec<SimCorrection>,
}

/// Type `text` through `session` one press/release at a time.
///
/// Characters with no US-layout keycode are sent as an unrecognized key,
/// which ends the current word, and inserted verbatim.
pub fn run<B: AsRef<[u8]>>(session: &mut AutocorrectSession<B>, text: &str) -> SimReport {
    let mut screen = String::new();
    let mut corrections = Vec::new();

    for (position, ch) in text.chars().enumerate() {
        let press = match keycode_for_char(ch) {
            Some((keycode, true)) => KeyEvent::press(keycode).with_mods(MOD_LSFT),
            Some((keycode, false)) => KeyEvent::press(keycode),
            None => KeyEvent::press(0),
        };
        let resp = session.handle_key(press);
        session.handle_key(KeyEvent {
            pressed: false,
            ..press
        });

        resp.replay(&mut screen);
        if let Some(c) = &resp.correction {
            corrections.push(SimCorrection {
                position,
                backspaces: c.backspaces,
                replacement: c.replacement.clone(),
                consumes_trigger: c.consumes_trigger,
            });
        }
        if resp.passthrough {
            if ch == '\u{8}' {
                screen.send_backspace();
            } else {
                screen.send_char(ch);
            }
        }
    }

    SimReport {
        input: text.to_string(),
        output: screen,
        corrections,
    }
}

pub fn simulate(file: &str, text: &str, json: bool) {
    let loaded = die!(
        load_dictionary(file, &encoder_options(None, None)),
        "Error loading {file}: {}"
    );
    let mut session = AutocorrectSession::new(Arc::new(loaded.dict));
    let report = run(&mut session, text);

    if json {
        let out = die!(serde_json::to_string_pretty(&report), "Error serializing: {}");
        println!("{out}");
        return;
    }

    println!("{}", report.output);
    for c in &report.corrections {
        eprintln!(
            "  @{}: {} backspace(s), type \"{}\"{}",
            c.position,
            c.backspaces,
            c.replacement,
            if c.consumes_trigger { "" } else { ", then the key" }
        );
    }
}
