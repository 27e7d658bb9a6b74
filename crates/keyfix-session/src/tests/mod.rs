mod basic;

use std::sync::Arc;

use keyfix_core::dict::{encode, parse_dictionary, EncodedDictionary, EncoderOptions};
use keyfix_core::keycode::{keycode_for_char, MOD_LSFT};
use keyfix_core::settings::{default_toml, parse_settings_toml, Settings};

use super::{AutocorrectSession, KeyEvent, KeyResponse};

pub(super) const SAMPLE_DICTIONARY: &str = include_str!("../../../../dictionaries/daedric.txt");

pub(super) fn make_test_dict() -> Arc<EncodedDictionary> {
    let entries = parse_dictionary(SAMPLE_DICTIONARY).unwrap();
    let dict = encode(
        &entries,
        &EncoderOptions {
            min_len: 4,
            max_len: 8,
        },
    )
    .unwrap();
    Arc::new(dict)
}

pub(super) fn test_settings() -> Settings {
    parse_settings_toml(default_toml()).unwrap()
}

pub(super) fn make_session() -> AutocorrectSession {
    AutocorrectSession::with_settings(make_test_dict(), &test_settings())
}

/// Press event for a character on a US layout, shift included.
pub(super) fn char_event(ch: char) -> KeyEvent {
    let (keycode, shifted) =
        keycode_for_char(ch).unwrap_or_else(|| panic!("no keycode for {ch:?}"));
    let event = KeyEvent::press(keycode);
    if shifted {
        event.with_mods(MOD_LSFT)
    } else {
        event
    }
}

// Helper: press and release each character, collecting the press responses
pub(super) fn type_string<B: AsRef<[u8]>>(
    session: &mut AutocorrectSession<B>,
    s: &str,
) -> Vec<KeyResponse> {
    let mut responses = Vec::new();
    for ch in s.chars() {
        let press = char_event(ch);
        responses.push(session.handle_key(press));
        session.handle_key(KeyEvent {
            pressed: false,
            ..press
        });
    }
    responses
}

/// Type `text` and return what the host would show: corrections replayed,
/// passed-through keys sent. `\u{8}` is a backspace.
pub(super) fn screen_after<B: AsRef<[u8]>>(session: &mut AutocorrectSession<B>, text: &str) -> String {
    let mut screen = String::new();
    for (ch, resp) in text.chars().zip(type_string(session, text)) {
        resp.replay(&mut screen);
        if resp.passthrough {
            if ch == '\u{8}' {
                screen.pop();
            } else {
                screen.push(ch);
            }
        }
    }
    screen
}
