use crate::dict::{encode, parse_dictionary, EncodedDictionary, EncoderOptions};
use crate::matcher::{KeyInput, MatcherState};

pub(crate) const SAMPLE_DICTIONARY: &str = include_str!("../../../dictionaries/daedric.txt");

/// `autocorrect_data` as shipped in the daedric firmware header.
pub(crate) const FIRMWARE_TABLE: [u8; 103] = [
    0x4B, 0x0D, 0x00, 0x15, 0x1A, 0x00, 0x16, 0x36, 0x00, 0x17, 0x40, 0x00, 0x00, 0x17, 0x0C, 0x1A,
    0x07, 0x11, 0x04, 0x05, 0x00, 0x81, 0x64, 0x74, 0x68, 0x00, 0x08, 0x00, 0x4C, 0x23, 0x00, 0x0F,
    0x2C, 0x00, 0x00, 0x0B, 0x17, 0x2C, 0x00, 0x82, 0x65, 0x69, 0x72, 0x00, 0x17, 0x0C, 0x09, 0x00,
    0x83, 0x6C, 0x74, 0x65, 0x72, 0x00, 0x16, 0x13, 0x04, 0x00, 0x83, 0x70, 0x61, 0x73, 0x73, 0x00,
    0x4B, 0x47, 0x00, 0x18, 0x5D, 0x00, 0x00, 0x47, 0x4E, 0x00, 0x0A, 0x55, 0x00, 0x00, 0x0C, 0x1A,
    0x00, 0x81, 0x74, 0x68, 0x00, 0x11, 0x08, 0x0F, 0x00, 0x81, 0x74, 0x68, 0x00, 0x13, 0x18, 0x12,
    0x00, 0x82, 0x74, 0x70, 0x75, 0x74, 0x00,
];

pub(crate) fn test_options() -> EncoderOptions {
    EncoderOptions {
        min_len: 4,
        max_len: 8,
    }
}

pub(crate) fn sample_dict() -> EncodedDictionary {
    let entries = parse_dictionary(SAMPLE_DICTIONARY).unwrap();
    encode(&entries, &test_options()).unwrap()
}

/// Type `text` through the matcher and return what ends up on screen.
/// `\u{8}` is a backspace.
pub(crate) fn type_text<B: AsRef<[u8]>>(
    state: &mut MatcherState,
    dict: &EncodedDictionary<B>,
    text: &str,
) -> String {
    let mut screen = String::new();
    for c in text.chars() {
        match state.process_keystroke(dict, KeyInput::from_char(c)) {
            Some(action) => {
                action.replay(&mut screen);
                if !action.consumes_trigger {
                    screen.push(c);
                }
            }
            None if c == '\u{8}' => {
                screen.pop();
            }
            None => screen.push(c),
        }
    }
    screen
}
