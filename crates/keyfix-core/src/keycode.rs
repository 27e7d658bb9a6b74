//! HID keyboard usage codes and the trie symbols derived from them.
//!
//! Trie edges are stored as basic HID codes (`KC_A` = 0x04 .. `KC_Z` = 0x1D),
//! so the host can feed the codes it already has straight into the matcher.
//! A word boundary is stored as `KC_SPACE`.

pub type Keycode = u16;

pub const KC_NO: Keycode = 0x00;
pub const KC_A: Keycode = 0x04;
pub const KC_Z: Keycode = 0x1D;
pub const KC_1: Keycode = 0x1E;
pub const KC_0: Keycode = 0x27;
pub const KC_ENTER: Keycode = 0x28;
pub const KC_ESCAPE: Keycode = 0x29;
pub const KC_BACKSPACE: Keycode = 0x2A;
pub const KC_TAB: Keycode = 0x2B;
pub const KC_SPACE: Keycode = 0x2C;
pub const KC_MINUS: Keycode = 0x2D;
pub const KC_EQUAL: Keycode = 0x2E;
pub const KC_LEFT_BRACKET: Keycode = 0x2F;
pub const KC_RIGHT_BRACKET: Keycode = 0x30;
pub const KC_BACKSLASH: Keycode = 0x31;
pub const KC_SEMICOLON: Keycode = 0x33;
pub const KC_QUOTE: Keycode = 0x34;
pub const KC_GRAVE: Keycode = 0x35;
pub const KC_COMMA: Keycode = 0x36;
pub const KC_DOT: Keycode = 0x37;
pub const KC_SLASH: Keycode = 0x38;
pub const KC_RIGHT: Keycode = 0x4F;
pub const KC_LEFT: Keycode = 0x50;
pub const KC_DOWN: Keycode = 0x51;
pub const KC_UP: Keycode = 0x52;

// Modifier bits, HID report order.
pub const MOD_LCTL: u8 = 0x01;
pub const MOD_LSFT: u8 = 0x02;
pub const MOD_LALT: u8 = 0x04;
pub const MOD_LGUI: u8 = 0x08;
pub const MOD_RCTL: u8 = 0x10;
pub const MOD_RSFT: u8 = 0x20;
pub const MOD_RALT: u8 = 0x40;
pub const MOD_RGUI: u8 = 0x80;
pub const MOD_MASK_SHIFT: u8 = MOD_LSFT | MOD_RSFT;

/// Symbol stored on trie edges for a word boundary.
pub const BOUNDARY_SYMBOL: u8 = KC_SPACE as u8;

/// Trie symbol for an ASCII letter (either case).
pub fn letter_symbol(c: char) -> Option<u8> {
    if c.is_ascii_alphabetic() {
        Some(KC_A as u8 + (c.to_ascii_lowercase() as u8 - b'a'))
    } else {
        None
    }
}

/// Whether `code` may label a trie edge.
pub fn is_symbol(code: u8) -> bool {
    is_letter(code as Keycode) || code == BOUNDARY_SYMBOL
}

pub fn is_letter(keycode: Keycode) -> bool {
    (KC_A..=KC_Z).contains(&keycode)
}

/// Printable form of a trie symbol: the lowercase letter, or `:` for a
/// word boundary (the sentinel used in dictionary sources).
pub fn symbol_char(symbol: u8) -> Option<char> {
    if is_letter(symbol as Keycode) {
        Some((b'a' + (symbol - KC_A as u8)) as char)
    } else if symbol == BOUNDARY_SYMBOL {
        Some(':')
    } else {
        None
    }
}

/// US-layout keycode and shift state that type `c`.
pub fn keycode_for_char(c: char) -> Option<(Keycode, bool)> {
    if let Some(symbol) = letter_symbol(c) {
        return Some((symbol as Keycode, c.is_ascii_uppercase()));
    }
    let mapped = match c {
        '1'..='9' => (KC_1 + (c as Keycode - '1' as Keycode), false),
        '0' => (KC_0, false),
        '\n' => (KC_ENTER, false),
        '\t' => (KC_TAB, false),
        ' ' => (KC_SPACE, false),
        '\u{8}' => (KC_BACKSPACE, false),
        '-' => (KC_MINUS, false),
        '_' => (KC_MINUS, true),
        '=' => (KC_EQUAL, false),
        '+' => (KC_EQUAL, true),
        '[' => (KC_LEFT_BRACKET, false),
        '{' => (KC_LEFT_BRACKET, true),
        ']' => (KC_RIGHT_BRACKET, false),
        '}' => (KC_RIGHT_BRACKET, true),
        '\\' => (KC_BACKSLASH, false),
        '|' => (KC_BACKSLASH, true),
        ';' => (KC_SEMICOLON, false),
        ':' => (KC_SEMICOLON, true),
        '\'' => (KC_QUOTE, false),
        '"' => (KC_QUOTE, true),
        '`' => (KC_GRAVE, false),
        '~' => (KC_GRAVE, true),
        ',' => (KC_COMMA, false),
        '<' => (KC_COMMA, true),
        '.' => (KC_DOT, false),
        '>' => (KC_DOT, true),
        '/' => (KC_SLASH, false),
        '?' => (KC_SLASH, true),
        '!' => (KC_1, true),
        '@' => (KC_1 + 1, true),
        '#' => (KC_1 + 2, true),
        '$' => (KC_1 + 3, true),
        '%' => (KC_1 + 4, true),
        '^' => (KC_1 + 5, true),
        '&' => (KC_1 + 6, true),
        '*' => (KC_1 + 7, true),
        '(' => (KC_1 + 8, true),
        ')' => (KC_0, true),
        _ => return None,
    };
    Some(mapped)
}

/// Character a basic keycode types on a US layout, if any.
pub fn char_for_keycode(keycode: Keycode, shifted: bool) -> Option<char> {
    if is_letter(keycode) {
        let c = (b'a' + (keycode - KC_A) as u8) as char;
        return Some(if shifted { c.to_ascii_uppercase() } else { c });
    }
    const DIGITS: &[u8; 10] = b"1234567890";
    const SHIFTED_DIGITS: &[u8; 10] = b"!@#$%^&*()";
    if (KC_1..=KC_0).contains(&keycode) {
        let idx = (keycode - KC_1) as usize;
        let table = if shifted { SHIFTED_DIGITS } else { DIGITS };
        return Some(table[idx] as char);
    }
    let (plain, upper) = match keycode {
        KC_ENTER => ('\n', '\n'),
        KC_TAB => ('\t', '\t'),
        KC_SPACE => (' ', ' '),
        KC_MINUS => ('-', '_'),
        KC_EQUAL => ('=', '+'),
        KC_LEFT_BRACKET => ('[', '{'),
        KC_RIGHT_BRACKET => (']', '}'),
        KC_BACKSLASH => ('\\', '|'),
        KC_SEMICOLON => (';', ':'),
        KC_QUOTE => ('\'', '"'),
        KC_GRAVE => ('`', '~'),
        KC_COMMA => (',', '<'),
        KC_DOT => ('.', '>'),
        KC_SLASH => ('/', '?'),
        _ => return None,
    };
    Some(if shifted { upper } else { plain })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_hid_codes() {
        assert_eq!(letter_symbol('a'), Some(0x04));
        assert_eq!(letter_symbol('Z'), Some(0x1D));
        assert_eq!(letter_symbol('1'), None);
        assert_eq!(symbol_char(0x0B), Some('h'));
        assert_eq!(symbol_char(BOUNDARY_SYMBOL), Some(':'));
        assert_eq!(symbol_char(0x3F), None);
    }

    #[test]
    fn every_printable_ascii_char_round_trips() {
        for c in (' '..='~').chain(['\n', '\t']) {
            let (kc, shifted) = keycode_for_char(c).unwrap_or_else(|| panic!("no keycode for {c:?}"));
            assert_eq!(char_for_keycode(kc, shifted), Some(c), "char {c:?}");
        }
    }

    #[test]
    fn boundary_is_a_symbol_but_not_a_letter() {
        assert!(is_symbol(BOUNDARY_SYMBOL));
        assert!(!is_letter(KC_SPACE));
        assert!(!is_symbol(KC_ENTER as u8));
        assert!(!is_symbol(0));
    }
}
