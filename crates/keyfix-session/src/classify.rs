use keyfix_core::keycode::{
    is_letter, Keycode, KC_0, KC_1, KC_BACKSPACE, KC_ENTER, KC_MINUS, KC_SLASH, KC_SPACE, KC_TAB,
    MOD_MASK_SHIFT,
};
use keyfix_core::matcher::KeyInput;

use super::types::{qk, KeyEvent, AC_OFF, AC_ON, AC_TOGG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    On,
    Off,
    Toggle,
}

/// How the session treats one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classified {
    Control(Control),
    Input(KeyInput),
    /// Leaves the matcher untouched (releases, holds, layer keys).
    Ignore,
}

/// Modifier bits packed into a `QK_MODS` keycode, in HID report order.
fn qk_mods(keycode: Keycode) -> u8 {
    let mods = ((keycode >> 8) & 0x0F) as u8;
    if keycode & qk::MODS_RIGHT != 0 {
        mods << 4
    } else {
        mods
    }
}

pub(crate) fn classify(event: &KeyEvent) -> Classified {
    if !event.pressed {
        return Classified::Ignore;
    }

    let mut keycode = event.keycode;
    let mut mods = event.mods;
    match keycode {
        AC_ON => return Classified::Control(Control::On),
        AC_OFF => return Classified::Control(Control::Off),
        AC_TOGG => return Classified::Control(Control::Toggle),
        qk::MODS..=qk::MODS_MAX => {
            mods |= qk_mods(keycode);
            keycode &= qk::BASIC_MAX;
        }
        qk::MOD_TAP..=qk::MOD_TAP_MAX | qk::LAYER_TAP..=qk::LAYER_TAP_MAX => {
            // A held dual-role key is a modifier or layer switch.
            if !event.tapped {
                return Classified::Ignore;
            }
            keycode &= qk::BASIC_MAX;
        }
        qk::LAYERS..=qk::LAYERS_MAX => return Classified::Ignore,
        _ if keycode > qk::BASIC_MAX => return Classified::Input(KeyInput::Other),
        _ => {}
    }

    // Shortcuts do not type text.
    if mods & !MOD_MASK_SHIFT != 0 {
        return Classified::Input(KeyInput::Other);
    }
    let shifted = mods & MOD_MASK_SHIFT != 0;

    let input = match keycode {
        _ if is_letter(keycode) => KeyInput::Letter(keycode as u8),
        KC_ENTER => KeyInput::Boundary { reset: true },
        KC_MINUS if shifted => KeyInput::Boundary { reset: true },
        KC_1..=KC_0 | KC_TAB | KC_SPACE..=KC_SLASH => KeyInput::Boundary { reset: false },
        KC_BACKSPACE => KeyInput::Backspace,
        _ => KeyInput::Other,
    };
    Classified::Input(input)
}
