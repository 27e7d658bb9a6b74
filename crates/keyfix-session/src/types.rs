use keyfix_core::keycode::Keycode;
use keyfix_core::matcher::{CorrectionAction, EditSink};

// QMK quantum keycode ranges.
pub(crate) mod qk {
    use keyfix_core::keycode::Keycode;

    pub const BASIC_MAX: Keycode = 0x00FF;
    pub const MODS: Keycode = 0x0100;
    pub const MODS_MAX: Keycode = 0x1FFF;
    /// Set in a `QK_MODS` keycode when the modifiers are the right-hand ones.
    pub const MODS_RIGHT: Keycode = 0x1000;
    pub const MOD_TAP: Keycode = 0x2000;
    pub const MOD_TAP_MAX: Keycode = 0x3FFF;
    pub const LAYER_TAP: Keycode = 0x4000;
    pub const LAYER_TAP_MAX: Keycode = 0x4FFF;
    /// `TO`, `MO`, `DF`, `TG`, `OSL`, `LM`, `TT` and friends.
    pub const LAYERS: Keycode = 0x5000;
    pub const LAYERS_MAX: Keycode = 0x52FF;
}

pub const AC_ON: Keycode = 0x7C74;
pub const AC_OFF: Keycode = 0x7C75;
pub const AC_TOGG: Keycode = 0x7C76;

/// One key transition as reported by the keyboard firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub keycode: Keycode,
    pub pressed: bool,
    /// Modifier bits held (including one-shot mods), HID report order.
    pub mods: u8,
    /// For mod-tap and layer-tap keys: whether this press resolved as a tap.
    pub tapped: bool,
}

impl KeyEvent {
    pub fn press(keycode: Keycode) -> Self {
        Self {
            keycode,
            pressed: true,
            mods: 0,
            tapped: false,
        }
    }

    pub fn release(keycode: Keycode) -> Self {
        Self {
            pressed: false,
            ..Self::press(keycode)
        }
    }

    pub fn with_mods(mut self, mods: u8) -> Self {
        self.mods = mods;
        self
    }

    pub fn tapped(mut self) -> Self {
        self.tapped = true;
        self
    }
}

/// What the caller should do after a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    /// Whether the key continues through normal processing. False when a
    /// letter was swallowed by a correction or for autocorrect control keys.
    pub passthrough: bool,
    /// Edit to replay before the key (if it passes through) is sent.
    pub correction: Option<CorrectionAction>,
    /// Set when the enabled flag flipped, so the indicator needs a redraw.
    pub indicator_changed: bool,
}

impl KeyResponse {
    pub(crate) fn passthrough() -> Self {
        Self {
            passthrough: true,
            correction: None,
            indicator_changed: false,
        }
    }

    pub(crate) fn consumed() -> Self {
        Self {
            passthrough: false,
            ..Self::passthrough()
        }
    }

    /// Send the correction, if any, through the host primitives.
    pub fn replay<S: EditSink + ?Sized>(&self, sink: &mut S) {
        if let Some(action) = &self.correction {
            action.replay(sink);
        }
    }
}
