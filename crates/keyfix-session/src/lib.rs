//! Keyboard-facing autocorrect session.
//!
//! `AutocorrectSession` owns the matcher for one keyboard and processes each
//! raw key event, returning a `KeyResponse` that the firmware glue turns into
//! backspace/character reports and LED updates.

mod classify;
mod indicator;
mod key_handlers;
mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use keyfix_core::dict::EncodedDictionary;
use keyfix_core::matcher::MatcherState;
use keyfix_core::settings::{settings, IndicatorSettings, Settings};

pub use indicator::{hsv_to_rgb, indicator_color, LedSink, Rgb};
pub use types::{KeyEvent, KeyResponse, AC_OFF, AC_ON, AC_TOGG};

/// Autocorrect state for one keyboard.
///
/// `B` is the dictionary storage: `Vec<u8>` for a table loaded at runtime,
/// `&'static [u8]` for one compiled into the firmware image.
pub struct AutocorrectSession<B = Vec<u8>> {
    dict: Arc<EncodedDictionary<B>>,
    matcher: MatcherState,
    indicator: IndicatorSettings,
}

impl<B: AsRef<[u8]>> AutocorrectSession<B> {
    /// Session configured from the global settings.
    pub fn new(dict: Arc<EncodedDictionary<B>>) -> Self {
        Self::with_settings(dict, settings())
    }

    pub fn with_settings(dict: Arc<EncodedDictionary<B>>, settings: &Settings) -> Self {
        let mut matcher = MatcherState::for_dictionary(&*dict)
            .with_backspace_policy(settings.matcher.backspace);
        if !settings.matcher.enabled_on_start {
            matcher.set_enabled(false);
        }
        Self {
            dict,
            matcher,
            indicator: settings.indicator.clone(),
        }
    }

    pub fn dictionary(&self) -> &EncodedDictionary<B> {
        &self.dict
    }

    pub fn matcher(&self) -> &MatcherState {
        &self.matcher
    }

    pub fn is_enabled(&self) -> bool {
        self.matcher.is_enabled()
    }

    pub fn enable(&mut self) {
        self.matcher.set_enabled(true);
    }

    pub fn disable(&mut self) {
        self.matcher.set_enabled(false);
    }

    /// Flip the enabled flag, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.matcher.toggle()
    }

    /// Indicator LED index and its current color.
    pub fn indicator(&self, brightness: u8) -> (u8, Rgb) {
        (
            self.indicator.led_index,
            indicator_color(&self.indicator, self.is_enabled(), brightness),
        )
    }

    /// Paint the indicator LED through the host.
    pub fn render_indicator<S: LedSink + ?Sized>(&self, brightness: u8, sink: &mut S) {
        let (index, rgb) = self.indicator(brightness);
        sink.set_color(index, rgb);
    }
}
