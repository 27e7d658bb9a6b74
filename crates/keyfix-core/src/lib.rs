//! Compact autocorrect dictionaries and the keystroke matcher that walks them.
//!
//! A dictionary of `typo -> correction` pairs is encoded once into a
//! reversed-suffix trie byte table (`dict`). At runtime a `MatcherState`
//! consumes key presses one at a time and, when the most recent letters spell
//! a registered typo, returns the backspace/retype edit that fixes it.

pub mod dict;
pub mod keycode;
pub mod matcher;
pub mod settings;

#[cfg(test)]
pub(crate) mod testutil;
