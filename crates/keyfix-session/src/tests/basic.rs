use keyfix_core::keycode::{KC_A, KC_LEFT, KC_SPACE, MOD_LCTL};
use keyfix_core::matcher::{BackspacePolicy, CorrectionAction, MatchPhase};

use super::{make_session, make_test_dict, screen_after, test_settings, type_string};
use crate::{AutocorrectSession, KeyEvent, AC_OFF, AC_ON, AC_TOGG};

#[test]
fn test_letter_correction_swallows_key() {
    let mut session = make_session();
    let responses = type_string(&mut session, "fitler");
    let last = responses.last().unwrap();
    assert!(!last.passthrough);
    assert_eq!(
        last.correction,
        Some(CorrectionAction {
            backspaces: 3,
            replacement: "lter".to_string(),
            consumes_trigger: true,
        })
    );
    assert!(responses[..5].iter().all(|r| r.passthrough && r.correction.is_none()));
}

#[test]
fn test_replay_into_text() {
    let mut session = make_session();
    assert_eq!(screen_after(&mut session, "fitler widht "), "filter width ");
}

#[test]
fn test_shifted_letters_match() {
    let mut session = make_session();
    assert_eq!(screen_after(&mut session, "FITLER "), "FIlter ");
}

#[test]
fn test_releases_leave_state_alone() {
    let mut session = make_session();
    type_string(&mut session, "fitl");
    let before: Vec<u8> = session.matcher().buffer().iter_recent_first().collect();
    let resp = session.handle_key(KeyEvent::release(KC_LEFT));
    assert!(resp.passthrough);
    assert!(resp.correction.is_none());
    let after: Vec<u8> = session.matcher().buffer().iter_recent_first().collect();
    assert_eq!(before, after);
}

#[test]
fn test_shortcut_clears_word() {
    let mut session = make_session();
    type_string(&mut session, "fitl");
    // Ctrl+A selects everything; the word is gone.
    let resp = session.handle_key(KeyEvent::press(KC_A).with_mods(MOD_LCTL));
    assert!(resp.passthrough);
    assert!(session.matcher().buffer().is_empty());
    assert!(type_string(&mut session, "er").iter().all(|r| r.correction.is_none()));
}

#[test]
fn test_navigation_clears_word() {
    let mut session = make_session();
    type_string(&mut session, "fitl");
    session.handle_key(KeyEvent::press(KC_LEFT));
    assert_eq!(session.matcher().phase(), MatchPhase::Idle);
    assert!(type_string(&mut session, "er").iter().all(|r| r.correction.is_none()));
}

#[test]
fn test_held_mod_tap_does_not_break_word() {
    let mut session = make_session();
    type_string(&mut session, "fitl");
    // LSFT_T(KC_A) held as shift.
    let resp = session.handle_key(KeyEvent::press(0x2200 | KC_A));
    assert!(resp.passthrough);
    let responses = type_string(&mut session, "er");
    assert!(responses[1].correction.is_some());
}

#[test]
fn test_tapped_layer_tap_is_a_boundary() {
    let lt_space = 0x4100 | KC_SPACE;
    let mut session = make_session();
    type_string(&mut session, "x");
    session.handle_key(KeyEvent::press(lt_space).tapped());
    let responses = type_string(&mut session, "thier");
    assert!(responses[4].correction.is_some());

    // Held, it is a layer switch and the word keeps going.
    let mut session = make_session();
    type_string(&mut session, "x");
    session.handle_key(KeyEvent::press(lt_space));
    let responses = type_string(&mut session, "thier");
    assert!(responses.iter().all(|r| r.correction.is_none()));
}

#[test]
fn test_control_keys() {
    let mut session = make_session();
    assert!(session.is_enabled());

    let resp = session.handle_key(KeyEvent::press(AC_TOGG));
    assert!(!resp.passthrough);
    assert!(resp.indicator_changed);
    assert!(!session.is_enabled());

    let resp = session.handle_key(KeyEvent::press(AC_OFF));
    assert!(!resp.passthrough);
    assert!(!resp.indicator_changed);

    let resp = session.handle_key(KeyEvent::press(AC_ON));
    assert!(resp.indicator_changed);
    assert!(session.is_enabled());

    // Releases of control keys do nothing.
    let resp = session.handle_key(KeyEvent::release(AC_TOGG));
    assert!(resp.passthrough);
    assert!(session.is_enabled());
}

#[test]
fn test_disabled_session_passes_everything() {
    let mut session = make_session();
    session.disable();
    for resp in type_string(&mut session, "fitler apss ") {
        assert!(resp.passthrough);
        assert!(resp.correction.is_none());
    }
    assert!(session.toggle());
    assert_eq!(screen_after(&mut session, "fitler "), "filter ");
}

#[test]
fn test_enabled_on_start_setting() {
    let mut settings = test_settings();
    settings.matcher.enabled_on_start = false;
    let session = AutocorrectSession::with_settings(make_test_dict(), &settings);
    assert!(!session.is_enabled());
    assert_eq!(session.indicator(255).1, crate::Rgb { r: 255, g: 0, b: 0 });
}

#[test]
fn test_backspace_policy_setting() {
    let mut settings = test_settings();
    settings.matcher.backspace = BackspacePolicy::Reset;
    let mut session = AutocorrectSession::with_settings(make_test_dict(), &settings);
    assert_eq!(screen_after(&mut session, "fitlz\u{8}er "), "fitler ");

    let mut session = make_session();
    assert_eq!(screen_after(&mut session, "fitlz\u{8}er "), "filter ");
}

#[test]
fn test_enter_and_underscore_reset_context() {
    let mut session = make_session();
    assert_eq!(screen_after(&mut session, "x\nthier "), "x\ntheir ");
    let mut session = make_session();
    assert_eq!(screen_after(&mut session, "x_thier "), "x_their ");
}

#[test]
fn test_indicator_position() {
    let session = make_session();
    let (index, rgb) = session.indicator(255);
    assert_eq!(index, 6);
    assert_eq!(rgb, crate::Rgb { r: 0, g: 255, b: 0 });
}
