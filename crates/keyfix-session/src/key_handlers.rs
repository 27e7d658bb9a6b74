use tracing::{debug, debug_span};

use super::classify::{classify, Classified, Control};
use super::types::{KeyEvent, KeyResponse};
use super::AutocorrectSession;

impl<B: AsRef<[u8]>> AutocorrectSession<B> {
    /// Process a key event. Returns a KeyResponse describing what the caller should do.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();

        match classify(&event) {
            Classified::Ignore => KeyResponse::passthrough(),
            Classified::Control(control) => {
                let was_enabled = self.is_enabled();
                match control {
                    Control::On => self.enable(),
                    Control::Off => self.disable(),
                    Control::Toggle => {
                        self.toggle();
                    }
                }
                debug!(enabled = self.is_enabled(), "autocorrect control");
                let mut resp = KeyResponse::consumed();
                resp.indicator_changed = was_enabled != self.is_enabled();
                resp
            }
            Classified::Input(input) => {
                let mut resp = KeyResponse::passthrough();
                if let Some(action) = self.matcher.process_keystroke(&*self.dict, input) {
                    resp.passthrough = !action.consumes_trigger;
                    resp.correction = Some(action);
                }
                resp
            }
        }
    }
}
