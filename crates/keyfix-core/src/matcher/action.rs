/// Host primitives a correction is replayed through.
pub trait EditSink {
    fn send_backspace(&mut self);
    fn send_char(&mut self, ch: char);
}

/// Plain text stands in for the host's text field.
impl EditSink for String {
    fn send_backspace(&mut self) {
        self.pop();
    }

    fn send_char(&mut self, ch: char) {
        self.push(ch);
    }
}

/// Edit script produced when a typo completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionAction {
    /// Characters to erase before typing `replacement`.
    pub backspaces: u8,
    pub replacement: String,
    /// A letter that completes a typo is swallowed; a boundary key that
    /// completes one is still delivered after the edit.
    pub consumes_trigger: bool,
}

impl CorrectionAction {
    /// Emit every backspace, then the replacement left to right.
    pub fn replay<S: EditSink + ?Sized>(&self, sink: &mut S) {
        for _ in 0..self.backspaces {
            sink.send_backspace();
        }
        for ch in self.replacement.chars() {
            sink.send_char(ch);
        }
    }
}
