//! Line framing over decoded text.

use super::events::StreamWarning;

/// Buffers decoded text and hands out complete `\n`-terminated lines.
///
/// The buffer always holds exactly the text after the last terminator seen.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: String,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text to the buffer.
    pub fn push(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Remove and return the next complete line, without its terminator.
    ///
    /// A `\r` before the `\n` is stripped too.
    pub fn next_line(&mut self) -> Option<String> {
        let newline_pos = self.buffer.find('\n')?;
        let mut line: String = self.buffer.drain(..=newline_pos).collect();
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
        Some(line)
    }

    /// Lazily drain every complete line currently buffered.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines { framer: self }
    }

    /// End-of-stream: discard any unterminated remainder.
    ///
    /// The remainder is never parsed. A non-blank remainder is reported so a
    /// record cut off by the transport is visible in the session warnings.
    pub fn finish(&mut self) -> Option<StreamWarning> {
        let remainder = std::mem::take(&mut self.buffer);
        if remainder.trim().is_empty() {
            None
        } else {
            Some(StreamWarning::UnterminatedLine { remainder })
        }
    }

    /// The text not yet resolved into a complete line.
    pub fn remainder(&self) -> &str {
        &self.buffer
    }
}

/// Iterator returned by [`LineFramer::lines`].
pub struct Lines<'a> {
    framer: &'a mut LineFramer,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.framer.next_line()
    }
}
