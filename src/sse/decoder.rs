//! Incremental UTF-8 decoding of network chunks.
//!
//! Chunks arrive with arbitrary boundaries, so a multi-byte character may be
//! split between two reads. The decoder carries the incomplete tail of one
//! chunk into the next instead of decoding each chunk in isolation.

use super::events::StreamWarning;

/// Stateful UTF-8 decoder for a single response body.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    /// Bytes of an incomplete sequence left over from the previous chunk (at most 3)
    pending: Vec<u8>,
}

impl ChunkDecoder {
    /// Create a decoder with no carried state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk.
    ///
    /// Returns the decoded text and, if the chunk contained byte sequences
    /// that can never become valid UTF-8, a warning with the number of
    /// replacement characters inserted.
    pub fn decode(&mut self, chunk: &[u8]) -> (String, Option<StreamWarning>) {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut text = String::with_capacity(bytes.len());
        let mut replaced = 0usize;
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));

                    match e.error_len() {
                        // Incomplete sequence at the end: wait for the next chunk
                        None => {
                            self.pending.extend_from_slice(tail);
                            break;
                        }
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            replaced += 1;
                            rest = &tail[len..];
                        }
                    }
                }
            }
        }

        let warning = (replaced > 0).then_some(StreamWarning::InvalidUtf8 { replaced });
        (text, warning)
    }

    /// Flush the decoder at end-of-stream.
    ///
    /// Any carried bytes are an incomplete character that will never be
    /// completed; they are dropped and reported.
    pub fn finish(&mut self) -> Option<StreamWarning> {
        if self.pending.is_empty() {
            return None;
        }
        let bytes = self.pending.len();
        self.pending.clear();
        Some(StreamWarning::TruncatedUtf8 { bytes })
    }

    /// Number of bytes currently carried between chunks.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
