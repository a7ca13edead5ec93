//! Async pipeline from a response byte stream to parsed line outcomes.
//!
//! Chains [`ChunkDecoder`], [`LineFramer`] and [`parse_event_line`] over any
//! `Stream` of byte chunks. The adapter is lazy: it reads the next chunk only
//! when every complete line of the previous one has been yielded.

use std::collections::VecDeque;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;

use super::decoder::ChunkDecoder;
use super::events::{LineOutcome, StreamWarning};
use super::framer::LineFramer;
use super::parser::parse_event_line;
use crate::traits::HttpError;

/// One item produced by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    /// A complete line and what it parsed into
    Line { line: String, outcome: LineOutcome },
    /// A decoding or end-of-stream warning not tied to a complete line
    Warning(StreamWarning),
}

/// Boxed stream of pipeline items.
pub type ItemStream = Pin<Box<dyn Stream<Item = Result<StreamItem, HttpError>> + Send>>;

struct PipelineState<S> {
    chunks: S,
    decoder: ChunkDecoder,
    framer: LineFramer,
    /// Warnings produced by the last decode, yielded before its lines
    queued: VecDeque<StreamItem>,
    ended: bool,
}

/// Build the line pipeline over a stream of byte chunks.
///
/// A transport error is yielded once and ends the pipeline; end-of-stream
/// flushes the decoder and framer and yields their warnings, if any.
pub fn event_lines<S>(chunks: S) -> ItemStream
where
    S: Stream<Item = Result<Bytes, HttpError>> + Send + Unpin + 'static,
{
    let state = PipelineState {
        chunks,
        decoder: ChunkDecoder::new(),
        framer: LineFramer::new(),
        queued: VecDeque::new(),
        ended: false,
    };

    let items = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.queued.pop_front() {
                return Some((Ok(item), state));
            }

            if let Some(line) = state.framer.next_line() {
                let outcome = parse_event_line(&line);
                return Some((Ok(StreamItem::Line { line, outcome }), state));
            }

            if state.ended {
                return None;
            }

            match state.chunks.next().await {
                Some(Ok(chunk)) => {
                    let (text, warning) = state.decoder.decode(&chunk);
                    if let Some(warning) = warning {
                        state.queued.push_back(StreamItem::Warning(warning));
                    }
                    state.framer.push(&text);
                }
                Some(Err(e)) => {
                    // The framer holds no complete line here, only a partial
                    // remainder, so ending now drops nothing parseable.
                    state.ended = true;
                    state.queued.clear();
                    return Some((Err(e), state));
                }
                None => {
                    state.ended = true;
                    if let Some(warning) = state.decoder.finish() {
                        state.queued.push_back(StreamItem::Warning(warning));
                    }
                    if let Some(warning) = state.framer.finish() {
                        state.queued.push_back(StreamItem::Warning(warning));
                    }
                }
            }
        }
    });

    Box::pin(items)
}
