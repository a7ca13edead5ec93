//! Terminal output for fix sessions.
//!
//! `boxes` holds the line and rule primitives; `terminal` is the
//! [`RenderSink`](crate::traits::RenderSink) built on them.

mod boxes;
mod terminal;

pub use boxes::{icons, LINE_WIDTH};
pub use terminal::{node_label, TerminalSink};
