//! Terminal render sink.
//!
//! Prints a session as it happens: a header on reset, a section per
//! iteration, a timestamped line per stage, then either the result (fixed
//! code, summary, test output, knowledge matches, reflection logs) or the
//! failure.

use std::io::{self, Write};

use chrono::Local;

use super::boxes::{
    icons, print_block, print_footer, print_header, print_section_start, print_step_line,
};
use crate::session::FailureReason;
use crate::sse::TerminalUpdate;
use crate::traits::RenderSink;

const NO_SUMMARY: &str = "No summary returned.";
const NO_TEST_OUTPUT: &str = "No output returned.";

/// Human label for a service stage name.
pub fn node_label(node: &str) -> String {
    match node {
        "developer" => "Developer is writing a fix".to_string(),
        "reviewer" => "Reviewer is checking the fix".to_string(),
        "qa_executor" => "QA is running the code".to_string(),
        other => format!("Entered {}", other),
    }
}

/// [`RenderSink`] that writes human-readable progress to a writer.
pub struct TerminalSink<W: Write + Send> {
    out: W,
    /// Prefix stage lines with the local time
    timestamps: bool,
}

impl TerminalSink<io::Stdout> {
    /// Printer on stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            timestamps: true,
        }
    }

    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn stamp(&self, message: &str) -> String {
        if self.timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }
}

impl<W: Write + Send> RenderSink for TerminalSink<W> {
    fn on_reset(&mut self) {
        print_header(&mut self.out, "FIX SESSION");
    }

    fn on_iteration_update(&mut self, iteration: u32) {
        print_section_start(&mut self.out, &format!("ITERATION {}", iteration));
    }

    fn on_node_update(&mut self, node: &str) {
        let line = self.stamp(&node_label(node));
        print_step_line(&mut self.out, icons::PROGRESS, &line);
    }

    fn on_result(&mut self, result: &TerminalUpdate) {
        let out: &mut dyn Write = &mut self.out;

        print_section_start(out, "FIXED CODE");
        print_block(out, &result.fixed_code);

        print_section_start(out, "SUMMARY");
        if result.summary.is_empty() {
            print_block(out, NO_SUMMARY);
        } else {
            print_block(out, &result.summary);
        }

        print_section_start(out, "TEST OUTPUT");
        match result.test_output.as_deref().filter(|t| !t.is_empty()) {
            Some(test_output) => print_block(out, test_output),
            None => print_block(out, NO_TEST_OUTPUT),
        }

        if !result.knowledge.is_empty() {
            print_section_start(out, "KNOWLEDGE MATCHES");
            for item in &result.knowledge {
                print_step_line(out, icons::PROGRESS, &format!("{} ({}%)", item.title, item.score));
                print_block(out, &item.summary);
            }
        }

        if !result.logs.is_empty() {
            print_section_start(out, "REFLECTION LOG");
            for entry in &result.logs {
                print_step_line(out, "-", entry);
            }
        }

        let _ = writeln!(out);
        if result.is_success {
            print_footer(out, icons::SUCCESS, "FIX VERIFIED");
        } else {
            print_footer(out, icons::WARNING, "FIX NOT VERIFIED");
        }
    }

    fn on_error(&mut self, reason: &FailureReason) {
        let _ = writeln!(self.out);
        print_footer(&mut self.out, icons::FAILURE, &format!("SESSION FAILED: {}", reason));
    }

    fn on_idle(&mut self) {
        let _ = self.out.flush();
    }
}
