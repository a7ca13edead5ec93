//! Simple line-based output primitives.
//!
//! Every function writes to a caller-supplied writer so the printer can be
//! pointed at stdout or captured in tests. Write errors are ignored: a closed
//! stdout must not abort a session.

use std::io::Write;

/// Line width for separators.
pub const LINE_WIDTH: usize = 60;

/// Print the main header.
///
/// ```text
/// FIX SESSION
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(out: &mut dyn Write, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "═".repeat(LINE_WIDTH));
}

/// Print the start of a section.
///
/// ```text
/// ITERATION 1
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_section_start(out: &mut dyn Write, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "─".repeat(LINE_WIDTH));
}

/// Print a line within a section.
///
/// ```text
///   ✓ Tests passed
/// ```
pub fn print_step_line(out: &mut dyn Write, icon: &str, message: &str) {
    let _ = writeln!(out, "  {} {}", icon, message);
}

/// Print a block of text indented under the current section.
pub fn print_block(out: &mut dyn Write, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "    {}", line);
    }
}

/// Print the closing rule with a status line.
///
/// ```text
/// ════════════════════════════════════════════════════════════
/// ✓ FIX VERIFIED
/// ```
pub fn print_footer(out: &mut dyn Write, icon: &str, status: &str) {
    let _ = writeln!(out, "{}", "═".repeat(LINE_WIDTH));
    let _ = writeln!(out, "{} {}", icon, status);
    let _ = out.flush();
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "▸";
}
