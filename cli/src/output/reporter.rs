//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::domain::command::Operation;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `running()` prints `"  → {operation}"` and the dimmed command line, if any
/// - `success()` prints `"  ✓ {message}"`
///
/// Both are suppressed when `ctx.quiet`.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn running(&self, operation: Operation, command_line: Option<&str>) {
        if self.ctx.quiet {
            return;
        }
        println!(
            "  {} {}...",
            "→".style(self.ctx.styles.step),
            operation.description()
        );
        if let Some(line) = command_line {
            self.ctx.detail(line);
        }
    }

    fn success(&self, message: &str) {
        self.ctx.success(message);
    }
}
