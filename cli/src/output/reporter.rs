//! `TerminalReporter`: Presentation-layer implementation of `StartReporter`.
//!
//! The poll loop and the staging log task both write through one reporter.
//! A mutex around the writer keeps each line whole; a status line that
//! follows a log chunk without a trailing newline starts on a fresh line.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize as _;

use crate::application::ports::StartReporter;
use crate::output::{OutputContext, Styles};

struct Transcript {
    writer: Box<dyn Write + Send>,
    /// The last write ended in the middle of a line.
    line_open: bool,
}

impl Transcript {
    fn line(&mut self, text: &str) {
        if self.line_open {
            let _ = writeln!(self.writer);
            self.line_open = false;
        }
        let _ = writeln!(self.writer, "{text}");
        let _ = self.writer.flush();
    }

    fn raw(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        let _ = self.writer.write_all(chunk);
        let _ = self.writer.flush();
        self.line_open = !chunk.ends_with(b"\n");
    }
}

/// Terminal transcript for `cf start`.
///
/// - `say()` prints the message as one line (suppressed when quiet)
/// - `ok()` prints `OK` (suppressed when quiet)
/// - `failed()` prints `FAILED` and the reason (never suppressed)
/// - `log()` copies staging log bytes unchanged (suppressed when quiet)
pub struct TerminalReporter {
    styles: Styles,
    quiet: bool,
    out: Mutex<Transcript>,
}

impl TerminalReporter {
    /// Reporter writing to stdout.
    #[must_use]
    pub fn stdout(ctx: &OutputContext) -> Self {
        Self::with_writer(ctx, Box::new(std::io::stdout()))
    }

    /// Reporter writing to an arbitrary sink.
    #[must_use]
    pub fn with_writer(ctx: &OutputContext, writer: Box<dyn Write + Send>) -> Self {
        Self {
            styles: ctx.styles.clone(),
            quiet: ctx.quiet,
            out: Mutex::new(Transcript {
                writer,
                line_open: false,
            }),
        }
    }

    fn with_transcript(&self, f: impl FnOnce(&mut Transcript)) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut out);
    }
}

impl StartReporter for TerminalReporter {
    fn say(&self, message: &str) {
        if !self.quiet {
            self.with_transcript(|t| t.line(message));
        }
    }

    fn ok(&self) {
        if !self.quiet {
            let text = format!("{}", "OK".style(self.styles.success));
            self.with_transcript(|t| t.line(&text));
        }
    }

    fn failed(&self, reason: &str) {
        let text = format!("{}", "FAILED".style(self.styles.error));
        self.with_transcript(|t| {
            t.line(&text);
            t.line(reason);
        });
    }

    fn log(&self, chunk: &[u8]) {
        if !self.quiet {
            self.with_transcript(|t| t.raw(chunk));
        }
    }
}
