//! The display side of a session.
//!
//! A [`Console`] only shows what the shell produced. [`feed_line`] is the
//! single path from an input line to the console, used both for typed input
//! and for script playback, so the two behave the same.

use std::time::Duration;

use crate::interpreter::Shell;

/// Display collaborator driven by the shell.
pub trait Console {
    /// Append one line of output.
    fn write(&mut self, line: &str);

    /// Erase everything shown so far.
    fn clear(&mut self);

    /// The prompt text changed (after every submitted line).
    fn prompt_changed(&mut self, prompt: &str);

    /// End the session once `after` has elapsed.
    fn request_termination(&mut self, after: Duration);
}

/// Submit `line` and forward the result to `console`.
///
/// Returns `true` if the session should end.
pub fn feed_line(shell: &mut Shell<'_>, console: &mut dyn Console, line: &str) -> bool {
    let result = shell.submit(line);
    console.write(&result.echo);
    if result.clear {
        console.clear();
    }
    for out in &result.lines {
        console.write(out);
    }
    console.prompt_changed(&shell.prompt());
    if result.terminate {
        console.request_termination(shell.config().exit_delay());
    }
    result.terminate
}

/// Write the welcome banner and the initial prompt.
pub fn greet(shell: &Shell<'_>, console: &mut dyn Console) {
    for line in shell.banner() {
        console.write(&line);
    }
    console.prompt_changed(&shell.prompt());
}

/// A console that keeps everything in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConsole {
    /// Lines currently on screen.
    pub lines: Vec<String>,
    /// Last prompt announced.
    pub prompt: String,
    /// Number of `clear` calls.
    pub clears: usize,
    /// Delay passed to the termination request, if any.
    pub termination: Option<Duration>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for MemoryConsole {
    fn write(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.clears += 1;
    }

    fn prompt_changed(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    fn request_termination(&mut self, after: Duration) {
        self.termination = Some(after);
    }
}
