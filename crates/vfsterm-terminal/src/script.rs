//! Script playback.
//!
//! A script is run line by line through [`feed_line`], exactly like typed
//! input. Blank and comment lines are skipped without being submitted. A
//! failing command does not stop the run; only `exit` does.

use std::path::Path;
use std::time::Duration;

use vfsterm_types::config::ShellConfig;
use vfsterm_types::error::TermError;

use crate::console::{Console, feed_line};
use crate::interpreter::{COMMENT_MARKER, Shell};

/// How a script run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every line was processed.
    Completed { executed: usize },
    /// `exit` was reached; later lines were not processed.
    Terminated { executed: usize },
    /// The script source could not be read.
    Unreadable,
}

impl RunOutcome {
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated { .. })
    }
}

/// True for lines a script skips without submitting.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

/// Feeds script lines into a shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptRunner {
    line_delay: Duration,
}

impl ScriptRunner {
    /// `line_delay` is the pause after each submitted line.
    pub fn new(line_delay: Duration) -> Self {
        Self { line_delay }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.script_line_delay())
    }

    /// Run `lines` in order.
    pub fn run<I, S>(
        &self,
        lines: I,
        shell: &mut Shell<'_>,
        console: &mut dyn Console,
    ) -> RunOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut executed = 0;
        for line in lines {
            let line = line.as_ref();
            if is_skippable(line) {
                continue;
            }
            executed += 1;
            if feed_line(shell, console, line) {
                log::info!("Script stopped by exit after {executed} commands");
                return RunOutcome::Terminated { executed };
            }
            if !self.line_delay.is_zero() {
                std::thread::sleep(self.line_delay);
            }
        }
        log::info!("Script finished: {executed} commands");
        RunOutcome::Completed { executed }
    }

    /// Run the lines of an in-memory script.
    pub fn run_source(
        &self,
        source: &str,
        shell: &mut Shell<'_>,
        console: &mut dyn Console,
    ) -> RunOutcome {
        self.run(source.lines(), shell, console)
    }

    /// Read a script from the host filesystem and run it.
    ///
    /// A read failure is reported as one console line and never propagates.
    pub fn run_file(
        &self,
        path: &Path,
        shell: &mut Shell<'_>,
        console: &mut dyn Console,
    ) -> RunOutcome {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                let err = TermError::Script(format!("{}: {e}", path.display()));
                log::warn!("{err}");
                console.write(&shell.messages().error_line(&err));
                return RunOutcome::Unreadable;
            },
        };
        log::info!("Running script {}", path.display());
        self.run_source(&source, shell, console)
    }
}
