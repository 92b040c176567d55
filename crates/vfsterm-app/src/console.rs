//! Console backed by the process's stdout.

use std::io::Write;
use std::time::Duration;

use vfsterm_terminal::Console;

/// ANSI: erase display, cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Default)]
pub struct StdoutConsole {
    prompt: String,
    skip_echo: bool,
    terminated: bool,
}

impl StdoutConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next line came from the keyboard, so the terminal already shows
    /// it after the prompt.
    pub fn mark_typed(&mut self) {
        self.skip_echo = true;
    }

    /// Print the current prompt without a newline.
    pub fn show_prompt(&self) {
        put(&self.prompt);
    }

    /// Finish the prompt line when input ends without a newline.
    pub fn end_line(&self) {
        put("\n");
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl Console for StdoutConsole {
    fn write(&mut self, line: &str) {
        if std::mem::take(&mut self.skip_echo) {
            return;
        }
        put(&format!("{line}\n"));
    }

    fn clear(&mut self) {
        put(CLEAR_SCREEN);
    }

    fn prompt_changed(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    fn request_termination(&mut self, after: Duration) {
        log::debug!("terminating in {} ms", after.as_millis());
        std::thread::sleep(after);
        self.terminated = true;
    }
}

fn put(text: &str) {
    emit(&mut std::io::stdout().lock(), text);
}

/// Write and flush; failures such as a closed pipe are only logged.
fn emit<W: Write>(out: &mut W, text: &str) -> bool {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("stdout: {e}");
            false
        },
    }
}
