//! The terminal display, seen from the kernel.
//!
//! The kernel never formats for a particular surface. It writes lines and
//! reads lines through a [`Console`]; the REPL crate backs it with a line
//! editor, tests back it with a [`ScriptedConsole`].

use std::collections::VecDeque;
use std::io;

/// Output sink plus line input.
pub trait Console {
    /// Show `prompt` and read one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Read a line that must not be remembered (passwords). Surfaces that
    /// can should also hide it while it is typed.
    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read_line(prompt)
    }

    /// Write one line of output.
    fn write_line(&mut self, line: &str);

    /// Clear the display, if the surface supports it.
    fn clear(&mut self) {}
}

/// In-memory console fed from a list of input lines.
///
/// Records every prompt shown and every line written, in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
    clears: usize,
}

impl ScriptedConsole {
    /// Create a console that will answer reads with `lines`, then EOF.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Queue more input.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Lines written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Drain the lines written so far.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// How many times the display was cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_console_replays_input() {
        let mut console = ScriptedConsole::new(["one", "two"]);
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("one"));
        assert_eq!(console.read_secret("pw: ").unwrap().as_deref(), Some("two"));
        assert_eq!(console.read_line("> ").unwrap(), None);
        assert_eq!(console.prompts(), ["> ", "pw: ", "> "]);
    }

    #[test]
    fn test_scripted_console_records_output() {
        let mut console = ScriptedConsole::default();
        console.write_line("hello");
        console.clear();
        assert_eq!(console.output(), ["hello"]);
        assert_eq!(console.clears(), 1);
        assert_eq!(console.take_output(), ["hello"]);
        assert!(console.output().is_empty());
    }
}
