//! blote REPL: the interactive front end for the blote terminal.
//!
//! This crate handles:
//! - Command-line arguments (`--debug`, `--data-dir=<path>`)
//! - A [`Console`] backed by rustyline, with history saved between runs
//! - Driving a [`Terminal`] until end of input

use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{ColorMode, Editor, Helper};

use blote_kernel::{Console, Terminal, TerminalConfig};

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Start the terminal.
    Run(TerminalConfig),
    Help,
    Version,
}

/// Parse command-line arguments (without the program name).
///
/// Flags are matched literally. Anything unrecognised is ignored.
pub fn parse_args<I>(args: I) -> Invocation
where
    I: IntoIterator<Item = String>,
{
    let mut config = TerminalConfig::default();
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Invocation::Help,
            "--version" | "-V" => return Invocation::Version,
            "--debug" => config.debug = true,
            _ => {
                if let Some(dir) = arg.strip_prefix("--data-dir=")
                    && !dir.is_empty()
                {
                    config.data_dir = Some(PathBuf::from(dir));
                }
            }
        }
    }
    Invocation::Run(config)
}

pub const HELP_TEXT: &str = r#"blote: a terminal into remote systems

Usage:
  blote [OPTIONS]

Options:
  --debug                Enable the debug command and verbose logging
  --data-dir=<path>      Read world data from <path>
  -h, --help             Show this help
  -V, --version          Show version

Once connected, type 'help' for the commands available on each system.
End input (Ctrl-D) to quit.
"#;

/// Line-editor helper that draws every typed character as `*` while
/// `masking` is set.
#[derive(Debug, Default)]
pub struct MaskingHelper {
    pub masking: bool,
}

impl Highlighter for MaskingHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Cow::Owned("*".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.masking
    }
}

impl Completer for MaskingHelper {
    type Candidate = String;
}

impl Hinter for MaskingHelper {
    type Hint = String;
}

impl Validator for MaskingHelper {}

impl Helper for MaskingHelper {}

/// A [`Console`] on the user's terminal.
pub struct LineConsole {
    editor: Editor<MaskingHelper, DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl LineConsole {
    /// Create a console, loading saved history if there is any.
    pub fn new() -> Result<Self> {
        let mut editor: Editor<MaskingHelper, DefaultHistory> =
            Editor::new().context("Failed to create editor")?;
        editor.set_helper(Some(MaskingHelper::default()));
        // Masking is drawn by the highlighter, which only runs with color on.
        editor.set_color_mode(ColorMode::Forced);

        let history_path = blote_kernel::paths::history_file();
        if let Some(path) = &history_path
            && let Err(e) = editor.load_history(path)
        {
            let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound);
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Write history to disk.
    pub fn save_history(&mut self) {
        let Some(path) = &self.history_path else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Failed to create history directory: {}", e);
        }
        if let Err(e) = self.editor.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }

    fn set_masking(&mut self, masking: bool) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.masking = masking;
        }
    }

    fn read(&mut self, prompt: &str, remember: bool) -> io::Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if remember
                        && !line.trim().is_empty()
                        && let Err(e) = self.editor.add_history_entry(line.as_str())
                    {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    return Ok(None);
                }
                Err(ReadlineError::Io(e)) => return Err(e),
                Err(e) => return Err(io::Error::other(e.to_string())),
            }
        }
    }
}

impl Console for LineConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read(prompt, true)
    }

    /// Passwords are masked while typed and stay out of the saved history.
    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.set_masking(true);
        let line = self.read(prompt, false);
        self.set_masking(false);
        line
    }

    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn clear(&mut self) {
        if let Err(e) = self.editor.clear_screen() {
            tracing::warn!("Failed to clear screen: {}", e);
        }
    }
}

/// Run the terminal on the user's console until end of input.
pub fn run(config: &TerminalConfig) -> Result<()> {
    let mut terminal = Terminal::from_config(config).context("Failed to load world data")?;
    let mut console = LineConsole::new()?;

    let result = terminal.run(&mut console);
    console.save_history();
    result.context("Console failed")
}
