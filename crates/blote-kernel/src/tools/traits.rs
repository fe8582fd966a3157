//! Core command traits and types.

use std::io;

use thiserror::Error;

use crate::session::Session;
use crate::vfs::ResolveError;

use super::context::ExecContext;

/// Schema describing a command for `help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSchema {
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Usage line, e.g. `cat <file>`.
    pub usage: String,
}

impl CommandSchema {
    /// Create a new command schema. Usage defaults to the bare name.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            description: description.into(),
        }
    }

    /// Set the usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }
}

/// What the dispatcher should do with the session stack after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Stay in the active session.
    Continue,
    /// Suspend the active session and enter this one.
    Push(Session),
    /// End the active session and resume the one beneath it.
    Exit,
}

/// User-facing command failures.
///
/// Each variant renders as the single line the user sees. They are trapped
/// by the dispatcher and never end the read-eval-print loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Error:  Command not recognized: {0}")]
    NotRecognized(String),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Error:  unknown system")]
    UnknownSystem,
    #[error("Error:  Unknown Host: {0}")]
    UnknownHost(String),
    #[error("Error:  Invalid Login")]
    InvalidLogin,
    #[error("Error:  Not Logged In")]
    NotLoggedIn,
    #[error("Error:  Not a File: {0}")]
    NotAFile(String),
    #[error("Error:  No Such Message: {0}")]
    NoSuchMessage(String),
    #[error("Usage:  {0}")]
    Usage(String),
    #[error("Error:  {0}")]
    Console(#[from] io::Error),
}

/// Result of running a command.
pub type CommandResult = Result<Flow, CommandError>;

/// A behavior bound to an executable node.
///
/// Implementations are stateless; everything they read or change goes
/// through the [`ExecContext`].
pub trait Command: Send + Sync {
    /// The command's display name.
    fn name(&self) -> &str;

    /// Get the command's schema.
    fn schema(&self) -> CommandSchema;

    /// Run the command with the argument tokens that followed its name.
    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult;
}
