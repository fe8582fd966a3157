//! Execution context for commands.

use crate::console::Console;
use crate::network::{Network, Server};
use crate::queue::FixedLengthQueue;
use crate::session::Session;
use crate::vfs::{resolve, Namespace, NodeId, Resolution, ResolveError};

/// Execution context passed to commands.
///
/// Gives a command the active session (mutable), read access to the
/// network it lives on, and the console to talk through.
pub struct ExecContext<'a> {
    /// Every system plus the local namespace.
    pub network: &'a Network,
    /// The active session.
    pub session: &'a mut Session,
    /// Sessions suspended beneath the active one, oldest first.
    pub suspended: &'a [Session],
    /// Recently dispatched input lines, oldest first.
    pub history: &'a FixedLengthQueue<String>,
    /// Output sink and line input.
    pub console: &'a mut dyn Console,
}

impl<'a> ExecContext<'a> {
    /// The namespace the active session is navigating.
    pub fn namespace(&self) -> &'a Namespace {
        self.network.namespace(self.session.system())
    }

    /// The system the active session is attached to.
    pub fn system(&self) -> Option<&'a Server> {
        self.session.system().and_then(|id| self.network.server(id))
    }

    /// Resolve a path argument from the session's cursor.
    pub fn resolve(&self, path: &str) -> Result<Resolution, ResolveError> {
        resolve(
            self.namespace(),
            self.session.cwd(),
            self.session.user(),
            path,
        )
    }

    /// Resolve an optional path argument, defaulting to the cursor.
    ///
    /// A path that degenerates to "no argument" also yields the cursor.
    pub fn resolve_or_cwd(&self, path: Option<&str>) -> Result<NodeId, ResolveError> {
        match path.map(|p| self.resolve(p)).transpose()? {
            Some(Resolution::Node(id)) => Ok(id),
            Some(Resolution::Unspecified) | None => Ok(self.session.cwd()),
        }
    }

    /// Write one line to the console.
    pub fn println(&mut self, line: impl AsRef<str>) {
        self.console.write_line(line.as_ref());
    }
}
