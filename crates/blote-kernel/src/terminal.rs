//! The dispatcher: session stack, history, and the read-eval-print loop.

use std::io;

use anyhow::Context;

use crate::config::{DataSource, TerminalConfig, load_network};
use crate::console::Console;
use crate::network::Network;
use crate::queue::{FixedLengthQueue, QueueError};
use crate::session::Session;
use crate::tools::{CommandError, ExecContext, Flow};

/// A running terminal.
///
/// Owns the network and a stack of sessions. The top of the stack is the
/// active session; the ones beneath it are suspended logins waiting to be
/// resumed. The stack is never left empty: ending the last session brings
/// back the bootstrap session.
pub struct Terminal {
    network: Network,
    sessions: Vec<Session>,
    bootstrap: Session,
    history: FixedLengthQueue<String>,
}

impl Terminal {
    /// Create a terminal over an already built network.
    ///
    /// Fails only when `history_capacity` is zero.
    pub fn new(network: Network, history_capacity: usize) -> Result<Self, QueueError> {
        let history = FixedLengthQueue::new(history_capacity)?;
        let bootstrap = network.bootstrap_session();
        Ok(Self {
            network,
            sessions: vec![bootstrap.clone()],
            bootstrap,
            history,
        })
    }

    /// Load world data as `config` directs and create a terminal over it.
    pub fn from_config(config: &TerminalConfig) -> anyhow::Result<Self> {
        let source = DataSource::locate(config);
        let network = load_network(&source, config.debug)?;
        Self::new(network, config.history_capacity).context("Invalid history capacity")
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Every session, bottom of the stack first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn depth(&self) -> usize {
        self.sessions.len()
    }

    /// The session commands run against.
    pub fn active(&self) -> &Session {
        self.sessions.last().unwrap_or(&self.bootstrap)
    }

    pub fn prompt(&self) -> String {
        self.active().prompt(&self.network)
    }

    pub fn history(&self) -> &FixedLengthQueue<String> {
        &self.history
    }

    /// Show the active session's greeting, if it has one.
    pub fn greet(&self, console: &mut dyn Console) {
        if let Some(greeting) = self.active().greeting() {
            for line in greeting.lines() {
                console.write_line(line);
            }
        }
    }

    /// Run one input line against the active session.
    ///
    /// Every failure is reported on the console as a single line; nothing
    /// escapes to the caller.
    #[tracing::instrument(level = "debug", skip(self, console), fields(depth = self.sessions.len()))]
    pub fn dispatch(&mut self, line: &str, console: &mut dyn Console) {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let Some((name, args)) = tokens.split_first() else {
            return;
        };
        self.record(line.trim());

        if self.sessions.is_empty() {
            self.sessions.push(self.bootstrap.clone());
        }
        let Some((session, suspended)) = self.sessions.split_last_mut() else {
            return;
        };

        let Some(command) = self.network.namespace(session.system()).executable(name) else {
            tracing::debug!(command = %name, "not found");
            console.write_line(&CommandError::NotRecognized(name.clone()).to_string());
            return;
        };

        let result = {
            let mut ctx = ExecContext {
                network: &self.network,
                session,
                suspended,
                history: &self.history,
                console: &mut *console,
            };
            command.execute(args, &mut ctx)
        };

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Push(session)) => self.push(session, console),
            Ok(Flow::Exit) => self.pop(console),
            Err(err) => {
                tracing::debug!(command = %name, error = %err, "command failed");
                console.write_line(&err.to_string());
            }
        }
    }

    /// Read and dispatch lines until the console runs out of input.
    pub fn run(&mut self, console: &mut dyn Console) -> io::Result<()> {
        self.greet(console);
        while let Some(line) = console.read_line(&self.prompt())? {
            self.dispatch(&line, console);
        }
        tracing::info!("end of input");
        Ok(())
    }

    fn push(&mut self, session: Session, console: &mut dyn Console) {
        self.sessions.push(session);
        tracing::info!(depth = self.sessions.len(), user = ?self.active().user(), "session pushed");
        self.greet(console);
    }

    fn pop(&mut self, console: &mut dyn Console) {
        self.sessions.pop();
        if self.sessions.is_empty() {
            tracing::info!("last session ended, restoring bootstrap session");
            self.sessions.push(self.bootstrap.clone());
        } else {
            tracing::info!(depth = self.sessions.len(), "session resumed");
        }
        self.greet(console);
    }

    fn record(&mut self, line: &str) {
        if self.history.is_full()
            && let Err(err) = self.history.remove()
        {
            tracing::warn!(error = %err, "history eviction failed");
        }
        if let Err(err) = self.history.insert(line.to_string()) {
            tracing::warn!(error = %err, "history not recorded");
        }
    }
}
