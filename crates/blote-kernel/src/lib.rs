//! blote-kernel: the core of the blote terminal.
//!
//! This crate provides:
//!
//! - **VFS**: Per-system namespace trees and the shell's path resolver
//! - **Tools**: The command contract, registry, and builtin commands
//! - **Network**: Servers, user accounts, and mailboxes
//! - **Terminal**: The session stack, history, and dispatch loop
//! - **Config**: Terminal options and the TOML world loader
//! - **Queue**: A fixed-capacity ring buffer
//!
//! ```
//! use blote_kernel::{ScriptedConsole, Terminal, TerminalConfig};
//!
//! let mut terminal = Terminal::from_config(&TerminalConfig::default()).unwrap();
//! let mut console = ScriptedConsole::new(["cd /etc", "dir"]);
//! terminal.run(&mut console).unwrap();
//! assert!(console.output().iter().any(|line| line == "motd.txt"));
//! ```

pub mod config;
pub mod console;
pub mod network;
pub mod paths;
pub mod queue;
pub mod session;
pub mod terminal;
pub mod tools;
pub mod vfs;

pub use config::{DataSource, TerminalConfig, load_network};
pub use console::{Console, ScriptedConsole};
pub use network::{MailMessage, Network, Server, ServerId, UserAccount};
pub use queue::{FixedLengthQueue, QueueError};
pub use session::Session;
pub use terminal::Terminal;
pub use tools::{Command, CommandError, CommandRegistry, CommandResult, CommandSchema, ExecContext, Flow};
pub use vfs::{Namespace, NamespaceError, NodeId, NodeKind, Resolution, ResolveError};
