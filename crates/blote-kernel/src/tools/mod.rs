//! Command system for blote.
//!
//! Every executable node in a namespace carries a [`Command`]. Commands
//! share one contract (run with an argument vector against the active
//! session) and the dispatcher never looks past it.
//!
//! # Architecture
//!
//! ```text
//! CommandRegistry ("cd" → Cd, "more" → Cat::named("more"), ...)
//!        │  consulted by the namespace builder
//!        ▼
//! Namespace: /bin/cd ── NodeKind::Executable { command }
//!        │  looked up by the dispatcher
//!        ▼
//! Command::execute(args, &mut ExecContext) → Flow | CommandError
//! ```

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use registry::{CommandFactory, CommandRegistry};
pub use traits::{Command, CommandError, CommandResult, CommandSchema, Flow};

#[cfg(test)]
pub(crate) mod testing;
