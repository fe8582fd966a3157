//! rlogin: Log in to another system.

use crate::tools::{Command, CommandError, CommandResult, CommandSchema, ExecContext};

use super::login::authenticate;

/// Rlogin command: look up a host by name and log in to it.
pub struct Rlogin;

impl Command for Rlogin {
    fn name(&self) -> &str {
        "rlogin"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("rlogin", "Log in to a remote system").usage("rlogin <host>")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let Some(host) = args.first() else {
            return Err(CommandError::Usage("rlogin <host>".into()));
        };

        let network = ctx.network;
        let server = network
            .find_server(host)
            .and_then(|id| network.server(id))
            .ok_or_else(|| CommandError::UnknownHost(host.clone()))?;

        tracing::debug!(host = %server.name(), "connecting");
        authenticate(server, ctx)
    }
}
