//! login: Authenticate on the current system.

use crate::network::Server;
use crate::tools::{Command, CommandError, CommandResult, CommandSchema, ExecContext, Flow};

/// Login command: prompt for credentials and push a new session on the
/// system the active session is attached to.
pub struct Login;

impl Command for Login {
    fn name(&self) -> &str {
        "login"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("login", "Log in to the current system")
    }

    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let server = ctx.system().ok_or(CommandError::UnknownSystem)?;
        authenticate(server, ctx)
    }
}

/// Prompt for a username and password and log in to `server`.
///
/// End of input at either prompt abandons the attempt quietly.
pub(super) fn authenticate(server: &Server, ctx: &mut ExecContext<'_>) -> CommandResult {
    let Some(name) = ctx.console.read_line("login: ")? else {
        return Ok(Flow::Continue);
    };
    let Some(password) = ctx.console.read_secret("password: ")? else {
        return Ok(Flow::Continue);
    };

    server
        .login(name.trim(), &password)
        .map(Flow::Push)
        .ok_or(CommandError::InvalidLogin)
}
