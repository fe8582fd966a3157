//! who: List the accounts on the current system.

use crate::tools::{Command, CommandError, CommandResult, CommandSchema, ExecContext, Flow};

/// Who command: print every account name on the attached system.
pub struct Who;

impl Command for Who {
    fn name(&self) -> &str {
        "who"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("who", "List users on this system")
    }

    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let server = ctx.system().ok_or(CommandError::UnknownSystem)?;
        for account in server.users() {
            ctx.println(account.name());
        }
        Ok(Flow::Continue)
    }
}
