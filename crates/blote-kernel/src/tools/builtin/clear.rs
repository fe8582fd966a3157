//! clear: Clear the display.

use crate::tools::{Command, CommandResult, CommandSchema, ExecContext, Flow};

/// Clear command: wipe the console, if it supports that.
pub struct Clear;

impl Command for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("clear", "Clear the screen")
    }

    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        ctx.console.clear();
        Ok(Flow::Continue)
    }
}
