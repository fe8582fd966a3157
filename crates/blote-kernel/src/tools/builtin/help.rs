//! help: Describe the commands available here.

use crate::tools::{Command, CommandError, CommandResult, CommandSchema, ExecContext, Flow};

/// Help command: list the executables in the active namespace.
///
/// Only commands installed on the current system are shown, so `help` on
/// a sparse server lists less than `help` at home.
pub struct Help;

impl Command for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("help", "Show available commands").usage("help [command]")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let ns = ctx.namespace();

        if let Some(name) = args.first() {
            let command = ns
                .executable(name)
                .ok_or_else(|| CommandError::NotRecognized(name.clone()))?;
            ctx.println(format_entry(&command.schema()));
            return Ok(Flow::Continue);
        }

        for name in ns.executable_names() {
            if let Some(command) = ns.executable(name) {
                ctx.println(format_entry(&command.schema()));
            }
        }
        Ok(Flow::Continue)
    }
}

fn format_entry(schema: &CommandSchema) -> String {
    format!("{:<24}{}", schema.usage, schema.description)
}
