//! debug: Dump the session stack and command history.

use crate::tools::{Command, CommandResult, CommandSchema, ExecContext, Flow};

/// Debug command: only installed when the terminal runs in debug mode.
pub struct Debug;

impl Command for Debug {
    fn name(&self) -> &str {
        "debug"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("debug", "Show the session stack and history")
    }

    fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let network = ctx.network;
        let sessions: Vec<String> = ctx
            .suspended
            .iter()
            .chain(std::iter::once(&*ctx.session))
            .map(|session| session.prompt(network).trim_end().to_string())
            .collect();

        let mut lines = vec![format!("Session stack ({} deep):", sessions.len())];
        for (depth, prompt) in sessions.iter().enumerate() {
            lines.push(format!("  {depth}: {prompt}"));
        }
        lines.push(format!(
            "History ({}/{}):",
            ctx.history.len(),
            ctx.history.capacity()
        ));
        for (n, entry) in ctx.history.iter().enumerate() {
            lines.push(format!("  {:>2}  {entry}", n + 1));
        }

        for line in lines {
            ctx.println(line);
        }
        Ok(Flow::Continue)
    }
}
