//! cd: Change the current directory.

use crate::tools::{Command, CommandResult, CommandSchema, ExecContext, Flow};
use crate::vfs::Resolution;

/// Cd command: change the session's current directory.
///
/// With no argument, prints the current directory instead.
pub struct Cd;

impl Command for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("cd", "Change or print the current directory").usage("cd [path]")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let Some(path) = args.first() else {
            print_cwd(ctx);
            return Ok(Flow::Continue);
        };

        match ctx.resolve(path)? {
            Resolution::Unspecified => print_cwd(ctx),
            Resolution::Node(node) => ctx.session.set_cwd(node),
        }
        Ok(Flow::Continue)
    }
}

fn print_cwd(ctx: &mut ExecContext<'_>) {
    let path = ctx.namespace().path(ctx.session.cwd());
    ctx.println(path);
}
