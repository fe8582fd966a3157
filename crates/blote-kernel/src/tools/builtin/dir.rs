//! dir: List directory contents.

use crate::tools::{Command, CommandResult, CommandSchema, ExecContext, Flow};

/// Dir command: list the children of a directory, sorted by name.
///
/// Containers are shown with a trailing separator. Naming a file lists the
/// file itself.
pub struct Dir;

impl Command for Dir {
    fn name(&self) -> &str {
        "dir"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("dir", "List directory contents").usage("dir [path]")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let target = ctx.resolve_or_cwd(args.first().map(String::as_str))?;
        let ns = ctx.namespace();

        if !ns.kind(target).is_container() {
            ctx.println(ns.name(target));
            return Ok(Flow::Continue);
        }

        for child in ns.children(target) {
            let name = ns.name(child);
            if ns.kind(child).is_container() {
                ctx.println(format!("{name}/"));
            } else {
                ctx.println(name);
            }
        }
        Ok(Flow::Continue)
    }
}
