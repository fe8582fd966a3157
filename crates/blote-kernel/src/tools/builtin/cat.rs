//! cat, more: Print a text file.

use crate::tools::{Command, CommandError, CommandResult, CommandSchema, ExecContext, Flow};
use crate::vfs::{NodeKind, Resolution};

/// Cat command: print the contents of a text file.
///
/// Also registered as `more`, which behaves identically.
pub struct Cat {
    name: &'static str,
}

impl Cat {
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    fn usage(&self) -> CommandError {
        CommandError::Usage(format!("{} <file>", self.name))
    }
}

impl Command for Cat {
    fn name(&self) -> &str {
        self.name
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new(self.name, "Print the contents of a file")
            .usage(format!("{} <file>", self.name))
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let Some(path) = args.first() else {
            return Err(self.usage());
        };

        let node = match ctx.resolve(path)? {
            Resolution::Node(node) => node,
            Resolution::Unspecified => return Err(self.usage()),
        };

        match ctx.namespace().kind(node) {
            NodeKind::TextFile { text } => {
                for line in text.lines() {
                    ctx.println(line);
                }
                Ok(Flow::Continue)
            }
            _ => Err(CommandError::NotAFile(path.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::Harness;

    #[test]
    fn test_cat_prints_lines() {
        let mut h = Harness::logged_in("alice");
        h.run(&Cat::named("cat"), &["notes.txt"]).unwrap();
        assert_eq!(h.output(), ["Meet at dawn.", "Bring the codes."]);
    }

    #[test]
    fn test_cat_does_not_move_cursor() {
        let mut h = Harness::logged_in("alice");
        h.run(&Cat::named("cat"), &["/etc/motd.txt"]).unwrap();
        assert_eq!(h.output(), ["Authorized users only."]);
        assert_eq!(h.cwd_path(), "/home/alice");
    }

    #[test]
    fn test_more_is_cat() {
        let mut h = Harness::logged_in("alice");
        let more = Cat::named("more");
        assert_eq!(more.name(), "more");
        h.run(&more, &["../alice/notes.txt"]).unwrap();
        assert_eq!(h.output().len(), 2);
    }

    #[test]
    fn test_cat_directory_is_not_a_file() {
        let mut h = Harness::logged_in("alice");
        let err = h.run(&Cat::named("cat"), &["docs"]).unwrap_err();
        assert_eq!(err.to_string(), "Error:  Not a File: docs");
    }

    #[test]
    fn test_cat_requires_path() {
        let mut h = Harness::logged_in("alice");
        let err = h.run(&Cat::named("more"), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Usage:  more <file>");

        let err = h.run(&Cat::named("cat"), &["//notes.txt"]).unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
    }

    #[test]
    fn test_cat_other_home_denied() {
        let mut h = Harness::logged_in("alice");
        let err = h.run(&Cat::named("cat"), &["/home/bob/plans.txt"]).unwrap_err();
        assert_eq!(err.to_string(), "Error:  Insufficient Permissions");
        assert!(h.output().is_empty());
    }
}
