//! logout, exit: End the active session.

use crate::tools::{Command, CommandResult, CommandSchema, ExecContext, Flow};

/// Logout command: end the active session and resume the one beneath it.
///
/// Also registered as `exit`.
pub struct Logout {
    name: &'static str,
}

impl Logout {
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Command for Logout {
    fn name(&self) -> &str {
        self.name
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new(self.name, "End the current session")
    }

    fn execute(&self, _args: &[String], _ctx: &mut ExecContext<'_>) -> CommandResult {
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::Harness;

    #[test]
    fn test_logout_and_exit() {
        let mut h = Harness::logged_in("alice");
        assert_eq!(h.run(&Logout::named("logout"), &[]).unwrap(), Flow::Exit);
        assert_eq!(h.run(&Logout::named("exit"), &["now"]).unwrap(), Flow::Exit);
        assert!(h.output().is_empty());
    }
}
