//! mail: Read the logged-in user's mailbox.

use crate::tools::{Command, CommandError, CommandResult, CommandSchema, ExecContext, Flow};

/// Mail command: list the mailbox, or print message `n` (counting from 1).
pub struct Mail;

impl Command for Mail {
    fn name(&self) -> &str {
        "mail"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("mail", "Read your mail").usage("mail [n]")
    }

    fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> CommandResult {
        let server = ctx.system().ok_or(CommandError::UnknownSystem)?;
        let account = ctx
            .session
            .user()
            .and_then(|name| server.user(name))
            .ok_or(CommandError::NotLoggedIn)?;
        let mailbox = account.mailbox();

        let Some(arg) = args.first() else {
            if mailbox.is_empty() {
                ctx.println("No mail.");
            }
            for (n, message) in mailbox.iter().enumerate() {
                ctx.println(format!("{:>3}  {:<12}{}", n + 1, message.from, message.subject));
            }
            return Ok(Flow::Continue);
        };

        let message = arg
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| mailbox.get(index))
            .ok_or_else(|| CommandError::NoSuchMessage(arg.clone()))?;

        ctx.println(format!("From: {}", message.from));
        ctx.println(format!("Subject: {}", message.subject));
        ctx.println("");
        for line in message.body.lines() {
            ctx.println(line);
        }
        Ok(Flow::Continue)
    }
}
