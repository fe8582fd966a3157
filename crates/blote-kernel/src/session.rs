//! Sessions, one authenticated shell context each.
//!
//! A session is the cursor state the commands mutate: which system it is
//! attached to, who is logged in, and the current directory. Sessions nest
//! like calls: `login` suspends the caller and pushes a new session, and
//! logging out pops back to the caller (see [`Terminal`](crate::Terminal)).

use crate::network::{Network, ServerId};
use crate::vfs::NodeId;

/// One shell context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    system: Option<ServerId>,
    user: Option<String>,
    cwd: NodeId,
    greeting: Option<String>,
}

impl Session {
    /// Create a session attached to `system` (or the local namespace when
    /// `None`), logged in as `user` (or anonymous), positioned at `cwd`.
    pub fn new(system: Option<ServerId>, user: Option<String>, cwd: NodeId) -> Self {
        Self {
            system,
            user,
            cwd,
            greeting: None,
        }
    }

    /// Text shown when the session starts and whenever it resumes.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        self.greeting = (!greeting.is_empty()).then_some(greeting);
        self
    }

    pub fn system(&self) -> Option<ServerId> {
        self.system
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Current directory.
    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn set_cwd(&mut self, cwd: NodeId) {
        self.cwd = cwd;
    }

    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    /// The prompt for this session.
    ///
    /// `user@system:path> ` when logged in, `system:path> ` when attached
    /// anonymously, `path> ` on the local namespace.
    pub fn prompt(&self, network: &Network) -> String {
        let path = network.namespace(self.system).path(self.cwd);
        let system = self
            .system
            .and_then(|id| network.server(id))
            .map(|server| server.name());

        match (&self.user, system) {
            (Some(user), Some(system)) => format!("{user}@{system}:{path}> "),
            (Some(user), None) => format!("{user}:{path}> "),
            (None, Some(system)) => format!("{system}:{path}> "),
            (None, None) => format!("{path}> "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::sample_network;

    #[test]
    fn test_prompt_variants() {
        let network = sample_network();
        let id = network.find_server("mainframe").unwrap();
        let ns = network.namespace(Some(id));
        let home = ns.lookup("/home/alice").unwrap();

        let logged_in = Session::new(Some(id), Some("alice".into()), home);
        assert_eq!(logged_in.prompt(&network), "alice@mainframe:/home/alice> ");

        let anonymous = Session::new(Some(id), None, ns.root());
        assert_eq!(anonymous.prompt(&network), "mainframe:/> ");

        let local = Session::new(None, None, network.local().root());
        assert_eq!(local.prompt(&network), "/> ");
    }

    #[test]
    fn test_empty_greeting_is_none() {
        let session = Session::new(None, None, crate::vfs::Namespace::new().root())
            .with_greeting("");
        assert_eq!(session.greeting(), None);
    }
}
