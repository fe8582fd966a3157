//! Remote systems and the accounts on them.
//!
//! The [`Network`] owns every namespace in the program: one per [`Server`]
//! plus the local terminal's own. A server authenticates its users and, on
//! success, hands back a new [`Session`] bound to itself.

use std::collections::BTreeMap;

use crate::session::Session;
use crate::vfs::{Namespace, NodeId};

/// Stable identity of a server on the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerId(pub(crate) usize);

/// One piece of mail in a user's mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub subject: String,
    pub body: String,
}

/// A login on one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    name: String,
    password: String,
    home: Option<NodeId>,
    mailbox: Vec<MailMessage>,
}

impl UserAccount {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            home: None,
            mailbox: Vec::new(),
        }
    }

    /// Set the account's home directory node.
    pub fn with_home(mut self, home: NodeId) -> Self {
        self.home = Some(home);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn home(&self) -> Option<NodeId> {
        self.home
    }

    pub fn mailbox(&self) -> &[MailMessage] {
        &self.mailbox
    }

    pub fn deliver(&mut self, message: MailMessage) {
        self.mailbox.push(message);
    }

    fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

/// A connection target with its own namespace and accounts.
#[derive(Debug, Clone)]
pub struct Server {
    id: ServerId,
    name: String,
    greeting: Option<String>,
    namespace: Namespace,
    users: BTreeMap<String, UserAccount>,
}

impl Server {
    /// Create a server. It receives its id when added to a [`Network`].
    pub fn new(name: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            id: ServerId(usize::MAX),
            name: name.into(),
            greeting: None,
            namespace,
            users: BTreeMap::new(),
        }
    }

    /// Text shown after a successful login.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    pub fn id(&self) -> ServerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    /// Add an account, returning the one it replaced.
    pub fn add_user(&mut self, account: UserAccount) -> Option<UserAccount> {
        self.users.insert(account.name.clone(), account)
    }

    pub fn user(&self, name: &str) -> Option<&UserAccount> {
        self.users.get(name)
    }

    pub fn user_mut(&mut self, name: &str) -> Option<&mut UserAccount> {
        self.users.get_mut(name)
    }

    /// Accounts ordered by name.
    pub fn users(&self) -> impl Iterator<Item = &UserAccount> {
        self.users.values()
    }

    /// Check a credential pair.
    pub fn authenticate(&self, name: &str, password: &str) -> bool {
        self.user(name)
            .is_some_and(|account| account.password_matches(password))
    }

    /// Authenticate and, on success, build a session bound to this server.
    ///
    /// The session starts in the user's home directory when one is
    /// configured, otherwise at the root.
    pub fn login(&self, name: &str, password: &str) -> Option<Session> {
        if !self.authenticate(name, password) {
            tracing::info!(server = %self.name, user = name, "login rejected");
            return None;
        }
        tracing::info!(server = %self.name, user = name, "login accepted");
        Some(self.session_for(Some(name)))
    }

    /// A session on this server without a credential check.
    pub(crate) fn session_for(&self, user: Option<&str>) -> Session {
        let cwd = user
            .and_then(|name| self.user(name))
            .and_then(UserAccount::home)
            .unwrap_or_else(|| self.namespace.root());
        let session = Session::new(Some(self.id), user.map(str::to_string), cwd);
        match &self.greeting {
            Some(greeting) => session.with_greeting(greeting.clone()),
            None => session,
        }
    }
}

/// Every system reachable from the terminal.
#[derive(Debug, Clone, Default)]
pub struct Network {
    local: Namespace,
    servers: Vec<Server>,
    default_server: Option<ServerId>,
    default_user: Option<String>,
    motd: String,
}

impl Network {
    /// Create a network around the local terminal's namespace.
    pub fn new(local: Namespace) -> Self {
        Self {
            local,
            ..Self::default()
        }
    }

    pub fn local(&self) -> &Namespace {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut Namespace {
        &mut self.local
    }

    /// Add a server and assign its id.
    pub fn add_server(&mut self, mut server: Server) -> ServerId {
        let id = ServerId(self.servers.len());
        server.id = id;
        self.servers.push(server);
        id
    }

    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.servers.get(id.0)
    }

    pub fn server_mut(&mut self, id: ServerId) -> Option<&mut Server> {
        self.servers.get_mut(id.0)
    }

    pub fn servers(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter()
    }

    /// Find a server by name, ignoring case.
    pub fn find_server(&self, name: &str) -> Option<ServerId> {
        self.servers
            .iter()
            .find(|server| server.name.eq_ignore_ascii_case(name))
            .map(Server::id)
    }

    /// The namespace for a session attached to `system`, or the local one.
    pub fn namespace(&self, system: Option<ServerId>) -> &Namespace {
        system
            .and_then(|id| self.server(id))
            .map(Server::namespace)
            .unwrap_or(&self.local)
    }

    /// Choose where the bootstrap session starts.
    pub fn set_default(&mut self, server: Option<ServerId>, user: Option<String>) {
        self.default_server = server;
        self.default_user = user;
    }

    pub fn motd(&self) -> &str {
        &self.motd
    }

    pub fn set_motd(&mut self, motd: impl Into<String>) {
        self.motd = motd.into();
    }

    /// The session the terminal falls back to when every other one ends.
    ///
    /// Attached to the default server as the default user when configured,
    /// otherwise anonymous on the local namespace. Greets with the message
    /// of the day.
    pub fn bootstrap_session(&self) -> Session {
        let session = match self.default_server.and_then(|id| self.server(id)) {
            Some(server) => server.session_for(self.default_user.as_deref()),
            None => Session::new(None, None, self.local.root()),
        };
        session.with_greeting(self.motd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::sample_network;

    #[test]
    fn test_login_success_starts_at_home() {
        let network = sample_network();
        let server = network.server(network.find_server("mainframe").unwrap()).unwrap();

        let session = server.login("alice", "swordfish").unwrap();
        assert_eq!(session.user(), Some("alice"));
        assert_eq!(session.system(), Some(server.id()));
        assert_eq!(server.namespace().path(session.cwd()), "/home/alice");
        assert_eq!(session.greeting(), server.greeting());
    }

    #[test]
    fn test_login_failure() {
        let network = sample_network();
        let server = network.server(network.find_server("mainframe").unwrap()).unwrap();
        assert!(server.login("alice", "wrong").is_none());
        assert!(server.login("nobody", "swordfish").is_none());
    }

    #[test]
    fn test_login_without_home_starts_at_root() {
        let network = sample_network();
        let server = network.server(network.find_server("mainframe").unwrap()).unwrap();
        let session = server.login("guest", "").unwrap();
        assert_eq!(session.cwd(), server.namespace().root());
    }

    #[test]
    fn test_find_server_ignores_case() {
        let network = sample_network();
        assert_eq!(network.find_server("ARCHIVE"), network.find_server("archive"));
        assert!(network.find_server("archive").is_some());
        assert!(network.find_server("nowhere").is_none());
    }

    #[test]
    fn test_bootstrap_without_default_is_local() {
        let mut network = sample_network();
        network.set_default(None, None);
        network.set_motd("hello");

        let session = network.bootstrap_session();
        assert_eq!(session.system(), None);
        assert_eq!(session.cwd(), network.local().root());
        assert_eq!(session.greeting(), Some("hello"));
    }

    #[test]
    fn test_bootstrap_with_default_user() {
        let mut network = sample_network();
        let id = network.find_server("mainframe");
        network.set_default(id, Some("bob".into()));

        let session = network.bootstrap_session();
        assert_eq!(session.user(), Some("bob"));
        assert_eq!(network.namespace(id).path(session.cwd()), "/home/bob");
    }
}
