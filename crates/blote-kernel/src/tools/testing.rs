//! Test fixtures shared by the command tests.

use crate::console::ScriptedConsole;
use crate::network::{MailMessage, Network, Server, UserAccount};
use crate::queue::FixedLengthQueue;
use crate::session::Session;
use crate::vfs::{Namespace, NodeKind};

use super::{Command, CommandRegistry, CommandResult, ExecContext};

fn install_commands(ns: &mut Namespace, registry: &CommandRegistry, ids: &[&str]) {
    for id in ids {
        let command = registry.build(id).unwrap();
        ns.insert(&format!("/bin/{id}"), NodeKind::Executable { command })
            .unwrap();
    }
}

fn home(owner: &str) -> NodeKind {
    NodeKind::HomeDirectory {
        owner: owner.into(),
    }
}

fn text(body: &str) -> NodeKind {
    NodeKind::TextFile { text: body.into() }
}

/// Two servers plus a local namespace.
///
/// ```text
/// mainframe (default)                 archive
/// /bin/<every builtin>                /bin/{cd,dir,cat,logout,who,help}
/// /etc/motd.txt                       /home/carol   (carol)
/// /home/alice        (alice)          /records/index.txt
/// /home/alice/docs/
/// /home/alice/notes.txt
/// /home/bob          (bob)
/// /home/bob/plans.txt
/// ```
pub(crate) fn sample_network() -> Network {
    let registry = CommandRegistry::with_builtins(true);
    let all: Vec<&str> = registry.ids().collect();

    let mut local = Namespace::new();
    install_commands(&mut local, &registry, &all);
    let mut network = Network::new(local);

    let mut ns = Namespace::new();
    install_commands(&mut ns, &registry, &all);
    ns.insert("/etc/motd.txt", text("Authorized users only.")).unwrap();
    let alice_home = ns.insert("/home/alice", home("alice")).unwrap();
    ns.insert("/home/alice/docs", NodeKind::Directory).unwrap();
    ns.insert("/home/alice/notes.txt", text("Meet at dawn.\nBring the codes."))
        .unwrap();
    let bob_home = ns.insert("/home/bob", home("bob")).unwrap();
    ns.insert("/home/bob/plans.txt", text("Secret.")).unwrap();

    let mut mainframe = Server::new("mainframe", ns).with_greeting("Mainframe online.");
    let mut alice = UserAccount::new("alice", "swordfish").with_home(alice_home);
    alice.deliver(MailMessage {
        from: "bob".into(),
        subject: "Numbers".into(),
        body: "The numbers are ready.\nCheck the usual place.".into(),
    });
    alice.deliver(MailMessage {
        from: "carol".into(),
        subject: "Archive access".into(),
        body: "Your archive account is active.".into(),
    });
    mainframe.add_user(alice);
    mainframe.add_user(UserAccount::new("bob", "hunter2").with_home(bob_home));
    mainframe.add_user(UserAccount::new("guest", ""));
    let mainframe = network.add_server(mainframe);

    let mut ns = Namespace::new();
    install_commands(&mut ns, &registry, &["cd", "dir", "cat", "logout", "who", "help"]);
    let carol_home = ns.insert("/home/carol", home("carol")).unwrap();
    ns.insert("/records/index.txt", text("1962\n1963")).unwrap();
    let mut archive = Server::new("archive", ns);
    archive.add_user(UserAccount::new("carol", "archive").with_home(carol_home));
    network.add_server(archive);

    network.set_default(Some(mainframe), None);
    network.set_motd("Welcome to the terminal.");
    network
}

/// Owns everything an [`ExecContext`] borrows, so a single command can be
/// run in isolation.
pub(crate) struct Harness {
    pub network: Network,
    pub session: Session,
    pub suspended: Vec<Session>,
    pub history: FixedLengthQueue<String>,
    pub console: ScriptedConsole,
}

impl Harness {
    /// Anonymous on the default server (mainframe), at its root.
    pub fn new() -> Self {
        let network = sample_network();
        let session = network.bootstrap_session();
        Self::with_session(network, session)
    }

    /// Logged into mainframe as `user`, in their home directory.
    pub fn logged_in(user: &str) -> Self {
        let network = sample_network();
        let id = network.find_server("mainframe").unwrap();
        let session = network.server(id).unwrap().session_for(Some(user));
        Self::with_session(network, session)
    }

    /// Anonymous on the local namespace, detached from every system.
    pub fn detached() -> Self {
        let network = sample_network();
        let session = Session::new(None, None, network.local().root());
        Self::with_session(network, session)
    }

    fn with_session(network: Network, session: Session) -> Self {
        Self {
            network,
            session,
            suspended: Vec::new(),
            history: FixedLengthQueue::new(8).unwrap(),
            console: ScriptedConsole::default(),
        }
    }

    /// Queue console input for prompting commands.
    pub fn input(mut self, lines: &[&str]) -> Self {
        for line in lines {
            self.console.push_input(*line);
        }
        self
    }

    /// Move the cursor to an absolute path.
    pub fn at(mut self, path: &str) -> Self {
        let ns = self.network.namespace(self.session.system());
        let node = ns.lookup(path).unwrap();
        self.session.set_cwd(node);
        self
    }

    pub fn cwd_path(&self) -> String {
        self.network
            .namespace(self.session.system())
            .path(self.session.cwd())
    }

    pub fn run(&mut self, command: &dyn Command, args: &[&str]) -> CommandResult {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut ctx = ExecContext {
            network: &self.network,
            session: &mut self.session,
            suspended: &self.suspended,
            history: &self.history,
            console: &mut self.console,
        };
        command.execute(&args, &mut ctx)
    }

    /// Drain console output.
    pub fn output(&mut self) -> Vec<String> {
        self.console.take_output()
    }
}
