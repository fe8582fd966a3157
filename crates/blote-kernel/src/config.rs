//! Terminal configuration and the world loader.
//!
//! World data (servers, filesystems, accounts, mail) lives in a data
//! directory of TOML files:
//!
//! | File | Required | Contents |
//! |------|----------|----------|
//! | `servers.toml` | yes | `default` server, `[[server]]` tables |
//! | `filesystem.toml` | yes | `[[entry]]` tables, one per node |
//! | `users.toml` | yes | `default` user, `[[user]]` tables |
//! | `mail.toml` | no | `[[message]]` tables |
//! | `motd.txt` | no | greeting for the bootstrap session |
//!
//! The directory is taken from `--data-dir`, then the platform data
//! directory (see [`paths::data_dir`]), and finally a data set compiled
//! into this crate.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::network::{MailMessage, Network, Server, ServerId, UserAccount};
use crate::paths;
use crate::tools::CommandRegistry;
use crate::vfs::{Namespace, NodeKind, SEPARATOR};

/// Default number of input lines the dispatcher remembers.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

const SERVERS: &str = "servers.toml";
const FILESYSTEM: &str = "filesystem.toml";
const USERS: &str = "users.toml";
const MAIL: &str = "mail.toml";
const MOTD: &str = "motd.txt";

/// Runtime options for a [`Terminal`](crate::Terminal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Install the `debug` command and log verbosely.
    pub debug: bool,
    /// Explicit data directory. `None` searches the default locations.
    pub data_dir: Option<PathBuf>,
    /// Capacity of the command history ring.
    pub history_capacity: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            debug: false,
            data_dir: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl TerminalConfig {
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// Where world data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A directory of data files on disk.
    Directory(PathBuf),
    /// The data set compiled into the crate.
    Embedded,
}

impl DataSource {
    /// Pick the data source for `config`.
    ///
    /// The platform data directory only counts when it holds a
    /// `servers.toml`, so an empty or unrelated directory falls through to
    /// the embedded data.
    pub fn locate(config: &TerminalConfig) -> Self {
        if let Some(dir) = &config.data_dir {
            return Self::Directory(dir.clone());
        }
        match paths::data_dir().filter(|dir| dir.join(SERVERS).is_file()) {
            Some(dir) => Self::Directory(dir),
            None => Self::Embedded,
        }
    }

    /// Read one data file. Missing optional files read as `None`.
    fn read(&self, name: &str, required: bool) -> Result<Option<String>> {
        match self {
            Self::Embedded => Ok(embedded(name).map(str::to_string)),
            Self::Directory(dir) => {
                let path = dir.join(name);
                if !required && !path.exists() {
                    tracing::debug!("no {} in {}, skipping", name, dir.display());
                    return Ok(None);
                }
                std::fs::read_to_string(&path)
                    .map(Some)
                    .with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }

    fn parse<T: DeserializeOwned>(&self, name: &str, required: bool) -> Result<Option<T>> {
        let Some(content) = self.read(name, required)? else {
            return Ok(None);
        };
        toml::from_str(&content)
            .map(Some)
            .with_context(|| format!("Failed to parse {}", self.describe(name)))
    }

    fn describe(&self, name: &str) -> String {
        match self {
            Self::Embedded => format!("embedded {name}"),
            Self::Directory(dir) => dir.join(name).display().to_string(),
        }
    }
}

fn embedded(name: &str) -> Option<&'static str> {
    match name {
        SERVERS => Some(include_str!("../data/servers.toml")),
        FILESYSTEM => Some(include_str!("../data/filesystem.toml")),
        USERS => Some(include_str!("../data/users.toml")),
        MAIL => Some(include_str!("../data/mail.toml")),
        MOTD => Some(include_str!("../data/motd.txt")),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// File formats
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServersFile {
    default: Option<String>,
    #[serde(default)]
    server: Vec<ServerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServerEntry {
    name: String,
    greeting: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilesystemFile {
    #[serde(default)]
    entry: Vec<FsEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    Dir,
    Home,
    File,
    Exec,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FsEntry {
    server: Option<String>,
    path: String,
    kind: EntryKind,
    owner: Option<String>,
    text: Option<String>,
    command: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct UsersFile {
    default: Option<String>,
    #[serde(default)]
    user: Vec<UserEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserEntry {
    server: String,
    name: String,
    password: String,
    home: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MailFile {
    #[serde(default)]
    message: Vec<MessageEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MessageEntry {
    server: String,
    to: String,
    from: String,
    subject: String,
    body: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// Loader
// ═══════════════════════════════════════════════════════════════════════════

/// Build the whole network from a data source.
///
/// Stages run in a fixed order: servers, command registry, filesystems,
/// users, mail, message of the day. Each stage may refer to what the
/// earlier ones built.
pub fn load_network(source: &DataSource, debug: bool) -> Result<Network> {
    tracing::info!(source = ?source, "loading world data");
    let mut network = Network::new(Namespace::new());

    let servers: ServersFile = source.parse(SERVERS, true)?.unwrap_or_default();
    let default_server = load_servers(&mut network, servers)?;

    let registry = CommandRegistry::with_builtins(debug);
    tracing::debug!(commands = registry.ids().count(), "command registry ready");

    let filesystem: FilesystemFile = source.parse(FILESYSTEM, true)?.unwrap_or_default();
    load_filesystems(&mut network, &registry, filesystem)?;

    let users: UsersFile = source.parse(USERS, true)?.unwrap_or_default();
    let default_user = load_users(&mut network, users, default_server)?;
    network.set_default(default_server, default_user);

    if let Some(mail) = source.parse::<MailFile>(MAIL, false)? {
        load_mail(&mut network, mail)?;
    }

    if let Some(motd) = source.read(MOTD, false)? {
        network.set_motd(motd.trim_end());
    }

    tracing::info!(servers = network.servers().count(), "world data loaded");
    Ok(network)
}

fn server_id(network: &Network, name: &str) -> Result<ServerId> {
    network
        .find_server(name)
        .ok_or_else(|| anyhow!("unknown server '{name}'"))
}

fn load_servers(network: &mut Network, file: ServersFile) -> Result<Option<ServerId>> {
    for entry in file.server {
        if network.find_server(&entry.name).is_some() {
            bail!("duplicate server '{}'", entry.name);
        }
        let mut server = Server::new(&entry.name, Namespace::new());
        if let Some(greeting) = entry.greeting {
            server = server.with_greeting(greeting.trim_end());
        }
        network.add_server(server);
    }

    file.default
        .map(|name| server_id(network, &name).context("in servers.toml 'default'"))
        .transpose()
}

fn load_filesystems(
    network: &mut Network,
    registry: &CommandRegistry,
    file: FilesystemFile,
) -> Result<()> {
    for entry in file.entry {
        let namespace = match &entry.server {
            Some(name) => {
                let id = server_id(network, name)?;
                network
                    .server_mut(id)
                    .map(|server| server.namespace_mut())
                    .ok_or_else(|| anyhow!("unknown server '{name}'"))?
            }
            None => network.local_mut(),
        };

        let Some(kind) = node_kind(&entry, registry)? else {
            continue;
        };
        namespace
            .insert(&entry.path, kind)
            .with_context(|| format!("Failed to create {}", entry.path))?;
    }
    Ok(())
}

/// The node an entry describes, or `None` for an exec entry whose command
/// is not registered.
fn node_kind(entry: &FsEntry, registry: &CommandRegistry) -> Result<Option<NodeKind>> {
    let kind = match entry.kind {
        EntryKind::Dir => NodeKind::Directory,
        EntryKind::Home => {
            let owner = entry
                .owner
                .clone()
                .ok_or_else(|| anyhow!("home {} has no owner", entry.path))?;
            NodeKind::HomeDirectory { owner }
        }
        EntryKind::File => NodeKind::TextFile {
            text: entry.text.clone().unwrap_or_default(),
        },
        EntryKind::Exec => {
            let id = entry
                .command
                .as_deref()
                .unwrap_or_else(|| leaf_name(&entry.path));
            match registry.build(id) {
                Some(command) => NodeKind::Executable { command },
                None => {
                    tracing::warn!(path = %entry.path, command = id, "unregistered command, skipping");
                    return Ok(None);
                }
            }
        }
    };
    Ok(Some(kind))
}

fn leaf_name(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

fn load_users(
    network: &mut Network,
    file: UsersFile,
    default_server: Option<ServerId>,
) -> Result<Option<String>> {
    for entry in file.user {
        let id = server_id(network, &entry.server)?;
        let server = network
            .server_mut(id)
            .ok_or_else(|| anyhow!("unknown server '{}'", entry.server))?;

        let mut account = UserAccount::new(&entry.name, &entry.password);
        if let Some(home) = &entry.home {
            let node = server
                .namespace()
                .lookup(home)
                .ok_or_else(|| anyhow!("home {home} of user '{}' does not exist", entry.name))?;
            if server.namespace().kind(node).owner() != Some(entry.name.as_str()) {
                bail!("{home} is not a home directory owned by '{}'", entry.name);
            }
            account = account.with_home(node);
        }

        if server.add_user(account).is_some() {
            bail!("duplicate user '{}' on {}", entry.name, entry.server);
        }
    }

    let Some(user) = file.default else {
        return Ok(None);
    };
    let known = default_server
        .and_then(|id| network.server(id))
        .is_some_and(|server| server.user(&user).is_some());
    if !known {
        bail!("default user '{user}' is not an account on the default server");
    }
    Ok(Some(user))
}

fn load_mail(network: &mut Network, file: MailFile) -> Result<()> {
    for entry in file.message {
        let id = server_id(network, &entry.server)?;
        let account = network
            .server_mut(id)
            .and_then(|server| server.user_mut(&entry.to))
            .ok_or_else(|| anyhow!("mail to unknown user '{}' on {}", entry.to, entry.server))?;
        account.deliver(MailMessage {
            from: entry.from,
            subject: entry.subject,
            body: entry.body.trim_end().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn load_network_from(dir: &Path, debug: bool) -> Result<Network> {
        load_network(&DataSource::Directory(dir.to_path_buf()), debug)
    }

    fn write_world(dir: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
    }

    const SMALL_SERVERS: &str = r#"
default = "relay"

[[server]]
name = "relay"
greeting = "Relay station."
"#;

    const SMALL_FS: &str = r#"
[[entry]]
path = "/bin/dir"
kind = "exec"

[[entry]]
server = "relay"
path = "/bin/cd"
kind = "exec"

[[entry]]
server = "relay"
path = "/bin/inspect"
kind = "exec"
command = "debug"

[[entry]]
server = "relay"
path = "/home/ops"
kind = "home"
owner = "ops"

[[entry]]
server = "relay"
path = "/home/ops/log.txt"
kind = "file"
text = "all quiet"
"#;

    const SMALL_USERS: &str = r#"
default = "ops"

[[user]]
server = "relay"
name = "ops"
password = "pw"
home = "/home/ops"
"#;

    #[test]
    fn test_default_config() {
        let config = TerminalConfig::default();
        assert!(!config.debug);
        assert!(config.data_dir.is_none());
        assert_eq!(config.history_capacity, 32);
    }

    #[test]
    fn test_locate_prefers_explicit_dir() {
        let config = TerminalConfig::default().with_data_dir("/somewhere");
        assert_eq!(
            DataSource::locate(&config),
            DataSource::Directory("/somewhere".into())
        );
    }

    #[test]
    fn test_embedded_world_loads() {
        let network = load_network(&DataSource::Embedded, false).unwrap();
        let session = network.bootstrap_session();
        assert!(session.system().is_some());
        assert!(!network.motd().is_empty());
        // `debug` is only installed in debug mode.
        let ns = network.namespace(session.system());
        assert!(ns.executable("debug").is_none());
        assert!(ns.executable("cd").is_some());

        let network = load_network(&DataSource::Embedded, true).unwrap();
        assert!(network.namespace(session.system()).executable("debug").is_some());
    }

    #[test]
    fn test_directory_world_loads() {
        let dir = tempfile::tempdir().unwrap();
        write_world(
            dir.path(),
            &[(SERVERS, SMALL_SERVERS), (FILESYSTEM, SMALL_FS), (USERS, SMALL_USERS)],
        );

        let network = load_network_from(dir.path(), true).unwrap();
        let relay = network.find_server("relay").unwrap();
        let server = network.server(relay).unwrap();
        assert_eq!(server.greeting(), Some("Relay station."));
        assert!(server.namespace().executable("inspect").is_some());
        assert!(network.local().executable("dir").is_some());

        let session = network.bootstrap_session();
        assert_eq!(session.user(), Some("ops"));
        assert_eq!(server.namespace().path(session.cwd()), "/home/ops");
        // Optional files were absent.
        assert!(server.user("ops").unwrap().mailbox().is_empty());
        assert_eq!(network.motd(), "");
    }

    #[test]
    fn test_unregistered_exec_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_world(
            dir.path(),
            &[(SERVERS, SMALL_SERVERS), (FILESYSTEM, SMALL_FS), (USERS, SMALL_USERS)],
        );

        let network = load_network_from(dir.path(), false).unwrap();
        let relay = network.find_server("relay");
        let ns = network.namespace(relay);
        assert!(ns.executable("inspect").is_none());
        assert!(ns.lookup("/bin/inspect").is_none());
        assert!(ns.lookup("/bin/cd").is_some());
    }

    #[test]
    fn test_mail_and_motd() {
        let dir = tempfile::tempdir().unwrap();
        write_world(
            dir.path(),
            &[
                (SERVERS, SMALL_SERVERS),
                (FILESYSTEM, SMALL_FS),
                (USERS, SMALL_USERS),
                (MOTD, "Good evening.\n"),
                (
                    MAIL,
                    r#"
[[message]]
server = "relay"
to = "ops"
from = "hq"
subject = "Orders"
body = """
Hold position.
"""
"#,
                ),
            ],
        );

        let network = load_network_from(dir.path(), false).unwrap();
        assert_eq!(network.motd(), "Good evening.");
        let relay = network.find_server("relay").unwrap();
        let mailbox = network.server(relay).unwrap().user("ops").unwrap().mailbox();
        assert_eq!(mailbox.len(), 1);
        assert_eq!(mailbox[0].body, "Hold position.");
    }

    #[test]
    fn test_missing_required_file() {
        let dir = tempfile::tempdir().unwrap();
        write_world(dir.path(), &[(SERVERS, SMALL_SERVERS)]);
        let err = load_network_from(dir.path(), false).unwrap_err();
        assert!(format!("{err:#}").contains("filesystem.toml"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        write_world(
            dir.path(),
            &[(SERVERS, "[[server]]\nname = 3\n"), (FILESYSTEM, ""), (USERS, "")],
        );
        let err = load_network_from(dir.path(), false).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_world(
            dir.path(),
            &[
                (SERVERS, SMALL_SERVERS),
                (FILESYSTEM, "[[entry]]\npath = \"/x\"\nkind = \"socket\"\n"),
                (USERS, ""),
            ],
        );
        assert!(load_network_from(dir.path(), false).is_err());
    }

    #[test]
    fn test_home_must_belong_to_user() {
        let dir = tempfile::tempdir().unwrap();
        let users = r#"
[[user]]
server = "relay"
name = "intruder"
password = "x"
home = "/home/ops"
"#;
        write_world(
            dir.path(),
            &[(SERVERS, SMALL_SERVERS), (FILESYSTEM, SMALL_FS), (USERS, users)],
        );
        let err = load_network_from(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("not a home directory owned by 'intruder'"));
    }

    #[test]
    fn test_unknown_default_server() {
        let dir = tempfile::tempdir().unwrap();
        write_world(
            dir.path(),
            &[(SERVERS, "default = \"ghost\"\n"), (FILESYSTEM, ""), (USERS, "")],
        );
        let err = load_network_from(dir.path(), false).unwrap_err();
        assert!(format!("{err:#}").contains("unknown server 'ghost'"));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fs_toml = "[[entry]]\npath = \"/a.txt\"\nkind = \"file\"\n\n\
                       [[entry]]\npath = \"/a.txt\"\nkind = \"file\"\n";
        write_world(
            dir.path(),
            &[(SERVERS, ""), (FILESYSTEM, fs_toml), (USERS, "")],
        );
        let err = load_network_from(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("Failed to create /a.txt"));
    }

    #[test]
    fn test_directory_listed_twice_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fs_toml = "[[entry]]\npath = \"/srv\"\nkind = \"dir\"\n\n\
                       [[entry]]\npath = \"/srv\"\nkind = \"dir\"\n";
        write_world(
            dir.path(),
            &[(SERVERS, ""), (FILESYSTEM, fs_toml), (USERS, "")],
        );
        let err = load_network_from(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("Failed to create /srv"));
    }
}
