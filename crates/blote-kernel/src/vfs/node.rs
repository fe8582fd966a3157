//! Node types for the namespace arena.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::tools::Command;

/// Separator between path components.
pub const SEPARATOR: char = '/';

/// Stable identity of a node within its namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// What a node is, and what it carries.
#[derive(Clone)]
pub enum NodeKind {
    /// Plain container.
    Directory,
    /// Container tagged with the user who owns it.
    HomeDirectory { owner: String },
    /// Readable leaf (`cat`, `more`).
    TextFile { text: String },
    /// Leaf bound to a command; running the node runs the command.
    Executable { command: Arc<dyn Command> },
}

impl NodeKind {
    /// Whether nodes of this kind may have children.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Directory | Self::HomeDirectory { .. })
    }

    /// Owning user for home directories.
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::HomeDirectory { owner } => Some(owner),
            _ => None,
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("Directory"),
            Self::HomeDirectory { owner } => {
                f.debug_struct("HomeDirectory").field("owner", owner).finish()
            }
            Self::TextFile { text } => f
                .debug_struct("TextFile")
                .field("len", &text.len())
                .finish(),
            Self::Executable { command } => f
                .debug_struct("Executable")
                .field("command", &command.name())
                .finish(),
        }
    }
}

/// One addressable point in the tree.
///
/// Nodes compare equal by identity and order by name, which is the order
/// listings use.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: BTreeMap<String, NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, kind: NodeKind) -> Self {
        Self {
            id,
            name,
            parent: None,
            children: BTreeMap::new(),
            kind,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Look up a direct child by exact name.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    /// Children ordered by name.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}
