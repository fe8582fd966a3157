//! The namespace arena.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;

use super::node::{Node, NodeId, NodeKind, SEPARATOR};
use crate::tools::Command;

/// Tree construction errors.
///
/// These come out of the namespace builder when static configuration is
/// malformed; they never reach a user at the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    #[error("invalid node name: {0:?}")]
    InvalidName(String),
    #[error("path must be absolute: {0}")]
    NotAbsolute(String),
    #[error("{parent} already has a child named {name}")]
    DuplicateName { parent: String, name: String },
    #[error("not a container: {0}")]
    NotAContainer(String),
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: String, child: String },
    #[error("command {0} is already bound to another node")]
    DuplicateCommand(String),
}

/// A tree of nodes with a single root.
///
/// The namespace is the sole owner of its nodes. [`NodeId`]s handed out by
/// one namespace are only meaningful to that namespace.
#[derive(Debug, Clone)]
pub struct Namespace {
    nodes: Vec<Node>,
    root: NodeId,
    /// Command-bearing leaves by node name, for dispatch.
    executables: BTreeMap<String, NodeId>,
    /// Directories made by [`mkdirs`](Self::mkdirs) that nothing has
    /// inserted explicitly yet.
    implicit: BTreeSet<NodeId>,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// Create a namespace holding only the root container.
    pub fn new() -> Self {
        let root = NodeId(0);
        Self {
            nodes: vec![Node::new(root, String::new(), NodeKind::Directory)],
            root,
            executables: BTreeMap::new(),
            implicit: BTreeSet::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).name()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.node(id).kind()
    }

    pub fn has_parent(&self, id: NodeId) -> bool {
        self.node(id).has_parent()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).has_children()
    }

    /// Look up a direct child of `id` by exact name.
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id).child(name)
    }

    /// Children of `id`, ordered by name.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).children().collect()
    }

    /// Full separator-joined path from the root.
    ///
    /// Derived by walking parent links, so it always matches the current
    /// shape of the tree. The root's path is the separator alone. A node
    /// that has not been attached yet reports its bare name.
    pub fn path(&self, id: NodeId) -> String {
        if id == self.root {
            return SEPARATOR.to_string();
        }

        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                break;
            }
            names.push(self.name(node));
            current = self.parent(node);
        }
        names.reverse();

        let joined = names.join(&SEPARATOR.to_string());
        if current == Some(self.root) {
            format!("{SEPARATOR}{joined}")
        } else {
            joined
        }
    }

    /// Allocate a detached node.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeId, NamespaceError> {
        let name = name.into();
        if name.is_empty() || name.contains(SEPARATOR) || name == "." || name == ".." {
            return Err(NamespaceError::InvalidName(name));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name, kind));
        Ok(id)
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NamespaceError> {
        if !self.kind(parent).is_container() {
            return Err(NamespaceError::NotAContainer(self.path(parent)));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(NamespaceError::Cycle {
                parent: self.path(parent),
                child: self.path(child),
            });
        }

        let name = self.name(child).to_string();
        match self.child(parent, &name) {
            Some(existing) if existing == child => return Ok(()),
            Some(_) => {
                return Err(NamespaceError::DuplicateName {
                    parent: self.path(parent),
                    name,
                })
            }
            None => {}
        }

        if let NodeKind::Executable { .. } = self.kind(child) {
            if self.executables.get(&name).is_some_and(|&bound| bound != child) {
                return Err(NamespaceError::DuplicateCommand(name));
            }
            self.executables.insert(name.clone(), child);
        }

        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.remove(&name);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(name, child);
        Ok(())
    }

    /// Same as [`add_child`](Self::add_child), seen from the child.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) -> Result<(), NamespaceError> {
        self.add_child(parent, child)
    }

    /// Insert a node at an absolute path, creating missing containers.
    ///
    /// Inserting a container where an implicitly created plain directory
    /// already sits upgrades that directory in place, so configuration can
    /// list `/home/alice/notes` before `/home/alice`. Each implicit directory
    /// can be claimed once; a second explicit insert is a duplicate.
    pub fn insert(&mut self, path: &str, kind: NodeKind) -> Result<NodeId, NamespaceError> {
        let (parent_path, name) = split_last(path)?;
        let parent = self.mkdirs(parent_path)?;

        if let Some(existing) = self.child(parent, name) {
            if kind.is_container() && self.implicit.remove(&existing) {
                self.nodes[existing.0].kind = kind;
                return Ok(existing);
            }
            return Err(NamespaceError::DuplicateName {
                parent: self.path(parent),
                name: name.to_string(),
            });
        }

        let id = self.create(name, kind)?;
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Ensure every container along an absolute path exists.
    pub fn mkdirs(&mut self, path: &str) -> Result<NodeId, NamespaceError> {
        if !path.starts_with(SEPARATOR) {
            return Err(NamespaceError::NotAbsolute(path.to_string()));
        }

        let mut current = self.root;
        for name in path.split(SEPARATOR).filter(|s| !s.is_empty()) {
            current = match self.child(current, name) {
                Some(next) if self.kind(next).is_container() => next,
                Some(next) => return Err(NamespaceError::NotAContainer(self.path(next))),
                None => {
                    let id = self.create(name, NodeKind::Directory)?;
                    self.add_child(current, id)?;
                    self.implicit.insert(id);
                    id
                }
            };
        }
        Ok(current)
    }

    /// Find a node by absolute path, without any of the shell's quirks.
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        if !path.starts_with(SEPARATOR) {
            return None;
        }
        path.split(SEPARATOR)
            .filter(|s| !s.is_empty())
            .try_fold(self.root, |node, name| self.child(node, name))
    }

    /// Command bound to the executable leaf named `name`.
    pub fn executable(&self, name: &str) -> Option<Arc<dyn Command>> {
        let id = self.executables.get(name)?;
        match self.kind(*id) {
            NodeKind::Executable { command } => Some(Arc::clone(command)),
            _ => None,
        }
    }

    /// Names of all executable leaves, sorted.
    pub fn executable_names(&self) -> impl Iterator<Item = &str> {
        self.executables.keys().map(String::as_str)
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = Some(of);
        while let Some(node) = current {
            if node == candidate {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}

fn split_last(path: &str) -> Result<(&str, &str), NamespaceError> {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if !trimmed.starts_with(SEPARATOR) {
        return Err(NamespaceError::NotAbsolute(path.to_string()));
    }
    match trimmed.rsplit_once(SEPARATOR) {
        Some((parent, name)) if !name.is_empty() => {
            let parent = if parent.is_empty() { "/" } else { parent };
            Ok((parent, name))
        }
        _ => Err(NamespaceError::InvalidName(path.to_string())),
    }
}
