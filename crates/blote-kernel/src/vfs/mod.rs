//! Virtual filesystem (VFS) for blote.
//!
//! Every system on the network owns one [`Namespace`]: a tree of named
//! nodes built once from static configuration and never reshaped afterwards.
//! Sessions only move a cursor around inside it.
//!
//! ```text
//! /                      # root, the only node without a parent
//! ├── bin/               # command-bearing leaves (cd, dir, login, ...)
//! ├── home/
//! │   ├── alice/         # HomeDirectory owned by alice
//! │   └── bob/           # HomeDirectory owned by bob
//! └── etc/
//! ```
//!
//! Nodes live in an arena owned by the namespace and are addressed by
//! [`NodeId`]. Parent links are plain indices, so the tree has upward and
//! downward traversal without reference cycles.
//!
//! Path strings are resolved by [`resolve`], which has its own quirks and
//! is not POSIX path semantics.

mod namespace;
mod node;
mod resolve;

pub use namespace::{Namespace, NamespaceError};
pub use node::{Node, NodeId, NodeKind, SEPARATOR};
pub use resolve::{resolve, tokenize, Resolution, ResolveError};
