//! Path resolution.
//!
//! The rules are unusual and must be kept exactly:
//!
//! - Tokens are split on the separator with empty tokens kept, so
//!   `"/a//b"` is `["", "a", "", "b"]`.
//! - More than two tokens with the first two empty (`//x`, `//../..`) means
//!   "no path given"; the caller falls back to its no-argument behavior.
//! - A leading empty token jumps to the root; a trailing one is ignored; any
//!   other empty token is an invalid path.
//! - `.` does nothing.
//! - `..` moves to the parent, but only the first `..` of an unbroken run
//!   counts: `../../..` moves up exactly once.
//! - Anything else must name a child of the current node. Another user's
//!   home directory is off limits.
//!
//! Every path-accepting command goes through [`resolve`].

use thiserror::Error;

use super::namespace::Namespace;
use super::node::{NodeId, SEPARATOR};

/// Why a path could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Error:  Invalid Path")]
    InvalidPath,
    #[error("Error:  Insufficient Permissions")]
    InsufficientPermissions,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The path degenerated to "no argument"; apply the no-argument behavior.
    Unspecified,
    /// The path names this node.
    Node(NodeId),
}

/// Split a path on the separator, keeping empty tokens.
pub fn tokenize(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).collect()
}

/// Resolve `path` starting from `cursor`, on behalf of `user`.
///
/// `user` is the session's identity; `None` (an anonymous session) may not
/// enter any home directory. Resolution never mutates anything; callers
/// decide what to do with the node.
pub fn resolve(
    namespace: &Namespace,
    cursor: NodeId,
    user: Option<&str>,
    path: &str,
) -> Result<Resolution, ResolveError> {
    let tokens = tokenize(path);

    if tokens.len() > 2 && tokens[0].is_empty() && tokens[1].is_empty() {
        tracing::debug!(path, "leading double separator, treating as no argument");
        return Ok(Resolution::Unspecified);
    }

    let last = tokens.len() - 1;
    let mut current = cursor;
    let mut after_parent_step = false;

    for (i, token) in tokens.iter().copied().enumerate() {
        match token {
            "" if i == 0 => current = namespace.root(),
            "" if i == last => {}
            "" => return Err(ResolveError::InvalidPath),
            "." => {}
            ".." => {
                if after_parent_step {
                    continue;
                }
                if let Some(parent) = namespace.parent(current) {
                    current = parent;
                }
                after_parent_step = true;
            }
            name => {
                let child = namespace
                    .child(current, name)
                    .ok_or(ResolveError::InvalidPath)?;
                if let Some(owner) = namespace.kind(child).owner()
                    && user != Some(owner)
                {
                    return Err(ResolveError::InsufficientPermissions);
                }
                current = child;
                after_parent_step = false;
            }
        }
    }

    Ok(Resolution::Node(current))
}
