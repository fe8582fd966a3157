//! Command registry: identifier → constructor.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::traits::Command;

/// Builds a fresh command instance for one executable node.
pub type CommandFactory = fn() -> Arc<dyn Command>;

/// Maps command identifiers from configuration to constructors.
///
/// The namespace builder asks the registry for a command each time it
/// creates an executable node. Nothing else ever needs to know the concrete
/// command types.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    factories: BTreeMap<String, CommandFactory>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every builtin.
    ///
    /// `debug` additionally registers the `debug` command.
    pub fn with_builtins(debug: bool) -> Self {
        let mut registry = Self::new();
        super::register_builtins(&mut registry, debug);
        registry
    }

    /// Register a constructor, replacing any previous one under `id`.
    pub fn register(&mut self, id: impl Into<String>, factory: CommandFactory) {
        self.factories.insert(id.into(), factory);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Construct the command registered under `id`.
    pub fn build(&self, id: &str) -> Option<Arc<dyn Command>> {
        self.factories.get(id).map(|factory| factory())
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = CommandRegistry::with_builtins(false);
        for id in ["cd", "dir", "cat", "more", "login", "rlogin", "logout", "exit", "who", "mail", "help", "clear"] {
            assert!(registry.contains(id), "missing {id}");
        }
        assert!(!registry.contains("debug"));
    }

    #[test]
    fn test_debug_only_in_debug_mode() {
        let registry = CommandRegistry::with_builtins(true);
        assert!(registry.contains("debug"));
    }

    #[test]
    fn test_build_uses_display_name() {
        let registry = CommandRegistry::with_builtins(false);
        assert_eq!(registry.build("more").unwrap().name(), "more");
        assert_eq!(registry.build("cat").unwrap().name(), "cat");
        assert!(registry.build("zzz").is_none());
    }
}
