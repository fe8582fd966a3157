//! Built-in commands for blote.
//!
//! Configuration decides which of these exist on a given system: a command
//! is only reachable where the filesystem has an executable node for it.

mod cat;
mod cd;
mod clear;
mod debug;
mod dir;
mod help;
mod login;
mod logout;
mod mail;
mod rlogin;
mod who;

use std::sync::Arc;

use super::CommandRegistry;

/// Register all built-in commands with the registry.
///
/// `debug` is only registered when `debug_mode` is set.
pub fn register_builtins(registry: &mut CommandRegistry, debug_mode: bool) {
    registry.register("cat", || Arc::new(cat::Cat::named("cat")));
    registry.register("cd", || Arc::new(cd::Cd));
    registry.register("clear", || Arc::new(clear::Clear));
    if debug_mode {
        registry.register("debug", || Arc::new(debug::Debug));
    }
    registry.register("dir", || Arc::new(dir::Dir));
    registry.register("exit", || Arc::new(logout::Logout::named("exit")));
    registry.register("help", || Arc::new(help::Help));
    registry.register("login", || Arc::new(login::Login));
    registry.register("logout", || Arc::new(logout::Logout::named("logout")));
    registry.register("mail", || Arc::new(mail::Mail));
    registry.register("more", || Arc::new(cat::Cat::named("more")));
    registry.register("rlogin", || Arc::new(rlogin::Rlogin));
    registry.register("who", || Arc::new(who::Who));
}
