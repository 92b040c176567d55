//! Command interpreter and terminal session for vfsterm.
//!
//! A [`Shell`] owns the current directory and dispatches a fixed set of
//! commands over a read-only [`vfsterm_vfs::VfsTree`]. Typed input and
//! script playback both go through [`feed_line`], which forwards results to
//! a [`Console`].

mod commands;
pub mod console;
mod interpreter;
pub mod messages;
pub mod script;

/// Display collaborator and the shared line-delivery path.
pub use console::{Console, MemoryConsole, feed_line, greet};
/// Command vocabulary, results and the interpreter itself.
pub use interpreter::{
    COMMENT_MARKER, CommandKind, CommandOutput, CommandResult, Environment, Shell, tokenize,
};
/// Localized message table.
pub use messages::Messages;
/// Script playback.
pub use script::{RunOutcome, ScriptRunner, is_skippable};
