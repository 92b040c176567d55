//! Built-in commands.
//!
//! Each command returns `Result<CommandOutput>`; the shell turns any error
//! into a single output line, so a failing command never changes the current
//! directory.

use std::path::Path;

use vfsterm_types::error::{Result, TermError};
use vfsterm_vfs::{NodeRef, PathSegments};

use crate::interpreter::{CommandKind, CommandOutput, Environment};
use crate::messages::Messages;

/// Run one resolved command.
pub(crate) fn execute(
    kind: CommandKind,
    env: &mut Environment<'_>,
    msg: &Messages,
) -> Result<CommandOutput> {
    match kind {
        CommandKind::Empty => Ok(CommandOutput::None),
        CommandKind::Exit => Ok(CommandOutput::Exit(msg.farewell())),
        CommandKind::Ls { path } => ls(path.as_deref(), env),
        CommandKind::Cd { path } => cd(path.as_deref(), env, msg),
        CommandKind::Clear => Ok(CommandOutput::Clear),
        CommandKind::VfsSave { path } => vfs_save(path.as_deref(), env, msg),
        CommandKind::ParseError(reason) => Err(TermError::Parse(reason)),
        CommandKind::Unknown(name) => Err(TermError::CommandNotFound(name)),
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

fn ls(arg: Option<&str>, env: &Environment<'_>) -> Result<CommandOutput> {
    let target = match arg {
        Some(input) => env.cwd.resolve(input),
        None => env.cwd.clone(),
    };
    let names = env.tree.list(&target)?;
    Ok(CommandOutput::Lines(
        names.into_iter().map(str::to_string).collect(),
    ))
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

fn is_parent_ref(input: &str) -> bool {
    input.trim_end_matches('/') == ".."
}

fn cd(arg: Option<&str>, env: &mut Environment<'_>, msg: &Messages) -> Result<CommandOutput> {
    let Some(input) = arg else {
        env.cwd = PathSegments::root();
        log::debug!("cwd reset to /");
        return Ok(CommandOutput::Lines(vec![msg.cd_root(&env.cwd)]));
    };

    if is_parent_ref(input) && env.cwd.is_root() {
        return Ok(CommandOutput::Lines(vec![msg.already_at_root()]));
    }

    let target = env.cwd.resolve(input);
    match env.tree.lookup(&target)? {
        NodeRef::Directory(_) => {},
        NodeRef::File(_) => return Err(TermError::NotADirectory(target.to_string())),
    }
    log::debug!("cwd {} -> {target}", env.cwd);
    env.cwd = target;

    let line = if is_parent_ref(input) {
        msg.cd_up(&env.cwd)
    } else {
        msg.cd_to(&env.cwd)
    };
    Ok(CommandOutput::Lines(vec![line]))
}

// ---------------------------------------------------------------------------
// vfs-save
// ---------------------------------------------------------------------------

/// Write the whole tree as CSV to a host path (relative to the process's
/// working directory).
fn vfs_save(arg: Option<&str>, env: &Environment<'_>, msg: &Messages) -> Result<CommandOutput> {
    let Some(path) = arg.filter(|p| !p.is_empty()) else {
        return Ok(CommandOutput::Lines(vec![msg.save_usage()]));
    };
    let rows = vfsterm_vfs::save_path(env.tree, Path::new(path)).inspect_err(|e| {
        log::warn!("vfs-save failed: {e}");
    })?;
    Ok(CommandOutput::Lines(vec![msg.saved(rows, path)]))
}
