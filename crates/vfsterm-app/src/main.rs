//! vfsterm entry point.
//!
//! Loads a virtual filesystem from a CSV table, optionally plays a startup
//! script, then reads commands from stdin until `exit` or end of input.

mod console;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use console::StdoutConsole;
use vfsterm_terminal::{ScriptRunner, Shell, feed_line, greet};
use vfsterm_types::config::ShellConfig;

#[derive(Parser)]
#[command(name = "vfsterm", version, about = "Terminal emulator over an in-memory VFS")]
struct Args {
    /// CSV table describing the filesystem
    #[arg(short, long)]
    vfs: PathBuf,

    /// Startup script (relative paths start at the executable's directory)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// TOML shell configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit after the startup script instead of reading stdin
    #[arg(long)]
    batch: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Config from CLI flag, VFSTERM_CONFIG env var, or defaults.
    let config = match args
        .config
        .clone()
        .or_else(|| std::env::var_os("VFSTERM_CONFIG").map(PathBuf::from))
    {
        Some(path) => ShellConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ShellConfig::default(),
    };
    log::info!(
        "Starting vfsterm as {}@{} ({:?})",
        config.user,
        config.host,
        config.locale
    );

    let tree = vfsterm_vfs::load_path(&args.vfs)
        .with_context(|| format!("loading VFS from {}", args.vfs.display()))?;
    log::info!("VFS ready: {} nodes", tree.len());

    let runner = ScriptRunner::from_config(&config);
    let mut shell = Shell::new(&tree, config);
    let mut console = StdoutConsole::new();
    greet(&shell, &mut console);

    if let Some(script) = &args.script {
        let path = script_path(script)?;
        if runner.run_file(&path, &mut shell, &mut console).is_terminated() {
            return Ok(());
        }
    }

    if args.batch {
        return Ok(());
    }

    interactive(&mut shell, &mut console)
}

/// Resolve a script path against the directory holding the executable.
fn script_path(script: &Path) -> Result<PathBuf> {
    if script.is_absolute() {
        return Ok(script.to_path_buf());
    }
    let exe = std::env::current_exe().context("locating executable")?;
    let base = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(base.join(script))
}

fn interactive(shell: &mut Shell<'_>, console: &mut StdoutConsole) -> Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    while !console.is_terminated() {
        console.show_prompt();
        let Some(line) = lines.next() else {
            // EOF: leave the prompt line.
            console.end_line();
            break;
        };
        let line = line.context("reading stdin")?;
        console.mark_typed();
        feed_line(shell, console, &line);
    }
    log::info!("Session ended in {}", shell.cwd());
    Ok(())
}
