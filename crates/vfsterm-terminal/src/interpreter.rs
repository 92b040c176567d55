//! Line tokenizer, command table and the `Shell` that dispatches it.
//!
//! A line goes through three steps: comment stripping and shell-style
//! tokenizing, resolution of the first token into a [`CommandKind`], and
//! execution against the shell's [`Environment`]. Errors never escape
//! [`Shell::submit`]; each one becomes a single output line.

use vfsterm_types::config::ShellConfig;
use vfsterm_types::error::{Result, TermError};
use vfsterm_vfs::{PathSegments, VfsTree};

use crate::commands;
use crate::messages::Messages;

/// Character that starts a comment outside quotes.
pub const COMMENT_MARKER: char = '#';

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Lines of text, in order.
    Lines(Vec<String>),
    /// Command produced no visible output.
    None,
    /// Signal to erase the displayed output.
    Clear,
    /// Signal to end the session after showing the farewell line.
    Exit(String),
}

/// What a single `submit` call hands back to the display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// The input line annotated with the prompt that was current when it ran.
    pub echo: String,
    /// Output lines after the echo.
    pub lines: Vec<String>,
    /// The display should erase its output.
    pub clear: bool,
    /// The session should end.
    pub terminate: bool,
}

/// State a command may read or change.
#[derive(Debug)]
pub struct Environment<'a> {
    /// Current working directory.
    pub cwd: PathSegments,
    /// The virtual file system (read-only).
    pub tree: &'a VfsTree,
}

/// The fixed command vocabulary, resolved once per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Blank or comment-only line.
    Empty,
    Exit,
    Ls { path: Option<String> },
    Cd { path: Option<String> },
    Clear,
    VfsSave { path: Option<String> },
    /// The line could not be tokenized.
    ParseError(String),
    /// First token matched nothing in the table.
    Unknown(String),
}

impl CommandKind {
    /// Tokenize `line` and resolve its first token (case-insensitive).
    /// Arguments past the first are ignored.
    pub fn parse(line: &str) -> Self {
        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(TermError::Parse(msg)) => return Self::ParseError(msg),
            Err(other) => return Self::ParseError(other.to_string()),
        };
        let mut tokens = tokens.into_iter();
        let Some(name) = tokens.next() else {
            return Self::Empty;
        };
        let arg = tokens.next();
        match name.to_lowercase().as_str() {
            "exit" => Self::Exit,
            "ls" => Self::Ls { path: arg },
            "cd" => Self::Cd { path: arg },
            "clear" => Self::Clear,
            "vfs-save" => Self::VfsSave { path: arg },
            _ => Self::Unknown(name),
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Exit => "exit",
            Self::Ls { .. } => "ls",
            Self::Cd { .. } => "cd",
            Self::Clear => "clear",
            Self::VfsSave { .. } => "vfs-save",
            Self::ParseError(_) => "parse_error",
            Self::Unknown(name) => name,
        }
    }
}

/// One interpreter session over a shared, read-only tree.
///
/// The current directory belongs to the shell; several shells can run over
/// the same tree without seeing each other's `cd`.
#[derive(Debug)]
pub struct Shell<'a> {
    env: Environment<'a>,
    config: ShellConfig,
    messages: Messages,
}

impl<'a> Shell<'a> {
    /// Start a session at the root directory.
    pub fn new(tree: &'a VfsTree, config: ShellConfig) -> Self {
        let messages = Messages::new(config.locale);
        Self {
            env: Environment {
                cwd: PathSegments::root(),
                tree,
            },
            config,
            messages,
        }
    }

    pub fn cwd(&self) -> &PathSegments {
        &self.env.cwd
    }

    pub fn tree(&self) -> &'a VfsTree {
        self.env.tree
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Prompt text, e.g. `user@vfs:/home$ `.
    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", self.config.user, self.config.host, self.env.cwd)
    }

    /// Welcome lines for the start of a session.
    pub fn banner(&self) -> Vec<String> {
        self.messages.banner()
    }

    /// Run one line of input.
    pub fn submit(&mut self, line: &str) -> CommandResult {
        let line = line.trim();
        let mut result = CommandResult {
            echo: format!("{}{line}", self.prompt()),
            ..CommandResult::default()
        };

        let kind = CommandKind::parse(line);
        log::debug!("submit [{}] {line:?}", kind.name());

        match commands::execute(kind, &mut self.env, &self.messages) {
            Ok(CommandOutput::Lines(lines)) => result.lines = lines,
            Ok(CommandOutput::None) => {},
            Ok(CommandOutput::Clear) => result.clear = true,
            Ok(CommandOutput::Exit(farewell)) => {
                result.lines.push(farewell);
                result.terminate = true;
            },
            Err(e) => {
                log::debug!("command failed: {e}");
                result.lines.push(self.messages.error_line(&e));
            },
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Tokenizer: comments, single quotes, double quotes, backslash escapes.
// ---------------------------------------------------------------------------

/// Tokenize a command line respecting quotes, escapes and comments.
///
/// - An unquoted, unescaped `#` ends the line.
/// - Single-quoted strings preserve all characters literally.
/// - Inside double quotes a backslash escapes only `"`, `\` and `$`.
/// - Outside quotes a backslash escapes the next character; a backslash
///   that ends the line is a parse error.
/// - `''` and `""` produce an empty token.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = input.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(ch) = chars.next() {
        if in_single {
            if ch == '\'' {
                in_single = false;
            } else {
                current.push(ch);
            }
        } else if in_double {
            if ch == '"' {
                in_double = false;
            } else if ch == '\\' {
                match chars.peek() {
                    Some(&next @ ('"' | '\\' | '$')) => {
                        current.push(next);
                        chars.next();
                    },
                    _ => current.push('\\'),
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                COMMENT_MARKER => break,
                '\'' => {
                    in_single = true;
                    in_token = true;
                },
                '"' => {
                    in_double = true;
                    in_token = true;
                },
                '\\' => {
                    let Some(next) = chars.next() else {
                        return Err(TermError::Parse("no escaped character".to_string()));
                    };
                    current.push(next);
                    in_token = true;
                },
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                },
                _ => {
                    current.push(ch);
                    in_token = true;
                },
            }
        }
    }

    if in_single {
        return Err(TermError::Parse("unterminated single quote".to_string()));
    }
    if in_double {
        return Err(TermError::Parse("unterminated double quote".to_string()));
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}
