//! Normalized VFS paths.
//!
//! A [`PathSegments`] is always rooted: the empty sequence is `/`. It never
//! holds empty, `.` or `..` segments; those are resolved away by
//! [`PathSegments::resolve`].

use std::fmt;

/// A normalized absolute path as an ordered list of names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegments {
    segments: Vec<String>,
}

impl PathSegments {
    /// The root directory.
    pub fn root() -> Self {
        Self::default()
    }

    /// Resolve `input` against `self` as the current directory.
    ///
    /// An empty input yields `self`. A leading `/` starts from the root.
    /// `..` past the root is a no-op. This is purely syntactic; nothing is
    /// checked against a tree.
    pub fn resolve(&self, input: &str) -> Self {
        if input.is_empty() {
            return self.clone();
        }
        let mut resolved = if input.starts_with('/') {
            Self::root()
        } else {
            self.clone()
        };
        for component in input.split('/') {
            match component {
                "" | "." => {},
                ".." => {
                    resolved.segments.pop();
                },
                name => resolved.segments.push(name.to_string()),
            }
        }
        resolved
    }

    /// Parse `input` as an absolute path.
    pub fn parse(input: &str) -> Self {
        Self::root().resolve(input)
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent directory. The root is its own parent.
    pub fn parent(&self) -> Self {
        let mut parent = self.clone();
        parent.segments.pop();
        parent
    }

    /// Append one child name. The name must not contain `/`.
    pub fn join(&self, name: &str) -> Self {
        debug_assert!(!name.is_empty() && !name.contains('/'));
        let mut child = self.clone();
        child.segments.push(name.to_string());
        child
    }
}

/// Shorthand for `current.resolve(input)`.
pub fn resolve(input: &str, current: &PathSegments) -> PathSegments {
    current.resolve(input)
}

impl fmt::Display for PathSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for seg in &self.segments {
            write!(f, "/{seg}")?;
        }
        Ok(())
    }
}
