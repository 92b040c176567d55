//! In-memory VFS tree.
//!
//! The tree owns every node through its root directory. Children are kept in
//! a `BTreeMap`, so listings come out in lexicographic order.

use std::collections::BTreeMap;

use vfsterm_types::error::{Result, TermError};

use crate::path::PathSegments;

/// How a file's content was declared in the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Content is literal text.
    Raw,
    /// Content was base64 in the table and is stored decoded.
    Base64,
}

impl Encoding {
    /// Interpret an encoding marker. `base64` (any case) selects base64;
    /// every other marker means raw text.
    pub fn from_marker(marker: &str) -> Self {
        if marker.trim().eq_ignore_ascii_case("base64") {
            Self::Base64
        } else {
            Self::Raw
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Base64 => "base64",
        }
    }
}

/// A file leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub encoding: Encoding,
    /// Decoded bytes.
    pub content: Vec<u8>,
}

/// A directory: child name to node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    children: BTreeMap<String, VfsNode>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<NodeRef<'_>> {
        self.children.get(name).map(NodeRef::from)
    }

    /// Child names in stored order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeRef<'_>)> {
        self.children.iter().map(|(k, v)| (k.as_str(), NodeRef::from(v)))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node is either a directory or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VfsNode {
    Directory(Directory),
    File(FileNode),
}

impl VfsNode {
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

/// Borrowed view of a node, as handed out by lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Directory(&'a Directory),
    File(&'a FileNode),
}

impl<'a> NodeRef<'a> {
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn as_dir(self) -> Option<&'a Directory> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    pub fn as_file(self) -> Option<&'a FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }
}

impl<'a> From<&'a VfsNode> for NodeRef<'a> {
    fn from(node: &'a VfsNode) -> Self {
        match node {
            VfsNode::Directory(dir) => Self::Directory(dir),
            VfsNode::File(file) => Self::File(file),
        }
    }
}

/// The whole file tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VfsTree {
    root: Directory,
}

impl VfsTree {
    /// Create a tree holding only an empty root directory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::Directory(&self.root)
    }

    /// Resolve a normalized path to its node.
    ///
    /// Fails with `NotFound` if a segment is missing or if the walk has to
    /// descend through a file.
    pub fn lookup(&self, path: &PathSegments) -> Result<NodeRef<'_>> {
        let mut node = self.root();
        for seg in path.segments() {
            node = match node {
                NodeRef::Directory(dir) => dir
                    .get(seg)
                    .ok_or_else(|| TermError::NotFound(path.to_string()))?,
                NodeRef::File(_) => return Err(TermError::NotFound(path.to_string())),
            };
        }
        Ok(node)
    }

    /// Child names of the directory at `path`, in stored order.
    pub fn list(&self, path: &PathSegments) -> Result<Vec<&str>> {
        match self.lookup(path)? {
            NodeRef::Directory(dir) => Ok(dir.names().collect()),
            NodeRef::File(_) => Err(TermError::NotADirectory(path.to_string())),
        }
    }

    pub fn exists(&self, path: &PathSegments) -> bool {
        self.lookup(path).is_ok()
    }

    /// Every non-root node with its path, depth-first in stored order.
    /// A directory is always yielded before its children.
    pub fn walk(&self) -> Vec<(PathSegments, NodeRef<'_>)> {
        let mut out = Vec::new();
        walk_dir(&self.root, &PathSegments::root(), &mut out);
        out
    }

    /// Number of nodes, not counting the root.
    pub fn len(&self) -> usize {
        self.walk().len()
    }

    /// True when the root has no children.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    // -- Mutation (load time only) --

    /// Make sure `path` is a directory, creating missing ancestors.
    ///
    /// Existing directories are kept along with their children. A file found
    /// on the way is replaced by an empty directory.
    pub(crate) fn ensure_dir(&mut self, path: &PathSegments) -> Result<&mut Directory> {
        let mut dir = &mut self.root;
        let mut walked = PathSegments::root();
        for seg in path.segments() {
            walked = walked.join(seg);
            let slot = dir
                .children
                .entry(seg.clone())
                .or_insert_with(|| VfsNode::Directory(Directory::new()));
            if !slot.is_dir() {
                log::warn!("Replacing file {walked} with a directory");
                *slot = VfsNode::Directory(Directory::new());
            }
            dir = match slot {
                VfsNode::Directory(d) => d,
                VfsNode::File(_) => return Err(TermError::NotADirectory(walked.to_string())),
            };
        }
        Ok(dir)
    }

    /// Store `node` at `path`, creating missing ancestors and replacing
    /// whatever was there. `path` must not be the root.
    pub(crate) fn insert(&mut self, path: &PathSegments, node: VfsNode) -> Result<()> {
        let Some(name) = path.name() else {
            return Err(TermError::Load("cannot replace the root directory".to_string()));
        };
        let parent = self.ensure_dir(&path.parent())?;
        if let Some(old) = parent.children.insert(name.to_string(), node)
            && old.is_dir()
        {
            log::warn!("Replacing directory {path} and its contents");
        }
        Ok(())
    }
}

fn walk_dir<'a>(
    dir: &'a Directory,
    base: &PathSegments,
    out: &mut Vec<(PathSegments, NodeRef<'a>)>,
) {
    for (name, node) in dir.entries() {
        let path = base.join(name);
        out.push((path.clone(), node));
        if let NodeRef::Directory(child) = node {
            walk_dir(child, &path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathSegments {
        PathSegments::parse(s)
    }

    fn file(text: &str) -> VfsNode {
        VfsNode::File(FileNode {
            encoding: Encoding::Raw,
            content: text.as_bytes().to_vec(),
        })
    }

    fn sample() -> VfsTree {
        let mut tree = VfsTree::new();
        tree.ensure_dir(&p("/home/user")).unwrap();
        tree.insert(&p("/home/user/a.txt"), file("hello")).unwrap();
        tree.insert(&p("/etc/hostname"), file("vfs")).unwrap();
        tree
    }

    #[test]
    fn root_always_resolves() {
        let tree = VfsTree::new();
        assert!(tree.lookup(&PathSegments::root()).unwrap().is_dir());
        assert!(tree.is_empty());
    }

    #[test]
    fn root_view_is_directory() {
        let tree = sample();
        let root = tree.root().as_dir().unwrap();
        assert_eq!(root.names().collect::<Vec<_>>(), ["etc", "home"]);
        assert!(root.get("home").unwrap().is_dir());
        assert_eq!(tree.lookup(&PathSegments::root()).unwrap(), tree.root());
    }

    #[test]
    fn lookup_file() {
        let tree = sample();
        let node = tree.lookup(&p("/home/user/a.txt")).unwrap();
        assert_eq!(node.as_file().unwrap().content, b"hello");
    }

    #[test]
    fn lookup_missing_is_not_found() {
        let tree = sample();
        let err = tree.lookup(&p("/home/nobody")).unwrap_err();
        assert!(matches!(err, TermError::NotFound(ref s) if s == "/home/nobody"));
    }

    #[test]
    fn lookup_through_file_is_not_found() {
        let tree = sample();
        let err = tree.lookup(&p("/etc/hostname/x")).unwrap_err();
        assert!(matches!(err, TermError::NotFound(_)));
    }

    #[test]
    fn list_directory_sorted() {
        let tree = sample();
        assert_eq!(tree.list(&PathSegments::root()).unwrap(), ["etc", "home"]);
        assert_eq!(tree.list(&p("/home/user")).unwrap(), ["a.txt"]);
    }

    #[test]
    fn list_file_is_not_a_directory() {
        let tree = sample();
        let err = tree.list(&p("/etc/hostname")).unwrap_err();
        assert!(matches!(err, TermError::NotADirectory(_)));
    }

    #[test]
    fn list_empty_dir() {
        let mut tree = VfsTree::new();
        tree.ensure_dir(&p("/empty")).unwrap();
        assert!(tree.list(&p("/empty")).unwrap().is_empty());
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let mut tree = sample();
        tree.ensure_dir(&p("/home/user")).unwrap();
        assert_eq!(tree.list(&p("/home/user")).unwrap(), ["a.txt"]);
    }

    #[test]
    fn ensure_dir_replaces_file() {
        let mut tree = sample();
        tree.ensure_dir(&p("/etc/hostname/sub")).unwrap();
        assert!(tree.lookup(&p("/etc/hostname")).unwrap().is_dir());
        assert!(tree.exists(&p("/etc/hostname/sub")));
    }

    #[test]
    fn insert_file_replaces_directory() {
        let mut tree = sample();
        tree.insert(&p("/home/user"), file("flat")).unwrap();
        assert!(tree.lookup(&p("/home/user")).unwrap().as_file().is_some());
        assert!(!tree.exists(&p("/home/user/a.txt")));
    }

    #[test]
    fn insert_at_root_fails() {
        let mut tree = VfsTree::new();
        assert!(tree.insert(&PathSegments::root(), file("x")).is_err());
    }

    #[test]
    fn walk_is_preorder() {
        let tree = sample();
        let paths: Vec<String> = tree.walk().iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(
            paths,
            ["/etc", "/etc/hostname", "/home", "/home/user", "/home/user/a.txt"]
        );
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn encoding_markers() {
        assert_eq!(Encoding::from_marker("base64"), Encoding::Base64);
        assert_eq!(Encoding::from_marker("BASE64"), Encoding::Base64);
        assert_eq!(Encoding::from_marker("raw"), Encoding::Raw);
        assert_eq!(Encoding::from_marker("utf-8"), Encoding::Raw);
        assert_eq!(Encoding::from_marker(""), Encoding::Raw);
        assert_eq!(Encoding::Base64.marker(), "base64");
    }

    #[test]
    fn deeply_nested_dirs() {
        let mut tree = VfsTree::new();
        let path: String = (0..50).map(|i| format!("/d{i}")).collect();
        tree.ensure_dir(&p(&path)).unwrap();
        assert!(tree.lookup(&p(&path)).unwrap().is_dir());
        assert_eq!(tree.len(), 50);
    }
}
