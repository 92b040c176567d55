//! Build a [`VfsTree`] from the tabular `path,type,encoding,content` format.
//!
//! Records are applied in table order and later records win. One bad row
//! aborts the whole load: a partially built tree is never returned.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use vfsterm_types::error::{Result, TermError};

use crate::path::PathSegments;
use crate::tree::{Encoding, FileNode, VfsNode, VfsTree};

/// Column names of the table, in order.
pub const COLUMNS: [&str; 4] = ["path", "type", "encoding", "content"];

/// Node kind declared by a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Dir,
    File,
}

/// One row of the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub encoding: String,
    pub content: String,
}

impl SourceRecord {
    pub fn dir(path: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: RecordKind::Dir,
            encoding: String::new(),
            content: String::new(),
        }
    }

    pub fn file(path: &str, encoding: &str, content: &str) -> Self {
        Self {
            path: path.to_string(),
            kind: RecordKind::File,
            encoding: encoding.to_string(),
            content: content.to_string(),
        }
    }
}

/// Apply `records` in order to an empty tree.
///
/// An empty record list yields an empty tree; the CSV entry points reject
/// empty tables themselves.
pub fn build<I>(records: I) -> Result<VfsTree>
where
    I: IntoIterator<Item = SourceRecord>,
{
    let mut tree = VfsTree::new();
    for (i, record) in records.into_iter().enumerate() {
        apply(&mut tree, &record).map_err(|e| row_error(i + 1, e))?;
    }
    Ok(tree)
}

fn apply(tree: &mut VfsTree, record: &SourceRecord) -> Result<()> {
    let path = PathSegments::parse(&record.path);
    match record.kind {
        RecordKind::Dir => {
            tree.ensure_dir(&path)?;
        },
        RecordKind::File => {
            let encoding = Encoding::from_marker(&record.encoding);
            let content = match encoding {
                Encoding::Base64 => STANDARD.decode(record.content.trim()).map_err(|e| {
                    TermError::Load(format!("invalid base64 content for {path}: {e}"))
                })?,
                Encoding::Raw => record.content.as_bytes().to_vec(),
            };
            tree.insert(&path, VfsNode::File(FileNode { encoding, content }))?;
        },
    }
    Ok(())
}

fn row_error(row: usize, err: TermError) -> TermError {
    match err {
        TermError::Load(msg) => TermError::Load(format!("row {row}: {msg}")),
        other => TermError::Load(format!("row {row}: {other}")),
    }
}

/// Parse CSV (with header) from `reader` and build the tree.
pub fn load_csv<R: Read>(reader: R) -> Result<VfsTree> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| TermError::Load(format!("cannot read header: {e}")))?
        .clone();
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(TermError::Load(format!("missing required column `{column}`")));
        }
    }

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<SourceRecord>().enumerate() {
        let record = row.map_err(|e| TermError::Load(format!("row {}: {e}", i + 1)))?;
        records.push(record);
    }
    if records.is_empty() {
        return Err(TermError::Load("source table is empty".to_string()));
    }

    let count = records.len();
    let tree = build(records)?;
    log::info!("Loaded {count} records ({} nodes)", tree.len());
    Ok(tree)
}

/// Open and load a CSV file from the host filesystem.
pub fn load_path(path: &Path) -> Result<VfsTree> {
    let file =
        File::open(path).map_err(|e| TermError::Load(format!("{}: {e}", path.display())))?;
    log::debug!("Loading VFS from {}", path.display());
    load_csv(file)
}
