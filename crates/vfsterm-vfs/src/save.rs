//! Serialize a [`VfsTree`] back to the four-column table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use vfsterm_types::error::{Result, TermError};

use crate::loader::{COLUMNS, SourceRecord};
use crate::tree::{Encoding, NodeRef, VfsTree};

/// Flatten the tree into records, parents before children.
///
/// The root is implicit and only written, as `/,dir,,`, when the tree is
/// empty, so the output always has at least one row to load back.
pub fn to_records(tree: &VfsTree) -> Vec<SourceRecord> {
    if tree.is_empty() {
        return vec![SourceRecord::dir("/")];
    }
    tree.walk()
        .into_iter()
        .map(|(path, node)| {
            let path = path.to_string();
            match node {
                NodeRef::Directory(_) => SourceRecord::dir(&path),
                NodeRef::File(file) => {
                    let content = match file.encoding {
                        Encoding::Base64 => STANDARD.encode(&file.content),
                        Encoding::Raw => String::from_utf8_lossy(&file.content).into_owned(),
                    };
                    SourceRecord::file(&path, file.encoding.marker(), &content)
                },
            }
        })
        .collect()
}

/// Write the tree as CSV (header always present). Returns the number of
/// data rows written.
pub fn write_csv<W: Write>(tree: &VfsTree, writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    let records = to_records(tree);
    for record in &records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Write the tree to a host file. Every failure maps to `TermError::Save`.
pub fn save_path(tree: &VfsTree, path: &Path) -> Result<usize> {
    let file =
        File::create(path).map_err(|e| TermError::Save(format!("{}: {e}", path.display())))?;
    let rows =
        write_csv(tree, file).map_err(|e| TermError::Save(format!("{}: {e}", path.display())))?;
    log::info!("Saved {rows} records to {}", path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{build, load_csv, load_path};
    use crate::path::PathSegments;

    fn sample() -> VfsTree {
        build([
            SourceRecord::dir("/home/user"),
            SourceRecord::file("/home/user/a.txt", "raw", "hello, world"),
            SourceRecord::file("/home/user/b.bin", "base64", "AAEC/w=="),
            SourceRecord::dir("/tmp"),
        ])
        .unwrap()
    }

    fn to_string(tree: &VfsTree) -> String {
        let mut buf = Vec::new();
        write_csv(tree, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_rows() {
        let out = to_string(&sample());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "path,type,encoding,content");
        assert_eq!(lines[1], "/home,dir,,");
        assert_eq!(lines[2], "/home/user,dir,,");
        assert_eq!(lines[3], "/home/user/a.txt,file,raw,\"hello, world\"");
        assert_eq!(lines[4], "/home/user/b.bin,file,base64,AAEC/w==");
        assert_eq!(lines[5], "/tmp,dir,,");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn empty_tree_writes_root_row() {
        let out = to_string(&VfsTree::new());
        assert_eq!(out, "path,type,encoding,content\n/,dir,,\n");
    }

    #[test]
    fn empty_tree_reloads() {
        let tree = load_csv("path,type,encoding,content\n/,dir,,\n".as_bytes()).unwrap();
        assert!(tree.is_empty());
        let mut buf = Vec::new();
        assert_eq!(write_csv(&tree, &mut buf).unwrap(), 1);
        assert_eq!(load_csv(buf.as_slice()).unwrap(), tree);
    }

    #[test]
    fn reload_reproduces_tree() {
        let tree = sample();
        let out = to_string(&tree);
        let reloaded = load_csv(out.as_bytes()).unwrap();
        assert_eq!(reloaded, tree);
        let bin = reloaded
            .lookup(&PathSegments::parse("/home/user/b.bin"))
            .unwrap()
            .as_file()
            .unwrap();
        assert_eq!(bin.content, [0, 1, 2, 255]);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = save_path(&sample(), &path).unwrap();
        assert_eq!(rows, 5);
        assert_eq!(load_path(&path).unwrap(), sample());
    }

    #[test]
    fn unwritable_path_is_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");
        let err = save_path(&sample(), &path).unwrap_err();
        assert!(matches!(err, TermError::Save(_)));
    }
}
