use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::metadata::metadata_from_relative_path;
use crate::model::{DocumentKind, DocumentMetadata};

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub kind: DocumentKind,
    pub metadata: DocumentMetadata,
}

impl SourceDocument {
    pub fn source_label(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }
}

pub fn discover_documents(root: &Path) -> Result<Vec<SourceDocument>> {
    let mut paths = Vec::new();
    collect_files(root, &mut paths)?;
    paths.sort();

    let documents = paths
        .into_iter()
        .filter_map(|path| {
            let kind = document_kind(&path)?;
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            let metadata = metadata_from_relative_path(&relative);
            Some(SourceDocument {
                path,
                relative,
                kind,
                metadata,
            })
        })
        .collect();

    Ok(documents)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?;

        if file_type.is_dir() {
            collect_files(&path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        }
    }

    Ok(())
}

fn document_kind(path: &Path) -> Option<DocumentKind> {
    let extension = path.extension()?.to_str()?;
    if extension.eq_ignore_ascii_case("json") {
        Some(DocumentKind::Words)
    } else if extension.eq_ignore_ascii_case("txt") {
        Some(DocumentKind::LayoutText)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_documents_with_path_metadata() {
        let root = tempfile::tempdir().expect("tempdir");
        let nested = root
            .path()
            .join("renault/nafta/manual/hidr-ulica/con-aire-acondicionado");
        fs::create_dir_all(&nested).expect("create dirs");
        fs::write(nested.join("b.json"), "{}").expect("write b");
        fs::write(nested.join("a.txt"), "").expect("write a");
        fs::write(nested.join("notes.md"), "").expect("write md");

        let documents = discover_documents(root.path()).expect("discovery");
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].kind, DocumentKind::LayoutText);
        assert_eq!(documents[1].kind, DocumentKind::Words);

        let metadata = &documents[1].metadata;
        assert_eq!(metadata.marca, "renault");
        assert_eq!(metadata.direccion, "hidráulica");
        assert!(metadata.aire);
        assert!(!metadata.vidrio);
        assert!(documents[1].source_label().ends_with("con-aire-acondicionado/b.json"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = tempfile::tempdir().expect("tempdir");
        assert!(discover_documents(&root.path().join("absent")).is_err());
    }
}
