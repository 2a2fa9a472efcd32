use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use super::{INVENTORY_MANIFEST, MANIFEST_DIR};
use crate::cli::InventoryArgs;
use crate::discovery::{SourceDocument, discover_documents};
use crate::model::{InventoryEntry, InventoryManifest};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.input_root)?;

    if args.dry_run {
        info!(
            document_count = manifest.document_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.work_root.join(MANIFEST_DIR).join(INVENTORY_MANIFEST));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(document_count = manifest.document_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(input_root: &Path) -> Result<InventoryManifest> {
    let documents = discover_documents(input_root)?;
    if documents.is_empty() {
        bail!("no source documents found in {}", input_root.display());
    }

    let entries = documents
        .iter()
        .map(inventory_entry)
        .collect::<Result<Vec<_>>>()?;

    Ok(InventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: input_root.display().to_string(),
        document_count: entries.len(),
        documents: entries,
    })
}

pub fn inventory_entry(document: &SourceDocument) -> Result<InventoryEntry> {
    Ok(InventoryEntry {
        path: document.source_label(),
        kind: document.kind,
        metadata: document.metadata.clone(),
        sha256: sha256_file(&document.path)?,
    })
}
