use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::{INVENTORY_MANIFEST, MANIFEST_DIR, RUN_MANIFEST_PREFIX};
use crate::cli::StatusArgs;
use crate::model::{InventoryManifest, RunManifest};
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.work_root.join(MANIFEST_DIR);
    let inventory_path = manifest_dir.join(INVENTORY_MANIFEST);

    info!(work_root = %args.work_root.display(), "status requested");

    match latest_run_manifest(&manifest_dir)? {
        Some(path) => {
            let manifest: RunManifest = read_json(&path)?;
            let counts = &manifest.counts;
            info!(
                run_id = %manifest.run_id,
                status = %manifest.status,
                started_at = %manifest.started_at,
                updated_at = %manifest.updated_at,
                documents_processed = counts.documents_processed,
                documents_failed = counts.documents_failed,
                records_extracted = counts.records_extracted,
                records_written = counts.records_written,
                output_csv = %manifest.paths.output_csv,
                warnings = manifest.warnings.len(),
                "loaded run manifest"
            );
        }
        None => warn!(path = %manifest_dir.display(), "no run manifest found"),
    }

    if inventory_path.exists() {
        let inventory: InventoryManifest = read_json(&inventory_path)?;
        info!(
            generated_at = %inventory.generated_at,
            document_count = inventory.document_count,
            "loaded inventory manifest"
        );
    } else {
        warn!(path = %inventory_path.display(), "inventory manifest missing");
    }

    Ok(())
}

fn latest_run_manifest(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;

    let mut latest: Option<PathBuf> = None;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();
        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(RUN_MANIFEST_PREFIX) && name.ends_with(".json"))
            .unwrap_or(false);

        if is_run_manifest && latest.as_ref().is_none_or(|current| path > *current) {
            latest = Some(path);
        }
    }

    Ok(latest)
}
