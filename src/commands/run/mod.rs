mod pipeline;

#[cfg(test)]
mod tests;

use anyhow::{Result, bail};
use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::records_csv::write_records;
use super::{
    MANIFEST_DIR, RUN_MANIFEST_PREFIX, build_worker_pool, load_pipeline_config,
    render_command_line,
};
use crate::cli::RunArgs;
use crate::dedupe::{clean_records, dedupe};
use crate::discovery::discover_documents;
use crate::model::{ListingRecord, RunCounts, RunManifest, RunPaths};
use crate::rules::ExtractionRules;
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

use self::pipeline::process_document;
use super::inventory::inventory_entry;

pub fn run(args: RunArgs) -> Result<()> {
    let manifest = execute(&args, render_command_line())?;

    info!(
        run_id = %manifest.run_id,
        documents_processed = manifest.counts.documents_processed,
        documents_failed = manifest.counts.documents_failed,
        records_written = manifest.counts.records_written,
        output = %manifest.paths.output_csv,
        "run completed"
    );
    Ok(())
}

pub fn execute(args: &RunArgs, command: String) -> Result<RunManifest> {
    let started = Utc::now();
    let run_id = format!("run-{}", utc_compact_string(started));

    let config = load_pipeline_config(&args.pipeline)?;
    let rules = ExtractionRules::new(&config.extract)?;

    let documents = discover_documents(&args.input_root)?;
    if documents.is_empty() {
        bail!("no source documents found in {}", args.input_root.display());
    }

    info!(
        run_id = %run_id,
        documents = documents.len(),
        input_root = %args.input_root.display(),
        "run started"
    );

    let pool = build_worker_pool(args.jobs)?;
    let outcomes = pool.install(|| {
        documents
            .par_iter()
            .map(|document| process_document(document, &config, &rules))
            .collect::<Vec<_>>()
    });

    let mut counts = RunCounts {
        documents_discovered: documents.len(),
        ..RunCounts::default()
    };
    let mut warnings = Vec::new();
    let mut records = Vec::<ListingRecord>::new();

    for (document, outcome) in documents.iter().zip(outcomes) {
        match outcome {
            Ok(outcome) => {
                debug!(
                    path = %document.path.display(),
                    pages = outcome.pages,
                    lines = outcome.reconcile.output_lines,
                    candidates = outcome.extraction.price_candidates,
                    records = outcome.records.len(),
                    "processed document"
                );
                counts.documents_processed += 1;
                counts.pages += outcome.pages;
                counts.lines_built += outcome.lines_built;
                counts.lines_reconciled += outcome.reconcile.output_lines;
                counts.noise_lines_dropped += outcome.reconcile.noise_dropped;
                counts.lines_merged += outcome.reconcile.merged;
                counts.duplicate_lines_dropped += outcome.reconcile.duplicates_dropped;
                counts.price_candidates += outcome.extraction.price_candidates;
                counts.records_extracted += outcome.records.len();
                records.extend(outcome.records);
            }
            Err(err) => {
                counts.documents_failed += 1;
                let message = format!("{err:#}");
                warn!(path = %document.path.display(), error = %message, "skipping document");
                warnings.push(format!("{}: {message}", document.source_label()));
            }
        }
    }

    let records = if args.skip_clean {
        records
    } else {
        let (records, stats) = clean_records(records, rules.brands());
        info!(
            brand_mismatch = stats.brand_mismatch,
            missing_version = stats.missing_version,
            kept = stats.kept,
            "cleaned listings"
        );
        records
    };
    counts.records_after_clean = records.len();

    let (records, stats) = dedupe(records);
    info!(
        input = stats.input,
        output = stats.output,
        replaced_by_richer = stats.replaced_by_richer,
        "deduplicated listings"
    );

    write_records(&args.output_csv, &records)?;
    counts.records_written = records.len();
    info!(path = %args.output_csv.display(), records = records.len(), "wrote listings csv");

    let mut source_hashes = Vec::with_capacity(documents.len());
    for document in &documents {
        match inventory_entry(document) {
            Ok(entry) => source_hashes.push(entry),
            Err(err) => warnings.push(format!("{}: {err:#}", document.source_label())),
        }
    }

    let manifest_dir = args.work_root.join(MANIFEST_DIR);
    let manifest_path = args.run_manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!(
            "{RUN_MANIFEST_PREFIX}{}.json",
            utc_compact_string(started)
        ))
    });

    let manifest = RunManifest {
        manifest_version: 1,
        run_id,
        status: if counts.documents_failed == 0 {
            "completed".to_string()
        } else {
            "completed_with_warnings".to_string()
        },
        started_at: started.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        updated_at: now_utc_string(),
        command,
        paths: RunPaths {
            input_root: args.input_root.display().to_string(),
            output_csv: args.output_csv.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
            config_path: args
                .pipeline
                .config
                .as_ref()
                .map(|path| path.display().to_string()),
        },
        counts,
        source_hashes,
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote run manifest");

    Ok(manifest)
}
