use anyhow::Result;
use tracing::info;

use super::records_csv::{read_records, write_records};
use crate::cli::DedupeArgs;
use crate::config::PipelineConfig;
use crate::dedupe::{clean_records, dedupe};
use crate::rules::ExtractionRules;

pub fn run(args: DedupeArgs) -> Result<()> {
    let (records, skipped) = read_records(&args.input_csv)?;
    info!(
        path = %args.input_csv.display(),
        records = records.len(),
        skipped,
        "loaded listings"
    );

    let records = if args.skip_clean {
        records
    } else {
        let config = PipelineConfig::load(args.config.as_deref())?;
        let rules = ExtractionRules::new(&config.extract)?;
        let (records, stats) = clean_records(records, rules.brands());
        info!(
            brand_mismatch = stats.brand_mismatch,
            missing_version = stats.missing_version,
            kept = stats.kept,
            "cleaned listings"
        );
        records
    };

    let (records, stats) = dedupe(records);
    info!(
        input = stats.input,
        output = stats.output,
        replaced_by_richer = stats.replaced_by_richer,
        "deduplicated listings"
    );

    write_records(&args.output_csv, &records)?;
    info!(path = %args.output_csv.display(), records = records.len(), "wrote listings csv");

    Ok(())
}
