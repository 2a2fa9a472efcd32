mod scanner;
mod title;


use serde::Serialize;
use tracing::debug;

use crate::config::ExtractConfig;
use crate::model::{DocumentMetadata, ListingRecord};
use crate::rules::ExtractionRules;

use scanner::RecordScanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindows {
    pub year_km: usize,
    pub location: usize,
    pub model_lookback: usize,
    pub trailing: usize,
}

impl From<&ExtractConfig> for ScanWindows {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            year_km: config.year_km_window,
            location: config.location_window,
            model_lookback: config.model_lookback,
            trailing: config.trailing_window.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub price_candidates: usize,
    pub missing_year_km: usize,
    pub missing_location: usize,
    pub missing_title: usize,
    pub low_information_titles: usize,
    pub records: usize,
}

pub fn extract_records(
    lines: &[String],
    metadata: &DocumentMetadata,
    source: &str,
    rules: &ExtractionRules,
    windows: ScanWindows,
) -> (Vec<ListingRecord>, ExtractionStats) {
    let Some(scanner) = RecordScanner::new(rules, windows, metadata, source) else {
        debug!(source, "no brand in document metadata, skipping extraction");
        return (Vec::new(), ExtractionStats::default());
    };

    scanner.scan(lines)
}
