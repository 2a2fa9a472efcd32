use std::fs;

use anyhow::{Context, Result, bail};

use crate::config::PipelineConfig;
use crate::discovery::SourceDocument;
use crate::extract::{ExtractionStats, ScanWindows, extract_records};
use crate::layout::{linearize, parse_layout_text, reconstruct_document};
use crate::model::{DocumentKind, ListingRecord, WordDocument};
use crate::reconcile::{ReconcileStats, reconcile};
use crate::rules::ExtractionRules;
use crate::util::read_json;

#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub pages: usize,
    pub lines_built: usize,
    pub reconcile: ReconcileStats,
    pub extraction: ExtractionStats,
    pub records: Vec<ListingRecord>,
}

pub fn process_document(
    document: &SourceDocument,
    config: &PipelineConfig,
    rules: &ExtractionRules,
) -> Result<DocumentOutcome> {
    let order = config.layout.column_order;
    let (pages, lines) = match document.kind {
        DocumentKind::Words => {
            let words: WordDocument = read_json(&document.path)?;
            check_page_geometry(&words)
                .with_context(|| format!("invalid word document: {}", document.path.display()))?;
            let layout = reconstruct_document(&words, &config.layout);
            (layout.pages.len(), layout.linearize(order))
        }
        DocumentKind::LayoutText => {
            let text = fs::read_to_string(&document.path)
                .with_context(|| format!("failed to read {}", document.path.display()))?;
            let pages = parse_layout_text(&text);
            (pages.len(), linearize(pages.iter(), order))
        }
    };

    let (reconciled, reconcile_stats) = reconcile(&lines, rules);
    let (records, extraction) = extract_records(
        &reconciled,
        &document.metadata,
        &document.source_label(),
        rules,
        ScanWindows::from(&config.extract),
    );

    Ok(DocumentOutcome {
        pages,
        lines_built: lines.len(),
        reconcile: reconcile_stats,
        extraction,
        records,
    })
}

fn check_page_geometry(document: &WordDocument) -> Result<()> {
    for (index, page) in document.pages.iter().enumerate() {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !valid(page.width) || !valid(page.height) {
            bail!(
                "page {} has invalid size {}x{}",
                index + 1,
                page.width,
                page.height
            );
        }
        if let Some(word) = page
            .words
            .iter()
            .find(|word| !word.x0.is_finite() || !word.y.is_finite())
        {
            bail!("page {} has a word with invalid position: {:?}", index + 1, word.text);
        }
    }
    Ok(())
}
