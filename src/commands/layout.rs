use anyhow::{Result, bail};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{build_worker_pool, load_pipeline_config};
use crate::cli::LayoutArgs;
use crate::config::PipelineConfig;
use crate::discovery::{SourceDocument, discover_documents};
use crate::layout::{reconstruct_document, render_layout_text};
use crate::model::{DocumentKind, WordDocument};
use crate::util::{read_json, write_text};

struct LayoutOutcome {
    pages: usize,
    lines: usize,
}

pub fn run(args: LayoutArgs) -> Result<()> {
    let config = load_pipeline_config(&args.pipeline)?;
    let documents = discover_documents(&args.input_root)?
        .into_iter()
        .filter(|document| document.kind == DocumentKind::Words)
        .collect::<Vec<_>>();

    if documents.is_empty() {
        bail!("no word documents found in {}", args.input_root.display());
    }

    info!(
        documents = documents.len(),
        output_root = %args.output_root.display(),
        "layout started"
    );

    let pool = build_worker_pool(args.jobs)?;
    let outcomes = pool.install(|| {
        documents
            .par_iter()
            .map(|document| write_document_layout(document, &config, &args))
            .collect::<Vec<_>>()
    });

    let mut written = 0_usize;
    let mut failed = 0_usize;
    let mut lines = 0_usize;
    for (document, outcome) in documents.iter().zip(outcomes) {
        match outcome {
            Ok(outcome) => {
                written += 1;
                lines += outcome.lines;
                debug!(
                    path = %document.path.display(),
                    pages = outcome.pages,
                    lines = outcome.lines,
                    "wrote layout text"
                );
            }
            Err(err) => {
                failed += 1;
                warn!(path = %document.path.display(), error = %format!("{err:#}"), "skipping document");
            }
        }
    }

    info!(written, failed, lines, "layout completed");
    Ok(())
}

fn write_document_layout(
    document: &SourceDocument,
    config: &PipelineConfig,
    args: &LayoutArgs,
) -> Result<LayoutOutcome> {
    let words: WordDocument = read_json(&document.path)?;
    let layout = reconstruct_document(&words, &config.layout);
    let text = render_layout_text(&layout, config.layout.sidebar_x);

    let output_path = args
        .output_root
        .join(document.relative.with_extension("txt"));
    write_text(&output_path, &text)?;

    Ok(LayoutOutcome {
        pages: layout.pages.len(),
        lines: layout.line_count(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::cli::PipelineOverrides;
    use crate::discovery::discover_documents;
    use crate::layout::parse_layout_text;

    #[test]
    fn layout_text_mirrors_input_tree() {
        let input = tempfile::tempdir().expect("input dir");
        let output = tempfile::tempdir().expect("output dir");
        let dir = input.path().join("fiat/nafta/manual");
        fs::create_dir_all(&dir).expect("create dirs");
        let document = r#"{"pages": [{"width": 600, "height": 800, "words": [
            {"text": "Fiat", "x0": 210, "top": 100},
            {"text": "Cronos", "x0": 250, "top": 101},
            {"text": "US$", "x0": 320, "top": 100},
            {"text": "9.000", "x0": 360, "top": 100}
        ]}]}"#;
        fs::write(dir.join("page.json"), document).expect("write doc");

        let args = LayoutArgs {
            input_root: input.path().to_path_buf(),
            output_root: output.path().to_path_buf(),
            jobs: 1,
            pipeline: PipelineOverrides::default(),
        };
        let config = load_pipeline_config(&args.pipeline).expect("config");
        let documents = discover_documents(input.path()).expect("discovery");

        let outcome = write_document_layout(&documents[0], &config, &args).expect("layout");
        assert_eq!(outcome.pages, 1);
        assert_eq!(outcome.lines, 2);

        let text = fs::read_to_string(output.path().join("fiat/nafta/manual/page.txt"))
            .expect("layout text");
        let pages = parse_layout_text(&text);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].left, vec!["Fiat Cronos".to_string()]);
        assert_eq!(pages[0].right, vec!["US$ 9.000".to_string()]);
    }
}
