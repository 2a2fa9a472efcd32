mod clusterer;
mod columns;
mod text_format;
mod trim;


use serde::Serialize;

use crate::config::{ColumnOrder, LayoutConfig};
use crate::model::{PageWords, WordDocument};

pub use columns::{ColumnSplit, SplitMode};
pub use text_format::{parse_layout_text, render_layout_text};

use clusterer::cluster_lines;
use columns::choose_split;
use trim::{
    PageKind, compile_anchor_phrases, crop_margins, cut_above_anchor, cut_sidebar, page_origins,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageColumns {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageLayout {
    pub number: usize,
    pub split: ColumnSplit,
    pub anchor_y: Option<f64>,
    pub columns: PageColumns,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn line_count(&self) -> usize {
        self.pages
            .iter()
            .map(|page| page.columns.left.len() + page.columns.right.len())
            .sum()
    }

    pub fn linearize(&self, order: ColumnOrder) -> Vec<String> {
        linearize(self.pages.iter().map(|page| &page.columns), order)
    }
}

pub fn linearize<'a, I>(pages: I, order: ColumnOrder) -> Vec<String>
where
    I: IntoIterator<Item = &'a PageColumns>,
{
    let pages = pages.into_iter().collect::<Vec<&PageColumns>>();
    let mut lines = Vec::new();

    match order {
        ColumnOrder::PerPage => {
            for page in pages {
                lines.extend(page.left.iter().cloned());
                lines.extend(page.right.iter().cloned());
            }
        }
        ColumnOrder::PerDocument => {
            for page in &pages {
                lines.extend(page.left.iter().cloned());
            }
            for page in &pages {
                lines.extend(page.right.iter().cloned());
            }
        }
    }

    lines
}

pub fn reconstruct_document(document: &WordDocument, config: &LayoutConfig) -> DocumentLayout {
    let anchors = compile_anchor_phrases(&config.anchor_phrases);
    let origins = page_origins(&document.pages);
    let total = document.pages.len();

    let pages = document
        .pages
        .iter()
        .zip(origins)
        .enumerate()
        .map(|(index, (page, origin))| {
            reconstruct_page(page, PageKind::of(index, total), index + 1, origin, config, &anchors)
        })
        .collect();

    DocumentLayout { pages }
}

fn reconstruct_page(
    page: &PageWords,
    kind: PageKind,
    number: usize,
    origin: f64,
    config: &LayoutConfig,
    anchors: &[Vec<String>],
) -> PageLayout {
    let words = crop_margins(
        page.words.clone(),
        origin,
        page.height,
        kind.margins(&config.margins),
    );
    let (words, anchor_y) = cut_above_anchor(words, anchors, config.anchor_padding);
    let words = cut_sidebar(words, config.sidebar_x);

    let split = choose_split(&words, page.width, config);
    let (left, right): (Vec<_>, Vec<_>) = words.into_iter().partition(|word| word.x0 < split.x);

    PageLayout {
        number,
        split,
        anchor_y,
        columns: PageColumns {
            left: cluster_lines(&left, config.y_tolerance),
            right: cluster_lines(&right, config.y_tolerance),
        },
    }
}
