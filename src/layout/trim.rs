use crate::config::{PageMargins, TrimMargins};
use crate::layout::clusterer::compare_reading_order;
use crate::model::{PageWords, WordFragment};
use crate::normalize::fold;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PageKind {
    First,
    Middle,
    Last,
    Only,
}

impl PageKind {
    pub fn of(index: usize, total: usize) -> Self {
        match (index, total) {
            (_, 0 | 1) => Self::Only,
            (0, _) => Self::First,
            (index, total) if index + 1 == total => Self::Last,
            _ => Self::Middle,
        }
    }

    pub fn margins(self, margins: &TrimMargins) -> PageMargins {
        match self {
            Self::First => margins.first,
            Self::Middle => margins.middle,
            Self::Last => margins.last,
            Self::Only => PageMargins {
                top: margins.first.top,
                bottom: margins.last.bottom,
            },
        }
    }
}

pub fn page_origins(pages: &[PageWords]) -> Vec<f64> {
    let mut origins = Vec::with_capacity(pages.len());
    let mut next_origin = 0.0;
    for page in pages {
        let origin = page.y_origin.unwrap_or(next_origin);
        origins.push(origin);
        next_origin = origin + page.height;
    }
    origins
}

pub fn crop_margins(
    words: Vec<WordFragment>,
    origin: f64,
    height: f64,
    margins: PageMargins,
) -> Vec<WordFragment> {
    if margins.top <= 0.0 && margins.bottom <= 0.0 {
        return words;
    }

    let top = origin + margins.top.max(0.0);
    let bottom = origin + height - margins.bottom.max(0.0);
    words
        .into_iter()
        .filter(|word| word.y >= top && word.y <= bottom)
        .collect()
}

pub fn compile_anchor_phrases(phrases: &[String]) -> Vec<Vec<String>> {
    phrases
        .iter()
        .map(|phrase| {
            fold(phrase)
                .split_whitespace()
                .map(ToOwned::to_owned)
                .collect::<Vec<String>>()
        })
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

pub fn find_anchor_y(words: &[WordFragment], anchors: &[Vec<String>]) -> Option<f64> {
    let mut sorted = words.iter().collect::<Vec<&WordFragment>>();
    sorted.sort_by(|a, b| compare_reading_order(a, b));

    let tokens = sorted
        .iter()
        .flat_map(|word| {
            fold(&word.text)
                .split_whitespace()
                .map(|token| (token.to_string(), word.y))
                .collect::<Vec<(String, f64)>>()
        })
        .collect::<Vec<(String, f64)>>();

    (0..tokens.len()).find_map(|start| {
        anchors.iter().find_map(|anchor| {
            let end = start + anchor.len();
            let matched = end <= tokens.len()
                && tokens[start..end]
                    .iter()
                    .zip(anchor)
                    .all(|((token, _), expected)| token == expected);
            matched.then(|| tokens[start].1)
        })
    })
}

pub fn cut_above_anchor(
    words: Vec<WordFragment>,
    anchors: &[Vec<String>],
    padding: f64,
) -> (Vec<WordFragment>, Option<f64>) {
    let Some(anchor_y) = find_anchor_y(&words, anchors) else {
        return (words, None);
    };

    let cutoff = anchor_y - padding;
    let kept = words.into_iter().filter(|word| word.y >= cutoff).collect();
    (kept, Some(anchor_y))
}

pub fn cut_sidebar(words: Vec<WordFragment>, sidebar_x: Option<f64>) -> Vec<WordFragment> {
    match sidebar_x {
        Some(threshold) => words
            .into_iter()
            .filter(|word| word.x0 >= threshold)
            .collect(),
        None => words,
    }
}
