use serde::Serialize;

use crate::config::LayoutConfig;
use crate::model::WordFragment;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitMode {
    Manual,
    Auto,
}

impl SplitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Auto => "AUTO",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ColumnSplit {
    pub x: f64,
    pub mode: SplitMode,
}

pub fn choose_split(words: &[WordFragment], page_width: f64, config: &LayoutConfig) -> ColumnSplit {
    if let Some(x) = config.split_x {
        return ColumnSplit {
            x,
            mode: SplitMode::Manual,
        };
    }

    ColumnSplit {
        x: find_column_split(words, page_width, config),
        mode: SplitMode::Auto,
    }
}

pub fn find_column_split(words: &[WordFragment], page_width: f64, config: &LayoutConfig) -> f64 {
    let midpoint = page_width / 2.0;

    let mut xs = words.iter().map(|word| word.x0).collect::<Vec<f64>>();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    if xs.len() < config.split_min_distinct_x {
        return midpoint;
    }

    let mut gaps = xs
        .windows(2)
        .map(|pair| (pair[1] - pair[0], pair[0], pair[1]))
        .collect::<Vec<(f64, f64, f64)>>();
    gaps.sort_by(|a, b| b.0.total_cmp(&a.0));

    let lower = page_width * config.split_min_fraction;
    let upper = page_width * config.split_max_fraction;

    gaps.iter()
        .take(config.split_max_gaps)
        .map(|(gap, left, right)| (*gap, (left + right) / 2.0))
        .find(|(gap, mid)| *gap > config.split_min_gap && lower < *mid && *mid < upper)
        .map(|(_, mid)| mid)
        .unwrap_or(midpoint)
}
