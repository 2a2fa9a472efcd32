use std::collections::VecDeque;

use crate::brand::BrandMatcher;
use crate::normalize::{fold, norm_space};
use crate::rules::ExtractionRules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    pub model: String,
    pub version: Option<String>,
}

impl TitleMatch {
    pub fn full_title(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {}", self.model, version),
            None => self.model.clone(),
        }
    }
}

fn is_field_line(line: &str, rules: &ExtractionRules) -> bool {
    rules.is_noise(line)
        || rules.parse_price(line).is_some()
        || rules.parse_year_km(line).is_some()
        || rules.is_location_like(line)
}

pub fn find_title(
    window: &VecDeque<&str>,
    brand: &BrandMatcher,
    rules: &ExtractionRules,
    lookback: usize,
) -> Option<TitleMatch> {
    let price_index = window.len().checked_sub(1)?;

    let title_index = (0..price_index).rev().take(lookback).find(|&index| {
        let line = window[index];
        !is_field_line(line, rules)
            && !rules.looks_like_vendor(line, brand)
            && brand.starts_line(line)
    })?;

    let version = window.get(title_index + 1).and_then(|candidate| {
        let candidate = norm_space(candidate);
        let is_continuation = !candidate.is_empty()
            && !is_field_line(&candidate, rules)
            && !rules.looks_like_vendor(&candidate, brand)
            && !brand.starts_line(&candidate);
        is_continuation.then_some(candidate)
    });

    Some(TitleMatch {
        model: norm_space(window[title_index]),
        version,
    })
}

pub fn is_low_information_title(title: &str, brand: &BrandMatcher, rules: &ExtractionRules) -> bool {
    let folded = fold(title);
    match brand.strip_folded_prefix(&folded) {
        Some(remainder) => rules.is_low_information_remainder(remainder),
        None => true,
    }
}
