
use serde::Serialize;

use crate::normalize::{fold, norm_space};
use crate::rules::ExtractionRules;

const TERMINAL_PUNCTUATION: [char; 5] = ['.', '!', '?', ':', ';'];
const CONTINUATION_MARKERS: [&str; 4] = ["...", "\u{2026}", "-", "\u{00b7}"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub input_lines: usize,
    pub noise_dropped: usize,
    pub merged: usize,
    pub duplicates_dropped: usize,
    pub output_lines: usize,
}

pub fn reconcile(lines: &[String], rules: &ExtractionRules) -> (Vec<String>, ReconcileStats) {
    let mut stats = ReconcileStats {
        input_lines: lines.len(),
        ..ReconcileStats::default()
    };

    let clean = lines
        .iter()
        .map(|line| norm_space(line))
        .filter(|line| !rules.is_noise(line))
        .collect::<Vec<String>>();
    stats.noise_dropped = lines.len() - clean.len();

    let (merged, merges) = merge_broken_lines(clean);
    stats.merged = merges;

    let (collapsed, duplicates) = collapse_duplicates(merged);
    stats.duplicates_dropped = duplicates;
    stats.output_lines = collapsed.len();

    (collapsed, stats)
}

pub fn merge_broken_lines(lines: Vec<String>) -> (Vec<String>, usize) {
    let mut merged = Vec::<String>::with_capacity(lines.len());
    let mut merges = 0usize;

    for line in lines {
        let Some(previous) = merged.last_mut() else {
            merged.push(line);
            continue;
        };

        if should_merge(previous, &line) {
            *previous = join_continuation(previous, &line);
            merges += 1;
        } else {
            merged.push(line);
        }
    }

    (merged, merges)
}

fn should_merge(previous: &str, next: &str) -> bool {
    let previous = previous.trim_end();
    if ends_with_continuation(previous) {
        return true;
    }

    let starts_lowercase = next
        .chars()
        .next()
        .map(char::is_lowercase)
        .unwrap_or(false);
    let ends_terminal = previous.ends_with(TERMINAL_PUNCTUATION);

    starts_lowercase && !ends_terminal
}

fn ends_with_continuation(line: &str) -> bool {
    CONTINUATION_MARKERS
        .iter()
        .any(|marker| line.ends_with(marker))
}

fn join_continuation(previous: &str, next: &str) -> String {
    let previous = previous.trim_end();
    let next = next.trim_start();

    let next_starts_lowercase = next
        .chars()
        .next()
        .map(char::is_lowercase)
        .unwrap_or(false);

    // "automá-" + "tica" -> "automática"
    if let Some(stem) = previous.strip_suffix('-') {
        let stem_ends_letter = stem.chars().last().is_some_and(char::is_alphabetic);
        if stem_ends_letter && next_starts_lowercase {
            return format!("{stem}{next}");
        }
        return format!("{previous} {next}");
    }

    let stem = previous
        .trim_end_matches("...")
        .trim_end_matches(['\u{2026}', '\u{00b7}'])
        .trim_end();
    format!("{stem} {next}")
}

pub fn collapse_duplicates(lines: Vec<String>) -> (Vec<String>, usize) {
    let mut kept = Vec::<String>::with_capacity(lines.len());
    let mut previous_key: Option<String> = None;
    let mut dropped = 0usize;

    for line in lines {
        let key = fold(&line);
        if previous_key.as_deref() == Some(key.as_str()) {
            dropped += 1;
            continue;
        }
        previous_key = Some(key);
        kept.push(line);
    }

    (kept, dropped)
}
