use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;

use crate::brand::{BrandCatalog, BrandMatcher};
use crate::config::ExtractConfig;
use crate::model::Currency;
use crate::normalize::{fold, norm_space};

const LAYOUT_MARKER_PREFIXES: [&str; 3] = ["--- page", "--- settings", "--- results"];
const LAYOUT_SETTING_KEYS: [&str; 2] = ["sidebar_x", "split_x"];
const DOWN_PAYMENT_PREFIX: &str = "anticipo de";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMatch {
    pub currency: Currency,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearKm {
    pub year: u16,
    pub kms: u64,
}

#[derive(Debug)]
pub struct ExtractionRules {
    noise_phrases: Vec<String>,
    noise_lines: HashSet<String>,
    vendor_words: HashSet<String>,
    low_information_tokens: HashSet<String>,
    price_regex: Regex,
    year_km_regex: Regex,
    low_information_regex: Regex,
    exchange_rate: f64,
    brands: BrandCatalog,
}

impl ExtractionRules {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let price_regex = Regex::new(r"(?i)(?P<cur>US\$|USD|\$)\s*(?P<num>\d[\d.,]*)")
            .context("failed to compile price regex")?;
        let year_km_regex =
            Regex::new(r"(?i)\b(?P<year>(?:19|20)\d{2})\s*\|\s*(?P<km>\d[\d.,]*)\s*kms?\b")
                .context("failed to compile year/km regex")?;
        let low_information_regex = Regex::new(
            r"^(?:\d[.,]\d{1,2}[a-z]{0,3}|\d{2,3}cv|\d{1,2}v|(?:at|mt|aut)\d{0,2})$",
        )
        .context("failed to compile low-information token regex")?;

        Ok(Self {
            noise_phrases: fold_all(&config.noise_phrases).collect(),
            noise_lines: fold_all(&config.noise_lines).collect(),
            vendor_words: fold_all(&config.vendor_words).collect(),
            low_information_tokens: fold_all(&config.low_information_tokens).collect(),
            price_regex,
            year_km_regex,
            low_information_regex,
            exchange_rate: config.exchange_rate,
            brands: BrandCatalog::new(&config.brands),
        })
    }

    pub fn brands(&self) -> &BrandCatalog {
        &self.brands
    }

    pub fn is_noise(&self, line: &str) -> bool {
        let folded = fold(line);
        if folded.is_empty() || self.noise_lines.contains(&folded) {
            return true;
        }
        if folded.len() <= 3 && folded.chars().all(|ch| ch.is_ascii_digit()) {
            return true;
        }
        if LAYOUT_MARKER_PREFIXES
            .iter()
            .any(|prefix| folded.starts_with(prefix))
        {
            return true;
        }
        if LAYOUT_SETTING_KEYS.iter().any(|key| folded.contains(key)) {
            return true;
        }
        if !folded.chars().any(char::is_alphanumeric) {
            return true;
        }

        self.noise_phrases
            .iter()
            .any(|phrase| folded.contains(phrase.as_str()))
    }

    pub fn parse_price(&self, line: &str) -> Option<PriceMatch> {
        let line = norm_space(line);
        if fold(&line).starts_with(DOWN_PAYMENT_PREFIX) {
            return None;
        }

        let captures = self.price_regex.captures(&line)?;
        let currency = match captures.name("cur")?.as_str().to_ascii_uppercase().as_str() {
            "US$" | "USD" => Currency::Usd,
            _ => Currency::Ars,
        };
        let amount = digits_value(captures.name("num")?.as_str())?;
        if amount == 0 {
            return None;
        }

        Some(PriceMatch { currency, amount })
    }

    pub fn parse_year_km(&self, line: &str) -> Option<YearKm> {
        let line = norm_space(line);
        let captures = self.year_km_regex.captures(&line)?;
        let year = captures.name("year")?.as_str().parse::<u16>().ok()?;
        if !(1900..=2099).contains(&year) {
            return None;
        }
        let kms = digits_value(captures.name("km")?.as_str())?;
        Some(YearKm { year, kms })
    }

    pub fn is_location_like(&self, line: &str) -> bool {
        let line = norm_space(line);
        !line.is_empty()
            && line.contains(" - ")
            && !self.is_noise(&line)
            && self.parse_price(&line).is_none()
            && self.parse_year_km(&line).is_none()
    }

    pub fn looks_like_vendor(&self, line: &str, brand: &BrandMatcher) -> bool {
        let folded = fold(line);
        if folded.is_empty() {
            return true;
        }
        if brand.strip_folded_prefix(&folded).is_some() {
            return false;
        }
        folded
            .split(|ch: char| !ch.is_alphanumeric())
            .any(|word| !word.is_empty() && self.vendor_words.contains(word))
    }

    pub fn is_low_information_remainder(&self, remainder: &str) -> bool {
        let tokens = remainder.split_whitespace().collect::<Vec<&str>>();
        match tokens.as_slice() {
            [] => true,
            [token] => {
                let token = token.trim_matches(|ch: char| !ch.is_alphanumeric() && ch != '.');
                self.low_information_tokens.contains(token)
                    || self.low_information_regex.is_match(token)
            }
            _ => false,
        }
    }

    pub fn to_usd(&self, currency: Currency, amount: u64) -> f64 {
        match currency {
            Currency::Usd => amount as f64,
            Currency::Ars => amount as f64 / self.exchange_rate,
        }
    }
}

fn fold_all(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|value| fold(value))
        .filter(|value| !value.is_empty())
}

fn digits_value(raw: &str) -> Option<u64> {
    let digits = raw
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}
