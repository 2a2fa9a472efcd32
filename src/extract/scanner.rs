use std::collections::VecDeque;

use crate::brand::BrandMatcher;
use crate::extract::title::{find_title, is_low_information_title};
use crate::extract::{ExtractionStats, ScanWindows};
use crate::model::{DocumentMetadata, ListingRecord};
use crate::normalize::{norm_space, slugify};
use crate::rules::{ExtractionRules, PriceMatch, YearKm};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Rejection {
    MissingYearKm,
    MissingLocation,
    MissingTitle,
    LowInformationTitle,
}

pub struct RecordScanner<'a> {
    rules: &'a ExtractionRules,
    windows: ScanWindows,
    brand: BrandMatcher,
    metadata: &'a DocumentMetadata,
    source: &'a str,
}

impl<'a> RecordScanner<'a> {
    pub fn new(
        rules: &'a ExtractionRules,
        windows: ScanWindows,
        metadata: &'a DocumentMetadata,
        source: &'a str,
    ) -> Option<Self> {
        let brand = BrandMatcher::new(&metadata.marca)?;
        Some(Self {
            rules,
            windows,
            brand,
            metadata,
            source,
        })
    }

    pub fn scan(&self, lines: &[String]) -> (Vec<ListingRecord>, ExtractionStats) {
        let mut records = Vec::new();
        let mut stats = ExtractionStats::default();
        let mut window = VecDeque::<&str>::with_capacity(self.windows.trailing + 1);

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_str();
            if self.rules.is_noise(line) {
                continue;
            }

            window.push_back(line);
            if window.len() > self.windows.trailing {
                window.pop_front();
            }

            let Some(price) = self.rules.parse_price(line) else {
                continue;
            };
            stats.price_candidates += 1;

            match self.resolve(lines, index, price, &window) {
                Ok(record) => records.push(record),
                Err(Rejection::MissingYearKm) => stats.missing_year_km += 1,
                Err(Rejection::MissingLocation) => stats.missing_location += 1,
                Err(Rejection::MissingTitle) => stats.missing_title += 1,
                Err(Rejection::LowInformationTitle) => stats.low_information_titles += 1,
            }
        }

        stats.records = records.len();
        (records, stats)
    }

    fn resolve(
        &self,
        lines: &[String],
        price_index: usize,
        price: PriceMatch,
        window: &VecDeque<&str>,
    ) -> Result<ListingRecord, Rejection> {
        let (year_index, year_km) = self
            .find_forward(lines, price_index + 1, self.windows.year_km, |line| {
                self.rules.parse_year_km(line)
            })
            .ok_or(Rejection::MissingYearKm)?;

        let (_, location) = self
            .find_forward(lines, year_index + 1, self.windows.location, |line| {
                self.rules
                    .is_location_like(line)
                    .then(|| norm_space(line))
            })
            .ok_or(Rejection::MissingLocation)?;

        let title = find_title(window, &self.brand, self.rules, self.windows.model_lookback)
            .ok_or(Rejection::MissingTitle)?;
        if is_low_information_title(&title.model, &self.brand, self.rules) {
            return Err(Rejection::LowInformationTitle);
        }

        Ok(self.build_record(title.full_title(), price, year_km, location))
    }

    fn find_forward<T>(
        &self,
        lines: &[String],
        start: usize,
        limit: usize,
        matcher: impl Fn(&str) -> Option<T>,
    ) -> Option<(usize, T)> {
        lines
            .iter()
            .enumerate()
            .skip(start)
            .take(limit)
            .filter(|(_, line)| !self.rules.is_noise(line.as_str()))
            .find_map(|(index, line)| matcher(line.as_str()).map(|value| (index, value)))
    }

    fn build_record(
        &self,
        modelo: String,
        price: PriceMatch,
        year_km: YearKm,
        ubicacion: String,
    ) -> ListingRecord {
        ListingRecord {
            marca: slugify(&self.metadata.marca),
            combustible: self.metadata.combustible.clone(),
            transmision: self.metadata.transmision.clone(),
            direccion: self.metadata.direccion.clone(),
            aire: self.metadata.aire,
            vidrio: self.metadata.vidrio,
            modelo,
            precio_usd: self.rules.to_usd(price.currency, price.amount),
            moneda_origen: price.currency,
            precio_origen: price.amount,
            anio: year_km.year,
            kms: year_km.kms,
            ubicacion,
            fuente_archivo: self.source.replace('\\', "/"),
        }
    }
}
