use serde::Serialize;

use crate::brand::{BrandCatalog, TitleParts};
use crate::metadata::{normalize_combustible, normalize_direccion, normalize_transmision};
use crate::model::ListingRecord;
use crate::normalize::{fold, norm_space, simplify, slugify};

const INVALID_VERSIONS: [&str; 7] = ["", "nan", "none", "null", "na", "n/a", "-"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub input: usize,
    pub brand_mismatch: usize,
    pub missing_version: usize,
    pub kept: usize,
}

pub fn clean_records(
    records: Vec<ListingRecord>,
    brands: &BrandCatalog,
) -> (Vec<ListingRecord>, CleanStats) {
    let mut stats = CleanStats {
        input: records.len(),
        ..CleanStats::default()
    };

    let kept = records
        .into_iter()
        .filter_map(|record| {
            let record = canonicalize(record);
            let folded = fold(&record.modelo);

            let Some((matcher, remainder)) = brands.detect(&folded) else {
                stats.brand_mismatch += 1;
                return None;
            };
            if simplify(matcher.display()) != simplify(&record.marca) {
                stats.brand_mismatch += 1;
                return None;
            }

            let has_version = TitleParts::from_remainder(remainder)
                .map(|parts| !INVALID_VERSIONS.contains(&parts.version.as_str()))
                .unwrap_or(false);
            if !has_version {
                stats.missing_version += 1;
                return None;
            }

            Some(record)
        })
        .collect::<Vec<ListingRecord>>();

    stats.kept = kept.len();
    (kept, stats)
}

fn canonicalize(mut record: ListingRecord) -> ListingRecord {
    record.marca = slugify(&record.marca);
    record.combustible = normalize_combustible(&record.combustible);
    record.transmision = normalize_transmision(&record.transmision);
    record.direccion = normalize_direccion(&record.direccion);
    record.modelo = norm_space(&record.modelo);
    record.ubicacion = norm_space(&record.ubicacion);
    record
}
