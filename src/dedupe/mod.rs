mod clean;


use std::collections::HashMap;

use serde::Serialize;

use crate::brand::{BrandMatcher, TitleParts};
use crate::model::ListingRecord;
use crate::normalize::{fold, slugify};

pub use clean::{CleanStats, clean_records};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupeKey {
    pub marca: String,
    pub modelo: String,
    pub version: String,
    pub anio: u16,
    pub kms: u64,
    pub precio_usd_cents: i64,
    pub combustible: String,
    pub transmision: String,
    pub direccion: String,
}

impl DedupeKey {
    pub fn of(record: &ListingRecord) -> Self {
        let parts = BrandMatcher::new(&record.marca)
            .and_then(|matcher| TitleParts::split(&record.modelo, &matcher))
            .unwrap_or_else(|| TitleParts {
                model: fold(&record.modelo),
                version: String::new(),
            });

        Self {
            marca: slugify(&record.marca),
            modelo: parts.model,
            version: parts.version,
            anio: record.anio,
            kms: record.kms,
            precio_usd_cents: record.precio_usd_cents(),
            combustible: fold(&record.combustible),
            transmision: fold(&record.transmision),
            direccion: fold(&record.direccion),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupeStats {
    pub input: usize,
    pub output: usize,
    pub replaced_by_richer: usize,
}

pub fn dedupe(records: Vec<ListingRecord>) -> (Vec<ListingRecord>, DedupeStats) {
    let mut stats = DedupeStats {
        input: records.len(),
        ..DedupeStats::default()
    };
    let mut slots = HashMap::<DedupeKey, usize>::with_capacity(records.len());
    let mut kept = Vec::<ListingRecord>::new();

    for record in records {
        let key = DedupeKey::of(&record);
        match slots.get(&key) {
            Some(&slot) => {
                if record.extras_score() > kept[slot].extras_score() {
                    kept[slot] = record;
                    stats.replaced_by_richer += 1;
                }
            }
            None => {
                slots.insert(key, kept.len());
                kept.push(record);
            }
        }
    }

    stats.output = kept.len();
    (kept, stats)
}
