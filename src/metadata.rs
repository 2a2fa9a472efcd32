use std::path::Path;

use crate::model::DocumentMetadata;
use crate::normalize::{fold, norm_space, slugify};

const COMBUSTIBLE_FIXES: [(&str, &str); 4] = [
    ("di-sel", "diesel"),
    ("el-ctrico", "eléctrico"),
    ("h-brido", "híbrido"),
    ("h-brido-nafta", "híbrido-nafta"),
];

const TRANSMISION_FIXES: [(&str, &str); 5] = [
    ("autom-tica", "automática"),
    ("autom-tica-secuencial", "automática secuencial"),
    ("semiautom-tica", "semiautomática"),
    ("mt", "manual"),
    ("at", "automática"),
];

const DIRECCION_FIXES: [(&str, &str); 3] = [
    ("hidr-ulica", "hidráulica"),
    ("el-ctrica", "eléctrica"),
    ("mec-nica", "mecánica"),
];

fn lookup(value: String, fixes: &[(&str, &str)]) -> String {
    fixes
        .iter()
        .find(|(broken, _)| *broken == value)
        .map(|(_, fixed)| (*fixed).to_string())
        .unwrap_or(value)
}

fn lowercase(value: &str) -> String {
    norm_space(value).to_lowercase()
}

pub fn normalize_combustible(raw: &str) -> String {
    let value = lowercase(raw);
    if fold(&value).contains("gnc") {
        return "nafta-gnc".to_string();
    }
    lookup(value, &COMBUSTIBLE_FIXES)
}

pub fn normalize_transmision(raw: &str) -> String {
    lookup(lowercase(raw), &TRANSMISION_FIXES)
}

pub fn normalize_direccion(raw: &str) -> String {
    lookup(lowercase(raw), &DIRECCION_FIXES)
}

pub fn extras_flags(extras: &str) -> (bool, bool) {
    let folded = fold(extras);
    (folded.contains("aire"), folded.contains("cristales"))
}

pub fn metadata_from_relative_path(relative: &Path) -> DocumentMetadata {
    let segments = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<String>>()
        })
        .unwrap_or_default();
    let segment = |index: usize| segments.get(index).map(String::as_str).unwrap_or("");

    let extras = lowercase(segment(4));
    let (aire, vidrio) = extras_flags(&extras);

    DocumentMetadata {
        marca: slugify(segment(0)),
        combustible: normalize_combustible(segment(1)),
        transmision: normalize_transmision(segment(2)),
        direccion: normalize_direccion(segment(3)),
        extras,
        aire,
        vidrio,
    }
}
