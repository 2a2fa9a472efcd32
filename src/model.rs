use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFragment {
    pub text: String,
    pub x0: f64,
    #[serde(alias = "top")]
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageWords {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub y_origin: Option<f64>,
    #[serde(default)]
    pub words: Vec<WordFragment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordDocument {
    #[serde(default)]
    pub pages: Vec<PageWords>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Ars,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Words,
    LayoutText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub marca: String,
    pub combustible: String,
    pub transmision: String,
    pub direccion: String,
    pub extras: String,
    pub aire: bool,
    pub vidrio: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub marca: String,
    pub combustible: String,
    pub transmision: String,
    pub direccion: String,
    pub aire: bool,
    pub vidrio: bool,
    pub modelo: String,
    #[serde(serialize_with = "serialize_usd")]
    pub precio_usd: f64,
    pub moneda_origen: Currency,
    pub precio_origen: u64,
    pub anio: u16,
    pub kms: u64,
    pub ubicacion: String,
    pub fuente_archivo: String,
}

impl ListingRecord {
    pub fn extras_score(&self) -> u8 {
        u8::from(self.aire) + u8::from(self.vidrio)
    }

    pub fn precio_usd_cents(&self) -> i64 {
        (self.precio_usd * 100.0).round() as i64
    }
}

fn serialize_usd<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:.2}"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub path: String,
    pub kind: DocumentKind,
    pub metadata: DocumentMetadata,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub document_count: usize,
    pub documents: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPaths {
    pub input_root: String,
    pub output_csv: String,
    pub manifest_dir: String,
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunCounts {
    pub documents_discovered: usize,
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub pages: usize,
    pub lines_built: usize,
    pub lines_reconciled: usize,
    pub noise_lines_dropped: usize,
    pub lines_merged: usize,
    pub duplicate_lines_dropped: usize,
    pub price_candidates: usize,
    pub records_extracted: usize,
    pub records_after_clean: usize,
    pub records_written: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub paths: RunPaths,
    pub counts: RunCounts,
    pub source_hashes: Vec<InventoryEntry>,
    pub warnings: Vec<String>,
}
