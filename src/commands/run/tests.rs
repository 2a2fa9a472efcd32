use std::fs;
use std::path::Path;

use serde_json::json;

use super::*;
use crate::cli::PipelineOverrides;
use crate::commands::records_csv::read_records;
use crate::model::Currency;

const LISTING_DIR: &str = "renault/nafta/manual/hidr-ulica";

fn word(text: &str, x0: f64, y: f64) -> serde_json::Value {
    json!({ "text": text, "x0": x0, "top": y })
}

fn two_column_page() -> serde_json::Value {
    json!({
        "pages": [{
            "width": 600.0,
            "height": 800.0,
            "words": [
                word("Ingresá", 210.0, 20.0),
                word("Ordenar", 320.0, 60.0),
                word("por", 360.0, 60.0),
                word("Filtros", 50.0, 100.0),
                word("Renault", 210.0, 100.0),
                word("Sandero Stepway", 250.0, 100.0),
                word("US$", 210.0, 120.0),
                word("8.500", 250.0, 120.0),
                word("2017 |", 210.0, 140.0),
                word("98.000 Km", 250.0, 140.0),
                word("Mar del Plata", 210.0, 160.0),
                word("- Bs. As.", 250.0, 160.0),
                word("Renault", 320.0, 101.0),
                word("Logan Life", 360.0, 99.0),
                word("$", 320.0, 120.0),
                word("15.000.000", 360.0, 120.0),
                word("2021 |", 320.0, 140.0),
                word("35.000 Km", 360.0, 140.0),
                word("Neuquén", 320.0, 160.0),
                word("- Neuquén", 360.0, 160.0)
            ]
        }]
    })
}

const SANDERO_LAYOUT: &str = "
--- PAGE 1 ---

--- SETTINGS ---
SIDEBAR_X = 200
SPLIT_X   = 300.0  (AUTO)

--- RESULTS LEFT ---
Renault Sandero Stepway
US$ 8.500
2017 | 98.000 Km
Mar del Plata - Bs. As.

--- RESULTS RIGHT ---
";

fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, contents).expect("write file");
}

fn run_args(input_root: &Path, work_root: &Path) -> RunArgs {
    RunArgs {
        input_root: input_root.to_path_buf(),
        work_root: work_root.to_path_buf(),
        output_csv: work_root.join("autos_dataset.csv"),
        run_manifest_path: None,
        jobs: 1,
        skip_clean: false,
        pipeline: PipelineOverrides::default(),
    }
}

#[test]
fn run_extracts_dedupes_and_writes_outputs() {
    let input = tempfile::tempdir().expect("input dir");
    let work = tempfile::tempdir().expect("work dir");

    write_file(
        input.path(),
        &format!("{LISTING_DIR}/con-aire-acondicionado/listado.json"),
        &two_column_page().to_string(),
    );
    write_file(
        input.path(),
        &format!("{LISTING_DIR}/aire__cristales/listado.txt"),
        SANDERO_LAYOUT,
    );

    let args = run_args(input.path(), work.path());
    let manifest = execute(&args, "autolistings run".to_string()).expect("run");

    assert_eq!(manifest.status, "completed");
    assert_eq!(manifest.counts.documents_discovered, 2);
    assert_eq!(manifest.counts.documents_processed, 2);
    assert_eq!(manifest.counts.records_extracted, 3);
    assert_eq!(manifest.counts.records_written, 2);
    assert_eq!(manifest.source_hashes.len(), 2);

    let (records, skipped) = read_records(&args.output_csv).expect("read csv");
    assert_eq!(skipped, 0);
    assert_eq!(records.len(), 2);

    let sandero = &records[0];
    assert_eq!(sandero.modelo, "Renault Sandero Stepway");
    assert!(sandero.aire && sandero.vidrio);
    assert!(sandero.fuente_archivo.ends_with("aire__cristales/listado.txt"));
    assert_eq!(sandero.ubicacion, "Mar del Plata - Bs. As.");

    let logan = &records[1];
    assert_eq!(logan.modelo, "Renault Logan Life");
    assert_eq!(logan.moneda_origen, Currency::Ars);
    assert_eq!(logan.precio_origen, 15_000_000);
    assert_eq!(logan.precio_usd, 10_000.0);
    assert_eq!(logan.direccion, "hidráulica");

    let raw = fs::read_to_string(&args.output_csv).expect("raw csv");
    assert!(raw.starts_with("marca,combustible,transmision,direccion,aire,vidrio,modelo,"));
    assert!(raw.contains("10000.00"));

    let manifests = fs::read_dir(work.path().join(MANIFEST_DIR))
        .expect("manifest dir")
        .count();
    assert_eq!(manifests, 1);
}

#[test]
fn malformed_document_does_not_abort_the_batch() {
    let input = tempfile::tempdir().expect("input dir");
    let work = tempfile::tempdir().expect("work dir");

    write_file(
        input.path(),
        &format!("{LISTING_DIR}/sin-extras/a_broken.json"),
        "{ not json",
    );
    write_file(
        input.path(),
        &format!("{LISTING_DIR}/sin-extras/b_listado.txt"),
        SANDERO_LAYOUT,
    );

    let args = run_args(input.path(), work.path());
    let manifest = execute(&args, "autolistings run".to_string()).expect("run");

    assert_eq!(manifest.status, "completed_with_warnings");
    assert_eq!(manifest.counts.documents_failed, 1);
    assert_eq!(manifest.counts.documents_processed, 1);
    assert_eq!(manifest.counts.records_written, 1);
    assert_eq!(manifest.warnings.len(), 1);
    assert!(manifest.warnings[0].contains("a_broken.json"));
}

#[test]
fn skip_clean_keeps_versionless_titles() {
    let input = tempfile::tempdir().expect("input dir");
    let work = tempfile::tempdir().expect("work dir");
    let layout = SANDERO_LAYOUT.replace("Renault Sandero Stepway", "Renault Kwid");
    write_file(input.path(), &format!("{LISTING_DIR}/sin-extras/kwid.txt"), &layout);

    let mut args = run_args(input.path(), work.path());
    let cleaned = execute(&args, String::new()).expect("cleaned run");
    assert_eq!(cleaned.counts.records_extracted, 1);
    assert_eq!(cleaned.counts.records_written, 0);

    args.skip_clean = true;
    let raw = execute(&args, String::new()).expect("raw run");
    assert_eq!(raw.counts.records_written, 1);
}

#[test]
fn empty_input_root_is_an_error() {
    let input = tempfile::tempdir().expect("input dir");
    let work = tempfile::tempdir().expect("work dir");
    assert!(execute(&run_args(input.path(), work.path()), String::new()).is_err());
}
