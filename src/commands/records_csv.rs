use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::model::ListingRecord;
use crate::util::ensure_parent_directory;

pub fn write_records(path: &Path, records: &[ListingRecord]) -> Result<()> {
    ensure_parent_directory(path)?;

    let file = File::create(path)
        .with_context(|| format!("failed to create csv file: {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("failed to write csv row: {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to flush csv file: {}", path.display()))
}

pub fn read_records(path: &Path) -> Result<(Vec<ListingRecord>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open csv file: {}", path.display()))?;

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for (index, row) in reader.deserialize::<ListingRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                warn!(
                    path = %path.display(),
                    row = index + 1,
                    error = %err,
                    "skipping malformed csv row"
                );
            }
        }
    }

    Ok((records, skipped))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::model::Currency;

    fn listing() -> ListingRecord {
        ListingRecord {
            marca: "fiat".to_string(),
            combustible: "nafta".to_string(),
            transmision: "manual".to_string(),
            direccion: "eléctrica".to_string(),
            aire: true,
            vidrio: false,
            modelo: "Fiat Cronos Drive 1.3".to_string(),
            precio_usd: 1000.0,
            moneda_origen: Currency::Ars,
            precio_origen: 1_500_000,
            anio: 2021,
            kms: 45_000,
            ubicacion: "Córdoba - Córdoba".to_string(),
            fuente_archivo: "fiat/page.json".to_string(),
        }
    }

    #[test]
    fn written_rows_read_back_with_two_decimal_prices() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out/listings.csv");

        write_records(&path, &[listing()]).expect("write csv");
        let raw = fs::read_to_string(&path).expect("raw csv");
        assert!(raw.contains(",1000.00,ARS,1500000,2021,45000,"));
        assert!(raw.contains(",true,false,"));

        let (records, skipped) = read_records(&path).expect("read csv");
        assert_eq!(skipped, 0);
        assert_eq!(records, vec![listing()]);
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("in.csv");
        let header = "marca,combustible,transmision,direccion,aire,vidrio,modelo,precio_usd,moneda_origen,precio_origen,anio,kms,ubicacion,fuente_archivo";
        let good = "fiat,nafta,manual,eléctrica,true,false,Fiat Cronos Drive 1.3,1000.00,ARS,1500000,2021,45000,Córdoba - Córdoba,fiat/page.json";
        let empty_kms = "fiat,nafta,manual,eléctrica,true,false,Fiat Argo Drive,9000.00,USD,9000,2020,,Rosario - Santa Fe,fiat/page.json";
        let bad_year = "fiat,nafta,manual,eléctrica,false,false,Fiat Mobi Way,7000.00,USD,7000,dos mil,30000,Rosario - Santa Fe,fiat/page.json";
        fs::write(&path, format!("{header}\n{good}\n{empty_kms}\n{bad_year}\n")).expect("write csv");

        let (records, skipped) = read_records(&path).expect("read csv");
        assert_eq!(skipped, 2);
        assert_eq!(records, vec![listing()]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(read_records(&dir.path().join("absent.csv")).is_err());
    }
}
