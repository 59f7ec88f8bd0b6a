use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ClimateDataset, Record, Scenario};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a projection table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row `country,scenario,year,anom`
/// * `.json`    – `[{ "country": "...", "scenario": "ssp245", "year": 2040, "anom": 1.8 }, ...]`
/// * `.parquet` – flat columns `country`, `scenario`, `year`, `anom`
///
/// Rows with an unrecognised scenario or a non-numeric year/anomaly are
/// skipped with a warning rather than failing the whole load.
pub fn load_file(path: &Path) -> Result<ClimateDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ClimateDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

/// Parse CSV from any reader.  Split out so tests can feed byte slices.
fn parse_csv<R: Read>(input: R) -> Result<ClimateDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let country_idx = col("country")?;
    let scenario_idx = col("scenario")?;
    let year_idx = col("year")?;
    let anom_idx = col("anom")?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        // A ragged row (wrong field count) must not abort the whole load.
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("CSV row {row_no}: skipping unreadable row: {e}");
                skipped += 1;
                continue;
            }
        };
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        match parse_row(
            field(country_idx),
            field(scenario_idx),
            field(year_idx),
            field(anom_idx),
        ) {
            Some(rec) => records.push(rec),
            None => {
                log::warn!("CSV row {row_no}: skipping malformed record {row:?}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("CSV load skipped {skipped} malformed rows");
    }
    Ok(ClimateDataset::from_records(records))
}

/// Parse one textual row into a [`Record`].  `None` when any field is bad.
fn parse_row(country: &str, scenario: &str, year: &str, anom: &str) -> Option<Record> {
    if country.is_empty() {
        return None;
    }
    let scenario: Scenario = scenario.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    let anom: f64 = anom.parse().ok()?;
    if !anom.is_finite() {
        return None;
    }
    Some(Record {
        country: country.to_string(),
        scenario,
        year,
        anom,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "country": "Norway", "scenario": "ssp245", "year": 2040, "anom": 1.82 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ClimateDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<ClimateDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for (i, row) in rows.iter().enumerate() {
        match serde_json::from_value::<Record>(row.clone()) {
            Ok(rec) if rec.anom.is_finite() => records.push(rec),
            _ => {
                log::warn!("JSON row {i}: skipping malformed record");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("JSON load skipped {skipped} malformed rows");
    }
    Ok(ClimateDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat `country` / `scenario` / `year` / `anom`
/// columns.  Works with files written by both **Pandas** (`df.to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ClimateDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let country_col = batch_column(&batch, "country")?;
        let scenario_col = batch_column(&batch, "scenario")?;
        let year_col = batch_column(&batch, "year")?;
        let anom_col = batch_column(&batch, "anom")?;

        for row in 0..batch.num_rows() {
            let country = extract_string(country_col, row);
            let scenario = extract_string(scenario_col, row);
            let year = extract_i64(year_col, row);
            let anom = extract_f64(anom_col, row);

            let rec = match (country, scenario, year, anom) {
                (Some(c), Some(s), Some(y), Some(a)) if a.is_finite() => {
                    s.parse::<Scenario>().ok().map(|scenario| Record {
                        country: c,
                        scenario,
                        year: y as i32,
                        anom: a,
                    })
                }
                _ => None,
            };
            match rec {
                Some(rec) => records.push(rec),
                None => {
                    log::warn!("Parquet row {row}: skipping malformed record");
                    skipped += 1;
                }
            }
        }
    }

    if skipped > 0 {
        log::warn!("Parquet load skipped {skipped} malformed rows");
    }
    Ok(ClimateDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|arr| arr.value(row).to_string())
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as i64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|arr| arr.value(row)),
        _ => None,
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|arr| arr.value(row) as f64),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_parses_well_formed_rows() {
        let csv = "country,scenario,year,anom\n\
                   Norway,ssp126,2015,0.91\n\
                   Norway,ssp126,2016,0.95\n\
                   Brazil,ssp585,2015,1.10\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.countries, vec!["Brazil", "Norway"]);
        assert_eq!(ds.records[0].scenario, Scenario::Ssp126);
        assert_eq!(ds.records[2].anom, 1.10);
    }

    #[test]
    fn csv_skips_malformed_rows() {
        let csv = "country,scenario,year,anom\n\
                   Norway,ssp126,2015,0.91\n\
                   Norway,rcp85,2016,0.95\n\
                   Norway,ssp126,not_a_year,0.95\n\
                   Norway,ssp126,2017,NaN\n\
                   Norway,ssp126\n\
                   Norway,ssp126,2019,1.2,extra\n\
                   ,ssp126,2018,1.0\n";
        let ds = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].year, 2015);
    }

    #[test]
    fn csv_rejects_missing_columns() {
        let csv = "country,scenario,year\nNorway,ssp126,2015\n";
        assert!(parse_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn json_parses_records_and_skips_bad_ones() {
        let text = r#"[
            {"country": "Norway", "scenario": "ssp245", "year": 2040, "anom": 1.82},
            {"country": "Norway", "scenario": "bogus", "year": 2041, "anom": 1.85},
            {"country": "Norway", "scenario": "ssp245", "year": 2042}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].year, 2040);
    }
}
