use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{GameDataset, GameRecord};

/// Column names as they appear in the source games table.
const COL_PLATFORM: &str = "Platform";
const COL_GENRE: &str = "Genre";
const COL_YEAR: &str = "Year_of_Release";
const COL_CRITIC: &str = "Critic_Score";
const COL_USER: &str = "User_Score";
const COL_RATING: &str = "Rating";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a games dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat columns, nullable scores (recommended)
/// * `.json`    – `[{ "Platform": ..., "Genre": ..., ... }, ...]`
/// * `.csv`     – header row with the `Platform`/`Genre`/`Year_of_Release`/
///                `Critic_Score`/`User_Score`/`Rating` columns
///
/// Rows missing a platform, genre, or parsable release year are skipped
/// (with a warning) rather than failing the whole load. Missing or
/// unparsable score/rating cells (e.g. the dataset's "tbd") become `None`.
pub fn load_file(path: &Path) -> Result<GameDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    if dataset.is_empty() {
        bail!("No usable rows in {}", path.display());
    }
    Ok(dataset)
}

/// Accumulates rows and keeps count of the ones dropped for missing
/// required fields, so the load can finish with a single summary warning.
#[derive(Default)]
struct RowSink {
    records: Vec<GameRecord>,
    skipped: usize,
}

impl RowSink {
    fn push(
        &mut self,
        platform: Option<String>,
        genre: Option<String>,
        year: Option<i32>,
        critic_score: Option<f64>,
        user_score: Option<f64>,
        rating: Option<f64>,
    ) {
        match (platform, genre, year) {
            (Some(platform), Some(genre), Some(year)) => self.records.push(GameRecord {
                platform,
                genre,
                year,
                critic_score,
                user_score,
                rating,
            }),
            _ => self.skipped += 1,
        }
    }

    fn finish(self) -> GameDataset {
        if self.skipped > 0 {
            log::warn!(
                "Skipped {} rows with missing platform/genre/year",
                self.skipped
            );
        }
        GameDataset::from_records(self.records)
    }
}

// -- Cell parsing helpers --

fn parse_string_cell(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Numeric cell: empty / "tbd" / anything unparsable is a missing value.
fn parse_f64_cell(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Years are sometimes serialised as floats ("2008.0") by pandas.
fn parse_year_cell(s: &str) -> Option<i32> {
    parse_f64_cell(s).map(|y| y as i32)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<GameDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &str| headers.iter().position(|h| h == name);
    let platform_idx = col(COL_PLATFORM)
        .with_context(|| format!("CSV missing '{COL_PLATFORM}' column"))?;
    let genre_idx =
        col(COL_GENRE).with_context(|| format!("CSV missing '{COL_GENRE}' column"))?;
    let year_idx = col(COL_YEAR).with_context(|| format!("CSV missing '{COL_YEAR}' column"))?;
    let critic_idx = col(COL_CRITIC);
    let user_idx = col(COL_USER);
    let rating_idx = col(COL_RATING);

    let mut sink = RowSink::default();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i));

        sink.push(
            record.get(platform_idx).and_then(parse_string_cell),
            record.get(genre_idx).and_then(parse_string_cell),
            record.get(year_idx).and_then(parse_year_cell),
            cell(critic_idx).and_then(parse_f64_cell),
            cell(user_idx).and_then(parse_f64_cell),
            cell(rating_idx).and_then(parse_f64_cell),
        );
    }

    Ok(sink.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Platform": "PS4",
///     "Genre": "Action",
///     "Year_of_Release": 2015,
///     "Critic_Score": 80,
///     "User_Score": 8.0,
///     "Rating": 15
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<GameDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut sink = RowSink::default();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        sink.push(
            obj.get(COL_PLATFORM).and_then(json_to_string),
            obj.get(COL_GENRE).and_then(json_to_string),
            obj.get(COL_YEAR).and_then(json_to_f64).map(|y| y as i32),
            obj.get(COL_CRITIC).and_then(json_to_f64),
            obj.get(COL_USER).and_then(json_to_f64),
            obj.get(COL_RATING).and_then(json_to_f64),
        );
    }

    Ok(sink.finish())
}

fn json_to_string(val: &JsonValue) -> Option<String> {
    val.as_str().and_then(parse_string_cell)
}

/// Numbers, or numeric strings — the source data mixes both for scores.
fn json_to_f64(val: &JsonValue) -> Option<f64> {
    match val {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => parse_f64_cell(s),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing the games table.
///
/// Expected schema: flat columns named as in the CSV layout; categories as
/// Utf8, year as any integer or float type, scores nullable numerics.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<GameDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut sink = RowSink::default();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let required = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let platform_col = batch.column(required(COL_PLATFORM)?);
        let genre_col = batch.column(required(COL_GENRE)?);
        let year_col = batch.column(required(COL_YEAR)?);
        let optional =
            |name: &str| schema.index_of(name).ok().map(|idx| batch.column(idx));
        let critic_col = optional(COL_CRITIC);
        let user_col = optional(COL_USER);
        let rating_col = optional(COL_RATING);

        for row in 0..batch.num_rows() {
            sink.push(
                extract_string(platform_col, row),
                extract_string(genre_col, row),
                extract_f64(year_col, row).map(|y| y as i32),
                critic_col.and_then(|c| extract_f64(c, row)),
                user_col.and_then(|c| extract_f64(c, row)),
                rating_col.and_then(|c| extract_f64(c, row)),
            );
        }
    }

    Ok(sink.finish())
}

// -- Parquet / Arrow helpers --

/// Extract a non-empty string from an Arrow column at a given row.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>()?;
            parse_string_cell(arr.value(row))
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            parse_string_cell(arr.value(row))
        }
        _ => None,
    }
}

/// Extract a numeric value from an Arrow column at a given row.
///
/// Scores exported from pandas can be Int or Float depending on whether the
/// column contained NaN; string columns ("tbd") are parsed leniently.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>()?;
            let v = arr.value(row);
            if v.is_nan() { None } else { Some(v) }
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>()?;
            let v = arr.value(row) as f64;
            if v.is_nan() { None } else { Some(v) }
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>()?;
            Some(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>()?;
            Some(arr.value(row) as f64)
        }
        DataType::Int16 => {
            let arr = col.as_any().downcast_ref::<Int16Array>()?;
            Some(arr.value(row) as f64)
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>()?;
            Some(if arr.value(row) { 1.0 } else { 0.0 })
        }
        DataType::Utf8 | DataType::LargeUtf8 => {
            extract_string(col, row).and_then(|s| parse_f64_cell(&s))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn csv_rows_missing_required_fields_are_skipped() {
        let csv = "\
Platform,Genre,Year_of_Release,Critic_Score,User_Score,Rating
PS4,Action,2015,80,8.0,15
PC,RPG,2012,70,tbd,12
,Action,2011,50,5.0,10
X360,,2010,60,6.0,3
Wii,Sports,,55,5.5,3
";
        let mut tmp = NamedTempFile::with_suffix(".csv").unwrap();
        write!(tmp, "{csv}").unwrap();

        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].platform, "PS4");
        assert_eq!(ds.records[1].user_score, None); // "tbd" is missing data
        assert_eq!(ds.records[1].critic_score, Some(70.0));
    }

    #[test]
    fn csv_with_no_usable_rows_is_an_error() {
        let csv = "Platform,Genre,Year_of_Release\n,,\n";
        let mut tmp = NamedTempFile::with_suffix(".csv").unwrap();
        write!(tmp, "{csv}").unwrap();
        assert!(load_file(tmp.path()).is_err());
    }

    #[test]
    fn json_records_orientation_loads() {
        let json = r#"[
            {"Platform":"PS4","Genre":"Action","Year_of_Release":2015,
             "Critic_Score":80,"User_Score":8.0,"Rating":15},
            {"Platform":"PC","Genre":"RPG","Year_of_Release":2012.0,
             "Critic_Score":70,"User_Score":"tbd","Rating":12}
        ]"#;
        let mut tmp = NamedTempFile::with_suffix(".json").unwrap();
        write!(tmp, "{json}").unwrap();

        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].year, 2012);
        assert_eq!(ds.records[1].user_score, None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let tmp = NamedTempFile::with_suffix(".xlsx").unwrap();
        assert!(load_file(tmp.path()).is_err());
    }
}
