use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use crate::error::LoadError;

use super::model::{Dataset, StudentRecord, FIELD_NAMES, MAX_SCORE};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a student dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the six required columns
/// * `.json`    – `[{ "first_name": "...", "math_score": 73, ... }, ...]`
/// * `.parquet` – one column per field (strings, integers, floats, booleans)
///
/// Columns beyond the six required ones are ignored.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv_reader(File::open(path)?)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!("Loaded {} students from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Read CSV text from any reader. The first line must be a header.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut indices = [0usize; 6];
    for (slot, name) in indices.iter_mut().zip(FIELD_NAMES) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
    }

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        let fields = indices.map(|idx| row.get(idx).unwrap_or(""));
        records.push(parse_record(i + 1, fields)?);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Dataset, LoadError> {
    let rows: Vec<Map<String, JsonValue>> = serde_json::from_str(text)?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, obj) in rows.iter().enumerate() {
        let mut texts: [String; 6] = Default::default();
        for (slot, name) in texts.iter_mut().zip(FIELD_NAMES) {
            let value = obj
                .get(name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
            *slot = json_to_text(value);
        }
        let fields = [0, 1, 2, 3, 4, 5].map(|j| texts[j].as_str());
        records.push(parse_record(i + 1, fields)?);
    }

    Ok(Dataset::from_records(records))
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per required field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let mut columns = Vec::with_capacity(FIELD_NAMES.len());
        for name in FIELD_NAMES {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name.to_string()))?;
            columns.push(batch.column(idx).clone());
        }

        for row in 0..batch.num_rows() {
            let mut texts: [String; 6] = Default::default();
            for (slot, col) in texts.iter_mut().zip(&columns) {
                if !col.is_null(row) {
                    *slot = array_value_to_string(col.as_ref(), row)?;
                }
            }
            let fields = [0, 1, 2, 3, 4, 5].map(|j| texts[j].as_str());
            records.push(parse_record(records.len() + 1, fields)?);
        }
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Field parsing shared by all formats
// ---------------------------------------------------------------------------

/// Build a record from the six field texts, given in `FIELD_NAMES` order.
/// `row` is the 1-based data row used in error messages.
fn parse_record(row: usize, fields: [&str; 6]) -> Result<StudentRecord, LoadError> {
    let [first_name, gender, absence_days, part_time_job, hours, math_score] = fields;

    let text = |value: &str, column: &str| -> Result<String, LoadError> {
        if value.is_empty() {
            return Err(LoadError::malformed(row, column, value, "is empty"));
        }
        Ok(value.to_string())
    };

    let absence_days = parse_whole(absence_days).ok_or_else(|| {
        LoadError::malformed(row, FIELD_NAMES[2], absence_days, "is not a non-negative integer")
    })?;

    let part_time_job = parse_bool(part_time_job).ok_or_else(|| {
        LoadError::malformed(row, FIELD_NAMES[3], part_time_job, "is not a boolean")
    })?;

    let weekly_self_study_hours = hours
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && *h >= 0.0)
        .ok_or_else(|| {
            LoadError::malformed(row, FIELD_NAMES[4], hours, "is not a non-negative number")
        })?;

    let math_score = parse_whole(math_score)
        .filter(|s| *s <= MAX_SCORE)
        .ok_or_else(|| {
            LoadError::malformed(row, FIELD_NAMES[5], math_score, "is not a score between 0 and 100")
        })?;

    Ok(StudentRecord {
        first_name: text(first_name, FIELD_NAMES[0])?,
        gender: text(gender, FIELD_NAMES[1])?,
        absence_days,
        part_time_job,
        weekly_self_study_hours,
        math_score,
    })
}

/// Accept `7` as well as `7.0`, which float-typed writers produce.
fn parse_whole(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::JobLabel;

    const HEADER: &str =
        "id,first_name,last_name,gender,part_time_job,absence_days,weekly_self_study_hours,math_score\n";

    fn load(body: &str) -> Result<Dataset, LoadError> {
        load_csv_reader(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn loads_rows_and_ignores_extra_columns() {
        let ds = load("1,Paul,Casey,male,False,3,27,73\n2,Danielle,Sandoval,female,False,2,47,90\n")
            .unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records()[0];
        assert_eq!(first.first_name, "Paul");
        assert_eq!(first.gender, "male");
        assert_eq!(first.absence_days, 3);
        assert!(!first.part_time_job);
        assert_eq!(first.weekly_self_study_hours, 27.0);
        assert_eq!(first.math_score, 73);
    }

    #[test]
    fn boolean_spellings_map_to_yes_and_no() {
        let ds = load(
            "1,A,X,male,True,1,1,50\n2,B,X,male,false,1,1,50\n3,C,X,male,yes,1,1,50\n4,D,X,male,0,1,1,50\n",
        )
        .unwrap();
        let labels: Vec<JobLabel> = ds.iter().map(|r| r.job_label()).collect();
        assert_eq!(labels, vec![JobLabel::Yes, JobLabel::No, JobLabel::Yes, JobLabel::No]);
    }

    #[test]
    fn unknown_boolean_is_malformed() {
        let err = load("1,A,X,male,maybe,1,1,50\n").unwrap_err();
        match err {
            LoadError::MalformedRow { row, column, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, "part_time_job");
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = load_csv_reader("first_name,gender,absence_days,part_time_job,math_score\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "weekly_self_study_hours"));
    }

    #[test]
    fn out_of_domain_score_is_rejected() {
        let err = load("1,A,X,male,true,1,1,101\n").unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { ref column, .. } if column == "math_score"));
        let err = load("1,A,X,male,true,-2,1,50\n").unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { ref column, .. } if column == "absence_days"));
        let err = load("1,A,X,male,true,1,-0.5,50\n").unwrap_err();
        assert!(matches!(err, LoadError::MalformedRow { ref column, .. } if column == "weekly_self_study_hours"));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let err = load("1,A,X,male,true,1\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn header_only_gives_empty_dataset() {
        assert!(load("").unwrap().is_empty());
    }

    #[test]
    fn fields_are_trimmed() {
        let ds = load("1, Ana ,X, female , TRUE , 4 , 12.5 , 88 \n").unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.first_name, "Ana");
        assert_eq!(r.gender, "female");
        assert!(r.part_time_job);
        assert_eq!(r.weekly_self_study_hours, 12.5);
    }

    #[test]
    fn whole_numbers_written_as_floats_are_accepted() {
        assert_eq!(parse_whole("7.0"), Some(7));
        assert_eq!(parse_whole("7.5"), None);
        assert_eq!(parse_whole("abc"), None);
    }

    #[test]
    fn json_records_are_parsed() {
        let ds = parse_json(
            r#"[{"first_name":"Ana","gender":"female","absence_days":4,"part_time_job":true,
                 "weekly_self_study_hours":12.5,"math_score":88,"email":"ana@example.com"}]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].job_label(), JobLabel::Yes);
        assert_eq!(ds.records()[0].math_score, 88);
    }

    #[test]
    fn json_missing_field_is_reported() {
        let err = parse_json(r#"[{"first_name":"Ana","gender":"female"}]"#).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "absence_days"));
        assert!(matches!(parse_json("{}").unwrap_err(), LoadError::Json(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("students.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }
}
