//! End-to-end tests: files on disk through loading, range filtering and
//! aggregation.

use std::io::Write;
use std::sync::Arc;

use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use student_scores::data::aggregate::mean_scores;
use student_scores::*;
use tempfile::{Builder, NamedTempFile};

const CSV: &str = "\
id,first_name,last_name,gender,part_time_job,absence_days,extracurricular_activities,weekly_self_study_hours,math_score,history_score
1,Paul,Casey,male,False,3,False,27,73,81
2,Danielle,Sandoval,female,False,2,False,47,90,86
3,Tina,Andrews,female,False,9,True,13,81,97
4,Tara,Clark,female,False,5,False,3,71,74
5,Anthony,Campos,male,False,5,False,10,84,77
6,Kelly,Wade,female,True,2,False,29,62,90
7,Anthony,Smith,male,True,1,True,38,98,86
";

fn csv_file(text: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn load_sample() -> Dataset {
    let file = csv_file(CSV);
    load_file(file.path()).unwrap()
}

fn scored(scores: &[u32]) -> Dataset {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| StudentRecord {
            first_name: format!("student{i}"),
            gender: ["male", "female", "male", "female", "male"][i % 5].to_string(),
            absence_days: (i % 4) as u32,
            part_time_job: i % 2 == 0,
            weekly_self_study_hours: 4.0 * i as f64,
            math_score: score,
        })
        .collect()
}

#[test]
fn csv_file_loads_with_yes_no_labels() {
    let ds = load_sample();
    assert_eq!(ds.len(), 7);

    let jobs = frequencies(&ds, CategoryKey::PartTimeJob);
    let labels: Vec<String> = jobs.iter().map(|(v, _)| v.to_string()).collect();
    assert_eq!(labels, vec!["No", "Yes"]);
    assert_eq!(jobs.get(&CategoryValue::Label(JobLabel::Yes)), Some(2));
}

#[test]
fn five_row_scenario() {
    let ds = scored(&[50, 60, 70, 80, 90]);
    let filtered = filter_by_range(&ds, 60, 80);
    let scores: Vec<u32> = filtered.iter().map(|r| r.math_score).collect();
    assert_eq!(scores, vec![60, 70, 80]);
    assert_eq!(frequencies(&filtered, CategoryKey::Gender).total(), 3);
}

#[test]
fn range_beyond_scores_gives_no_data() {
    let ds = load_sample();
    let filtered = filter_by_range(&ds, 101, 101);
    assert!(filtered.is_empty());
    assert!(frequencies(&filtered, CategoryKey::Gender).is_empty());
}

#[test]
fn counts_match_filtered_size_for_all_ranges() {
    let ds = load_sample();
    for lo in 0..=100 {
        for hi in (lo..=100).step_by(5) {
            let filtered = filter_by_range(&ds, lo, hi);
            assert_eq!(filter_by_range(&filtered, lo, hi), filtered);
            for key in CategoryKey::ALL {
                assert_eq!(frequencies(&filtered, key).total(), filtered.len());
            }
        }
    }
}

#[test]
fn observed_score_bounds_are_identity() {
    let ds = load_sample();
    let (min, max) = ds.score_bounds().unwrap();
    assert_eq!((min, max), (62, 98));
    assert_eq!(filter_by_range(&ds, min, max), ds);
}

#[test]
fn inverted_range_is_empty_not_error() {
    let ds = load_sample();
    assert!(filter_by_range(&ds, 90, 60).is_empty());
    assert!(ScoreRange::new(90, 60).is_err());
}

#[test]
fn every_key_round_trips_through_its_label() {
    for key in CategoryKey::ALL {
        assert_eq!(CategoryKey::from_label(key.label()).unwrap(), key);
    }
    assert!(CategoryKey::from_label("Eye Colour").is_err());
}

#[test]
fn count_views_follow_the_slider_range() {
    let ds = load_sample();
    let range = ScoreRange::new(80, 100).unwrap();

    let ViewData::Frequency(table) =
        build_view(&ds, &ViewRequest::Frequency { key: CategoryKey::Gender, range })
    else {
        panic!("expected frequency data");
    };
    assert_eq!(table.get(&CategoryValue::Text("female".into())), Some(2));
    assert_eq!(table.get(&CategoryValue::Text("male".into())), Some(2));

    let empty = ScoreRange::new(99, 100).unwrap();
    assert_eq!(
        build_view(&ds, &ViewRequest::Share { key: CategoryKey::Gender, range: empty }),
        ViewData::NoData
    );
}

#[test]
fn mean_scores_over_loaded_file() {
    let ds = load_sample();
    let means = mean_scores(&ds, CategoryKey::PartTimeJob);
    assert_eq!(means[0].value, CategoryValue::Label(JobLabel::No));
    assert_eq!(means[0].count, 5);
    assert!((means[0].mean_score - 79.8).abs() < 1e-9);
    assert!((means[1].mean_score - 80.0).abs() < 1e-9);
}

#[test]
fn csv_from_reader_matches_file() {
    assert_eq!(load_csv_reader(CSV.as_bytes()).unwrap(), load_sample());
}

#[test]
fn schema_mismatch_is_a_load_error() {
    let file = csv_file("first_name,gender,math_score\nAna,female,80\n");
    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(_)));
}

#[test]
fn missing_file_is_a_load_error() {
    let err = load_file(std::path::Path::new("/nonexistent/student-scores.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn json_file_loads() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(
        br#"[
            {"first_name": "Paul", "gender": "male", "absence_days": 3, "part_time_job": false,
             "weekly_self_study_hours": 27, "math_score": 73},
            {"first_name": "Kelly", "gender": "female", "absence_days": 2, "part_time_job": true,
             "weekly_self_study_hours": 29.5, "math_score": 62}
        ]"#,
    )
    .unwrap();

    let ds = load_file(file.path()).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records()[1].job_label(), JobLabel::Yes);
    assert_eq!(ds.records()[1].weekly_self_study_hours, 29.5);
}

#[test]
fn parquet_file_loads() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("first_name", DataType::Utf8, false),
        Field::new("gender", DataType::Utf8, false),
        Field::new("part_time_job", DataType::Boolean, false),
        Field::new("absence_days", DataType::Int64, false),
        Field::new("weekly_self_study_hours", DataType::Float64, false),
        Field::new("math_score", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Paul", "Tina", "Kelly"])),
            Arc::new(StringArray::from(vec!["male", "female", "female"])),
            Arc::new(BooleanArray::from(vec![false, false, true])),
            Arc::new(Int64Array::from(vec![3, 9, 2])),
            Arc::new(Float64Array::from(vec![27.0, 13.0, 29.5])),
            Arc::new(Int64Array::from(vec![73, 81, 62])),
        ],
    )
    .unwrap();

    let file = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let ds = load_file(file.path()).unwrap();
    assert_eq!(ds.len(), 3);
    let tina = &ds.records()[1];
    assert_eq!(tina.first_name, "Tina");
    assert_eq!(tina.absence_days, 9);
    assert_eq!(tina.weekly_self_study_hours, 13.0);
    assert_eq!(tina.math_score, 81);
    assert_eq!(ds.records()[2].job_label(), JobLabel::Yes);
    assert_eq!(ds.records()[2].weekly_self_study_hours, 29.5);
}

#[test]
fn bundled_dataset_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("datasets/student-scores.csv");
    let ds = load_file(&path).unwrap();
    assert_eq!(ds.len(), 60);

    let (min, max) = ds.score_bounds().unwrap();
    assert_eq!(filter_by_range(&ds, min, max), ds);

    let jobs = frequencies(&ds, CategoryKey::PartTimeJob);
    assert!(jobs.len() <= 2);
    for (value, _) in jobs.iter() {
        let label = value.to_string();
        assert!(label == "Yes" || label == "No", "unexpected label {label}");
    }
}
