use super::model::{StudentRecord, FIELD_NAMES};

/// Column headers of the raw table view.
pub const DISPLAY_COLUMNS: [&str; 6] = FIELD_NAMES;

/// Render one record as the six display cells, job flag shown as Yes/No.
pub fn project(record: &StudentRecord) -> [String; 6] {
    [
        record.first_name.clone(),
        record.gender.clone(),
        record.absence_days.to_string(),
        record.job_label().to_string(),
        record.weekly_self_study_hours.to_string(),
        record.math_score.to_string(),
    ]
}
