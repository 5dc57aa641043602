use std::fmt;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// The six columns every source must provide, in display order.
pub const FIELD_NAMES: [&str; 6] = [
    "first_name",
    "gender",
    "absence_days",
    "part_time_job",
    "weekly_self_study_hours",
    "math_score",
];

/// Upper bound of the math score domain.
pub const MAX_SCORE: u32 = 100;

// ---------------------------------------------------------------------------
// JobLabel – the Yes/No rendering of `part_time_job`
// ---------------------------------------------------------------------------

/// Two-valued label derived from the raw `part_time_job` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JobLabel {
    No,
    Yes,
}

impl From<bool> for JobLabel {
    fn from(flag: bool) -> Self {
        if flag {
            JobLabel::Yes
        } else {
            JobLabel::No
        }
    }
}

impl JobLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            JobLabel::Yes => "Yes",
            JobLabel::No => "No",
        }
    }
}

impl fmt::Display for JobLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CategoryValue – the grouping value of a record under a category key
// ---------------------------------------------------------------------------

/// A single grouping value, one variant per category column type.
/// Ordered and hashable so it can key `BTreeMap`s and `HashMap`s downstream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryValue {
    Text(String),
    Label(JobLabel),
    Integer(u32),
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Text(s) => write!(f, "{s}"),
            CategoryValue::Label(l) => write!(f, "{l}"),
            CategoryValue::Integer(i) => write!(f, "{i}"),
        }
    }
}

// ---------------------------------------------------------------------------
// StudentRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single student (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub first_name: String,
    pub gender: String,
    pub absence_days: u32,
    /// Raw flag as read from the source; displayed through [`JobLabel`].
    pub part_time_job: bool,
    pub weekly_self_study_hours: f64,
    /// Always within `0..=MAX_SCORE`.
    pub math_score: u32,
}

impl StudentRecord {
    /// The Yes/No label used wherever the job flag is shown or grouped.
    pub fn job_label(&self) -> JobLabel {
        JobLabel::from(self.part_time_job)
    }
}

// ---------------------------------------------------------------------------
// Dataset – an ordered, read-only sequence of records
// ---------------------------------------------------------------------------

/// The loaded table. Rows are positional; there is no primary key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<StudentRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed `(min, max)` math score, `None` for an empty dataset.
    pub fn score_bounds(&self) -> Option<(u32, u32)> {
        let min = self.records.iter().map(|r| r.math_score).min()?;
        let max = self.records.iter().map(|r| r.math_score).max()?;
        Some((min, max))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<StudentRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = StudentRecord>>(iter: I) -> Self {
        Dataset {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: u32) -> StudentRecord {
        StudentRecord {
            first_name: name.to_string(),
            gender: "female".to_string(),
            absence_days: 1,
            part_time_job: false,
            weekly_self_study_hours: 10.0,
            math_score: score,
        }
    }

    #[test]
    fn job_label_is_two_valued() {
        assert_eq!(JobLabel::from(true).to_string(), "Yes");
        assert_eq!(JobLabel::from(false).to_string(), "No");
    }

    #[test]
    fn score_bounds_of_empty_dataset_is_none() {
        assert_eq!(Dataset::default().score_bounds(), None);
    }

    #[test]
    fn score_bounds_tracks_min_and_max() {
        let ds = Dataset::from_records(vec![record("a", 71), record("b", 44), record("c", 98)]);
        assert_eq!(ds.score_bounds(), Some((44, 98)));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn category_values_display_without_decoration() {
        assert_eq!(CategoryValue::Text("male".into()).to_string(), "male");
        assert_eq!(CategoryValue::Label(JobLabel::Yes).to_string(), "Yes");
        assert_eq!(CategoryValue::Integer(3).to_string(), "3");
    }
}
