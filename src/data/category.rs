use std::fmt;
use std::str::FromStr;

use crate::error::UnknownCategoryError;

use super::model::{CategoryValue, StudentRecord};

// ---------------------------------------------------------------------------
// CategoryKey – the fixed set of grouping columns
// ---------------------------------------------------------------------------

/// Column used to group students in the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CategoryKey {
    #[default]
    Gender,
    PartTimeJob,
    AbsenceDays,
}

/// Field name ↔ display label, one entry per key. Both lookups go through this table.
static CATEGORY_TABLE: [(CategoryKey, &str, &str); 3] = [
    (CategoryKey::Gender, "gender", "Gender"),
    (CategoryKey::PartTimeJob, "part_time_job", "Part-time Job"),
    (CategoryKey::AbsenceDays, "absence_days", "Absence Days"),
];

impl CategoryKey {
    /// All keys in the order the UI offers them.
    pub const ALL: [CategoryKey; 3] = [
        CategoryKey::Gender,
        CategoryKey::PartTimeJob,
        CategoryKey::AbsenceDays,
    ];

    fn entry(self) -> &'static (CategoryKey, &'static str, &'static str) {
        // The table lists every variant in declaration order.
        &CATEGORY_TABLE[self as usize]
    }

    /// Source column name, e.g. `part_time_job`.
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Human-readable label, e.g. `Part-time Job`.
    pub fn label(self) -> &'static str {
        self.entry().2
    }

    /// Inverse of [`CategoryKey::label`].
    pub fn from_label(label: &str) -> Result<Self, UnknownCategoryError> {
        CATEGORY_TABLE
            .iter()
            .find(|(_, _, l)| *l == label)
            .map(|(key, _, _)| *key)
            .ok_or_else(|| UnknownCategoryError(label.to_string()))
    }

    /// Grouping value of `record` under this key. The job flag is always
    /// returned as its Yes/No label.
    pub fn value_of(self, record: &StudentRecord) -> CategoryValue {
        match self {
            CategoryKey::Gender => CategoryValue::Text(record.gender.clone()),
            CategoryKey::PartTimeJob => CategoryValue::Label(record.job_label()),
            CategoryKey::AbsenceDays => CategoryValue::Integer(record.absence_days),
        }
    }
}

impl FromStr for CategoryKey {
    type Err = UnknownCategoryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        CATEGORY_TABLE
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(key, _, _)| *key)
            .ok_or_else(|| UnknownCategoryError(name.to_string()))
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
