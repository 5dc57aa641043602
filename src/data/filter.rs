use serde::{Deserialize, Serialize};

use crate::error::InvalidRangeError;

use super::model::{Dataset, MAX_SCORE};

// ---------------------------------------------------------------------------
// ScoreRange – inclusive bounds on math_score
// ---------------------------------------------------------------------------

/// Closed interval `[lo, hi]` within `0..=MAX_SCORE`, with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u32, u32)", into = "(u32, u32)")]
pub struct ScoreRange {
    lo: u32,
    hi: u32,
}

impl ScoreRange {
    /// The whole score domain.
    pub const FULL: ScoreRange = ScoreRange { lo: 0, hi: MAX_SCORE };

    pub fn new(lo: u32, hi: u32) -> Result<Self, InvalidRangeError> {
        if lo > hi || hi > MAX_SCORE {
            return Err(InvalidRangeError { lo, hi });
        }
        Ok(ScoreRange { lo, hi })
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    pub fn contains(&self, score: u32) -> bool {
        (self.lo..=self.hi).contains(&score)
    }

    /// Rows of `dataset` whose score lies in this range.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        filter_by_range(dataset, self.lo, self.hi)
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        ScoreRange::FULL
    }
}

impl TryFrom<(u32, u32)> for ScoreRange {
    type Error = InvalidRangeError;

    fn try_from((lo, hi): (u32, u32)) -> Result<Self, Self::Error> {
        ScoreRange::new(lo, hi)
    }
}

impl From<ScoreRange> for (u32, u32) {
    fn from(range: ScoreRange) -> Self {
        (range.lo, range.hi)
    }
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// Return the rows with `lo <= math_score <= hi`, in their original order.
///
/// An inverted range (`lo > hi`) matches nothing and yields an empty dataset.
pub fn filter_by_range(dataset: &Dataset, lo: u32, hi: u32) -> Dataset {
    if lo > hi {
        return Dataset::default();
    }
    dataset
        .iter()
        .filter(|r| (lo..=hi).contains(&r.math_score))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::StudentRecord;

    fn dataset(scores: &[u32]) -> Dataset {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| StudentRecord {
                first_name: format!("student{i}"),
                gender: if i % 2 == 0 { "male" } else { "female" }.to_string(),
                absence_days: i as u32,
                part_time_job: i % 3 == 0,
                weekly_self_study_hours: i as f64 * 2.5,
                math_score: score,
            })
            .collect()
    }

    #[test]
    fn keeps_inclusive_bounds_in_order() {
        let ds = dataset(&[50, 60, 70, 80, 90]);
        let out = filter_by_range(&ds, 60, 80);
        let scores: Vec<u32> = out.iter().map(|r| r.math_score).collect();
        assert_eq!(scores, vec![60, 70, 80]);
    }

    #[test]
    fn preserves_relative_order_of_unsorted_rows() {
        let ds = dataset(&[88, 12, 65, 40, 65, 99]);
        let out = filter_by_range(&ds, 40, 90);
        let names: Vec<&str> = out.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(names, vec!["student0", "student2", "student3", "student4"]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = dataset(&[50, 60, 70]);
        assert!(filter_by_range(&ds, 80, 20).is_empty());
    }

    #[test]
    fn range_past_domain_is_empty() {
        let ds = dataset(&[0, 50, 100]);
        assert!(filter_by_range(&ds, 101, 101).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset(&[3, 17, 42, 42, 58, 77, 91, 100]);
        for (lo, hi) in [(0, 100), (17, 42), (42, 42), (50, 99), (60, 10)] {
            let once = filter_by_range(&ds, lo, hi);
            let twice = filter_by_range(&once, lo, hi);
            assert_eq!(once, twice, "range [{lo}, {hi}]");
        }
    }

    #[test]
    fn observed_bounds_keep_everything() {
        let ds = dataset(&[55, 71, 63, 90, 58]);
        let (min, max) = ds.score_bounds().unwrap();
        assert_eq!(filter_by_range(&ds, min, max), ds);
    }

    #[test]
    fn score_range_validates_bounds() {
        assert!(ScoreRange::new(10, 90).is_ok());
        assert!(ScoreRange::new(70, 70).is_ok());
        assert_eq!(
            ScoreRange::new(90, 10),
            Err(InvalidRangeError { lo: 90, hi: 10 })
        );
        assert!(ScoreRange::new(0, 101).is_err());
        assert_eq!(ScoreRange::default(), ScoreRange::FULL);
    }

    #[test]
    fn score_range_apply_matches_free_function() {
        let ds = dataset(&[50, 60, 70, 80, 90]);
        let range = ScoreRange::new(65, 95).unwrap();
        assert_eq!(range.apply(&ds), filter_by_range(&ds, 65, 95));
        assert!(range.contains(95));
        assert!(!range.contains(64));
    }
}
