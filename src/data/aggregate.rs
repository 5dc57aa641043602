//! Group-by computations feeding the charts.
//!
//! Every function here is a pure linear scan over an already filtered
//! [`Dataset`]; an empty input always yields an empty result.

use std::collections::{BTreeMap, HashMap};

use super::category::CategoryKey;
use super::model::{CategoryValue, Dataset};

// ---------------------------------------------------------------------------
// FrequencyTable
// ---------------------------------------------------------------------------

/// Row counts per category value, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(CategoryValue, usize)>,
}

impl FrequencyTable {
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryValue, usize)> {
        self.entries.iter().map(|(v, c)| (v, *c))
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, value: &CategoryValue) -> Option<usize> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, c)| *c)
    }

    /// Sum of all counts; equals the size of the counted dataset.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Percentage of the total per value, for the pie view.
    pub fn shares(&self) -> Vec<(CategoryValue, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|(v, c)| (v.clone(), *c as f64 * 100.0 / total as f64))
            .collect()
    }
}

/// Count rows of `dataset` per value of `key`.
pub fn frequencies(dataset: &Dataset, key: CategoryKey) -> FrequencyTable {
    let mut slots: HashMap<CategoryValue, usize> = HashMap::new();
    let mut entries: Vec<(CategoryValue, usize)> = Vec::new();

    for record in dataset {
        let value = key.value_of(record);
        match slots.get(&value) {
            Some(&slot) => entries[slot].1 += 1,
            None => {
                slots.insert(value.clone(), entries.len());
                entries.push((value, 1));
            }
        }
    }

    FrequencyTable { entries }
}

// ---------------------------------------------------------------------------
// Relation triples
// ---------------------------------------------------------------------------

/// One student as drawn in the scatter and line views.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationPoint {
    pub group: CategoryValue,
    pub study_hours: f64,
    pub math_score: u32,
}

/// Project every row to `(group, study hours, math score)`, keeping row order.
pub fn relation(dataset: &Dataset, key: CategoryKey) -> Vec<RelationPoint> {
    dataset
        .iter()
        .map(|r| RelationPoint {
            group: key.value_of(r),
            study_hours: r.weekly_self_study_hours,
            math_score: r.math_score,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mean score per group
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub value: CategoryValue,
    pub count: usize,
    pub mean_score: f64,
}

/// Average math score per value of `key`, in order of first appearance.
pub fn mean_scores(dataset: &Dataset, key: CategoryKey) -> Vec<GroupMean> {
    let mut slots: HashMap<CategoryValue, usize> = HashMap::new();
    let mut sums: Vec<(CategoryValue, usize, u64)> = Vec::new();

    for record in dataset {
        let value = key.value_of(record);
        let slot = *slots.entry(value.clone()).or_insert_with(|| {
            sums.push((value, 0, 0));
            sums.len() - 1
        });
        sums[slot].1 += 1;
        sums[slot].2 += u64::from(record.math_score);
    }

    sums.into_iter()
        .map(|(value, count, sum)| GroupMean {
            value,
            count,
            mean_score: sum as f64 / count as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

/// The points of one category value, sorted by study hours.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub value: CategoryValue,
    /// `[study_hours, math_score]` pairs.
    pub points: Vec<[f64; 2]>,
}

/// Split relation points into one facet per value, facets in value order.
pub fn facets(points: &[RelationPoint]) -> Vec<Facet> {
    let mut grouped: BTreeMap<&CategoryValue, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        grouped
            .entry(&p.group)
            .or_default()
            .push([p.study_hours, f64::from(p.math_score)]);
    }

    grouped
        .into_iter()
        .map(|(value, mut pts)| {
            pts.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
            Facet {
                value: value.clone(),
                points: pts,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Half-open bin `[start, end)`; the last bin also holds its upper edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram over the observed range of `values`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // A single distinct value still gets a bin of unit width.
    let span = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        max - min
    };
    let width = span / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}
