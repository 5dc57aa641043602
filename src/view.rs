//! What the dashboard asks the data layer for.
//!
//! Each chart is described by a [`ViewRequest`]; [`build_view`] turns it into
//! the data that chart draws. Requests carry every parameter explicitly, so a
//! view is a pure function of the dataset and the request.

use crate::data::aggregate::{
    facets, frequencies, histogram, mean_scores, relation, Facet, FrequencyTable, GroupMean,
    HistogramBin, RelationPoint,
};
use crate::data::category::CategoryKey;
use crate::data::filter::ScoreRange;
use crate::data::model::{CategoryValue, Dataset};

/// One chart and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewRequest {
    /// Average math score per category value (bar).
    ScoreByCategory { key: CategoryKey },
    /// Study hours vs math score coloured by category, with marginal histograms.
    ScoreVsStudyHours { key: CategoryKey, bins: usize },
    /// One study-hours line per category value.
    StudyHoursFacets { key: CategoryKey },
    /// Students per category value within a score range (bar).
    Frequency { key: CategoryKey, range: ScoreRange },
    /// Percentage of students per category value within a score range (donut).
    Share { key: CategoryKey, range: ScoreRange },
}

impl ViewRequest {
    pub fn key(&self) -> CategoryKey {
        match *self {
            ViewRequest::ScoreByCategory { key }
            | ViewRequest::ScoreVsStudyHours { key, .. }
            | ViewRequest::StudyHoursFacets { key }
            | ViewRequest::Frequency { key, .. }
            | ViewRequest::Share { key, .. } => key,
        }
    }

    /// Score range applied before aggregation; relation views use the full domain.
    pub fn range(&self) -> ScoreRange {
        match *self {
            ViewRequest::Frequency { range, .. } | ViewRequest::Share { range, .. } => range,
            _ => ScoreRange::FULL,
        }
    }
}

/// Data for one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewData {
    MeanScores(Vec<GroupMean>),
    Scatter {
        points: Vec<RelationPoint>,
        hours_histogram: Vec<HistogramBin>,
        score_histogram: Vec<HistogramBin>,
    },
    Facets(Vec<Facet>),
    Frequency(FrequencyTable),
    Share(Vec<(CategoryValue, f64)>),
    /// The filtered dataset has no rows.
    NoData,
}

impl ViewData {
    pub fn is_empty(&self) -> bool {
        matches!(self, ViewData::NoData)
    }
}

/// Compute the data for `request` over `dataset`.
pub fn build_view(dataset: &Dataset, request: &ViewRequest) -> ViewData {
    let range = request.range();
    let filtered;
    let rows = if range == ScoreRange::FULL {
        dataset
    } else {
        filtered = range.apply(dataset);
        &filtered
    };

    log::debug!(
        "Building {request:?}: {} of {} rows in range",
        rows.len(),
        dataset.len()
    );

    if rows.is_empty() {
        return ViewData::NoData;
    }

    match *request {
        ViewRequest::ScoreByCategory { key } => ViewData::MeanScores(mean_scores(rows, key)),
        ViewRequest::ScoreVsStudyHours { key, bins } => {
            let points = relation(rows, key);
            let hours: Vec<f64> = points.iter().map(|p| p.study_hours).collect();
            let scores: Vec<f64> = points.iter().map(|p| f64::from(p.math_score)).collect();
            ViewData::Scatter {
                hours_histogram: histogram(&hours, bins),
                score_histogram: histogram(&scores, bins),
                points,
            }
        }
        ViewRequest::StudyHoursFacets { key } => ViewData::Facets(facets(&relation(rows, key))),
        ViewRequest::Frequency { key, .. } => ViewData::Frequency(frequencies(rows, key)),
        ViewRequest::Share { key, .. } => ViewData::Share(frequencies(rows, key).shares()),
    }
}
