use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use student_scores::data::model::MAX_SCORE;
use student_scores::{build_view, load_file, CategoryKey, Dataset, ScoreRange, ViewData, ViewRequest};

use crate::color::ColorMap;
use crate::config::ChartsConfig;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Relation,
    Counts,
}

/// Data for the charts of both tabs, rebuilt whenever a selection changes.
#[derive(Debug, Clone)]
pub struct Views {
    pub mean_scores: ViewData,
    pub scatter: ViewData,
    pub facets: ViewData,
    pub frequency: ViewData,
    pub share: ViewData,
}

impl Default for Views {
    fn default() -> Self {
        Self {
            mean_scores: ViewData::NoData,
            scatter: ViewData::NoData,
            facets: ViewData::NoData,
            frequency: ViewData::NoData,
            share: ViewData::NoData,
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<Dataset>>,

    pub tab: Tab,

    /// Category shared by the bar, scatter and facet views.
    pub relation_key: CategoryKey,

    /// Category of the frequency and share views.
    pub count_key: CategoryKey,

    /// Slider positions; may be inverted while dragging.
    pub range_lo: u32,
    pub range_hi: u32,

    pub relation_colors: Option<ColorMap>,
    pub count_colors: Option<ColorMap>,

    /// Chart data for the current selections (cached).
    pub views: Views,

    pub charts: ChartsConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(charts: ChartsConfig) -> Self {
        let default_range = charts.default_range;
        Self {
            dataset: None,
            tab: Tab::default(),
            relation_key: CategoryKey::default(),
            count_key: CategoryKey::default(),
            range_lo: default_range.lo(),
            range_hi: default_range.hi(),
            relation_colors: None,
            count_colors: None,
            views: Views::default(),
            charts,
            status_message: None,
        }
    }

    /// Startup constructor: the initial dataset must load, otherwise the
    /// error is returned and no window is opened.
    pub fn with_dataset(charts: ChartsConfig, path: &Path) -> Result<Self> {
        let dataset = load_file(path)
            .with_context(|| format!("Failed to load initial dataset {}", path.display()))?;
        let mut state = Self::new(charts);
        state.set_dataset(dataset);
        Ok(state)
    }

    /// Load `path` and make it the active dataset. On failure the previous
    /// dataset stays and the error is kept for the status line.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let result = load_file(path)
            .with_context(|| format!("Failed to load {}", path.display()));
        match result {
            Ok(dataset) => {
                self.set_dataset(dataset);
                Ok(())
            }
            Err(e) => {
                log::error!("{e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded dataset, clamp the range sliders and rebuild views.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let (min, max) = dataset.score_bounds().unwrap_or((0, MAX_SCORE));
        let default_range = self.charts.default_range;
        self.range_lo = default_range.lo().clamp(min, max);
        self.range_hi = default_range.hi().clamp(min, max);

        self.relation_colors = Some(ColorMap::new(&dataset, self.relation_key));
        self.count_colors = Some(ColorMap::new(&dataset, self.count_key));
        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
        self.refresh();
    }

    /// Observed score bounds, used as slider limits.
    pub fn slider_bounds(&self) -> (u32, u32) {
        self.dataset
            .as_ref()
            .and_then(|ds| ds.score_bounds())
            .unwrap_or((0, MAX_SCORE))
    }

    /// The active range, `None` while the sliders are inverted.
    pub fn score_range(&self) -> Option<ScoreRange> {
        ScoreRange::new(self.range_lo, self.range_hi).ok()
    }

    pub fn set_relation_key(&mut self, key: CategoryKey) {
        if key == self.relation_key {
            return;
        }
        self.relation_key = key;
        if let Some(ds) = &self.dataset {
            self.relation_colors = Some(ColorMap::new(ds, key));
        }
        self.refresh();
    }

    pub fn set_count_key(&mut self, key: CategoryKey) {
        if key == self.count_key {
            return;
        }
        self.count_key = key;
        if let Some(ds) = &self.dataset {
            self.count_colors = Some(ColorMap::new(ds, key));
        }
        self.refresh();
    }

    pub fn set_range(&mut self, lo: u32, hi: u32) {
        if (lo, hi) == (self.range_lo, self.range_hi) {
            return;
        }
        self.range_lo = lo;
        self.range_hi = hi;
        self.refresh();
    }

    /// Requests for the "General relation" tab.
    pub fn relation_requests(&self) -> [ViewRequest; 3] {
        let key = self.relation_key;
        [
            ViewRequest::ScoreByCategory { key },
            ViewRequest::ScoreVsStudyHours {
                key,
                bins: self.charts.histogram_bins,
            },
            ViewRequest::StudyHoursFacets { key },
        ]
    }

    /// Requests for the "Counts" tab, `None` while the range is inverted.
    pub fn count_requests(&self) -> Option<[ViewRequest; 2]> {
        let range = self.score_range()?;
        let key = self.count_key;
        Some([
            ViewRequest::Frequency { key, range },
            ViewRequest::Share { key, range },
        ])
    }

    /// Recompute every view from the current selections.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            self.views = Views::default();
            return;
        };

        let [mean, scatter, facets] = self.relation_requests().map(|r| build_view(ds, &r));
        let [frequency, share] = match self.count_requests() {
            Some(requests) => requests.map(|r| build_view(ds, &r)),
            None => [ViewData::NoData, ViewData::NoData],
        };

        self.views = Views {
            mean_scores: mean,
            scatter,
            facets,
            frequency,
            share,
        };
    }
}
