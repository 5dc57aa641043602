//! Student score exploration: loading, range filtering and per-category
//! aggregation of a student records table, plus the view requests the
//! dashboard renders from.

pub mod data;
pub mod error;
pub mod view;

pub use data::aggregate::{frequencies, relation, FrequencyTable, RelationPoint};
pub use data::category::CategoryKey;
pub use data::filter::{filter_by_range, ScoreRange};
pub use data::loader::{load_csv_reader, load_file};
pub use data::model::{CategoryValue, Dataset, JobLabel, StudentRecord};
pub use error::{InvalidRangeError, LoadError, UnknownCategoryError};
pub use view::{build_view, ViewData, ViewRequest};
