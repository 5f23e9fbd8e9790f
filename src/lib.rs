pub mod error;
pub mod load;
pub mod report;
pub mod selector;
pub mod session;
pub mod stats;
pub mod structs;
pub mod transform;

// Re-export public API
pub use error::{ExploreError, Result};
pub use load::{DatasetLoader, RawTable, dataset_from_raw};
pub use selector::{City, DaySelector, MonthSelector, Selectors};
pub use session::Session;
pub use stats::{DurationStats, StationStats, TimeStats, UserStats};
pub use structs::{CityTable, Dataset, ExploreConfig, SimpleLogger, TripRecord};
pub use transform::filter;
