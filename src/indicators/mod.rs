pub mod series;
pub mod ta;

pub use self::series::{enrich, EnrichedSeries, INITIAL_INVESTMENT};
