//! Effects - side effects declared by the reducer

use crate::model::Query;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather for the given city
    FetchWeather { query: Query },
}
