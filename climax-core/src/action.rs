//! Actions - everything that can happen to a lookup

use crate::{error::LookupError, model::WeatherSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Query text changed
    QueryChange(String),

    /// Intent: look up the current query (triggers a fetch)
    Submit,

    /// Result: provider returned a snapshot
    DidLoad(WeatherSnapshot),

    /// Result: lookup failed
    DidFail(LookupError),
}
