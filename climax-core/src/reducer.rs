//! Reducer - pure function: (model, action) -> DispatchResult

use tracing::debug;

use crate::action::Action;
use crate::effect::Effect;
use crate::model::Query;
use crate::state::{LookupModel, LookupState};

/// Outcome of a dispatch: whether anything changed and what must run next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchResult {
    pub changed: bool,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    pub fn changed_with(effect: Effect) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }
}

/// The reducer handles all lookup transitions
pub fn reducer(model: &mut LookupModel, action: Action) -> DispatchResult {
    match action {
        Action::QueryChange(text) => {
            if model.query == text {
                return DispatchResult::unchanged();
            }
            model.query = text;
            DispatchResult::changed()
        }

        Action::Submit => {
            // At most one fetch at a time; a second submit is dropped, not queued.
            if model.in_flight() {
                debug!(query = %model.query, "lookup already in flight, ignoring submit");
                return DispatchResult::unchanged();
            }
            let query = match Query::parse(&model.query) {
                Ok(query) => query,
                Err(err) => {
                    debug!(%err, "ignoring submit");
                    return DispatchResult::unchanged();
                }
            };
            model.lookup = LookupState::Loading;
            DispatchResult::changed_with(Effect::FetchWeather { query })
        }

        Action::DidLoad(snapshot) => {
            if !model.in_flight() {
                return DispatchResult::unchanged();
            }
            model.lookup = LookupState::Success(snapshot);
            DispatchResult::changed()
        }

        Action::DidFail(err) => {
            if !model.in_flight() {
                return DispatchResult::unchanged();
            }
            model.lookup = LookupState::Failure(err.to_string());
            DispatchResult::changed()
        }
    }
}
