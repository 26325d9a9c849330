//! Lookup state - single source of truth for the presentation layer

use crate::model::WeatherSnapshot;

/// Lifecycle of one lookup: Idle → Loading → Success/Failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(WeatherSnapshot),
    Failure(String),
}

impl LookupState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LookupState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading)
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            LookupState::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LookupState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the controller owns: the pending query and the lookup state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupModel {
    /// Raw text as typed; trimmed only when submitted
    pub query: String,

    pub lookup: LookupState,
}

impl LookupModel {
    pub fn in_flight(&self) -> bool {
        self.lookup.is_loading()
    }
}
