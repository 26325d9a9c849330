//! Drives a single weather lookup: reducer transitions plus the fetch task.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::effect::Effect;
use crate::error::LookupError;
use crate::model::WeatherSnapshot;
use crate::provider::WeatherProvider;
use crate::reducer::{DispatchResult, reducer};
use crate::state::{LookupModel, LookupState};

type FetchHandle = JoinHandle<Result<WeatherSnapshot, LookupError>>;

/// Owns the query, the lookup state and at most one in-flight fetch.
///
/// All mutation goes through `&mut self`, so the owning task is the only
/// writer. `submit` must be called from within a tokio runtime since the fetch
/// is spawned onto it.
#[derive(Debug)]
pub struct WeatherLookupController {
    model: LookupModel,
    provider: Arc<dyn WeatherProvider>,
    in_flight: Option<FetchHandle>,
    disposed: bool,
}

impl WeatherLookupController {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            model: LookupModel::default(),
            provider,
            in_flight: None,
            disposed: false,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.model.lookup
    }

    pub fn query(&self) -> &str {
        &self.model.query
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Store the pending city name. Never fetches.
    pub fn set_query(&mut self, text: impl Into<String>) {
        if self.disposed {
            return;
        }
        self.dispatch(Action::QueryChange(text.into()));
    }

    /// Start a lookup for the current query.
    ///
    /// Returns `false` without touching state when the query is blank, a
    /// lookup is already in flight, or the controller is disposed.
    pub fn submit(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let result = self.dispatch(Action::Submit);
        !result.effects.is_empty()
    }

    /// Wait for the in-flight lookup and apply its outcome.
    ///
    /// Returns `None` when nothing is in flight or the controller is disposed.
    /// Cancelling this future leaves the fetch in flight; a later call picks
    /// it up again.
    pub async fn settle(&mut self) -> Option<&LookupState> {
        if self.disposed {
            return None;
        }
        let handle = self.in_flight.as_mut()?;
        let joined = handle.await;
        self.in_flight = None;

        let action = match joined {
            Ok(Ok(snapshot)) => {
                info!(
                    location = %snapshot.location_name,
                    country = %snapshot.country,
                    "weather lookup succeeded"
                );
                Action::DidLoad(snapshot)
            }
            Ok(Err(err)) => {
                warn!(error = ?err, "weather lookup failed");
                Action::DidFail(err)
            }
            Err(join_err) => {
                warn!(error = %join_err, "weather lookup task did not complete");
                Action::DidFail(LookupError::Aborted)
            }
        };
        self.dispatch(action);

        Some(&self.model.lookup)
    }

    /// Set the query, submit it and wait for the outcome.
    ///
    /// If a lookup was already in flight, that one is settled instead.
    pub async fn search(&mut self, text: impl Into<String>) -> &LookupState {
        self.set_query(text);
        self.submit();
        self.settle().await;
        &self.model.lookup
    }

    /// Tear the controller down. A pending fetch keeps running but its
    /// outcome is never applied.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if self.in_flight.take().is_some() {
            debug!(query = %self.model.query, "detached in-flight lookup on dispose");
        }
    }

    fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = reducer(&mut self.model, action);
        for effect in &result.effects {
            self.run(effect.clone());
        }
        result
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::FetchWeather { query } => {
                debug!(%query, "dispatching weather lookup");
                let provider = Arc::clone(&self.provider);
                self.in_flight = Some(tokio::spawn(async move { provider.fetch(&query).await }));
            }
        }
    }
}

impl Drop for WeatherLookupController {
    fn drop(&mut self) {
        self.dispose();
    }
}
