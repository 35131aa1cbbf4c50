use std::{sync::Arc, time::Duration};

use serde::Serialize;
use shared::{error::ApiError, protocol::Intent};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    checkbox_group::CheckboxGroup,
    error::SearchError,
    search::{LookupOutcome, LookupRequest, SearchController, SearchState, Settlement},
    user_search::UserSearchApi,
};

const VIEW_EVENT_CAPACITY: usize = 256;

/// Read-only view model handed to a rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub checkboxes: CheckboxGroup,
    pub search: SearchState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    Checkboxes,
    Query,
    SearchSettled,
}

#[derive(Debug, Clone)]
pub struct ViewEvent {
    pub change: ViewChange,
    pub snapshot: ViewSnapshot,
}

struct FormState {
    checkboxes: CheckboxGroup,
    search: SearchController,
    in_flight: Option<JoinHandle<()>>,
}

impl FormState {
    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            checkboxes: self.checkboxes.clone(),
            search: self.search.state().clone(),
        }
    }
}

/// Owns both controllers, runs lookups and publishes a [`ViewEvent`] after
/// every visible change.
pub struct FormSession {
    state: Mutex<FormState>,
    api: Arc<dyn UserSearchApi>,
    events: broadcast::Sender<ViewEvent>,
    lookup_timeout: Duration,
}

impl FormSession {
    pub fn new(api: Arc<dyn UserSearchApi>, lookup_timeout: Duration) -> Arc<Self> {
        Self::with_checkboxes(api, lookup_timeout, CheckboxGroup::seeded())
    }

    pub fn with_checkboxes(
        api: Arc<dyn UserSearchApi>,
        lookup_timeout: Duration,
        checkboxes: CheckboxGroup,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(VIEW_EVENT_CAPACITY);
        Arc::new(Self {
            state: Mutex::new(FormState {
                checkboxes,
                search: SearchController::new(),
                in_flight: None,
            }),
            api,
            events,
            lookup_timeout,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn dispatch(self: &Arc<Self>, intent: Intent) {
        debug!(intent = intent.name(), "dispatching intent");
        match intent {
            Intent::ToggleItem { label } => self.toggle_item(&label).await,
            Intent::SetAllChecked { value } => self.set_all_checked(value).await,
            Intent::SetQuery { term } => self.set_query(term).await,
        }
    }

    pub async fn toggle_item(&self, label: &str) {
        let snapshot = {
            let mut guard = self.state.lock().await;
            if !guard.checkboxes.toggle_item(label) {
                debug!(label, "ignoring toggle for unknown checkbox");
                return;
            }
            guard.snapshot()
        };
        self.publish(ViewChange::Checkboxes, snapshot);
    }

    pub async fn set_all_checked(&self, value: bool) {
        let snapshot = {
            let mut guard = self.state.lock().await;
            guard.checkboxes.set_all_checked(value);
            guard.snapshot()
        };
        self.publish(ViewChange::Checkboxes, snapshot);
    }

    /// Records the query and, when it is long enough, starts a lookup that
    /// supersedes any lookup still in flight.
    pub async fn set_query(self: &Arc<Self>, term: impl Into<String>) {
        let snapshot = {
            let mut guard = self.state.lock().await;
            let request = guard.search.set_query(term);
            if let Some(previous) = guard.in_flight.take() {
                previous.abort();
            }
            if let Some(request) = request {
                debug!(
                    term = %request.term,
                    ticket = request.ticket.sequence(),
                    "issuing user lookup"
                );
                let session = Arc::clone(self);
                guard.in_flight = Some(tokio::spawn(async move {
                    session.run_lookup(request).await;
                }));
            }
            guard.snapshot()
        };
        self.publish(ViewChange::Query, snapshot);
    }

    async fn run_lookup(&self, request: LookupRequest) {
        let outcome = match tokio::time::timeout(
            self.lookup_timeout,
            self.api
                .search_users(&request.term, request.page, request.per_page),
        )
        .await
        {
            Ok(Ok(users)) => LookupOutcome::Found(users),
            Ok(Err(err)) => Self::failed(&request, err),
            Err(_) => Self::failed(&request, SearchError::Timeout(self.lookup_timeout)),
        };

        let snapshot = {
            let mut guard = self.state.lock().await;
            match guard
                .search
                .settle(request.ticket, &request.term, outcome)
            {
                Settlement::Applied => guard.snapshot(),
                Settlement::Stale => {
                    warn!(
                        term = %request.term,
                        ticket = request.ticket.sequence(),
                        "discarding stale lookup result"
                    );
                    return;
                }
            }
        };
        info!(
            term = %request.term,
            results = snapshot.search.results.as_ref().map(Vec::len),
            "user lookup settled"
        );
        self.publish(ViewChange::SearchSettled, snapshot);
    }

    fn failed(request: &LookupRequest, err: SearchError) -> LookupOutcome {
        warn!(term = %request.term, "user lookup failed: {err}");
        LookupOutcome::Failed(ApiError::from(err))
    }

    fn publish(&self, change: ViewChange, snapshot: ViewSnapshot) {
        // No subscribers is fine; the snapshot stays readable.
        let _ = self.events.send(ViewEvent { change, snapshot });
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
