//! Search form state: the query, the latest results or an explanatory message,
//! and the ticket bookkeeping that keeps stale lookups from landing.

use serde::{Deserialize, Serialize};
use shared::{
    domain::UserRef,
    error::{ApiError, ErrorCode},
};

pub const DEFAULT_MESSAGE: &str = "please enter a github username in the previous field";
pub const RATE_LIMIT_MESSAGE: &str = "you have reached the limit of 10 searches per minute";
pub const GENERIC_ERROR_MESSAGE: &str =
    "an error has occured, please try again. if problem persist, contact us";

pub const MIN_QUERY_CHARS: usize = 3;
pub const RESULT_PAGE: u32 = 1;
pub const RESULTS_PER_PAGE: u32 = 20;

/// `results` is `None` exactly when `message` is what should be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub query: String,
    pub results: Option<Vec<UserRef>>,
    pub message: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: None,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }
}

pub enum SearchDisplay<'a> {
    Results(&'a [UserRef]),
    Message(&'a str),
}

impl SearchState {
    pub fn display(&self) -> SearchDisplay<'_> {
        match &self.results {
            Some(results) => SearchDisplay::Results(results),
            None => SearchDisplay::Message(&self.message),
        }
    }
}

/// Identifies one issued lookup. Only the most recently issued ticket may
/// settle into state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupTicket(u64);

impl LookupTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub ticket: LookupTicket,
    pub term: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<UserRef>),
    Failed(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Stale,
}

pub fn meets_min_length(term: &str) -> bool {
    term.chars().count() >= MIN_QUERY_CHARS
}

#[derive(Debug, Default, Clone)]
pub struct SearchController {
    state: SearchState,
    generation: u64,
    pending: Option<LookupTicket>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn pending(&self) -> Option<LookupTicket> {
        self.pending
    }

    /// Records the new query and returns the lookup to run, if any.
    ///
    /// Every call supersedes earlier lookups, including calls whose term is
    /// too short to issue one of its own.
    pub fn set_query(&mut self, term: impl Into<String>) -> Option<LookupRequest> {
        self.state.query = term.into();
        self.generation += 1;
        self.pending = None;
        let term = self.state.query.clone();
        self.lookup(&term)
    }

    /// Issues a lookup for `term` unless it is shorter than
    /// [`MIN_QUERY_CHARS`]; short terms leave results and message untouched.
    pub fn lookup(&mut self, term: &str) -> Option<LookupRequest> {
        if !meets_min_length(term) {
            return None;
        }

        let ticket = LookupTicket(self.generation);
        self.pending = Some(ticket);
        Some(LookupRequest {
            ticket,
            term: term.to_string(),
            page: RESULT_PAGE,
            per_page: RESULTS_PER_PAGE,
        })
    }

    /// Applies a settled lookup when its ticket is still the pending one and
    /// its term still matches the query. Anything else is dropped.
    pub fn settle(
        &mut self,
        ticket: LookupTicket,
        term: &str,
        outcome: LookupOutcome,
    ) -> Settlement {
        if self.pending != Some(ticket) || self.state.query != term {
            return Settlement::Stale;
        }
        self.pending = None;

        match outcome {
            LookupOutcome::Found(users) => {
                self.state.results = Some(users);
                self.state.message = DEFAULT_MESSAGE.to_string();
            }
            LookupOutcome::Failed(err) => {
                self.state.results = None;
                self.state.message = message_for(err.code).to_string();
            }
        }
        Settlement::Applied
    }
}

pub fn message_for(code: ErrorCode) -> &'static str {
    if code.is_rate_limit() {
        RATE_LIMIT_MESSAGE
    } else {
        GENERIC_ERROR_MESSAGE
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
