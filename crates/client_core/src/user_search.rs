use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use shared::{
    domain::UserRef,
    protocol::{SearchUsersQuery, SearchUsersResponse},
};
use tracing::debug;
use url::Url;

use crate::{error::SearchError, settings::SearchSettings};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[async_trait]
pub trait UserSearchApi: Send + Sync {
    async fn search_users(
        &self,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<UserRef>, SearchError>;
}

/// GitHub `search/users` over reqwest.
pub struct GithubUserSearch {
    http: Client,
    endpoint: Url,
    github_token: Option<String>,
    request_timeout: Duration,
}

impl GithubUserSearch {
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: settings.search_endpoint.clone(),
            github_token: settings.github_token.clone(),
            request_timeout: settings.request_timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout(self.request_timeout)
        } else {
            SearchError::Transport(err)
        }
    }
}

#[async_trait]
impl UserSearchApi for GithubUserSearch {
    async fn search_users(
        &self,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<UserRef>, SearchError> {
        let query = SearchUsersQuery {
            q: term.to_string(),
            page,
            per_page,
        };
        let mut request = self
            .http
            .get(self.endpoint.clone())
            .query(&query)
            .header(header::ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.github_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| self.classify(err))?;
        let status = response.status();
        debug!(%status, term, "user search responded");

        if is_rate_limit(status) {
            return Err(SearchError::RateLimited { status });
        }
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus { status });
        }

        let body = response.bytes().await.map_err(|err| self.classify(err))?;
        let parsed: SearchUsersResponse = serde_json::from_slice(&body)?;
        Ok(parsed.items)
    }
}

pub fn is_rate_limit(status: StatusCode) -> bool {
    status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS
}

#[cfg(test)]
#[path = "tests/user_search_tests.rs"]
mod tests;
