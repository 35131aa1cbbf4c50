//! Applies backend events to the UI-side state.

use client_core::{CheckboxGroup, SearchState, ViewSnapshot};

use crate::controller::events::{UiError, UiEvent};

#[derive(Debug)]
pub struct GuiState {
    pub view: ViewSnapshot,
    pub status: String,
    pub status_banner: Option<UiError>,
    pub backend_ready: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            view: ViewSnapshot {
                checkboxes: CheckboxGroup::seeded(),
                search: SearchState::default(),
            },
            status: "Backend worker not started".to_string(),
            status_banner: None,
            backend_ready: false,
        }
    }
}

pub fn reduce(state: &mut GuiState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::ViewUpdated(snapshot) => {
            state.view = *snapshot;
            state.backend_ready = true;
        }
        UiEvent::Error(err) => {
            tracing::warn!(context = ?err.context(), "{}", err.message());
            state.status = err.message().to_string();
            if err.requires_restart() {
                state.backend_ready = false;
            }
            state.status_banner = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::{UiErrorCategory, UiErrorContext};
    use client_core::SearchState;
    use shared::domain::UserRef;

    #[test]
    fn view_updates_replace_snapshot_and_mark_ready() {
        let mut state = GuiState::default();
        let mut checkboxes = CheckboxGroup::seeded();
        checkboxes.set_all_checked(true);
        let search = SearchState {
            query: "octocat".to_string(),
            results: Some(vec![UserRef::new(1, "octocat")]),
            ..SearchState::default()
        };

        reduce(
            &mut state,
            UiEvent::ViewUpdated(Box::new(ViewSnapshot { checkboxes, search })),
        );

        assert!(state.backend_ready);
        assert!(state.view.checkboxes.all_selected());
        assert_eq!(state.view.search.query, "octocat");
    }

    #[test]
    fn startup_errors_raise_banner_and_block_input() {
        let mut state = GuiState {
            backend_ready: true,
            ..GuiState::default()
        };
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime",
        );

        reduce(&mut state, UiEvent::Error(err));

        assert!(!state.backend_ready);
        let banner = state.status_banner.expect("banner");
        assert_eq!(banner.context(), UiErrorContext::BackendStartup);
        assert!(state.status.contains("startup failure"));
    }

    #[test]
    fn queue_full_errors_keep_backend_usable() {
        let mut state = GuiState {
            backend_ready: true,
            ..GuiState::default()
        };
        let err = UiError::from_message(
            UiErrorContext::Dispatch,
            "UI command queue is full; please retry",
        );
        assert_eq!(err.category(), UiErrorCategory::Unknown);

        reduce(&mut state, UiEvent::Error(err));
        assert!(state.backend_ready);
    }
}
