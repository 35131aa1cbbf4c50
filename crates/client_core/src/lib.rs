//! Form controllers (checkbox group, user search) and the async session that
//! drives them against the GitHub user-search API.

pub mod checkbox_group;
pub mod error;
pub mod search;
pub mod session;
pub mod settings;
pub mod user_search;

pub use checkbox_group::CheckboxGroup;
pub use error::{SearchError, SettingsError};
pub use search::{
    LookupOutcome, LookupRequest, LookupTicket, SearchController, SearchDisplay, SearchState,
    Settlement,
};
pub use session::{FormSession, ViewChange, ViewEvent, ViewSnapshot};
pub use settings::{load_settings, SearchSettings};
pub use user_search::{GithubUserSearch, UserSearchApi};
