use serde::{Deserialize, Serialize};

use crate::domain::UserRef;

/// Typed user intents forwarded from a rendering layer into the controllers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Intent {
    ToggleItem { label: String },
    SetAllChecked { value: bool },
    SetQuery { term: String },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::ToggleItem { .. } => "toggle_item",
            Intent::SetAllChecked { .. } => "set_all_checked",
            Intent::SetQuery { .. } => "set_query",
        }
    }
}

/// Query string sent to the user-search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUsersQuery {
    pub q: String,
    pub page: u32,
    pub per_page: u32,
}

/// Success body of the user-search endpoint. `items` is required; other
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUsersResponse {
    pub items: Vec<UserRef>,
}
