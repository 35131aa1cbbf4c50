use serde::{Deserialize, Serialize};

const GITHUB_PROFILE_BASE: &str = "https://github.com";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);

/// One labeled checkbox. The label doubles as the identity key within a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub label: String,
    pub checked: bool,
}

impl Item {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub login: String,
}

impl UserRef {
    pub fn new(id: i64, login: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            login: login.into(),
        }
    }

    pub fn profile_url(&self) -> String {
        format!("{GITHUB_PROFILE_BASE}/{}", self.login)
    }
}
