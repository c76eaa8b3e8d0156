use serde::{Deserialize, Serialize};

/// User row as listed. The stored password is never selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub name: String,
    pub email: String,
    pub role_code: String,
    pub role_description: Option<String>,
    #[serde(rename = "TOTAL_JOBS", default)]
    pub total_jobs: i64,
}

/// Identity carried into the session after a credential match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionUser {
    pub id: Option<i64>,
    pub user_name: Option<String>,
    pub role_code: Option<String>,
}
