use serde::{Deserialize, Serialize};

/// Client row as listed, with job aggregates computed by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub post_code: Option<String>,
    pub email: String,
    pub nif: Option<String>,
    #[serde(rename = "TOTAL_JOBS", default)]
    pub total_jobs: i64,
    #[serde(rename = "TOTAL_JOBS_FINALISED", default)]
    pub total_jobs_finalised: i64,
}
