use serde::{Deserialize, Serialize};

/// Lookup value scoped by a domain, e.g. the `USER_ROLE` choices.
/// Accepts both the raw `CODES` column names and the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCode {
    #[serde(alias = "CODE")]
    pub code: String,
    #[serde(alias = "DESCRIPTION")]
    pub description: String,
    #[serde(alias = "DISPLAY_ORDER")]
    pub display_order: i64,
}
