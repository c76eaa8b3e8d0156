use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Row;

pub mod client;
pub mod code;
pub mod user;

pub use client::Client;
pub use code::ReferenceCode;
pub use user::User;

/// Decode result rows into a typed projection.
pub fn from_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, serde_json::Error> {
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)))
        .collect()
}
