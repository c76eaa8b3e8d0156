//! Connection provider seam used by every handler.
//!
//! A handler opens one connection, runs one statement and maps the outcome.
//! Connect failures and statement failures share the same [`DbError`].

use std::future::Future;

use axum::http::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

/// One result row, keyed by column name.
pub type Row = Map<String, Value>;

/// A scalar bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map_or(Param::Null, Into::into)
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    /// Failure that already carries the HTTP status to answer with.
    #[error("query failed with status {0}")]
    Status(u16),
}

impl DbError {
    /// HTTP status carried by this error. Driver errors carry 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DbError::Status(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            DbError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub trait Database: Send + Sync + 'static {
    type Conn: Connection;

    fn connect(&self) -> impl Future<Output = Result<Self::Conn, DbError>> + Send;
}

pub trait Connection: Send {
    /// `params` is `None` for parameterless reads.
    fn query(
        &mut self,
        sql: &str,
        params: Option<&[Param]>,
    ) -> impl Future<Output = Result<Vec<Row>, DbError>> + Send;
}

/// Open a connection and run a single statement on it.
pub async fn run<D: Database>(
    db: &D,
    sql: &str,
    params: Option<&[Param]>,
) -> Result<Vec<Row>, DbError> {
    let mut conn = db.connect().await?;
    conn.query(sql, params).await
}
