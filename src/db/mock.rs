//! Recording `Database` used by handler unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::provider::{Connection, DbError, Database, Param, Row};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Option<Vec<Param>>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Rows(Vec<Row>),
    QueryFails(u16),
    ConnectFails(u16),
}

#[derive(Debug)]
struct Inner {
    outcome: Outcome,
    connects: AtomicUsize,
    queries: Mutex<Vec<RecordedQuery>>,
}

#[derive(Debug, Clone)]
pub struct MockDatabase {
    inner: Arc<Inner>,
}

impl MockDatabase {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            inner: Arc::new(Inner {
                outcome,
                connects: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Every query succeeds with `rows`; each must be a JSON object.
    pub fn returning(rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                other => panic!("mock rows must be objects, got {other}"),
            })
            .collect();
        Self::with_outcome(Outcome::Rows(rows))
    }

    pub fn succeeding() -> Self {
        Self::with_outcome(Outcome::Rows(Vec::new()))
    }

    /// Every query fails with an error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self::with_outcome(Outcome::QueryFails(status))
    }

    pub fn unreachable(status: u16) -> Self {
        Self::with_outcome(Outcome::ConnectFails(status))
    }

    pub fn connects(&self) -> usize {
        self.inner.connects.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.inner.queries.lock().unwrap().clone()
    }

    /// The single statement a handler issued.
    pub fn only_query(&self) -> RecordedQuery {
        let queries = self.queries();
        assert_eq!(queries.len(), 1, "expected exactly one query, got {queries:?}");
        queries.into_iter().next().unwrap()
    }
}

pub struct MockConnection {
    inner: Arc<Inner>,
}

impl Database for MockDatabase {
    type Conn = MockConnection;

    async fn connect(&self) -> Result<MockConnection, DbError> {
        self.inner.connects.fetch_add(1, Ordering::SeqCst);
        if let Outcome::ConnectFails(status) = self.inner.outcome {
            return Err(DbError::Status(status));
        }
        Ok(MockConnection { inner: self.inner.clone() })
    }
}

impl Connection for MockConnection {
    async fn query(&mut self, sql: &str, params: Option<&[Param]>) -> Result<Vec<Row>, DbError> {
        self.inner.queries.lock().unwrap().push(RecordedQuery {
            sql: sql.to_string(),
            params: params.map(<[Param]>::to_vec),
        });
        match &self.inner.outcome {
            Outcome::Rows(rows) => Ok(rows.clone()),
            Outcome::QueryFails(status) | Outcome::ConnectFails(status) => {
                Err(DbError::Status(*status))
            }
        }
    }
}

pub fn text(v: &str) -> Param {
    Param::Text(v.to_string())
}
