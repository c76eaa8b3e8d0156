use serde_json::Value;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, Sqlite, SqlitePool, TypeInfo, ValueRef};

use super::provider::{Connection, DbError, Database, Param, Row};

impl Database for SqlitePool {
    type Conn = PoolConnection<Sqlite>;

    async fn connect(&self) -> Result<Self::Conn, DbError> {
        Ok(self.acquire().await?)
    }
}

impl Connection for PoolConnection<Sqlite> {
    async fn query(&mut self, sql: &str, params: Option<&[Param]>) -> Result<Vec<Row>, DbError> {
        let mut query = sqlx::query(sql);
        for param in params.unwrap_or_default() {
            query = match param {
                Param::Null => query.bind(None::<String>),
                Param::Int(v) => query.bind(*v),
                Param::Text(v) => query.bind(v.clone()),
            };
        }

        let rows = query.fetch_all(&mut **self).await?;
        rows.iter().map(decode_row).collect()
    }
}

/// Decode by the runtime storage class; computed columns have no declared type.
fn decode_row(row: &SqliteRow) -> Result<Row, DbError> {
    let mut out = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let kind = raw.type_info().name().to_string();
            match kind.as_str() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get(idx)?;
                    Value::from(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => Value::from(row.try_get::<String, _>(idx)?),
            }
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}
