use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::middleware::rbac::StaffUser;
use crate::api::handlers::accept_payload;
use crate::api::AppState;
use crate::db::models::{self, Client};
use crate::db::{provider, Database, Param};
use crate::error::AppResult;

const LIST_SQL: &str = "SELECT C.ID AS id, C.NAME AS name, C.ADDRESS AS address,
        C.POST_CODE AS postCode, C.EMAIL AS email, C.NIF AS nif,
        COUNT(J.ID) AS TOTAL_JOBS,
        COALESCE(SUM(CASE WHEN J.STATUS = 'FINALISED' THEN 1 ELSE 0 END), 0) AS TOTAL_JOBS_FINALISED
    FROM CLIENTS C
    LEFT JOIN JOBS J ON J.CLIENT_ID = C.ID
    GROUP BY C.ID
    ORDER BY C.NAME ASC";

const INSERT_SQL: &str =
    "INSERT INTO CLIENTS (NAME, ADDRESS, POST_CODE, EMAIL, NIF) VALUES (?, ?, ?, ?, ?)";

const UPDATE_SQL: &str =
    "UPDATE CLIENTS SET NAME = ?, ADDRESS = ?, POST_CODE = ?, EMAIL = ?, NIF = ? WHERE ID = ?";

const DELETE_SQL: &str = "DELETE FROM CLIENTS WHERE ID = ?";

/// Create/edit payload. Absent fields bind as NULL and are left to the
/// table constraints to reject.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientFields {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub post_code: Option<String>,
    pub email: Option<String>,
    pub nif: Option<String>,
}

impl ClientFields {
    fn insert_params(&self) -> Vec<Param> {
        vec![
            self.name.clone().into(),
            self.address.clone().into(),
            self.post_code.clone().into(),
            self.email.clone().into(),
            self.nif.clone().into(),
        ]
    }

    fn update_params(&self) -> Vec<Param> {
        let mut params = self.insert_params();
        params.push(self.id.into());
        params
    }
}

pub async fn list<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: StaffUser,
) -> AppResult<Json<Value>> {
    let rows = provider::run(&state.db, LIST_SQL, None).await?;
    let clients: Vec<Client> = models::from_rows(rows)?;
    Ok(Json(json!({ "clients": clients })))
}

pub async fn create<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: StaffUser,
    payload: Result<Json<ClientFields>, JsonRejection>,
) -> StatusCode {
    let Some(body) = accept_payload(payload, "client") else {
        return StatusCode::INTERNAL_SERVER_ERROR;
    };
    match provider::run(&state.db, INSERT_SQL, Some(body.insert_params().as_slice())).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Client creation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn update<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: StaffUser,
    payload: Result<Json<ClientFields>, JsonRejection>,
) -> Json<Value> {
    let Some(body) = accept_payload(payload, "client") else {
        return Json(json!({ "success": false }));
    };
    let success = match provider::run(&state.db, UPDATE_SQL, Some(body.update_params().as_slice())).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, id = ?body.id, "Client update failed");
            false
        }
    };
    Json(json!({ "success": success }))
}

pub async fn delete<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: StaffUser,
    Path(id): Path<i64>,
) -> StatusCode {
    match provider::run(&state.db, DELETE_SQL, Some(&[Param::Int(id)][..])).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, id, "Client deletion failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{admin_claims, body_bytes, body_json, extract_json, state};
    use crate::db::mock::{text, MockDatabase};
    use axum::response::IntoResponse;

    fn staff() -> StaffUser {
        StaffUser(admin_claims())
    }

    fn mock_fields() -> ClientFields {
        ClientFields {
            id: None,
            name: Some("Mock Client".into()),
            address: Some("Mock Address".into()),
            post_code: Some("Mock Postcode".into()),
            email: Some("mockclient@example.com".into()),
            nif: Some("123456789".into()),
        }
    }

    #[tokio::test]
    async fn test_list_returns_clients_with_aggregates() {
        let db = MockDatabase::returning(vec![json!({
            "id": 1,
            "name": "Mock Client 1",
            "address": "Mock Address 1",
            "postCode": "Mock Postcode 1",
            "email": "mockclient1@example.com",
            "nif": "123456789",
            "TOTAL_JOBS": 5,
            "TOTAL_JOBS_FINALISED": 2,
        })]);

        let Json(body) = list(State(state(&db)), staff()).await.expect("List should succeed");

        assert_eq!(db.connects(), 1);
        assert_eq!(db.only_query().params, None, "list binds no parameters");
        let clients = body["clients"].as_array().expect("clients array");
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0]["postCode"], "Mock Postcode 1");
        assert_eq!(clients[0]["TOTAL_JOBS"], 5);
        assert_eq!(clients[0]["TOTAL_JOBS_FINALISED"], 2);
    }

    #[tokio::test]
    async fn test_list_failure_is_internal_error() {
        let db = MockDatabase::failing(500);
        let resp = list(State(state(&db)), staff()).await.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_create_binds_fields_in_order() {
        let db = MockDatabase::succeeding();
        let status = create(State(state(&db)), staff(), Ok(Json(mock_fields()))).await;

        assert_eq!(status, StatusCode::OK);
        let resp = status.into_response();
        assert!(body_bytes(resp).await.is_empty());
        assert_eq!(
            db.only_query().params,
            Some(vec![
                text("Mock Client"),
                text("Mock Address"),
                text("Mock Postcode"),
                text("mockclient@example.com"),
                text("123456789"),
            ])
        );
    }

    #[tokio::test]
    async fn test_create_empty_payload_failure_is_500() {
        let db = MockDatabase::failing(500);
        let status = create(State(state(&db)), staff(), Ok(Json(ClientFields::default()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.only_query().params, Some(vec![Param::Null; 5]));
    }

    #[tokio::test]
    async fn test_update_appends_id_last() {
        let db = MockDatabase::succeeding();
        let fields = ClientFields { id: Some(1), ..mock_fields() };

        let Json(body) = update(State(state(&db)), staff(), Ok(Json(fields))).await;

        assert_eq!(body, json!({ "success": true }));
        assert_eq!(
            db.only_query().params,
            Some(vec![
                text("Mock Client"),
                text("Mock Address"),
                text("Mock Postcode"),
                text("mockclient@example.com"),
                text("123456789"),
                Param::Int(1),
            ])
        );
    }

    #[tokio::test]
    async fn test_undecodable_create_body_is_500_without_query() {
        let db = MockDatabase::succeeding();
        let payload = extract_json::<ClientFields>(r#"{"name": 5, "email": "a@b"}"#).await;
        assert!(payload.is_err());

        let status = create(State(state(&db)), staff(), payload).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_bytes(status.into_response()).await.is_empty());
        assert_eq!(db.connects(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_update_body_reports_unsuccessful() {
        let db = MockDatabase::succeeding();
        let payload = extract_json::<ClientFields>(r#"{"id": "1", "name": "Mock Client"}"#).await;

        let Json(body) = update(State(state(&db)), staff(), payload).await;

        assert_eq!(body, json!({ "success": false }));
        assert!(db.queries().is_empty());
    }

    #[tokio::test]
    async fn test_update_failure_reports_unsuccessful() {
        let db = MockDatabase::failing(500);
        let Json(body) = update(State(state(&db)), staff(), Ok(Json(ClientFields::default()))).await;
        assert_eq!(body, json!({ "success": false }));
    }

    #[tokio::test]
    async fn test_delete_binds_only_id() {
        let db = MockDatabase::succeeding();
        let status = delete(State(state(&db)), staff(), Path(1)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(db.only_query().params, Some(vec![Param::Int(1)]));
    }

    #[tokio::test]
    async fn test_delete_failure_is_500() {
        let db = MockDatabase::failing(500);
        let status = delete(State(state(&db)), staff(), Path(1)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_connect_failure_takes_the_error_path() {
        let db = MockDatabase::unreachable(503);
        let status = create(State(state(&db)), staff(), Ok(Json(mock_fields()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.connects(), 1);
        assert!(db.queries().is_empty());
    }
}
