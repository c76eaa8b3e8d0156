use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::middleware::auth::AuthUser;
use crate::api::middleware::rbac::AdminUser;
use crate::api::handlers::accept_payload;
use crate::api::AppState;
use crate::db::models::{self, ReferenceCode, User};
use crate::db::{provider, Database, Param};
use crate::error::AppResult;

const LIST_SQL: &str = "SELECT U.ID AS id, U.USERNAME AS userName, U.NAME AS name,
        U.EMAIL AS email, U.ROLE AS roleCode, R.DESCRIPTION AS roleDescription,
        COUNT(J.ID) AS TOTAL_JOBS
    FROM USERS U
    LEFT JOIN CODES R ON R.DOMAIN = 'USER_ROLE' AND R.CODE = U.ROLE
    LEFT JOIN JOBS J ON J.USER_ID = U.ID
    GROUP BY U.ID
    ORDER BY U.NAME ASC";

const INSERT_SQL: &str =
    "INSERT INTO USERS (NAME, USERNAME, EMAIL, PASSWORD, ROLE) VALUES (?, ?, ?, ?, ?)";

// Login name and password are fixed after creation.
const UPDATE_SQL: &str = "UPDATE USERS SET NAME = ?, EMAIL = ?, ROLE = ? WHERE ID = ?";

const DELETE_SQL: &str = "DELETE FROM USERS WHERE ID = ?";

pub const PAGE_SETTINGS_SQL: &str =
    "SELECT * FROM CODES WHERE DOMAIN = 'USER_ROLE' ORDER BY DISPLAY_ORDER ASC";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UserFields {
    fn insert_params(&self) -> Vec<Param> {
        vec![
            self.name.clone().into(),
            self.user_name.clone().into(),
            self.email.clone().into(),
            self.password.clone().into(),
            self.role.clone().into(),
        ]
    }

    fn update_params(&self) -> Vec<Param> {
        vec![
            self.name.clone().into(),
            self.email.clone().into(),
            self.role.clone().into(),
            self.id.into(),
        ]
    }
}

pub async fn list<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: AdminUser,
) -> AppResult<Json<Value>> {
    let rows = provider::run(&state.db, LIST_SQL, None).await?;
    let users: Vec<User> = models::from_rows(rows)?;
    Ok(Json(json!({ "users": users })))
}

pub async fn create<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: AdminUser,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> StatusCode {
    let Some(body) = accept_payload(payload, "user") else {
        return StatusCode::INTERNAL_SERVER_ERROR;
    };
    match provider::run(&state.db, INSERT_SQL, Some(body.insert_params().as_slice())).await {
        Ok(_) => {
            tracing::info!(user = ?body.user_name, "User created");
            StatusCode::OK
        }
        Err(e) => {
            tracing::warn!(error = %e, "User creation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn update<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: AdminUser,
    payload: Result<Json<UserFields>, JsonRejection>,
) -> Json<Value> {
    let Some(body) = accept_payload(payload, "user") else {
        return Json(json!({ "success": false }));
    };
    let success = match provider::run(&state.db, UPDATE_SQL, Some(body.update_params().as_slice())).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, id = ?body.id, "User update failed");
            false
        }
    };
    Json(json!({ "success": success }))
}

pub async fn delete<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: AdminUser,
    Path(id): Path<i64>,
) -> StatusCode {
    match provider::run(&state.db, DELETE_SQL, Some(&[Param::Int(id)][..])).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, id, "User deletion failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Role choices for the user form. Failures degrade to an empty list.
pub async fn page_settings<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    _auth: AuthUser,
) -> Json<Value> {
    let codes = match provider::run(&state.db, PAGE_SETTINGS_SQL, None).await {
        Ok(rows) => models::from_rows::<ReferenceCode>(rows).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Malformed USER_ROLE codes");
            Vec::new()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load USER_ROLE codes");
            Vec::new()
        }
    };
    Json(json!({ "pageSettings": codes }))
}
