use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use crate::api::AppState;
use crate::auth::jwt::{self, Claims};
use crate::db::models::user::SessionUser;
use crate::db::{provider, Database, Param, Row};
use crate::error::{AppError, AppResult};

const LOGIN_SQL: &str = "SELECT U.ID AS id, U.USERNAME AS userName, U.ROLE AS roleCode
    FROM USERS U
    WHERE U.USERNAME = ? AND U.PASSWORD = ?";

#[derive(Deserialize)]
pub struct LoginRequest {
    login: String,
    password: String,
}

/// Storage failures answer with the status the error carries, bare.
pub async fn login<D: Database>(
    State(state): State<Arc<AppState<D>>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let params = [Param::from(req.login.as_str()), Param::from(req.password.as_str())];
    let rows = match provider::run(&state.db, LOGIN_SQL, Some(&params[..])).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, login = %req.login, "Login query failed");
            return e.status_code().into_response();
        }
    };

    match open_session(&*state, &req.login, rows.into_iter().next()) {
        Ok(body) => body.into_response(),
        Err(e) => e.into_response(),
    }
}

fn open_session<D>(
    state: &AppState<D>,
    login: &str,
    row: Option<Row>,
) -> AppResult<Json<Value>> {
    let row = row.ok_or_else(|| {
        tracing::info!(login = %login, "Rejected login");
        AppError::AuthFailed
    })?;
    let user: SessionUser = serde_json::from_value(Value::Object(row))?;

    let user_id = user.id.map(|id| id.to_string()).unwrap_or_default();
    let username = user.user_name.as_deref().unwrap_or(login);
    let role = user.role_code.unwrap_or_default();

    let claims = Claims::new(&user_id, username, &role, state.jwt_expiry_hours);
    let token = jwt::issue(&claims, &state.jwt_secret)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user = %username, role = %role, "User signed in");
    Ok(Json(json!({
        "token": token,
        "expires_in": state.jwt_expiry_hours.saturating_mul(3600),
        "role": role,
    })))
}

pub async fn logout() -> AppResult<Json<Value>> {
    // JWT is stateless; client just discards the token.
    Ok(Json(json!({"success": true})))
}
