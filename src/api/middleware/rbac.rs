use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::sync::Arc;
use crate::auth::jwt::Claims;
use crate::auth::rbac::{has_permission, Permission};
use crate::db::Database;
use crate::error::AppError;
use crate::api::AppState;
use super::auth::AuthUser;

async fn authorize<D: Database>(
    parts: &mut Parts,
    state: &Arc<AppState<D>>,
    permission: Permission,
) -> Result<Claims, AppError> {
    let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
    if has_permission(&claims.role, &permission) {
        Ok(claims)
    } else {
        tracing::warn!(user = %claims.username, role = %claims.role, ?permission, "Permission denied");
        Err(AppError::Unauthorized(format!("{:?} permission required", permission)))
    }
}

/// Requires a role that may maintain client records.
pub struct StaffUser(pub Claims);

impl<D: Database> FromRequestParts<Arc<AppState<D>>> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState<D>>) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Permission::ManageClients).await.map(StaffUser)
    }
}

/// Requires the `ADMIN` role. Returns 403 Forbidden otherwise.
pub struct AdminUser(pub Claims);

impl<D: Database> FromRequestParts<Arc<AppState<D>>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState<D>>) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Permission::ManageUsers).await.map(AdminUser)
    }
}
