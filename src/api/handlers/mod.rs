pub mod auth;
pub mod clients;
pub mod health;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::Json;

/// Unwraps a create/edit body. A body the extractor cannot decode is logged
/// and handed back as `None` so the caller answers with its failure shape.
pub(crate) fn accept_payload<T>(payload: Result<Json<T>, JsonRejection>, entity: &str) -> Option<T> {
    match payload {
        Ok(Json(body)) => Some(body),
        Err(e) => {
            tracing::warn!(error = %e, entity, "Rejected request payload");
            None
        }
    }
}
