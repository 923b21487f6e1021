use std::sync::Arc;

use axum::{Extension, Json};
use utoipa::openapi::OpenApi;

pub async fn openapi_json(Extension(doc): Extension<Arc<OpenApi>>) -> Json<OpenApi> {
    Json(doc.as_ref().clone())
}
