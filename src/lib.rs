pub mod config;
pub mod database;
pub mod docs;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::database::store::SalaryStore;
use crate::docs::ApiDoc;
use crate::error::Result;
use crate::middleware::{
    cors::cors_layer,
    rate_limit::{rate_limit_middleware, RateLimiter},
};
use crate::services::salary_service::SalaryService;

#[derive(Clone)]
pub struct AppState {
    pub salary_service: SalaryService,
}

impl AppState {
    pub fn new(store: Arc<dyn SalaryStore>) -> Self {
        Self {
            salary_service: SalaryService::new(store),
        }
    }
}

/// The full HTTP surface: public submission and admin routes under the API
/// prefix, plus health and the OpenAPI document at the root.
pub fn app(state: AppState, config: &Config) -> Result<Router> {
    let public_api = Router::new()
        .route("/user/salary", post(routes::salary::submit_salary))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::per_second(config.public_rps),
            rate_limit_middleware,
        ));

    let admin_api = Router::new()
        .route("/admin/salaries", get(routes::salary::list_salaries))
        .route("/admin/salaries/export", get(routes::export::export_salaries))
        .route(
            "/admin/salary/:user_id",
            get(routes::salary::get_salary).put(routes::salary::update_salary),
        )
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::per_second(config.admin_rps),
            rate_limit_middleware,
        ));

    let api = public_api.merge(admin_api);
    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api-doc/openapi.json", get(routes::docs::openapi_json))
        .layer(Extension(Arc::new(ApiDoc::with_prefix(&config.api_prefix))));

    let router = if config.api_prefix == "/" {
        base_routes.merge(api)
    } else {
        base_routes.nest(&config.api_prefix, api)
    };

    Ok(router
        .with_state(state)
        .layer(cors_layer(config.cors_allowed_origin.as_deref())?)
        .layer(TraceLayer::new_for_http()))
}
