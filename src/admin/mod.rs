pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, patch, put},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

/// Build the bearer-gated admin API router.
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/api/status", get(get_status))
        .route("/admin/api/leads", get(list_leads))
        .route(
            "/admin/api/leads/{id}",
            patch(update_lead).delete(delete_lead),
        )
        .route("/admin/api/faq", get(list_faq).post(create_faq))
        .route("/admin/api/faq/{id}", put(update_faq).delete(delete_faq))
        .route(
            "/admin/api/projects",
            get(list_projects).post(create_project),
        )
        .route(
            "/admin/api/projects/{id}",
            put(update_project).delete(delete_project),
        )
        .route(
            "/admin/api/templates",
            get(list_templates).post(create_template),
        )
        .route(
            "/admin/api/templates/{id}",
            put(update_template).delete(delete_template),
        )
        .route("/admin/api/analytics", get(get_analytics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .with_state(state)
}
