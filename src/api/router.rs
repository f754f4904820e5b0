use crate::api::handlers;
use crate::api::state::AppState;
use axum::{
    http::{HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-session-token"),
        ]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/planets",
            get(handlers::list_planets).post(handlers::create_planet),
        )
        .route(
            "/planets/:id",
            get(handlers::get_planet)
                .put(handlers::update_planet)
                .delete(handlers::delete_planet),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
