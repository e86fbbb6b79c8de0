use crate::{auth, handlers, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    // Report routes sit behind the bearer-token middleware; everything
    // else is public, matching the original route table.
    let report_routes = Router::new()
        .route("/", post(handlers::create_report))
        .route("/my", get(handlers::my_reports))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let api_routes = Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/wards", get(handlers::list_wards))
        .route("/wards/{id}", get(handlers::get_ward))
        .route("/wards/seed", post(handlers::seed_wards))
        .route("/ai/advice", post(handlers::health_advice))
        .nest("/reports", report_routes);

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}
