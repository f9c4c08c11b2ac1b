use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_calculation::create_calculation;
use super::handlers::delete_calculation::delete_calculation;
use super::handlers::get_calculation::get_calculation;
use super::handlers::health::health;
use super::handlers::index::index;
use super::handlers::list_calculations::list_calculations;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_calculation::update_calculation;
use super::middleware::authenticate as auth_middleware;
use crate::domain::calculation::service::CalculationService;
use crate::domain::user::service::AccountService;
use crate::outbound::repositories::calculation::SqliteCalculationRepository;
use crate::outbound::repositories::user::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<SqliteUserRepository>>,
    pub calculation_service: Arc<CalculationService<SqliteCalculationRepository>>,
    pub token_service: Arc<TokenService>,
}

pub fn create_router(
    account_service: Arc<AccountService<SqliteUserRepository>>,
    calculation_service: Arc<CalculationService<SqliteCalculationRepository>>,
    token_service: Arc<TokenService>,
) -> Router {
    let state = AppState {
        account_service,
        calculation_service,
        token_service,
    };

    let public_routes = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/token", post(login));

    // Both the bare and trailing-slash collection paths are served; axum
    // does not redirect between them
    let protected_routes = Router::new()
        .route(
            "/calculations",
            post(create_calculation).get(list_calculations),
        )
        .route(
            "/calculations/",
            post(create_calculation).get(list_calculations),
        )
        // PUT and PATCH share one handler; both apply partial semantics
        .route(
            "/calculations/:calculation_id",
            get(get_calculation)
                .put(update_calculation)
                .patch(update_calculation)
                .delete(delete_calculation),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/static", ServeDir::new("static"))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
